pub mod colors;
pub mod error;
pub mod models;
pub mod normalize;
pub mod parse;

pub use colors::language_color;
pub use error::NormalizeError;
pub use models::*;
pub use normalize::normalize;
pub use parse::parse_github_url;
