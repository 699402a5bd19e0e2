pub mod generator;
pub mod health;
pub mod resource;
