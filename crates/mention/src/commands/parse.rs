use crate::cli::OutputFormat;
use crate::output::output_result;
use anyhow::Result;
use mention_core::parse_github_url;

pub fn handle_parse(url: &str, format: OutputFormat) -> Result<()> {
    let parsed = parse_github_url(url);
    output_result(&parsed, format);
    Ok(())
}
