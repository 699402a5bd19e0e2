use crate::cli::OutputFormat;
use crate::output::output_result;
use anyhow::Result;
use github_client::FetchOptions;

pub fn handle_fetch(
    url: &str,
    server: bool,
    base_url: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let client = super::client();
    let options = FetchOptions {
        use_server: server,
        base_url,
    };
    let resource = client.get_resource(url, &options)?;
    output_result(&resource, format);
    Ok(())
}
