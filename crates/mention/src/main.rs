mod cli;
mod color;
mod commands;
mod config;
mod output;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use mention_server::{run_server, ServerConfig};
use output::output_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);

    if let Err(e) = run(&cli) {
        output_error(&e, cli.format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Parse { url } => commands::parse::handle_parse(url, cli.format),
        Commands::Fetch {
            url,
            server,
            base_url,
        } => {
            let config = Config::load(cli.config.clone())?;
            let base_url = base_url.clone().or(config.base_url);
            commands::fetch::handle_fetch(url, *server, base_url, cli.format)
        }
        Commands::Snapshot {
            url,
            out,
            registry,
            base_url,
        } => {
            let config = Config::load(cli.config.clone())?;
            let base_url = base_url.clone().or(config.base_url);
            commands::snapshot::handle_snapshot(
                url,
                out.as_deref(),
                *registry,
                base_url,
                config.views_dir,
                cli.format,
            )
        }
        Commands::Serve {
            bind,
            cors_permissive,
        } => {
            let config = Config::load(cli.config.clone())?;
            serve(bind.clone().or(config.bind.clone()), *cors_permissive, config)
        }
        Commands::Completions { shell } => {
            Cli::generate_completions(*shell);
            Ok(())
        }
    }
}

fn serve(bind: Option<String>, cors_permissive: bool, config: Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut server_config = ServerConfig::default();
    if let Some(bind) = bind {
        server_config.bind_addr = bind
            .parse()
            .map_err(|_| anyhow!("Invalid bind address: {}", bind))?;
    }
    server_config.cors_permissive = cors_permissive;
    if let Some(views_dir) = config.views_dir {
        server_config.views_dir = views_dir;
    }
    if let Some(base_url) = config.base_url {
        server_config.self_base_url = Some(base_url);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_server(server_config))?;
    Ok(())
}
