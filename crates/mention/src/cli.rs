use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mention",
    version,
    about = "Fetch, normalize, and snapshot GitHub resources"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "MENTION_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a GitHub URL without touching the network
    #[command(visible_alias = "p")]
    Parse {
        /// GitHub URL to classify
        url: String,
    },
    /// Fetch and normalize a GitHub resource
    #[command(visible_alias = "f")]
    Fetch {
        /// GitHub URL to fetch
        url: String,

        /// Route the request through a mention server instead of GitHub
        #[arg(long)]
        server: bool,

        /// Mention server origin (overrides config and environment chain)
        #[arg(long, env = "MENTION_BASE_URL")]
        base_url: Option<String>,
    },
    /// Generate an embeddable snapshot component for a GitHub URL
    #[command(visible_alias = "snap")]
    Snapshot {
        /// GitHub URL to snapshot
        url: String,

        /// Write the component and registry manifest into this directory
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Print the registry manifest instead of the component source
        #[arg(long)]
        registry: bool,

        /// Mention server origin the generator fetches through
        #[arg(long, env = "MENTION_BASE_URL")]
        base_url: Option<String>,
    },
    /// Run the mention HTTP server
    Serve {
        /// Address to bind (host:port)
        #[arg(long)]
        bind: Option<String>,

        /// Allow any CORS origin
        #[arg(long)]
        cors_permissive: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "mention", &mut std::io::stdout());
    }
}
