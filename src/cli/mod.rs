//! CLI adapter for repochat
//!
//! One subcommand per interactive app plus configuration helpers.
//!
//! ```text
//!   repochat issues  --owner pydantic --repo pydantic-ai
//!   repochat docs    --display navigator
//!   repochat code    --no-chunk
//!   repochat show-config --format json
//!   repochat completions zsh
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// repochat - Chat with GitHub data from the terminal
///
/// Downloads issues, docs or code from a GitHub repository, indexes
/// them with BM25 and answers questions in an interactive pager.
#[derive(Parser, Debug)]
#[command(name = "repochat")]
#[command(version)]
#[command(about = "Search GitHub issues, docs and code interactively", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log progress (info level) to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Format of log lines written to stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Output format for non-interactive commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the issues of a repository
    Issues(commands::AppArgs),

    /// Search markdown docs (FAQ entries with frontmatter)
    Docs(commands::AppArgs),

    /// Search code, notebooks and docs documented by an LLM
    Code(commands::CodeArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  repochat completions bash > ~/.local/share/bash-completion/completions/repochat
    ///   zsh:   repochat completions zsh > ~/.zfunc/_repochat
    ///   fish:  repochat completions fish > ~/.config/fish/completions/repochat.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::xdg::XdgDirs;

    // Completions need no configuration
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    let xdg = XdgDirs::new();
    xdg.log_paths();
    if let Err(e) = xdg.ensure_dirs_exist() {
        output::print_warning(&format!("Cannot create XDG directories: {e}"));
    }

    let config = Config::load_with_xdg(&xdg)?;

    match command {
        Commands::Issues(args) => commands::run::execute_issues(args, config).await,
        Commands::Docs(args) => commands::run::execute_docs(args, config).await,
        Commands::Code(args) => commands::run::execute_code(args, config).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &config),
        Commands::Completions(_) => Ok(()),
    }
}
