//! repochat - chat with GitHub issues, docs and code
//!
//! # Examples
//!
//! ```bash
//! # Search pydantic-ai issues
//! repochat issues
//!
//! # Search FAQ docs, one answer per screen
//! repochat docs --display navigator
//!
//! # Search another repository's code
//! repochat code --owner DataTalksClub --repo llm-zoomcamp
//! ```

use clap::Parser;
use repochat::cli::output::print_error;
use repochat::cli::{run, Cli, LogFormat};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so they never land inside the pager
fn init_logging(verbose: bool, format: LogFormat) {
    let default = if verbose { "repochat=info" } else { "repochat=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
