//! App commands - run one of the interactive search apps

use crate::apps::{CodeApp, DocsApp, IssuesApp};
use crate::core::config::{Config, DisplayMode};
use crate::display::terminal::{detect_key_input, StdoutConsole};
use crate::interactive::{self, InteractiveSearch, Session};
use clap::Args;
use std::io;

/// Arguments shared by every app command
#[derive(Args, Debug, Clone, Default)]
pub struct AppArgs {
    /// Repository owner (overrides the config file)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name (overrides the config file)
    #[arg(long)]
    pub repo: Option<String>,

    /// How results are shown
    #[arg(long, value_enum)]
    pub display: Option<DisplayMode>,

    /// Number of results per question
    #[arg(long, short = 'k')]
    pub num_results: Option<usize>,
}

/// Arguments for the code command
#[derive(Args, Debug, Clone, Default)]
pub struct CodeArgs {
    #[command(flatten)]
    pub app: AppArgs,

    /// Index whole documents instead of overlapping windows
    #[arg(long)]
    pub no_chunk: bool,
}

impl AppArgs {
    /// Apply overrides to the search settings and one app's repository.
    fn apply(&self, config: &mut Config, select: fn(&mut Config) -> (&mut String, &mut String)) {
        if let Some(display) = self.display {
            config.search.display = display;
        }
        if let Some(num_results) = self.num_results {
            config.search.num_results = num_results;
        }

        let (owner, repo) = select(config);
        if let Some(o) = &self.owner {
            *owner = o.clone();
        }
        if let Some(r) = &self.repo {
            *repo = r.clone();
        }
    }
}

/// Apply `issues` arguments to a loaded configuration
pub fn issues_config(args: &AppArgs, mut config: Config) -> crate::Result<Config> {
    args.apply(&mut config, |c| (&mut c.issues.owner, &mut c.issues.repo));
    config.validate()?;
    Ok(config)
}

/// Apply `docs` arguments to a loaded configuration
pub fn docs_config(args: &AppArgs, mut config: Config) -> crate::Result<Config> {
    args.apply(&mut config, |c| (&mut c.docs.owner, &mut c.docs.repo));
    config.validate()?;
    Ok(config)
}

/// Apply `code` arguments to a loaded configuration
pub fn code_config(args: &CodeArgs, mut config: Config) -> crate::Result<Config> {
    args.app
        .apply(&mut config, |c| (&mut c.code.owner, &mut c.code.repo));
    if args.no_chunk {
        config.code.chunk = false;
    }
    config.validate()?;
    Ok(config)
}

/// Execute the issues command
pub async fn execute_issues(args: AppArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = issues_config(&args, config)?;
    config.log_config();
    run_app(&IssuesApp::from_config(&config)?).await
}

/// Execute the docs command
pub async fn execute_docs(args: AppArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = docs_config(&args, config)?;
    config.log_config();
    run_app(&DocsApp::from_config(&config)?).await
}

/// Execute the code command
pub async fn execute_code(args: CodeArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = code_config(&args, config)?;
    config.log_config();
    run_app(&CodeApp::from_config(&config)?).await
}

/// Run an app against the real terminal.
async fn run_app<A: InteractiveSearch>(app: &A) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut console = StdoutConsole::new();
    let mut keys = detect_key_input();
    let mut rng = rand::rng();

    let mut session = Session {
        prompt: stdin.lock(),
        console: &mut console,
        keys: &mut *keys,
    };

    interactive::run(app, &mut session, &mut rng).await?;
    Ok(())
}
