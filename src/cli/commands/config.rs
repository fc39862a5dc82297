//! Config command - show current configuration

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use clap::Args;
use std::env;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Human-readable summary lines of `config`
pub fn summary_lines(config: &Config) -> Vec<String> {
    let token_state = |var: &str| {
        if env::var(var).is_ok() {
            colors::success("set")
        } else {
            colors::warning("not set")
        }
    };
    let cache = config
        .cache
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    vec![
        format!("  {}", colors::label("chunking:")),
        format!("    size: {}", colors::number(&config.chunking.size.to_string())),
        format!("    step: {}", colors::number(&config.chunking.step.to_string())),
        format!("    content_field: {}", config.chunking.content_field),
        format!("  {}", colors::label("search:")),
        format!("    num_results: {}", colors::number(&config.search.num_results.to_string())),
        format!("    display: {:?}", config.search.display),
        format!("  {}", colors::label("github:")),
        format!("    api_url: {}", config.github.api_url),
        format!("    {}: {}", config.github.token_env, token_state(&config.github.token_env)),
        format!("  {}", colors::label("llm:")),
        format!("    model: {}", config.llm.model),
        format!("    api_url: {}", config.llm.api_url),
        format!("    {}: {}", config.llm.api_key_env, token_state(&config.llm.api_key_env)),
        format!("  {}", colors::label("apps:")),
        format!("    issues: {}/{} ({})", config.issues.owner, config.issues.repo, config.issues.state),
        format!("    docs: {}/{}", config.docs.owner, config.docs.repo),
        format!("    code: {}/{}", config.code.owner, config.code.repo),
        format!("  {}", colors::label("cache:")),
        format!("    enabled: {}", config.cache.enabled),
        format!("    path: {}", colors::file_path(&cache)),
        format!("  {}", colors::label("parallel:")),
        format!("    max_workers: {}", colors::number(&config.parallel.max_workers.to_string())),
    ]
}

/// Execute the config command
pub fn execute(args: ConfigArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match args.format {
        OutputFormat::Human => {
            print_header("Configuration:");
            for line in summary_lines(config) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    }

    Ok(())
}
