//! GitHub issues search.

use crate::core::config::{Config, IssuesConfig};
use crate::core::document::Document;
use crate::core::error::Result;
use crate::core::index::SearchIndex;
use crate::core::indexing::{build_index, IndexSpec};
use crate::display::results::ResultFields;
use crate::github::{fetch_issues, GitHubClient};
use crate::interactive::{AppSettings, InteractiveSearch};
use async_trait::async_trait;

/// Interactive search over the issues of one repository
pub struct IssuesApp {
    client: GitHubClient,
    config: IssuesConfig,
    per_page: usize,
    settings: AppSettings,
}

impl IssuesApp {
    pub fn new(client: GitHubClient, config: IssuesConfig, per_page: usize, base: AppSettings) -> Self {
        let settings = base
            .with_questions(config.sample_questions.clone())
            .with_fields(ResultFields::new(
                config.content_field.clone(),
                config.title_field.clone(),
            ));

        Self {
            client,
            config,
            per_page,
            settings,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GitHubClient::from_config(&config.github)?;
        let issues = &config.issues;

        let base = AppSettings::new(
            "GitHub Issues Search",
            format!(
                "Search {} issues of {}/{}",
                issues.state, issues.owner, issues.repo
            ),
        )
        .with_display(config.search.display)
        .with_num_results(config.search.num_results);

        Ok(Self::new(client, issues.clone(), config.github.per_page, base))
    }
}

/// Index spec for issue documents: no chunking, one issue per document
pub fn issue_index_spec(config: &IssuesConfig) -> IndexSpec {
    IndexSpec {
        text_fields: config.text_fields.clone(),
        keyword_fields: config.keyword_fields.clone(),
        chunking: None,
    }
}

/// Build the search index over downloaded issues.
pub fn issue_index(issues: Vec<Document>, config: &IssuesConfig) -> Result<SearchIndex> {
    build_index(issues, &issue_index_spec(config))
}

#[async_trait]
impl InteractiveSearch for IssuesApp {
    fn settings(&self) -> &AppSettings {
        &self.settings
    }

    async fn load_data(&self) -> Result<SearchIndex> {
        let issues = fetch_issues(
            &self.client,
            &self.config.owner,
            &self.config.repo,
            &self.config.state,
            self.per_page,
            &self.config.fields,
        )
        .await?;

        tracing::info!(
            "Downloaded {} issues from {}/{}",
            issues.len(),
            self.config.owner,
            self.config.repo
        );

        issue_index(issues, &self.config)
    }
}
