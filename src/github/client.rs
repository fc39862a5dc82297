//! GitHub REST client.
//!
//! Thin wrapper over `reqwest` that adds the GitHub headers, bearer
//! token auth and `Link` header pagination.

use crate::core::config::GitHubConfig;
use crate::core::error::{ChatError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, LINK};
use reqwest::{StatusCode, Url};
use serde_json::Value;

static NEXT_LINK: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).ok());

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl GitHubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("repochat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Build a client, reading the token from `config.token_env`.
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env).ok();
        if token.is_none() {
            tracing::warn!(
                "{} not set, using unauthenticated GitHub requests (60 per hour)",
                config.token_env
            );
        }
        Self::new(&config.api_url, token)
    }

    /// Absolute URL for an API path such as `/repos/o/r/issues`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// GET a JSON resource, returning the body and the next page URL.
    pub async fn get_json(&self, url: &str) -> Result<(Value, Option<String>)> {
        tracing::debug!("GET {}", url);

        let mut req = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let resp = req.send().await?;
        let status = resp.status();
        let next = next_link(resp.headers());

        if !status.is_success() {
            let rate_limited = is_rate_limited(status, resp.headers());
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::GitHubError(describe_failure(
                url,
                status,
                rate_limited,
                &body,
            )));
        }

        Ok((resp.json().await?, next))
    }

    /// GET every page of a list endpoint, following `rel="next"` links.
    pub async fn get_paginated(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Value>> {
        let first = Url::parse_with_params(&self.url(path), query)
            .map_err(|e| ChatError::GitHubError(format!("Invalid URL for {path}: {e}")))?;

        let mut items = Vec::new();
        let mut next = Some(first.to_string());
        let mut pages = 0;

        while let Some(url) = next {
            let (page, link) = self.get_json(&url).await?;
            let Value::Array(page_items) = page else {
                return Err(ChatError::GitHubError(format!(
                    "Expected a JSON array from {url}"
                )));
            };

            pages += 1;
            tracing::debug!("Page {}: {} items", pages, page_items.len());
            items.extend(page_items);
            next = link;
        }

        tracing::info!("Fetched {} items from {} ({} pages)", items.len(), path, pages);
        Ok(items)
    }
}

/// Extract the `rel="next"` target from a `Link` header.
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    let pattern = NEXT_LINK.as_ref()?;
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| pattern.captures(v).map(|c| c[1].to_string()))
}

fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && headers
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                == Some("0"))
}

fn describe_failure(url: &str, status: StatusCode, rate_limited: bool, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    let hint = if rate_limited {
        " (rate limit exceeded; set GITHUB_API_TOKEN)"
    } else if status == StatusCode::NOT_FOUND {
        " (check owner and repo)"
    } else {
        ""
    };

    format!("GET {url} returned {}: {message}{hint}", status.as_u16())
}
