//! Issue download.

use crate::core::document::Document;
use crate::core::error::Result;
use crate::github::client::GitHubClient;
use serde_json::Value;

/// Pick nested fields out of an API object.
///
/// Each field is a dot-separated path (`user.login`). The result key
/// replaces dots with underscores (`user_login`). A path that hits a
/// missing key or a non-object along the way yields `null`.
///
/// ```
/// use repochat::github::select_fields;
/// use serde_json::json;
///
/// let item = json!({"user": {"login": "alice"}, "state": "open"});
/// let doc = select_fields(&item, &["user.login".to_string(), "assignee.login".to_string()]);
/// assert_eq!(doc["user_login"], json!("alice"));
/// assert_eq!(doc["assignee_login"], json!(null));
/// ```
pub fn select_fields(item: &Value, fields: &[String]) -> Document {
    fields
        .iter()
        .map(|path| {
            let value = path
                .split('.')
                .try_fold(item, |current, key| current.as_object()?.get(key))
                .cloned()
                .unwrap_or(Value::Null);
            (path.replace('.', "_"), value)
        })
        .collect()
}

/// Result keys produced by [`select_fields`] for `fields`
pub fn selected_keys(fields: &[String]) -> Vec<String> {
    fields.iter().map(|f| f.replace('.', "_")).collect()
}

/// Download every issue of `owner/repo` in `state`, keeping `fields`.
pub async fn fetch_issues(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    state: &str,
    per_page: usize,
    fields: &[String],
) -> Result<Vec<Document>> {
    let path = format!("/repos/{owner}/{repo}/issues");
    let query = [("state", state.to_string()), ("per_page", per_page.to_string())];

    let items = client.get_paginated(&path, &query).await?;
    Ok(items.iter().map(|item| select_fields(item, fields)).collect())
}
