//! Repository file download.
//!
//! Lists the repository tree recursively through the git data API,
//! keeps blobs that pass the extension and path filters, and downloads
//! them concurrently.

use crate::core::error::{ChatError, Result};
use crate::core::parallel::{map_bounded, DEFAULT_MAX_WORKERS};
use crate::github::client::GitHubClient;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

/// A downloaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRepositoryFile {
    /// Path relative to the repository root
    pub filename: String,
    pub content: String,
}

impl RawRepositoryFile {
    /// Lowercased extension, empty when there is none
    pub fn extension(&self) -> String {
        extension(&self.filename)
    }
}

/// Entry of `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1`
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Tree {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct Blob {
    content: String,
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

type PathFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Reads matching files from a GitHub repository
pub struct RepositoryReader {
    client: GitHubClient,
    owner: String,
    repo: String,
    branch: Option<String>,
    extensions: HashSet<String>,
    filter: Option<PathFilter>,
    max_workers: usize,
}

impl std::fmt::Debug for RepositoryReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryReader")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("extensions", &self.extensions)
            .field("max_workers", &self.max_workers)
            .finish()
    }
}

impl RepositoryReader {
    pub fn new(client: GitHubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
            branch: None,
            extensions: HashSet::new(),
            filter: None,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    /// Only keep files with these extensions (all files when empty)
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Only keep paths for which `filter` returns true
    pub fn with_filter(mut self, filter: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Whether a repository path passes the extension and path filters
    pub fn accepts(&self, path: &str) -> bool {
        if !self.extensions.is_empty() && !self.extensions.contains(&extension(path)) {
            return false;
        }
        self.filter.as_ref().is_none_or(|f| f(path))
    }

    /// List the repository and download every accepted file.
    ///
    /// Files that fail to download or are not UTF-8 are skipped with a
    /// warning; listing failures are errors.
    pub async fn read(&self) -> Result<Vec<RawRepositoryFile>> {
        let branch = match &self.branch {
            Some(branch) => branch.clone(),
            None => self.default_branch().await?,
        };

        let entries = self.list_tree(&branch).await?;
        let selected: Vec<TreeEntry> = entries
            .into_iter()
            .filter(|e| e.kind == "blob" && self.accepts(&e.path))
            .collect();

        tracing::info!(
            "{}/{}@{}: {} matching files",
            self.owner,
            self.repo,
            branch,
            selected.len()
        );

        let label = format!("Downloading {}/{}", self.owner, self.repo);
        let results = map_bounded(&label, selected, self.max_workers, |entry| async move {
            let content = self.fetch_blob(&entry.sha).await;
            (entry.path, content)
        })
        .await;

        let mut files = Vec::with_capacity(results.len());
        for (filename, content) in results {
            match content {
                Ok(content) => files.push(RawRepositoryFile { filename, content }),
                Err(e) => tracing::warn!("Skipping {}: {}", filename, e),
            }
        }

        Ok(files)
    }

    async fn default_branch(&self) -> Result<String> {
        let url = self.client.url(&format!("/repos/{}/{}", self.owner, self.repo));
        let (body, _) = self.client.get_json(&url).await?;
        let info: RepoInfo = serde_json::from_value(body)?;
        Ok(info.default_branch)
    }

    async fn list_tree(&self, branch: &str) -> Result<Vec<TreeEntry>> {
        let url = self.client.url(&format!(
            "/repos/{}/{}/git/trees/{}?recursive=1",
            self.owner, self.repo, branch
        ));
        let (body, _) = self.client.get_json(&url).await?;
        let tree: Tree = serde_json::from_value(body)?;

        if tree.truncated {
            tracing::warn!(
                "Tree listing for {}/{} was truncated by GitHub; some files are missing",
                self.owner,
                self.repo
            );
        }
        Ok(tree.tree)
    }

    async fn fetch_blob(&self, sha: &str) -> Result<String> {
        let url = self.client.url(&format!(
            "/repos/{}/{}/git/blobs/{}",
            self.owner, self.repo, sha
        ));
        let (body, _) = self.client.get_json(&url).await?;
        let blob: Blob = serde_json::from_value(body)?;
        decode_blob(&blob.content, &blob.encoding)
    }
}

/// Decode the `content` of a git blob response.
pub fn decode_blob(content: &str, encoding: &str) -> Result<String> {
    match encoding {
        "base64" => {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = STANDARD
                .decode(compact)
                .map_err(|e| ChatError::GitHubError(format!("Invalid base64 blob: {e}")))?;
            String::from_utf8(bytes)
                .map_err(|_| ChatError::InvalidDocument("File is not valid UTF-8".to_string()))
        }
        "utf-8" | "utf8" => Ok(content.to_string()),
        other => Err(ChatError::GitHubError(format!(
            "Unsupported blob encoding '{other}'"
        ))),
    }
}

fn extension(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}
