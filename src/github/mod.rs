//! GitHub data sources
//!
//! - **client**: REST client with token auth and `Link` pagination
//! - **issues**: paginated issue download and field selection
//! - **repository**: recursive tree listing and blob download

pub mod client;
pub mod issues;
pub mod repository;

pub use client::GitHubClient;
pub use issues::{fetch_issues, select_fields};
pub use repository::{RawRepositoryFile, RepositoryReader};
