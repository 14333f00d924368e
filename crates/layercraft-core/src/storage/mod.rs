//! Persisted design versions.
//!
//! A version store keeps whole documents keyed by an opaque campaign id and a
//! monotonically increasing version number. Failures here never touch editor
//! state: the host reports them and the document stays as it was.

mod autoversion;
mod file;
mod memory;

pub use autoversion::{AutoVersioner, DEFAULT_AUTOVERSION_INTERVAL_SECS};
pub use file::FileVersionStore;
pub use memory::MemoryVersionStore;

use crate::document::DesignDocument;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Metadata of a stored version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub campaign_id: String,
    pub version: u32,
    pub title: String,
}

/// A stored version with its document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    #[serde(flatten)]
    pub info: VersionInfo,
    pub document: DesignDocument,
}

/// Trait for version storage backends.
pub trait VersionStore: Send + Sync {
    /// Store `document` as the next version of a campaign and return its
    /// number. Numbers start at 1.
    fn save_version(
        &self,
        campaign_id: &str,
        title: &str,
        document: &DesignDocument,
    ) -> BoxFuture<'_, StoreResult<u32>>;

    /// Load one version.
    fn load_version(&self, campaign_id: &str, version: u32) -> BoxFuture<'_, StoreResult<DocumentVersion>>;

    /// Load the highest-numbered version.
    fn latest_version(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<DocumentVersion>>;

    /// Metadata of every version, oldest first.
    fn list_versions(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<Vec<VersionInfo>>>;

    /// Remove a campaign and all its versions.
    fn delete_campaign(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<()>>;
}
