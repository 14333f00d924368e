//! In-memory version store.

use super::{BoxFuture, DocumentVersion, StoreError, StoreResult, VersionInfo, VersionStore};
use crate::document::DesignDocument;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryVersionStore {
    campaigns: RwLock<HashMap<String, Vec<DocumentVersion>>>,
}

impl MemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Other(format!("Lock error: {e}"))
}

impl VersionStore for MemoryVersionStore {
    fn save_version(
        &self,
        campaign_id: &str,
        title: &str,
        document: &DesignDocument,
    ) -> BoxFuture<'_, StoreResult<u32>> {
        let campaign_id = campaign_id.to_string();
        let title = title.to_string();
        let document = document.clone();
        Box::pin(async move {
            let mut campaigns = self.campaigns.write().map_err(lock_error)?;
            let versions = campaigns.entry(campaign_id.clone()).or_default();
            let version = versions.last().map_or(1, |v| v.info.version + 1);
            versions.push(DocumentVersion {
                info: VersionInfo {
                    campaign_id,
                    version,
                    title,
                },
                document,
            });
            Ok(version)
        })
    }

    fn load_version(&self, campaign_id: &str, version: u32) -> BoxFuture<'_, StoreResult<DocumentVersion>> {
        let campaign_id = campaign_id.to_string();
        Box::pin(async move {
            let campaigns = self.campaigns.read().map_err(lock_error)?;
            campaigns
                .get(&campaign_id)
                .and_then(|versions| versions.iter().find(|v| v.info.version == version))
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("{campaign_id} v{version}")))
        })
    }

    fn latest_version(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<DocumentVersion>> {
        let campaign_id = campaign_id.to_string();
        Box::pin(async move {
            let campaigns = self.campaigns.read().map_err(lock_error)?;
            campaigns
                .get(&campaign_id)
                .and_then(|versions| versions.last())
                .cloned()
                .ok_or(StoreError::NotFound(campaign_id))
        })
    }

    fn list_versions(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<Vec<VersionInfo>>> {
        let campaign_id = campaign_id.to_string();
        Box::pin(async move {
            let campaigns = self.campaigns.read().map_err(lock_error)?;
            Ok(campaigns
                .get(&campaign_id)
                .map(|versions| versions.iter().map(|v| v.info.clone()).collect())
                .unwrap_or_default())
        })
    }

    fn delete_campaign(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<()>> {
        let campaign_id = campaign_id.to_string();
        Box::pin(async move {
            let mut campaigns = self.campaigns.write().map_err(lock_error)?;
            campaigns.remove(&campaign_id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use pollster::block_on;

    #[test]
    fn test_versions_are_numbered() {
        let store = MemoryVersionStore::new();
        let doc = DesignDocument::default();

        assert_eq!(block_on(store.save_version("c1", "first", &doc)).unwrap(), 1);
        assert_eq!(block_on(store.save_version("c1", "second", &doc)).unwrap(), 2);
        assert_eq!(block_on(store.save_version("c2", "other", &doc)).unwrap(), 1);

        let titles: Vec<String> = block_on(store.list_versions("c1"))
            .unwrap()
            .into_iter()
            .map(|info| info.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_load_and_latest() {
        let store = MemoryVersionStore::new();
        let first = DesignDocument::default();
        let second = DesignDocument::default().with_layer(Layer::rect("r", 0.0, 0.0, 1.0, 1.0));
        block_on(store.save_version("c", "a", &first)).unwrap();
        block_on(store.save_version("c", "b", &second)).unwrap();

        assert_eq!(block_on(store.load_version("c", 1)).unwrap().document, first);
        let latest = block_on(store.latest_version("c")).unwrap();
        assert_eq!(latest.info.version, 2);
        assert_eq!(latest.document, second);
    }

    #[test]
    fn test_not_found() {
        let store = MemoryVersionStore::new();
        assert!(matches!(block_on(store.latest_version("none")), Err(StoreError::NotFound(_))));
        assert!(matches!(block_on(store.load_version("none", 1)), Err(StoreError::NotFound(_))));
        assert!(block_on(store.list_versions("none")).unwrap().is_empty());
    }

    #[test]
    fn test_delete_campaign() {
        let store = MemoryVersionStore::new();
        block_on(store.save_version("c", "a", &DesignDocument::default())).unwrap();
        block_on(store.delete_campaign("c")).unwrap();
        assert!(block_on(store.list_versions("c")).unwrap().is_empty());
        assert_eq!(block_on(store.save_version("c", "again", &DesignDocument::default())).unwrap(), 1);
    }
}
