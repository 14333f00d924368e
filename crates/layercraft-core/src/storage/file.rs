//! File-based version store.

use super::{BoxFuture, DocumentVersion, StoreError, StoreResult, VersionInfo, VersionStore};
use crate::document::DesignDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores every version as `<base>/<campaign>/v<n>.json`.
#[derive(Debug, Clone)]
pub struct FileVersionStore {
    base_path: PathBuf,
}

impl FileVersionStore {
    /// Create a store rooted at `base_path`, creating the directory if
    /// needed.
    pub fn new(base_path: PathBuf) -> StoreResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(|e| StoreError::Io(format!("Failed to create storage directory: {e}")))?;
        }
        Ok(Self { base_path })
    }

    /// Create a store in the platform data directory
    /// (e.g. `~/.local/share/layercraft/versions`).
    pub fn default_location() -> StoreResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("layercraft").join("versions"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn campaign_dir(&self, campaign_id: &str) -> PathBuf {
        let safe_id: String = campaign_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(safe_id)
    }

    fn version_path(dir: &Path, version: u32) -> PathBuf {
        dir.join(format!("v{version}.json"))
    }
}

/// Version numbers present in a campaign directory, ascending.
fn stored_versions(dir: &Path) -> StoreResult<Vec<u32>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries =
        fs::read_dir(dir).map_err(|e| StoreError::Io(format!("Failed to read {}: {e}", dir.display())))?;

    let mut versions: Vec<u32> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                path.file_stem()?.to_str()?.strip_prefix('v')?.parse().ok()
            } else {
                None
            }
        })
        .collect();
    versions.sort_unstable();
    Ok(versions)
}

fn read_version(path: &Path) -> StoreResult<DocumentVersion> {
    let json = fs::read_to_string(path).map_err(|e| StoreError::Io(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&json)
        .map_err(|e| StoreError::Serialization(format!("Failed to parse {}: {e}", path.display())))
}

impl VersionStore for FileVersionStore {
    fn save_version(
        &self,
        campaign_id: &str,
        title: &str,
        document: &DesignDocument,
    ) -> BoxFuture<'_, StoreResult<u32>> {
        let dir = self.campaign_dir(campaign_id);
        let campaign_id = campaign_id.to_string();
        let title = title.to_string();
        let document = document.clone();

        Box::pin(async move {
            fs::create_dir_all(&dir).map_err(|e| StoreError::Io(format!("Failed to create {}: {e}", dir.display())))?;
            let version = stored_versions(&dir)?.last().map_or(1, |v| v + 1);
            let entry = DocumentVersion {
                info: VersionInfo {
                    campaign_id,
                    version,
                    title,
                },
                document,
            };
            let json = serde_json::to_string_pretty(&entry).map_err(|e| StoreError::Serialization(e.to_string()))?;
            let path = Self::version_path(&dir, version);
            fs::write(&path, json).map_err(|e| StoreError::Io(format!("Failed to write {}: {e}", path.display())))?;
            log::info!("Saved {} v{} to {}", entry.info.campaign_id, version, path.display());
            Ok(version)
        })
    }

    fn load_version(&self, campaign_id: &str, version: u32) -> BoxFuture<'_, StoreResult<DocumentVersion>> {
        let path = Self::version_path(&self.campaign_dir(campaign_id), version);
        let campaign_id = campaign_id.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StoreError::NotFound(format!("{campaign_id} v{version}")));
            }
            read_version(&path)
        })
    }

    fn latest_version(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<DocumentVersion>> {
        let dir = self.campaign_dir(campaign_id);
        let campaign_id = campaign_id.to_string();

        Box::pin(async move {
            let latest = stored_versions(&dir)?
                .last()
                .copied()
                .ok_or(StoreError::NotFound(campaign_id))?;
            read_version(&Self::version_path(&dir, latest))
        })
    }

    fn list_versions(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<Vec<VersionInfo>>> {
        let dir = self.campaign_dir(campaign_id);

        Box::pin(async move {
            stored_versions(&dir)?
                .into_iter()
                .map(|version| read_version(&Self::version_path(&dir, version)).map(|entry| entry.info))
                .collect()
        })
    }

    fn delete_campaign(&self, campaign_id: &str) -> BoxFuture<'_, StoreResult<()>> {
        let dir = self.campaign_dir(campaign_id);

        Box::pin(async move {
            if dir.exists() {
                fs::remove_dir_all(&dir)
                    .map_err(|e| StoreError::Io(format!("Failed to delete {}: {e}", dir.display())))?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Layer, LayerKind};
    use pollster::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = FileVersionStore::new(dir.path().to_path_buf()).unwrap();
        let doc = DesignDocument::default().with_layer(Layer::rect("r1", 10.0, 10.0, 100.0, 50.0));

        assert_eq!(block_on(store.save_version("spring-sale", "Initial", &doc)).unwrap(), 1);
        assert!(dir.path().join("spring-sale").join("v1.json").exists());

        let loaded = block_on(store.load_version("spring-sale", 1)).unwrap();
        assert_eq!(loaded.document, doc);
        assert_eq!(loaded.info.title, "Initial");
    }

    #[test]
    fn test_css_colors_persist_verbatim() {
        let dir = tempdir().unwrap();
        let store = FileVersionStore::new(dir.path().to_path_buf()).unwrap();
        let doc = DesignDocument::from_json(
            r##"{
                "frame": { "width": 800, "height": 600, "background": "whitesmoke" },
                "layers": [
                    { "id": "half", "type": "rect", "x": 0, "y": 0, "width": 10, "height": 10, "fill": "rgba(255, 0, 0, 0.5)" },
                    { "id": "named", "type": "circle", "x": 0, "y": 0, "radius": 5, "fill": "red" },
                    { "id": "short", "type": "text", "x": 0, "y": 0, "text": "Hi", "fill": "#ABC" }
                ]
            }"##,
        )
        .unwrap();

        block_on(store.save_version("colors", "Mixed", &doc)).unwrap();
        let raw = fs::read_to_string(dir.path().join("colors").join("v1.json")).unwrap();
        for text in ["\"whitesmoke\"", "\"rgba(255, 0, 0, 0.5)\"", "\"red\"", "\"#ABC\""] {
            assert!(raw.contains(text), "{text} missing from {raw}");
        }

        let loaded = block_on(store.latest_version("colors")).unwrap();
        assert_eq!(loaded.document, doc);
        assert_eq!(loaded.document.frame.background.as_str(), "whitesmoke");
        match &loaded.document.layers[1].kind {
            LayerKind::Circle(circle) => assert_eq!(circle.fill.as_str(), "red"),
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_versions_increment_and_list() {
        let dir = tempdir().unwrap();
        let store = FileVersionStore::new(dir.path().to_path_buf()).unwrap();
        let doc = DesignDocument::default();

        for title in ["a", "b", "c"] {
            block_on(store.save_version("camp", title, &doc)).unwrap();
        }
        let versions: Vec<u32> = block_on(store.list_versions("camp"))
            .unwrap()
            .iter()
            .map(|info| info.version)
            .collect();
        assert_eq!(versions, vec![1, 2, 3]);
        assert_eq!(block_on(store.latest_version("camp")).unwrap().info.title, "c");
    }

    #[test]
    fn test_ids_are_sanitised() {
        let dir = tempdir().unwrap();
        let store = FileVersionStore::new(dir.path().to_path_buf()).unwrap();
        block_on(store.save_version("../escape", "x", &DesignDocument::default())).unwrap();
        assert!(dir.path().join("___escape").join("v1.json").exists());
    }

    #[test]
    fn test_not_found_and_delete() {
        let dir = tempdir().unwrap();
        let store = FileVersionStore::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(block_on(store.latest_version("nope")), Err(StoreError::NotFound(_))));
        assert!(matches!(block_on(store.load_version("nope", 3)), Err(StoreError::NotFound(_))));

        block_on(store.save_version("camp", "a", &DesignDocument::default())).unwrap();
        block_on(store.delete_campaign("camp")).unwrap();
        assert!(block_on(store.list_versions("camp")).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = FileVersionStore::new(dir.path().to_path_buf()).unwrap();
        let camp = dir.path().join("camp");
        fs::create_dir_all(&camp).unwrap();
        fs::write(camp.join("v1.json"), "not json").unwrap();
        assert!(matches!(block_on(store.load_version("camp", 1)), Err(StoreError::Serialization(_))));
    }
}
