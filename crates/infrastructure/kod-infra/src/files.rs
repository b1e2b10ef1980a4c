use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use kod_core::LoadError;
use tracing::debug;

use crate::CatalogSource;

/// Catalog documents read from a directory laid out like the site root.
pub struct FileCatalogSource {
    root: Utf8PathBuf,
}

impl FileCatalogSource {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Site-relative resources never escape the root.
    fn resolve(&self, resource: &str) -> Result<Utf8PathBuf, LoadError> {
        let rel = Utf8Path::new(resource.trim_start_matches('/'));
        let escapes = rel
            .components()
            .any(|c| !matches!(c, camino::Utf8Component::Normal(_)));
        if escapes || rel.as_str().is_empty() {
            return Err(LoadError::Network(format!("refusing resource path {resource}")));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(resource)?;
        debug!("reading {path}");
        tokio::fs::read(path.as_std_path())
            .await
            .map_err(|e| LoadError::Network(format!("{path}: {e}")))
    }

    fn describe(&self) -> String {
        self.root.to_string()
    }
}
