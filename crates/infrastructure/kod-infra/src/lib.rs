pub mod files;
pub mod net;

use async_trait::async_trait;
use kod_core::timeline::FutureCatalog;
use kod_core::{Catalog, LoadError};
use tracing::info;

// Re-exports for convenience
pub use files::FileCatalogSource;
pub use net::{default_http_client, HttpCatalogSource};

/// Where the site's static JSON documents come from.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    /// Raw bytes of a site-relative resource such as `/kod_muzik_events.json`.
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, LoadError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

pub async fn load_catalog<S>(source: &S, resource: &str) -> Result<Catalog, LoadError>
where
    S: CatalogSource + ?Sized,
{
    let bytes = source.fetch(resource).await?;
    let catalog = Catalog::from_slice(&bytes)?;
    info!(
        "loaded {} events from {}{}",
        catalog.events.len(),
        source.describe(),
        resource
    );
    Ok(catalog)
}

pub async fn load_future_catalog<S>(source: &S, resource: &str) -> Result<FutureCatalog, LoadError>
where
    S: CatalogSource + ?Sized,
{
    let bytes = source.fetch(resource).await?;
    FutureCatalog::from_slice(&bytes)
}

/// Either an `http(s)://` site or a local directory mirroring the site root.
pub enum SiteSource {
    Http(HttpCatalogSource),
    Files(FileCatalogSource),
}

impl SiteSource {
    pub fn from_location(location: &str) -> Result<Self, LoadError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let client = default_http_client()
                .map_err(|e| LoadError::Network(format!("http client: {e}")))?;
            Ok(SiteSource::Http(HttpCatalogSource::new(client, location)?))
        } else {
            Ok(SiteSource::Files(FileCatalogSource::new(location)))
        }
    }
}

#[async_trait]
impl CatalogSource for SiteSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, LoadError> {
        match self {
            SiteSource::Http(s) => s.fetch(resource).await,
            SiteSource::Files(s) => s.fetch(resource).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            SiteSource::Http(s) => s.describe(),
            SiteSource::Files(s) => s.describe(),
        }
    }
}
