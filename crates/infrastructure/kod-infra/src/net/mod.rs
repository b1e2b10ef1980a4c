use std::time::Duration;

use async_trait::async_trait;
use kod_config::HTTP_TIMEOUT_SECS;
use kod_core::LoadError;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::CatalogSource;

/// Shared client for catalog requests.
pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(concat!("kod/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Normalize a site URL so site-relative resources resolve beneath it.
///
/// `https://host/sub` and `https://host/sub/` both act as the directory
/// `https://host/sub/`, so `/kod_muzik_events.json` lands at
/// `https://host/sub/kod_muzik_events.json`.
pub fn normalize_site_base(site: &str) -> Result<Url, LoadError> {
    let mut url = Url::parse(site)
        .map_err(|e| LoadError::Network(format!("invalid site url {site}: {e}")))?;
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}

/// Catalog documents served over HTTP(S) with a plain GET.
pub struct HttpCatalogSource {
    client: Client,
    base: Url,
}

impl HttpCatalogSource {
    pub fn new(client: Client, site: &str) -> Result<Self, LoadError> {
        Ok(Self {
            client,
            base: normalize_site_base(site)?,
        })
    }

    pub fn resource_url(&self, resource: &str) -> Result<Url, LoadError> {
        self.base
            .join(resource.trim_start_matches('/'))
            .map_err(|e| LoadError::Network(format!("bad resource {resource}: {e}")))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.resource_url(resource)?;
        debug!("GET {url}");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LoadError::Network(format!("{url} request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("{url} answered {status}");
            return Err(LoadError::Network(format!("{url} answered {status}")));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| LoadError::Network(format!("{url} body failed: {e}")))?;
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}
