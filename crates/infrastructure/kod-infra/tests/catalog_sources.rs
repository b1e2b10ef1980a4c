use axum::http::StatusCode;
use axum::{body::Body, routing::get, Router};
use kod_core::error::LoadErrorKind;
use kod_infra::{load_catalog, CatalogSource, FileCatalogSource, HttpCatalogSource};
use std::net::SocketAddr;
use tempfile::tempdir;

const CATALOG: &str = r#"{
  "meta": { "genres": [{ "tr": "Caz", "en": "Jazz" }], "venues": [{ "tr": "CRR", "en": "CRR" }] },
  "events": [
    {
      "artist": { "tr": "Hiromi", "en": "Hiromi" },
      "genre": { "tr": "Caz", "en": "Jazz" },
      "venue": { "tr": "CRR", "en": "CRR" },
      "date": "05.10.2025"
    }
  ]
}"#;

async fn start_server() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route(
            "/site/kod_muzik_events.json",
            get(|| async { Body::from(CATALOG) }),
        )
        .route(
            "/broken/kod_muzik_events.json",
            get(|| async { Body::from(r#"{ "meta": {} }"#) }),
        )
        .route(
            "/gone/kod_muzik_events.json",
            get(|| async { StatusCode::NOT_FOUND }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

#[tokio::test]
async fn http_source_resolves_resources_under_a_subpath() {
    let (addr, _server) = start_server().await;
    let client = kod_infra::default_http_client().unwrap();

    // No trailing slash: the site path must still be treated as a directory.
    let source = HttpCatalogSource::new(client, &format!("http://{addr}/site")).unwrap();
    let catalog = load_catalog(&source, "/kod_muzik_events.json")
        .await
        .expect("catalog loads");

    assert_eq!(catalog.events.len(), 1);
    assert_eq!(catalog.meta.genres[0].key(), "Jazz");
}

#[tokio::test]
async fn non_success_status_is_a_network_error() {
    let (addr, _server) = start_server().await;
    let client = kod_infra::default_http_client().unwrap();
    let source = HttpCatalogSource::new(client, &format!("http://{addr}/gone/")).unwrap();

    let err = load_catalog(&source, "/kod_muzik_events.json")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Network);
    assert!(err.to_string().contains("404"), "{err}");
}

#[tokio::test]
async fn missing_events_key_is_malformed() {
    let (addr, _server) = start_server().await;
    let client = kod_infra::default_http_client().unwrap();
    let source = HttpCatalogSource::new(client, &format!("http://{addr}/broken")).unwrap();

    let err = load_catalog(&source, "/kod_muzik_events.json")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Malformed);
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = kod_infra::default_http_client().unwrap();
    let source = HttpCatalogSource::new(client, &format!("http://{addr}")).unwrap();
    let err = source.fetch("/kod_muzik_events.json").await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Network);
}

#[tokio::test]
async fn file_source_reads_from_site_root() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("kod_muzik_events.json"), CATALOG).unwrap();
    let root = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

    let source = FileCatalogSource::new(root);
    let catalog = load_catalog(&source, "/kod_muzik_events.json")
        .await
        .unwrap();
    assert_eq!(catalog.events[0].year(), Some(2025));

    let err = source.fetch("/future_events.json").await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Network);
}

#[tokio::test]
async fn file_source_refuses_traversal() {
    let dir = tempdir().unwrap();
    let root = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    let source = FileCatalogSource::new(root);

    assert!(source.fetch("/../etc/passwd").await.is_err());
    assert!(source.fetch("/").await.is_err());
}
