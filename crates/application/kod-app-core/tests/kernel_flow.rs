use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use kod_app_core::app_core::{AppCommand, AppStore, DomainEvent};
use kod_app_core::domain::{AppState, BootState, TimelineState};
use kod_app_core::kernel::AppKernel;
use kod_app_core::ports::HistoryPort;
use kod_app_core::{events_page_vm, EventsStatusVm};
use kod_core::error::LoadErrorKind;
use kod_core::{Catalog, FilterChange, LoadError, Locale};
use kod_infra::CatalogSource;

const EVENTS_JSON: &str = r#"{
  "meta": {
    "genres": [{ "tr": "Caz", "en": "Jazz" }, { "tr": "Dünya Müziği", "en": "World Music" }],
    "venues": [{ "tr": "CRR", "en": "CRR" }, { "tr": "Zorlu PSM", "en": "Zorlu PSM" }]
  },
  "events": [
    { "artist": { "tr": "Hiromi", "en": "Hiromi" }, "genre": { "tr": "Caz", "en": "Jazz" },
      "venue": { "tr": "CRR", "en": "CRR" }, "date": "05.10.2025" },
    { "artist": { "tr": "Anoushka Shankar", "en": "Anoushka Shankar" },
      "genre": { "tr": "Dünya Müziği", "en": "World Music" },
      "venue": { "tr": "Zorlu PSM", "en": "Zorlu PSM" }, "date": "12.03.2024" },
    { "artist": { "tr": "Avishai Cohen", "en": "Avishai Cohen" }, "genre": { "tr": "Caz", "en": "Jazz" },
      "venue": { "tr": "Zorlu PSM", "en": "Zorlu PSM" }, "date": "20-11-2024" }
  ]
}"#;

const FUTURE_JSON: &str = r#"{
  "events": [
    { "id": 1, "date": "01-01-2026", "title": { "tr": "Geçmiş", "en": "Past" } },
    { "id": 2, "date": "05-11-2026", "title": { "tr": "Kasım", "en": "November" } },
    { "id": 3, "date": "18-10-2026", "title": { "tr": "Bugün", "en": "Today" } }
  ]
}"#;

/// Serves canned documents; anything not listed is a network failure.
#[derive(Default)]
struct CannedSource {
    docs: HashMap<&'static str, &'static str>,
    latency: Duration,
}

impl CannedSource {
    fn with(mut self, resource: &'static str, body: &'static str) -> Self {
        self.docs.insert(resource, body);
        self
    }

    fn slow(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl CatalogSource for CannedSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, LoadError> {
        tokio::time::sleep(self.latency).await;
        self.docs
            .get(resource)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| LoadError::Network(format!("{resource}: connection refused")))
    }

    fn describe(&self) -> String {
        "canned".into()
    }
}

#[derive(Clone, Default)]
struct RecordingHistory {
    urls: Arc<Mutex<Vec<String>>>,
}

impl RecordingHistory {
    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl HistoryPort for RecordingHistory {
    fn replace(&self, url: &str) {
        self.urls.lock().unwrap().push(url.to_string());
    }
}

fn kernel_at(
    location: &str,
    source: CannedSource,
) -> (AppKernel<CannedSource, RecordingHistory>, AppStore, RecordingHistory) {
    let store = AppStore::new(AppState::from_location(location));
    let history = RecordingHistory::default();
    let kernel = AppKernel::new(store.clone(), source, history.clone()).unwrap();
    (kernel, store, history)
}

fn site() -> CannedSource {
    CannedSource::default()
        .with("/kod_muzik_events.json", EVENTS_JSON)
        .with("/future_events.json", FUTURE_JSON)
}

#[tokio::test]
async fn load_restores_url_state_and_rewrites_the_url() {
    let (mut kernel, store, history) = kernel_at("/en/events?genre=Jazz&year=2025", site());

    kernel.dispatch(AppCommand::LoadCatalog);
    assert!(store.state().boot.is_loading());
    assert!(history.urls().is_empty(), "no URL writes before load");

    kernel.settle().await;

    let state = store.state();
    assert_eq!(state.boot, BootState::Ready);
    assert_eq!(state.locale, Locale::En);
    assert_eq!(state.engine.view().len(), 1);
    assert_eq!(history.urls(), vec!["/en/events?genre=Jazz&year=2025"]);
}

#[tokio::test]
async fn unknown_url_values_are_dropped_from_the_rewritten_url() {
    let (mut kernel, store, history) = kernel_at("/?genre=Polka&venue=CRR&year=1999", site());

    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.settle().await;

    let filters = store.state().engine.state().clone();
    assert_eq!(filters.genre, None);
    assert_eq!(filters.year, None);
    assert_eq!(filters.venue.as_deref(), Some("CRR"));
    assert_eq!(history.urls(), vec!["/?venue=CRR"]);
}

#[tokio::test]
async fn network_failure_is_terminal_and_disables_filters() {
    let (mut kernel, store, history) = kernel_at("/en/events", CannedSource::default());

    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.settle().await;

    let state = store.state();
    match &state.boot {
        BootState::Failed(err) => assert_eq!(err.kind(), LoadErrorKind::Network),
        other => panic!("expected failure, got {other:?}"),
    }

    kernel.dispatch(AppCommand::ChangeFilter(FilterChange::Year(Some(2025))));
    assert_eq!(store.state().engine.state().year, None);
    assert!(history.urls().is_empty());

    let vm = events_page_vm(&store.state());
    assert_eq!(
        vm.status,
        EventsStatusVm::Failed {
            message: "Error loading events".into()
        }
    );
    assert!(!vm.genre.interactive);
}

#[tokio::test]
async fn malformed_catalog_fails_with_malformed_kind() {
    let source = CannedSource::default().with("/kod_muzik_events.json", r#"{ "meta": {} }"#);
    let (mut kernel, store, _history) = kernel_at("/", source);

    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.settle().await;

    match store.state().boot {
        BootState::Failed(err) => assert_eq!(err.kind(), LoadErrorKind::Malformed),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn results_of_a_superseded_load_are_ignored() {
    let (mut kernel, store, history) = kernel_at("/", site());
    kernel.dispatch(AppCommand::LoadCatalog);

    let catalog = Catalog::from_slice(EVENTS_JSON.as_bytes()).unwrap();
    kernel
        .sender()
        .send(DomainEvent::CatalogLoaded {
            load_id: uuid::Uuid::new_v4(),
            catalog: Arc::new(catalog),
        })
        .await
        .unwrap();
    kernel
        .sender()
        .send(DomainEvent::CatalogFailed {
            load_id: uuid::Uuid::new_v4(),
            error: LoadError::Network("stale".into()),
        })
        .await
        .unwrap();
    kernel.tick();

    assert!(store.state().boot.is_loading());
    assert!(history.urls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn artist_typing_settles_once_after_the_debounce() {
    let (mut kernel, store, history) = kernel_at("/", site());
    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.settle().await;
    assert_eq!(history.urls(), vec!["/"]);

    kernel.dispatch(AppCommand::TypeArtist("h".into()));
    kernel.dispatch(AppCommand::TypeArtist("hi".into()));
    kernel.dispatch(AppCommand::TypeArtist("hir".into()));

    let state = store.state();
    assert_eq!(state.artist_input(), "hir");
    assert_eq!(state.engine.state().artist, "", "not applied before the delay");

    kernel.settle().await;

    let state = store.state();
    assert_eq!(state.engine.state().artist, "hir");
    assert_eq!(state.pending_artist, None);
    assert_eq!(state.engine.view().len(), 1);
    assert_eq!(history.urls(), vec!["/", "/?artist=hir"]);
}

#[tokio::test(start_paused = true)]
async fn clearing_filters_discards_pending_artist_text() {
    let (mut kernel, store, history) = kernel_at("/?genre=Jazz", site());
    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.settle().await;

    kernel.dispatch(AppCommand::TypeArtist("hir".into()));
    kernel.dispatch(AppCommand::ClearFilters);

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    kernel.tick();

    let state = store.state();
    assert!(state.engine.state().is_empty());
    assert_eq!(state.artist_input(), "");
    assert_eq!(state.engine.view().len(), 3);
    assert_eq!(history.urls(), vec!["/?genre=Jazz", "/"]);
}

#[tokio::test]
async fn navigation_redetects_locale_and_rewrites_url() {
    let (mut kernel, store, history) = kernel_at("/etkinlikler?year=2024", site());
    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.settle().await;
    assert_eq!(store.state().locale, Locale::Tr);

    kernel.dispatch(AppCommand::Navigate("/en/events".into()));

    let state = store.state();
    assert_eq!(state.locale, Locale::En);
    assert_eq!(state.engine.state().year, Some(2024));
    assert_eq!(
        history.urls(),
        vec!["/etkinlikler?year=2024", "/en/events?year=2024"]
    );
}

#[tokio::test]
async fn navigation_ignores_the_query_of_the_popped_location() {
    let (mut kernel, store, history) = kernel_at("/etkinlikler?year=2024", site());
    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.settle().await;

    kernel.dispatch(AppCommand::Navigate("/en/events?year=2025#list".into()));

    let state = store.state();
    assert_eq!(state.locale, Locale::En);
    assert_eq!(state.path, "/en/events");
    assert_eq!(state.engine.state().year, Some(2024));
    assert_eq!(history.urls().last().map(String::as_str), Some("/en/events?year=2024"));
}

#[tokio::test(start_paused = true)]
async fn artist_typed_while_loading_is_applied_once_the_catalog_arrives() {
    let source = site().slow(Duration::from_secs(1));
    let (mut kernel, store, history) = kernel_at("/?genre=Jazz", source);

    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.dispatch(AppCommand::TypeArtist("hir".into()));

    // The debounce settles at 300 ms, well before the fetch completes.
    while store.state().boot.is_loading() {
        kernel.settle().await;
    }
    tokio::time::sleep(Duration::from_secs(2)).await;
    kernel.tick();

    let state = store.state();
    assert_eq!(state.engine.state().artist, "hir");
    assert_eq!(state.artist_input(), state.engine.state().artist);
    assert_eq!(state.pending_artist, None);
    assert_eq!(state.engine.view().len(), 1);
    assert_eq!(history.urls(), vec!["/?artist=hir&genre=Jazz"]);
}

#[tokio::test(start_paused = true)]
async fn artist_typed_late_in_loading_settles_after_the_catalog() {
    let source = site().slow(Duration::from_millis(100));
    let (mut kernel, store, history) = kernel_at("/", source);

    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.dispatch(AppCommand::TypeArtist("cohen".into()));

    kernel.settle().await;
    assert!(store.state().boot.is_ready());
    assert_eq!(store.state().artist_input(), "cohen");
    assert_eq!(history.urls(), vec!["/?artist=cohen"]);

    kernel.settle().await;
    let state = store.state();
    assert_eq!(state.engine.state().artist, "cohen");
    assert_eq!(state.pending_artist, None);
    assert_eq!(history.urls(), vec!["/?artist=cohen", "/?artist=cohen"]);
}

#[tokio::test]
async fn timeline_keeps_upcoming_items_in_date_order() {
    let (mut kernel, store, _history) = kernel_at("/en", site());
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    kernel.dispatch(AppCommand::LoadTimeline { today });
    assert_eq!(store.state().timeline, TimelineState::Loading);
    kernel.settle().await;

    match store.state().timeline {
        TimelineState::Ready(items) => {
            let ids: Vec<String> = items.iter().map(|e| e.id.to_string()).collect();
            assert_eq!(ids, vec!["3", "2"]);
        }
        other => panic!("expected items, got {other:?}"),
    }
}

#[tokio::test]
async fn timeline_failure_does_not_touch_the_events_page() {
    let source = CannedSource::default().with("/kod_muzik_events.json", EVENTS_JSON);
    let (mut kernel, store, _history) = kernel_at("/", source);
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    kernel.dispatch(AppCommand::LoadCatalog);
    kernel.settle().await;
    kernel.dispatch(AppCommand::LoadTimeline { today });
    kernel.settle().await;

    let state = store.state();
    assert!(state.boot.is_ready());
    assert!(matches!(state.timeline, TimelineState::Failed(_)));
}
