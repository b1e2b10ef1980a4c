use std::sync::Arc;

use kod_config::{EVENTS_RESOURCE, FUTURE_EVENTS_RESOURCE};
use kod_core::query::replacement_url;
use kod_core::timeline::upcoming;
use kod_core::FilterChange;
use kod_infra::{load_catalog, load_future_catalog, CatalogSource};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app_core::{AppCommand, AppStore, DomainEvent};
use crate::debounce::Debouncer;
use crate::domain::LoadId;
use crate::ports::HistoryPort;

/// Turns commands into domain events, performing the side effects the pure
/// reducer cannot: the catalog fetch, the debounce timer and URL replacement.
pub struct AppKernel<C, H> {
    pub store: AppStore,
    source: Arc<C>,
    history: Arc<H>,
    runtime: Handle,
    debouncer: Debouncer<DomainEvent>,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

impl<C, H> AppKernel<C, H>
where
    C: CatalogSource,
    H: HistoryPort,
{
    pub fn new(store: AppStore, source: C, history: H) -> anyhow::Result<Self> {
        let runtime = crate::async_runtime::runtime_handle()?;
        let (tx, rx) = mpsc::channel(100);
        let debouncer = Debouncer::spawn(&runtime, kod_config::artist_debounce(), tx.clone());
        Ok(Self {
            store,
            source: Arc::new(source),
            history: Arc::new(history),
            runtime,
            debouncer,
            tx,
            rx,
        })
    }

    pub fn dispatch(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::LoadCatalog => {
                let load_id: LoadId = uuid::Uuid::new_v4();
                self.store
                    .apply(DomainEvent::CatalogLoadingStarted { load_id });

                let tx = self.tx.clone();
                let source = self.source.clone();
                self.runtime.spawn(async move {
                    let ev = match load_catalog(&*source, EVENTS_RESOURCE).await {
                        Ok(catalog) => DomainEvent::CatalogLoaded {
                            load_id,
                            catalog: Arc::new(catalog),
                        },
                        Err(error) => {
                            warn!("events catalog unavailable: {error}");
                            DomainEvent::CatalogFailed { load_id, error }
                        }
                    };
                    let _ = tx.send(ev).await;
                });
            }

            AppCommand::TypeArtist(text) => {
                self.store.apply(DomainEvent::ArtistTyped(text.clone()));
                self.debouncer
                    .push(DomainEvent::FilterChanged(FilterChange::Artist(text)));
            }

            AppCommand::ChangeFilter(change) => {
                if matches!(change, FilterChange::Artist(_)) {
                    self.debouncer.cancel();
                }
                self.commit(DomainEvent::FilterChanged(change));
            }

            AppCommand::ClearFilters => {
                self.debouncer.cancel();
                self.commit(DomainEvent::FiltersCleared);
            }

            AppCommand::Navigate(path) => self.commit(DomainEvent::Navigated { path }),

            AppCommand::LoadTimeline { today } => {
                self.store.apply(DomainEvent::TimelineLoadingStarted);

                let tx = self.tx.clone();
                let source = self.source.clone();
                self.runtime.spawn(async move {
                    let ev = match load_future_catalog(&*source, FUTURE_EVENTS_RESOURCE).await {
                        Ok(catalog) => DomainEvent::TimelineLoaded(upcoming(&catalog.events, today)),
                        Err(error) => {
                            warn!("future events unavailable: {error}");
                            DomainEvent::TimelineFailed(error)
                        }
                    };
                    let _ = tx.send(ev).await;
                });
            }
        }
    }

    /// Applies everything that arrived from background work without waiting.
    pub fn tick(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.accept(ev);
        }
    }

    /// Waits for the next background event and applies it.
    pub async fn settle(&mut self) {
        if let Some(ev) = self.rx.recv().await {
            self.accept(ev);
        }
    }

    pub fn sender(&self) -> mpsc::Sender<DomainEvent> {
        self.tx.clone()
    }

    fn accept(&mut self, ev: DomainEvent) {
        if let DomainEvent::CatalogLoaded { load_id, .. } | DomainEvent::CatalogFailed { load_id, .. } =
            &ev
        {
            let current = self.store.with_state(|s| s.load_id);
            if current != Some(*load_id) {
                debug!("ignoring result of superseded load {load_id}");
                return;
            }
        }
        self.commit(ev);
    }

    fn commit(&mut self, ev: DomainEvent) {
        let touches_url = ev.touches_url();
        self.store.apply(ev);
        if touches_url {
            self.sync_url();
        }
    }

    fn sync_url(&self) {
        let url = self.store.with_state(|s| {
            s.boot
                .is_ready()
                .then(|| replacement_url(&s.path, s.engine.state()))
        });
        if let Some(url) = url {
            debug!("replace url -> {url}");
            self.history.replace(&url);
        }
    }
}
