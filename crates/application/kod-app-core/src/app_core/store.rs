use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::AppState;

use super::{events::DomainEvent, reducer::reduce};

#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Mutex<AppState>>,
}

impl AppStore {
    pub fn new(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    // Poisoning is ignored: `apply` only ever stores a fully reduced state.
    fn guard(&self) -> MutexGuard<'_, AppState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> AppState {
        self.guard().clone()
    }

    pub fn apply(&self, ev: DomainEvent) {
        let mut guard = self.guard();
        let next = reduce(guard.clone(), ev);
        *guard = next;
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.guard())
    }
}
