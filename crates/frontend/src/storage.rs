//! Browser-local progress persistence.

use coordplane_shared::progress::{MemoryStore, Progress, ProgressStore, PROGRESS_KEY};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Progress stored in `window.localStorage`, or kept in memory when storage
/// is unavailable (private mode, disabled cookies).
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
    fallback: MemoryStore,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable; progress will not persist");
        }
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }
}

impl ProgressStore for LocalStore {
    fn load(&self) -> Progress {
        let Some(storage) = &self.storage else {
            return self.fallback.load();
        };
        let raw = match storage.get_item(PROGRESS_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = ?e, "Failed to read progress");
                None
            }
        };
        Progress::parse_or_default(raw.as_deref())
    }

    fn save(&mut self, progress: &Progress) {
        let Some(storage) = &self.storage else {
            self.fallback.save(progress);
            return;
        };
        let json = match progress.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize progress");
                return;
            }
        };
        if let Err(e) = storage.set_item(PROGRESS_KEY, &json) {
            tracing::warn!(error = ?e, "Failed to write progress");
        }
    }
}

/// Call `on_change` whenever another tab rewrites the progress key.
///
/// The listener lives for the rest of the page.
pub fn watch_external_changes(mut on_change: impl FnMut() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let listener = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |evt: web_sys::StorageEvent| {
        // A `null` key means the whole storage area was cleared.
        match evt.key() {
            Some(key) if key != PROGRESS_KEY => {}
            _ => on_change(),
        }
    });
    if let Err(e) = window.add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref()) {
        tracing::warn!(error = ?e, "Failed to watch progress changes");
        return;
    }
    listener.forget();
}
