use {async_trait::async_trait, tokio::sync::Mutex};

use crate::store::SubscriberStore;

/// In-memory store with the same contract as the file-backed one.
///
/// Nothing survives a restart; meant for tests and for wiring the gateway
/// against a fake backend.
#[derive(Default)]
pub struct MemorySubscriberStore {
    ids: Mutex<Vec<String>>,
}

impl MemorySubscriberStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy in tests.
    #[must_use]
    pub fn with_ids<I: IntoIterator<Item = S>, S: Into<String>>(ids: I) -> Self {
        Self {
            ids: Mutex::new(ids.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl SubscriberStore for MemorySubscriberStore {
    async fn list(&self) -> Vec<String> {
        self.ids.lock().await.clone()
    }

    async fn add(&self, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() {
            return false;
        }
        let mut ids = self.ids.lock().await;
        if ids.iter().any(|existing| existing == id) {
            return false;
        }
        ids.push(id.to_string());
        true
    }

    async fn remove(&self, id: &str) -> bool {
        let id = id.trim();
        let mut ids = self.ids.lock().await;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        ids.len() != before
    }
}
