use async_trait::async_trait;

/// Durable set of subscriber identifiers.
///
/// Implementations must keep membership unique and keep the persisted order
/// stable: identifiers are appended on insert and the relative order of
/// survivors is preserved on removal.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// All currently known subscribers, in persisted order.
    ///
    /// Never fails: a read error degrades to an empty list (and a log line).
    async fn list(&self) -> Vec<String>;

    /// Insert an identifier. Returns `true` if it was newly inserted,
    /// `false` if it already existed (no write happens in that case).
    async fn add(&self, id: &str) -> bool;

    /// Remove an identifier. Returns `true` if it was present.
    async fn remove(&self, id: &str) -> bool;

    /// Number of currently known subscribers.
    async fn count(&self) -> usize {
        self.list().await.len()
    }
}
