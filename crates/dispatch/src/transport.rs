use {anyhow::Result, async_trait::async_trait};

/// Outbound message transport for the chat platform.
///
/// Token validity windows and retry policy belong to the implementation, not
/// to the dispatch engine: a returned error simply means "this send did not
/// happen".
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one message through a single-use reply handle tied to an inbound
    /// event.
    async fn send_reply(&self, reply_token: &str, text: &str) -> Result<()>;

    /// Send one message to a subscriber out-of-band.
    async fn send_push(&self, to: &str, text: &str) -> Result<()>;
}
