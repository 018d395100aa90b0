use std::sync::Arc;

use {
    courier_subscribers::SubscriberStore,
    futures::{StreamExt, stream},
    tracing::{info, warn},
};

use crate::{
    error::{Error, Result},
    transport::Transport,
};

/// Default number of overlapping pushes during a broadcast.
pub const DEFAULT_BROADCAST_PARALLELISM: usize = 4;

/// Outcome of one broadcast: everyone targeted, everyone reached, and the
/// identifiers that could not be reached, in snapshot order. Ephemeral —
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    pub total: usize,
    pub success: usize,
    pub failed: Vec<String>,
}

/// Sends replies and pushes, swallowing transport failures into booleans so
/// the serving path never crashes on an unreachable platform.
pub struct Dispatcher {
    store: Arc<dyn SubscriberStore>,
    transport: Arc<dyn Transport>,
    parallelism: usize,
}

impl Dispatcher {
    #[must_use]
    pub fn new(store: Arc<dyn SubscriberStore>, transport: Arc<dyn Transport>) -> Self {
        Self {
            store,
            transport,
            parallelism: DEFAULT_BROADCAST_PARALLELISM,
        }
    }

    /// Set how many broadcast pushes may be in flight at once.
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    /// Send one reply through a single-use reply handle. Returns `false` on
    /// any transport failure (expired token included); the failure is logged,
    /// never raised.
    pub async fn reply_to(&self, reply_token: &str, text: &str) -> bool {
        match self.transport.send_reply(reply_token, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "reply send failed");
                false
            },
        }
    }

    /// Send one out-of-band push to a subscriber. Same contract as
    /// [`Self::reply_to`].
    pub async fn push_to(&self, to: &str, text: &str) -> bool {
        match self.transport.send_push(to, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(to, error = %e, "push send failed");
                false
            },
        }
    }

    /// Push `text` to every subscriber in one membership snapshot, taken at
    /// broadcast start. Subscribers added or removed mid-broadcast are not
    /// re-read. Sends overlap up to the configured parallelism; the failed
    /// list keeps snapshot order regardless.
    ///
    /// Partial failure is a normal outcome. The only fatal case is empty
    /// input text, rejected before any send.
    pub async fn broadcast(&self, text: &str) -> Result<BroadcastReport> {
        if text.trim().is_empty() {
            return Err(Error::EmptyBroadcast);
        }

        let targets = self.store.list().await;
        let total = targets.len();
        let outcomes: Vec<(String, bool)> = stream::iter(targets)
            .map(|id| async move {
                let sent = self.push_to(&id, text).await;
                (id, sent)
            })
            .buffered(self.parallelism)
            .collect()
            .await;

        let mut report = BroadcastReport {
            total,
            success: 0,
            failed: Vec::new(),
        };
        for (id, sent) in outcomes {
            if sent {
                report.success += 1;
            } else {
                report.failed.push(id);
            }
        }
        info!(
            total = report.total,
            success = report.success,
            failed = report.failed.len(),
            "broadcast finished"
        );
        Ok(report)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use {courier_subscribers::MemorySubscriberStore, tokio::sync::Mutex};

    use super::*;

    /// Transport fake that fails pushes to a configured set of identifiers
    /// and records everything it was asked to send.
    #[derive(Default)]
    struct FlakyTransport {
        fail_for: HashSet<String>,
        sent: Mutex<Vec<String>>,
    }

    impl FlakyTransport {
        fn failing_for<const N: usize>(ids: [&str; N]) -> Self {
            Self {
                fail_for: ids.iter().map(ToString::to_string).collect(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Transport for FlakyTransport {
        async fn send_reply(&self, reply_token: &str, _text: &str) -> anyhow::Result<()> {
            if self.fail_for.contains(reply_token) {
                anyhow::bail!("reply token rejected");
            }
            self.sent.lock().await.push(reply_token.to_string());
            Ok(())
        }

        async fn send_push(&self, to: &str, _text: &str) -> anyhow::Result<()> {
            if self.fail_for.contains(to) {
                anyhow::bail!("unreachable recipient");
            }
            self.sent.lock().await.push(to.to_string());
            Ok(())
        }
    }

    fn dispatcher_over(
        ids: &[&str],
        transport: FlakyTransport,
    ) -> (Dispatcher, Arc<FlakyTransport>) {
        let store = Arc::new(MemorySubscriberStore::with_ids(ids.iter().copied()));
        let transport = Arc::new(transport);
        let dispatcher = Dispatcher::new(store, Arc::clone(&transport) as Arc<dyn Transport>);
        (dispatcher, transport)
    }

    #[tokio::test]
    async fn empty_text_performs_no_sends() {
        let (dispatcher, transport) =
            dispatcher_over(&["U1", "U2"], FlakyTransport::default());

        assert!(matches!(
            dispatcher.broadcast("").await,
            Err(Error::EmptyBroadcast)
        ));
        assert!(matches!(
            dispatcher.broadcast("   \n").await,
            Err(Error::EmptyBroadcast)
        ));
        assert!(transport.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn partial_failure_is_accounted() {
        let (dispatcher, _transport) =
            dispatcher_over(&["U1", "U2", "U3"], FlakyTransport::failing_for(["U2"]));

        let report = dispatcher.broadcast("hi").await.unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.success, 2);
        assert_eq!(report.failed, vec!["U2"]);
    }

    #[tokio::test]
    async fn failed_ids_keep_snapshot_order() {
        let (dispatcher, _transport) = dispatcher_over(
            &["U1", "U2", "U3", "U4", "U5"],
            FlakyTransport::failing_for(["U4", "U1"]),
        );

        let report = dispatcher.with_parallelism(3).broadcast("hi").await.unwrap();
        assert_eq!(report.failed, vec!["U1", "U4"]);
    }

    #[tokio::test]
    async fn broadcast_over_empty_store_is_a_noop() {
        let (dispatcher, transport) = dispatcher_over(&[], FlakyTransport::default());

        let report = dispatcher.broadcast("hi").await.unwrap();
        assert_eq!(report.total, 0);
        assert_eq!(report.success, 0);
        assert!(report.failed.is_empty());
        assert!(transport.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn reply_failure_becomes_false() {
        let (dispatcher, _transport) =
            dispatcher_over(&[], FlakyTransport::failing_for(["expired-token"]));

        assert!(!dispatcher.reply_to("expired-token", "hi").await);
        assert!(dispatcher.reply_to("fresh-token", "hi").await);
    }
}
