use std::sync::Arc;

use {
    courier_dispatch::Dispatcher, courier_router::EventRouter,
    courier_subscribers::SubscriberStore, secrecy::Secret,
};

/// Shared app state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubscriberStore>,
    pub dispatcher: Arc<Dispatcher>,
    pub router: Arc<EventRouter>,
    /// Channel secret for webhook signature checks.
    pub channel_secret: Secret<String>,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: Arc<dyn SubscriberStore>,
        dispatcher: Arc<Dispatcher>,
        channel_secret: Secret<String>,
    ) -> Self {
        let router = Arc::new(EventRouter::new(
            Arc::clone(&store),
            Arc::clone(&dispatcher),
        ));
        Self {
            store,
            dispatcher,
            router,
            channel_secret,
        }
    }
}
