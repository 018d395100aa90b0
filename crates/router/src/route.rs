use std::sync::Arc;

use {
    courier_common::Event,
    courier_dispatch::Dispatcher,
    courier_subscribers::SubscriberStore,
    tracing::info,
};

use crate::replies;

/// Stateless dispatcher over decoded platform events.
pub struct EventRouter {
    store: Arc<dyn SubscriberStore>,
    dispatcher: Arc<Dispatcher>,
}

impl EventRouter {
    #[must_use]
    pub fn new(store: Arc<dyn SubscriberStore>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Handle one event. Never fails: store errors degrade inside the store,
    /// and reply failures are logged by the dispatcher.
    pub async fn handle(&self, event: Event) {
        match event {
            Event::Follow {
                user_id,
                reply_token,
            } => {
                let newly_added = self.store.add(&user_id).await;
                info!(user_id, newly_added, "follow event");
                let text = if newly_added {
                    replies::WELCOME
                } else {
                    replies::WELCOME_BACK
                };
                self.dispatcher.reply_to(&reply_token, text).await;
            },
            Event::Unfollow { user_id } => {
                let removed = self.store.remove(&user_id).await;
                info!(user_id, removed, "unfollow event");
                // No reply: the unfollowing party can no longer receive one.
            },
            Event::Text {
                user_id,
                reply_token,
                text,
            } => {
                // Re-register on any inbound message, covering a previously
                // removed subscriber re-engaging.
                self.store.add(&user_id).await;
                info!(user_id, "text message event");
                let reply = replies::reply_for_text(&user_id, &text);
                self.dispatcher.reply_to(&reply_token, &reply).await;
            },
        }
    }
}
