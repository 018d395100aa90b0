/// A decoded platform event, as handed to the router by the webhook layer.
///
/// The webhook decoder (`courier-line`) guarantees every variant carries a
/// subscriber identifier; events it cannot attribute to a subscriber are
/// dropped before they reach this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A subscriber added the bot as a friend.
    Follow {
        user_id: String,
        /// Single-use reply handle, valid for one reply within a short window.
        reply_token: String,
    },
    /// A subscriber blocked or removed the bot. No reply is possible.
    Unfollow { user_id: String },
    /// A text message from a subscriber.
    Text {
        user_id: String,
        reply_token: String,
        text: String,
    },
}

impl Event {
    /// The subscriber identifier this event originates from.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::Follow { user_id, .. }
            | Self::Unfollow { user_id }
            | Self::Text { user_id, .. } => user_id,
        }
    }
}
