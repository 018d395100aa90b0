//! LINE Messaging API integration: the production [`courier_dispatch::Transport`]
//! over the reply/push endpoints, webhook signature verification, and webhook
//! payload decoding into [`courier_common::Event`] values.

pub mod client;
pub mod error;
pub mod signature;
pub mod webhook;

pub use {
    client::{DEFAULT_API_BASE, LineTransport},
    error::{Error, Result},
    signature::verify_signature,
    webhook::{WebhookPayload, decode_events},
};
