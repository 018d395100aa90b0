//! Subscriber registry: a durable, concurrency-safe set of subscriber
//! identifiers.
//!
//! The store contract is deliberately infallible: persistence hiccups are
//! logged and degrade to safe defaults (empty list, `false`) so a storage
//! error can never take down the webhook serving path. Callers that need to
//! distinguish "empty" from "unreadable" should watch the logs, not the
//! return values.

pub mod file;
pub mod memory;
pub mod store;

pub use {file::FileSubscriberStore, memory::MemorySubscriberStore, store::SubscriberStore};
