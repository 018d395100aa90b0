//! Event router: maps decoded platform events to store and dispatch
//! operations and composes the outgoing reply text.
//!
//! Flow: decoded event → subscriber store side effect → reply via the
//! dispatch engine. The router holds no state of its own.

pub mod replies;
pub mod route;

pub use route::EventRouter;
