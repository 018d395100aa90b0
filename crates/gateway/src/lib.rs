//! Gateway: the HTTP surface of the relay.
//!
//! Routes:
//! - `POST /webhook`            — platform webhook (signature-checked)
//! - `GET  /health`             — liveness + subscriber count
//! - `GET  /subscribers`        — list subscribers
//! - `GET  /subscribers/count`  — count subscribers
//! - `DELETE /subscribers/{id}` — administrative delete
//! - `POST /broadcast`          — push a text to every subscriber
//!
//! All domain logic lives in the store/dispatch/router crates; handlers here
//! translate HTTP to those operations and map outcomes to status codes.

pub mod routes;
pub mod server;
pub mod state;

pub use {
    server::{build_app, serve},
    state::AppState,
};
