//! Dispatch engine: single replies, out-of-band pushes, and best-effort
//! broadcast fan-out with per-recipient accounting.
//!
//! The transport is a trait so the engine is testable against fakes; the
//! production implementation lives in `courier-line`.

pub mod dispatcher;
pub mod error;
pub mod transport;

pub use {
    dispatcher::{BroadcastReport, Dispatcher},
    error::{Error, Result},
    transport::Transport,
};
