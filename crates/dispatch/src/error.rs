/// Crate-wide result type for dispatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed dispatch errors.
///
/// Per-recipient send failures are not errors — they are accounted for in
/// [`crate::BroadcastReport`]. Only input validation can fail a dispatch
/// operation outright.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Broadcast text was empty or whitespace-only. Rejected before any send.
    #[error("broadcast text must not be empty")]
    EmptyBroadcast,
}
