/// Crate-wide result type for LINE API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never completed (connect, timeout, TLS, ...).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("line api rejected the request: status {status}: {detail}")]
    Api { status: u16, detail: String },
}
