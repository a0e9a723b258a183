use thiserror::Error;

/// Failures reported by or around the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never completed (connection refused, DNS, TLS, timeout)
    /// or the response body could not be decoded.
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store accepted the request but rejected the operation. The
    /// message and details come from the store's own error object.
    #[error("store rejected the operation ({status}): {message}")]
    Remote {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// The store client could not be constructed from the given settings.
    #[error("invalid store configuration: {0}")]
    Config(String),
}
