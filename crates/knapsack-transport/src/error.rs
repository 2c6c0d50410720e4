use thiserror::Error;

/// Failure of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("RPC request failed: {0}")]
    Http(String),

    /// The node answered with a non-success HTTP status.
    #[error("RPC endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a usable JSON-RPC response.
    #[error("Invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    /// The response carried an explicit `error` object.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}
