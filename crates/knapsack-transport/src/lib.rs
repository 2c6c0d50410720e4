//! Knapsack Transport Layer
//!
//! Network transport for reading contract storage through raw JSON-RPC
//! `eth_call` requests.
//!
//! This crate provides:
//! - [`CallTransport`]: the seam the fetcher talks to, so tests can swap in
//!   an in-memory contract
//! - [`rpc`]: the blocking [`JsonRpcClient`] used against a real node
//!
//! # Example
//!
//! ```ignore
//! use knapsack_transport::{CallTransport, JsonRpcClient, RpcConfig};
//!
//! let client = JsonRpcClient::new(RpcConfig::from_env()?);
//! let result_hex = client.call("0x5FbDB2315678afecb367f032d93F642f64180aa3", &calldata)?;
//! ```

pub mod error;
pub mod rpc;

pub use error::TransportError;
pub use rpc::{JsonRpcClient, RpcConfig};

/// A read-only contract call.
///
/// Implementations send `data` to the contract at `to` and return the raw
/// result exactly as the node reported it (a hex string). Any failure,
/// including an explicit error object in the response, is a
/// [`TransportError`]; implementations must not retry or substitute a value.
pub trait CallTransport {
    fn call(&self, to: &str, data: &[u8]) -> Result<String, TransportError>;
}

impl<T: CallTransport + ?Sized> CallTransport for &T {
    fn call(&self, to: &str, data: &[u8]) -> Result<String, TransportError> {
        (**self).call(to, data)
    }
}

impl<T: CallTransport + ?Sized> CallTransport for Box<T> {
    fn call(&self, to: &str, data: &[u8]) -> Result<String, TransportError> {
        (**self).call(to, data)
    }
}
