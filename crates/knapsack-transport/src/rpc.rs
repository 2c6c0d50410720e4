//! JSON-RPC client for `eth_call`.
//!
//! ## Endpoint
//!
//! The node URL is assembled as `base_url ++ api_key`, the layout used by
//! hosted providers such as `https://sepolia.infura.io/v3/<key>`. The key is
//! held as a [`Secret`] and scrubbed from every error this client produces.
//! The endpoint path is scrubbed as well, so a key written straight into the
//! base URL does not leak through HTTP client errors either.
//!
//! ## Usage
//!
//! ```ignore
//! let client = JsonRpcClient::new(RpcConfig::from_env()?);
//! let result_hex = client.call(contract, &calldata)?;
//! ```

use std::time::Duration;

use knapsack_offchain_types::encoding::to_hex_prefixed;
use knapsack_offchain_types::env_utils::{env_string, env_var_or};
use knapsack_offchain_types::Secret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::{CallTransport, TransportError};

/// Default node base URL; the API key is appended to it.
pub const DEFAULT_RPC_URL: &str = "https://sepolia.infura.io/v3/";

/// Default block tag for reads.
pub const DEFAULT_BLOCK_TAG: &str = "latest";

/// Connection settings for [`JsonRpcClient`].
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub base_url: String,
    pub api_key: Secret,
    pub block_tag: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl RpcConfig {
    /// Default request timeout in seconds (can be overridden by env).
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Build a config from the environment.
    ///
    /// - `KNAPSACK_RPC_URL` - node base URL (default: Sepolia Infura)
    /// - `INFURA_API_KEY` - API key appended to the base URL
    /// - `KNAPSACK_BLOCK_TAG` - block tag for `eth_call` (default: `latest`)
    /// - `KNAPSACK_RPC_TIMEOUT_SECS` / `KNAPSACK_RPC_CONNECT_TIMEOUT_SECS`
    ///
    /// A malformed timeout is an error rather than a silent default.
    pub fn from_env() -> anyhow::Result<Self> {
        let (timeout, connect_timeout) = Self::default_timeouts()?;
        Ok(Self {
            base_url: env_string("KNAPSACK_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            api_key: Secret::new(env_string("INFURA_API_KEY").unwrap_or_default()),
            block_tag: env_string("KNAPSACK_BLOCK_TAG")
                .unwrap_or_else(|| DEFAULT_BLOCK_TAG.to_string()),
            timeout,
            connect_timeout,
        })
    }

    /// Config for a fixed URL with no API key and default timeouts.
    pub fn with_url(url: &str) -> Self {
        Self {
            base_url: url.to_string(),
            api_key: Secret::default(),
            block_tag: DEFAULT_BLOCK_TAG.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(Self::DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    fn default_timeouts() -> anyhow::Result<(Duration, Duration)> {
        let timeout_secs = env_var_or("KNAPSACK_RPC_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;
        let connect_secs = env_var_or(
            "KNAPSACK_RPC_CONNECT_TIMEOUT_SECS",
            Self::DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;
        Ok((
            Duration::from_secs(timeout_secs),
            Duration::from_secs(connect_secs),
        ))
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.api_key.expose())
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    method: &'static str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Path and query of `url`, or `None` when it has nothing past the host.
fn url_path(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.find('/')
        .map(|at| &rest[at..])
        .filter(|path| path.len() > 1)
}

/// Blocking JSON-RPC client.
#[derive(Clone)]
pub struct JsonRpcClient {
    config: RpcConfig,
    /// Full endpoint path, including any key appended to it.
    endpoint_path: Secret,
    agent: ureq::Agent,
}

impl JsonRpcClient {
    pub fn new(config: RpcConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .timeout_connect(config.connect_timeout)
            .build();
        let endpoint_path = Secret::new(url_path(&config.endpoint()).unwrap_or_default());
        Self {
            config,
            endpoint_path,
            agent,
        }
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    fn post(&self, body: &JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let redact = |s: String| {
            self.config
                .api_key
                .redact(&self.endpoint_path.redact(&s))
        };

        let response = self
            .agent
            .post(&self.config.endpoint())
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(status, resp) => TransportError::Status {
                    status,
                    body: redact(resp.into_string().unwrap_or_default()),
                },
                ureq::Error::Transport(t) => TransportError::Http(redact(t.to_string())),
            })?;

        response
            .into_json::<JsonRpcResponse>()
            .map_err(|e| TransportError::InvalidResponse(redact(e.to_string())))
    }
}

impl CallTransport for JsonRpcClient {
    fn call(&self, to: &str, data: &[u8]) -> Result<String, TransportError> {
        let body = call_request(to, data, &self.config.block_tag);
        trace!(to, bytes = data.len(), "eth_call");
        let response = self.post(&body)?;
        interpret_response(response)
    }
}

fn call_request(to: &str, data: &[u8], block_tag: &str) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0",
        method: "eth_call",
        params: serde_json::json!([
            { "to": to, "data": to_hex_prefixed(data) },
            block_tag
        ]),
        id: 1,
    }
}

fn interpret_response(response: JsonRpcResponse) -> Result<String, TransportError> {
    if let Some(err) = response.error {
        return Err(TransportError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    match response.result {
        Some(Value::String(hex)) => Ok(hex),
        Some(other) => Err(TransportError::InvalidResponse(format!(
            "result is not a string: {}",
            other
        ))),
        None => Err(TransportError::InvalidResponse(
            "response has neither result nor error".to_string(),
        )),
    }
}
