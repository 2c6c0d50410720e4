//! `run`: execute the unit against a live node.

use anyhow::{Context, Result};
use clap::Parser;
use knapsack_offchain::config::{parse_page_size, UnitConfig};
use knapsack_offchain::output::result_hex;
use knapsack_offchain::run_with_args;
use knapsack_offchain_types::encoding::parse_selector;
use knapsack_transport::JsonRpcClient;
use tracing::warn;

use super::print_json;

#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Contract exposing the paged (values, weights) accessor
    contract: String,

    /// Knapsack capacity (maximum total weight)
    capacity: String,

    /// Node base URL; INFURA_API_KEY is appended to it
    #[arg(long, env = "KNAPSACK_RPC_URL")]
    rpc_url: Option<String>,

    /// Block tag for eth_call
    #[arg(long)]
    block_tag: Option<String>,

    /// Accessor selector (4 bytes, hex)
    #[arg(long)]
    selector: Option<String>,

    /// Items requested per page
    #[arg(long)]
    page_size: Option<String>,

    /// Largest accepted capacity
    #[arg(long)]
    max_capacity: Option<u64>,
}

impl RunCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let config = self.config()?;
        if config.rpc.api_key.is_empty() {
            warn!("INFURA_API_KEY is not set; calling the base URL without a key");
        }

        let client = JsonRpcClient::new(config.rpc.clone());
        let args = [self.contract.clone(), self.capacity.clone()];
        let output = run_with_args(&config, &client, &args)?;

        if json_output {
            print_json(&serde_json::json!({
                "success": true,
                "optimum": output.optimum.to_string(),
                "result": result_hex(output.optimum),
                "pages": output.stats.pages,
                "items": output.stats.items,
            }))?;
        } else {
            println!("{}", result_hex(output.optimum));
        }
        Ok(())
    }

    fn config(&self) -> Result<UnitConfig> {
        let mut config = UnitConfig::from_env()?;
        if let Some(url) = &self.rpc_url {
            config.rpc.base_url = url.clone();
        }
        if let Some(tag) = &self.block_tag {
            config.rpc.block_tag = tag.clone();
        }
        if let Some(selector) = &self.selector {
            config.fetch.selector = parse_selector(selector).context("--selector")?;
        }
        if let Some(size) = &self.page_size {
            config.fetch.page_size = parse_page_size(size).context("--page-size")?;
        }
        if let Some(max) = self.max_capacity {
            config.max_capacity = max;
        }
        Ok(config)
    }
}
