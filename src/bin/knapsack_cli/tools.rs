//! Offline helpers: local solving and page/request codecs.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use knapsack_offchain::abi::{decode_page_hex, encode_page};
use knapsack_offchain::config::{parse_page_size, DEFAULT_MAX_CAPACITY};
use knapsack_offchain::fetcher::{encode_page_request, DEFAULT_PAGE_SIZE, DEFAULT_SELECTOR};
use knapsack_offchain::knapsack::solve;
use knapsack_offchain::output::result_hex;
use knapsack_offchain::unit::parse_capacity;
use knapsack_offchain_types::encoding::{parse_selector, to_hex_prefixed};

use super::{print_json, ItemFile};

#[derive(Parser, Debug)]
pub struct SolveCmd {
    /// JSON file with `values` and `weights` arrays
    #[arg(long)]
    items: PathBuf,

    /// Knapsack capacity (maximum total weight)
    #[arg(long)]
    capacity: String,

    /// Largest accepted capacity
    #[arg(long, default_value_t = DEFAULT_MAX_CAPACITY)]
    max_capacity: u64,
}

impl SolveCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let file = ItemFile::load(&self.items)?;
        let capacity = parse_capacity(&self.capacity)?;
        if capacity > self.max_capacity {
            return Err(anyhow!(
                "Capacity {} exceeds --max-capacity {}",
                capacity,
                self.max_capacity
            ));
        }
        let optimum = solve(&file.values, &file.weights, capacity)?;

        if json_output {
            print_json(&serde_json::json!({
                "success": true,
                "optimum": optimum.to_string(),
                "result": result_hex(optimum),
                "items": file.values.len(),
            }))?;
        } else {
            println!("{}", result_hex(optimum));
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct EncodeRequestCmd {
    /// Page index
    #[arg(long)]
    page: u64,

    /// Items requested per page
    #[arg(long)]
    page_size: Option<String>,

    /// Accessor selector (4 bytes, hex)
    #[arg(long)]
    selector: Option<String>,
}

impl EncodeRequestCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let selector = match &self.selector {
            Some(s) => parse_selector(s).context("--selector")?,
            None => DEFAULT_SELECTOR,
        };
        let page_size = match &self.page_size {
            Some(s) => parse_page_size(s).context("--page-size")?,
            None => DEFAULT_PAGE_SIZE,
        };
        let data = to_hex_prefixed(&encode_page_request(selector, self.page, page_size.get()));

        if json_output {
            print_json(&serde_json::json!({
                "page": self.page,
                "page_size": page_size.get(),
                "data": data,
            }))?;
        } else {
            println!("{}", data);
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct DecodePageCmd {
    /// Raw eth_call result (hex, 0x prefix optional)
    result: String,
}

impl DecodePageCmd {
    pub fn execute(&self) -> Result<()> {
        let page = decode_page_hex(&self.result)?;
        print_json(&serde_json::json!({
            "values": page.values,
            "weights": page.weights,
        }))
    }
}

#[derive(Parser, Debug)]
pub struct EncodePageCmd {
    /// JSON file with `values` and `weights` arrays
    #[arg(long)]
    items: PathBuf,
}

impl EncodePageCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let file = ItemFile::load(&self.items)?;
        let payload = to_hex_prefixed(&encode_page(&file.values, &file.weights));
        if json_output {
            print_json(&serde_json::json!({ "result": payload }))?;
        } else {
            println!("{}", payload);
        }
        Ok(())
    }
}
