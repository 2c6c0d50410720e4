//! Subcommands and shared helpers for the knapsack-offchain binary.

pub mod run;
pub mod tools;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Local item file: `{ "values": [...], "weights": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFile {
    pub values: Vec<u64>,
    pub weights: Vec<u64>,
}

impl ItemFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read item file {}", path.display()))?;
        let file: ItemFile = serde_json::from_str(&raw)
            .with_context(|| format!("parse item file {}", path.display()))?;
        if file.values.len() != file.weights.len() {
            return Err(anyhow!(
                "Item file {} has {} values but {} weights",
                path.display(),
                file.values.len(),
                file.weights.len()
            ));
        }
        Ok(file)
    }
}

/// Print a JSON value on stdout.
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
