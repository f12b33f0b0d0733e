//! Content-pack loading.
//!
//! Balance tables ship with built-in defaults; a content pack may override
//! any subset of fields through a TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use saga_core::config::BalanceTable;

/// Loads a balance table from TOML. Missing fields keep their defaults.
pub fn load_balance_table(path: &Path) -> Result<BalanceTable> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read balance table {}", path.display()))?;
    parse_balance_table(&text)
        .with_context(|| format!("failed to parse balance table {}", path.display()))
}

/// Parses a balance table from TOML text.
pub fn parse_balance_table(text: &str) -> Result<BalanceTable> {
    let table: BalanceTable = toml::from_str(text).context("invalid balance table TOML")?;
    Ok(table)
}
