//! CLI command implementations

pub mod configure;
pub mod sign;
pub mod verify;

use std::io::Read;

use anyhow::{Context, Result};
use concordpay_lib::FieldSource;

/// Read a JSON payload from a file, or from stdin when `input` is `-`
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
}

/// Parse a JSON payload into a field source
pub fn load_fields(input: &str) -> Result<(serde_json::Value, FieldSource)> {
    let raw = read_input(input)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Payload is not valid JSON")?;
    let fields = FieldSource::from_json(value.clone()).context("Unsupported payload shape")?;
    Ok((value, fields))
}
