//! Request signing commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use concordpay_lib::{serialize, ConcordpayClient, SignatureSchema, REQUEST_SCHEMA, RESPONSE_SCHEMA};

use crate::config::FileSettingsProvider;
use crate::ui;

/// Which fixed schema to apply
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SchemaKind {
    /// merchant_id, order_id, amount, currency_iso, description
    Request,
    /// merchantAccount, orderReference, amount, currency
    Response,
}

impl SchemaKind {
    fn schema(self) -> SignatureSchema<'static> {
        match self {
            Self::Request => REQUEST_SCHEMA,
            Self::Response => RESPONSE_SCHEMA,
        }
    }
}

/// Sign a request payload and print it with `signature` attached
pub fn run(storage_dir: &Path, module_id: &str, input: &str, verbose: bool) -> Result<()> {
    let (mut payload, fields) = super::load_fields(input)?;

    let client = ConcordpayClient::with_module_id(module_id, FileSettingsProvider::new(storage_dir));
    let signature = client
        .request_signature(&fields)
        .context("Cannot sign request")?;

    tracing::debug!(module_id, "request signed");
    if verbose {
        ui::key_value("Signed string", &serialize(&fields, &REQUEST_SCHEMA));
    }

    if let Some(object) = payload.as_object_mut() {
        object.insert(
            "signature".to_string(),
            serde_json::Value::String(signature.into_string()),
        );
    }
    ui::json(&payload);
    Ok(())
}

/// Print the exact string that would be signed
pub fn serialize_only(input: &str, schema: SchemaKind) -> Result<()> {
    let (_, fields) = super::load_fields(input)?;
    println!("{}", serialize(&fields, &schema.schema()));
    Ok(())
}
