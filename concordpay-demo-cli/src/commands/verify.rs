//! Notification verification command

use std::path::Path;

use anyhow::{bail, Context, Result};
use concordpay_lib::protocol::RESPONSE_TYPE_FIELD;
use concordpay_lib::{ConcordpayClient, OrderReference, ValidationResult};

use crate::config::FileSettingsProvider;
use crate::ui;

pub fn run(storage_dir: &Path, module_id: &str, input: &str, verbose: bool) -> Result<()> {
    let (_, fields) = super::load_fields(input)?;

    let client = ConcordpayClient::with_module_id(module_id, FileSettingsProvider::new(storage_dir));
    let result = client
        .validate_response(&fields)
        .context("Cannot validate notification")?;

    let reference = fields.get_scalar("orderReference").unwrap_or_default();

    let outcome = match result {
        ValidationResult::Valid(outcome) => outcome,
        ValidationResult::SignatureMismatch => {
            tracing::warn!(
                module_id,
                order_reference = reference,
                "wrong signature received"
            );
            ui::error("Wrong signature received");
            bail!("An error has occurred during payment");
        }
    };

    ui::header("Notification");
    ui::success("Signature valid");
    if !reference.is_empty() {
        let parsed = OrderReference::parse(reference);
        ui::key_value("Order", parsed.order_id());
        if verbose {
            ui::key_value("Reference", reference);
        }
    }
    if let Some(kind) = fields.get_scalar(RESPONSE_TYPE_FIELD) {
        ui::key_value("Type", kind);
    }
    ui::outcome(&outcome);

    if outcome.is_approved() {
        ui::success("Payment approved");
    } else if outcome.is_transient() {
        ui::info("Payment not settled yet; expect a later notification");
    } else if outcome.is_final() {
        ui::warning("Payment not approved");
    } else {
        tracing::warn!(status = outcome.as_str(), "unrecognized transaction status");
        ui::warning("Unrecognized transaction status");
    }
    Ok(())
}
