//! Payment-method settings commands

use std::path::Path;

use anyhow::{bail, Result};
use concordpay_lib::settings::PaymentMethodSettings;

use crate::config::SettingsFile;
use crate::ui;

/// Values accepted by `configure`
pub struct ConfigureArgs {
    pub merchant_id: String,
    pub secret_key: String,
    pub language: Option<String>,
    pub approve_url: Option<String>,
    pub decline_url: Option<String>,
    pub cancel_url: Option<String>,
    pub callback_url: Option<String>,
}

pub fn run(storage_dir: &Path, module_id: &str, args: ConfigureArgs, verbose: bool) -> Result<()> {
    if args.secret_key.is_empty() {
        bail!("Secret key must not be empty");
    }

    let mut file = SettingsFile::load(storage_dir)?;
    let replacing = file.modules.contains_key(module_id);

    let mut settings = PaymentMethodSettings::new(args.merchant_id, args.secret_key);
    settings.language = args.language;
    settings.approve_url = args.approve_url;
    settings.decline_url = args.decline_url;
    settings.cancel_url = args.cancel_url;
    settings.callback_url = args.callback_url;

    file.modules.insert(module_id.to_string(), settings);
    file.save(storage_dir)?;

    tracing::info!(module_id, replacing, "payment method settings saved");
    if replacing {
        ui::warning(&format!("Replaced existing settings for '{}'", module_id));
    }
    ui::success(&format!("Settings saved for '{}'", module_id));
    if verbose {
        ui::key_value("File", &SettingsFile::path(storage_dir).display().to_string());
    }
    Ok(())
}

pub fn show(storage_dir: &Path, module_id: &str, _verbose: bool) -> Result<()> {
    let file = SettingsFile::load(storage_dir)?;

    let Some(settings) = file.modules.get(module_id) else {
        ui::error(&format!("Module '{}' is not configured", module_id));
        ui::info("Run 'concordpay-demo configure' to set the merchant id and secret key");
        return Ok(());
    };

    ui::header(&format!("Settings: {}", module_id));
    ui::separator();
    ui::key_value("Merchant ID", &settings.merchant_id);
    ui::key_value("Secret Key", &ui::masked(settings.secret_key.len()));
    let optional = [
        ("Language", &settings.language),
        ("Approve URL", &settings.approve_url),
        ("Decline URL", &settings.decline_url),
        ("Cancel URL", &settings.cancel_url),
        ("Callback URL", &settings.callback_url),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            ui::key_value(label, value);
        }
    }
    Ok(())
}
