//! File-backed payment-method settings
//!
//! Settings live in `settings.json` under the storage directory, keyed by
//! module id:
//!
//! ```json
//! {
//!   "commerce_concordpay": { "merchant_id": "acct1", "secret_key": "..." }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use concordpay_lib::settings::{
    settings_secret, PaymentMethodSettings, SecretProvider, SettingsProvider,
};
use concordpay_lib::{ConcordpayError, Secret};

/// Name of the settings file inside the storage directory
const SETTINGS_FILE: &str = "settings.json";

/// All stored module settings
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SettingsFile {
    pub modules: BTreeMap<String, PaymentMethodSettings>,
}

impl SettingsFile {
    /// Path of the settings file
    pub fn path(storage_dir: &Path) -> PathBuf {
        storage_dir.join(SETTINGS_FILE)
    }

    /// Load settings from disk; a missing file is an empty configuration
    pub fn load(storage_dir: &Path) -> Result<Self> {
        let path = Self::path(storage_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, storage_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(storage_dir)?;
        let path = Self::path(storage_dir);
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Settings provider that re-reads the file on every lookup
pub struct FileSettingsProvider {
    storage_dir: PathBuf,
}

impl FileSettingsProvider {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }
}

impl SettingsProvider for FileSettingsProvider {
    fn payment_method_settings(
        &self,
        module_id: &str,
    ) -> concordpay_lib::Result<Option<PaymentMethodSettings>> {
        let mut file = SettingsFile::load(&self.storage_dir)
            .map_err(|e| ConcordpayError::configuration(module_id, format!("{:#}", e)))?;
        Ok(file.modules.remove(module_id))
    }
}

impl SecretProvider for FileSettingsProvider {
    fn get_secret(&self, module_id: &str) -> concordpay_lib::Result<Secret> {
        settings_secret(self, module_id)
    }
}
