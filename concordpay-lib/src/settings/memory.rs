//! In-memory settings provider.
//!
//! Meant for tests and for hosts that load settings themselves and hand them
//! over at startup.
//!
//! # Thread Safety
//!
//! This provider uses `RwLock` for thread-safe access. Lock poisoning
//! is handled gracefully by returning an error rather than panicking.
//! [`InMemorySettingsProvider::with_settings`] owns the provider, so it
//! writes through a poisoned lock instead of dropping the insert.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::traits::{settings_secret, PaymentMethodSettings, SecretProvider, SettingsProvider};
use crate::secret::Secret;
use crate::{ConcordpayError, Result};

/// In-memory map of module id to payment-method settings.
pub struct InMemorySettingsProvider {
    settings: RwLock<HashMap<String, PaymentMethodSettings>>,
}

/// Helper function to handle lock poisoning gracefully.
fn lock_error(context: &str) -> ConcordpayError {
    ConcordpayError::Internal(format!(
        "InMemorySettingsProvider: lock poisoned during {}",
        context
    ))
}

impl InMemorySettingsProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(HashMap::new()),
        }
    }

    /// Builder-style insert for the initial configuration.
    pub fn with_settings(
        mut self,
        module_id: impl Into<String>,
        settings: PaymentMethodSettings,
    ) -> Self {
        self.settings
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(module_id.into(), settings);
        self
    }

    /// Insert or replace the settings of a module.
    ///
    /// Replacing a secret here is how rotation works; nothing caches the old
    /// value.
    pub fn set(&self, module_id: impl Into<String>, settings: PaymentMethodSettings) -> Result<()> {
        let mut map = self.settings.write().map_err(|_| lock_error("set"))?;
        map.insert(module_id.into(), settings);
        Ok(())
    }

    /// Remove the settings of a module.
    pub fn remove(&self, module_id: &str) -> Result<Option<PaymentMethodSettings>> {
        let mut map = self.settings.write().map_err(|_| lock_error("remove"))?;
        Ok(map.remove(module_id))
    }

    /// Number of configured modules.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.settings.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether no module is configured.
    ///
    /// Returns true if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.settings.read().map(|s| s.is_empty()).unwrap_or(true)
    }
}

impl Default for InMemorySettingsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsProvider for InMemorySettingsProvider {
    fn payment_method_settings(&self, module_id: &str) -> Result<Option<PaymentMethodSettings>> {
        let map = self
            .settings
            .read()
            .map_err(|_| lock_error("payment_method_settings"))?;
        Ok(map.get(module_id).cloned())
    }
}

impl SecretProvider for InMemorySettingsProvider {
    fn get_secret(&self, module_id: &str) -> Result<Secret> {
        settings_secret(self, module_id)
    }
}
