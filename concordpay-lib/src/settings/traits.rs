//! Configuration provider traits.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::secret::Secret;
use crate::{ConcordpayError, Result};

/// Persisted settings of the ConcordPay payment method.
///
/// `secret_key` is wiped on drop and redacted from `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct PaymentMethodSettings {
    /// Merchant account id issued by the gateway.
    pub merchant_id: String,

    /// Shared secret used for request and notification signatures.
    #[serde(default)]
    pub secret_key: String,

    /// Checkout page language (e.g. "ua", "en").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Where the customer lands after an approved payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approve_url: Option<String>,

    /// Where the customer lands after a declined payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_url: Option<String>,

    /// Where the customer lands after cancelling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,

    /// Endpoint receiving gateway notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl PaymentMethodSettings {
    /// Create settings with the two mandatory values.
    pub fn new(merchant_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            secret_key: secret_key.into(),
            language: None,
            approve_url: None,
            decline_url: None,
            cancel_url: None,
            callback_url: None,
        }
    }

    /// Set the checkout language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the callback endpoint.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Whether a secret key has been configured.
    pub fn has_secret(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

impl fmt::Debug for PaymentMethodSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentMethodSettings")
            .field("merchant_id", &self.merchant_id)
            .field("secret_key", &"[REDACTED]")
            .field("language", &self.language)
            .field("approve_url", &self.approve_url)
            .field("decline_url", &self.decline_url)
            .field("cancel_url", &self.cancel_url)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// Source of the merchant secret.
///
/// Implementations must not substitute an empty key when the secret is
/// unset; they return [`ConcordpayError::Configuration`] instead.
pub trait SecretProvider: Send + Sync {
    /// Secret for the given payment module.
    fn get_secret(&self, module_id: &str) -> Result<Secret>;
}

/// Closures work as ad-hoc providers.
impl<F> SecretProvider for F
where
    F: Fn(&str) -> Result<Secret> + Send + Sync,
{
    fn get_secret(&self, module_id: &str) -> Result<Secret> {
        self(module_id)
    }
}

/// Source of full payment-method settings.
pub trait SettingsProvider: Send + Sync {
    /// Settings stored for a module, if any.
    fn payment_method_settings(&self, module_id: &str) -> Result<Option<PaymentMethodSettings>>;
}

/// Extract the secret from a settings provider, rejecting missing settings
/// and empty keys.
pub fn settings_secret<P>(provider: &P, module_id: &str) -> Result<Secret>
where
    P: SettingsProvider + ?Sized,
{
    let settings = provider
        .payment_method_settings(module_id)?
        .ok_or_else(|| ConcordpayError::configuration(module_id, "payment method not configured"))?;

    if !settings.has_secret() {
        return Err(ConcordpayError::configuration(
            module_id,
            "secret key is not set",
        ));
    }

    Ok(Secret::from(settings.secret_key.as_str()))
}
