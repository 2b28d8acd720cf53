//! Facade binding a payment module to its configuration provider.

use crate::fields::FieldSource;
use crate::protocol::DEFAULT_MODULE_ID;
use crate::request::{PaymentRequest, SignedPaymentRequest};
use crate::schema::{REQUEST_SCHEMA, RESPONSE_SCHEMA};
use crate::settings::SecretProvider;
use crate::signature::{compute_signature, Signature};
use crate::validator::{validate, ValidationResult};
use crate::Result;

/// Signs requests and validates notifications for one payment module.
///
/// The secret is fetched from the provider on every call and dropped when
/// the call returns, so a rotated secret takes effect immediately.
///
/// # Example
///
/// ```
/// use concordpay_lib::settings::{InMemorySettingsProvider, PaymentMethodSettings};
/// use concordpay_lib::{ConcordpayClient, FieldSource, ValidationResult, PaymentOutcome};
///
/// let provider = InMemorySettingsProvider::new()
///     .with_settings("commerce_concordpay", PaymentMethodSettings::new("acct1", "s3cr3t"));
/// let client = ConcordpayClient::new(provider);
///
/// let notification = FieldSource::new()
///     .with("merchantAccount", "acct1")
///     .with("orderReference", "ORD#1")
///     .with("amount", "100")
///     .with("currency", "UAH")
///     .with("transactionStatus", "Approved")
///     .with("merchantSignature", "154f7a008ce7c5c13ee193efdcb0319f");
///
/// let result = client.validate_response(&notification).unwrap();
/// assert_eq!(result, ValidationResult::Valid(PaymentOutcome::Approved));
/// ```
pub struct ConcordpayClient<P> {
    module_id: String,
    provider: P,
}

impl<P: SecretProvider> ConcordpayClient<P> {
    /// Client for the default module id.
    pub fn new(provider: P) -> Self {
        Self::with_module_id(DEFAULT_MODULE_ID, provider)
    }

    /// Client for a specific module id.
    pub fn with_module_id(module_id: impl Into<String>, provider: P) -> Self {
        Self {
            module_id: module_id.into(),
            provider,
        }
    }

    /// Module id secrets are requested for.
    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Signature of an outgoing request payload.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, fields), fields(module_id = %self.module_id)))]
    pub fn request_signature(&self, fields: &FieldSource) -> Result<Signature> {
        let secret = self.provider.get_secret(&self.module_id)?;
        Ok(compute_signature(fields, &REQUEST_SCHEMA, &secret))
    }

    /// Signature a notification payload should carry.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, fields), fields(module_id = %self.module_id)))]
    pub fn response_signature(&self, fields: &FieldSource) -> Result<Signature> {
        let secret = self.provider.get_secret(&self.module_id)?;
        Ok(compute_signature(fields, &RESPONSE_SCHEMA, &secret))
    }

    /// Sign a typed payment request.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, request), fields(module_id = %self.module_id, order_id = %request.order_id)))]
    pub fn sign_request(&self, request: PaymentRequest) -> Result<SignedPaymentRequest> {
        let secret = self.provider.get_secret(&self.module_id)?;
        Ok(request.sign(&secret))
    }

    /// Check a notification.
    ///
    /// Errors only when the secret is unavailable. A bad signature is a
    /// [`ValidationResult::SignatureMismatch`], which the caller should
    /// record as a security event.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, response), fields(module_id = %self.module_id)))]
    pub fn validate_response(&self, response: &FieldSource) -> Result<ValidationResult> {
        let secret = self.provider.get_secret(&self.module_id)?;
        Ok(validate(response, &secret))
    }
}
