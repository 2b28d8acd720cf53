//! # Notification Validation
//!
//! Recomputes the signature of a gateway notification over
//! [`RESPONSE_SCHEMA`] and compares it with `merchantSignature`.
//!
//! The comparison is constant time. Each notification is checked on its own;
//! ordering and de-duplication of repeated notifications is left to the
//! caller.

use subtle::ConstantTimeEq;

use crate::fields::FieldSource;
use crate::outcome::PaymentOutcome;
use crate::protocol::{MERCHANT_SIGNATURE_FIELD, TRANSACTION_STATUS_FIELD};
use crate::schema::RESPONSE_SCHEMA;
use crate::secret::Secret;
use crate::signature::compute_signature;
use crate::{ConcordpayError, Result};

/// Result of checking a notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    /// Signature matched; the outcome is what the gateway reported.
    Valid(PaymentOutcome),
    /// Signature missing or different from the recomputed one.
    SignatureMismatch,
}

impl ValidationResult {
    /// Signature matched and the payment was approved.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Valid(outcome) if outcome.is_approved())
    }

    /// Whether the signature matched.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The reported outcome, if the signature matched.
    pub fn outcome(&self) -> Option<&PaymentOutcome> {
        match self {
            Self::Valid(outcome) => Some(outcome),
            Self::SignatureMismatch => None,
        }
    }

    /// Turn a mismatch into [`ConcordpayError::SignatureMismatch`].
    pub fn into_result(self) -> Result<PaymentOutcome> {
        match self {
            Self::Valid(outcome) => Ok(outcome),
            Self::SignatureMismatch => Err(ConcordpayError::SignatureMismatch),
        }
    }
}

/// Check a notification's signature and classify its outcome.
///
/// A `merchantSignature` that is missing or a list never matches. A missing
/// or unrecognized `transactionStatus` on a correctly signed notification is
/// reported as [`PaymentOutcome::Unknown`].
pub fn validate(response: &FieldSource, secret: &Secret) -> ValidationResult {
    let expected = compute_signature(response, &RESPONSE_SCHEMA, secret);

    let Some(claimed) = response.get_scalar(MERCHANT_SIGNATURE_FIELD) else {
        return ValidationResult::SignatureMismatch;
    };

    let matches: bool = expected.as_str().as_bytes().ct_eq(claimed.as_bytes()).into();
    if !matches {
        return ValidationResult::SignatureMismatch;
    }

    let status = response
        .get_scalar(TRANSACTION_STATUS_FIELD)
        .unwrap_or_default();
    ValidationResult::Valid(PaymentOutcome::from_status(status))
}
