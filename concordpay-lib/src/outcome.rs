//! Transaction states reported by the gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gateway-reported transaction state.
///
/// Parsing is case-sensitive and total: any unrecognized status is kept as
/// [`PaymentOutcome::Unknown`] instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentOutcome {
    /// Payment created, not yet processed.
    New,
    /// Payment declined by the issuer or gateway.
    Declined,
    /// Payment refunded.
    Refunded,
    /// Payment window expired.
    Expired,
    /// Payment in progress; a later notification will follow.
    Pending,
    /// Payment approved. The only successful terminal state.
    Approved,
    /// Status string the gateway sent that is not one of the above.
    Unknown(String),
}

impl PaymentOutcome {
    /// Status string of [`PaymentOutcome::New`].
    pub const NEW: &'static str = "New";
    /// Status string of [`PaymentOutcome::Declined`].
    pub const DECLINED: &'static str = "Declined";
    /// Status string of [`PaymentOutcome::Refunded`].
    pub const REFUNDED: &'static str = "Refunded";
    /// Status string of [`PaymentOutcome::Expired`].
    pub const EXPIRED: &'static str = "Expired";
    /// Status string of [`PaymentOutcome::Pending`].
    pub const PENDING: &'static str = "Pending";
    /// Status string of [`PaymentOutcome::Approved`].
    pub const APPROVED: &'static str = "Approved";

    /// Map a `transactionStatus` value.
    pub fn from_status(status: &str) -> Self {
        match status {
            Self::NEW => Self::New,
            Self::DECLINED => Self::Declined,
            Self::REFUNDED => Self::Refunded,
            Self::EXPIRED => Self::Expired,
            Self::PENDING => Self::Pending,
            Self::APPROVED => Self::Approved,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Wire status string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => Self::NEW,
            Self::Declined => Self::DECLINED,
            Self::Refunded => Self::REFUNDED,
            Self::Expired => Self::EXPIRED,
            Self::Pending => Self::PENDING,
            Self::Approved => Self::APPROVED,
            Self::Unknown(status) => status,
        }
    }

    /// Whether the payment succeeded.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether no further notification is expected for this transaction.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Approved | Self::Declined | Self::Refunded | Self::Expired
        )
    }

    /// Whether the transaction may still change state.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::New | Self::Pending)
    }
}

impl From<String> for PaymentOutcome {
    fn from(status: String) -> Self {
        Self::from_status(&status)
    }
}

impl From<PaymentOutcome> for String {
    fn from(outcome: PaymentOutcome) -> Self {
        match outcome {
            PaymentOutcome::Unknown(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
