//! Gateway protocol constants and small wire helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Base URL of the gateway API.
pub const API_URL: &str = "https://pay.concord.ua/api/";

/// Separator between signed tokens. Changing it breaks every signature.
pub const SIGNATURE_SEPARATOR: char = ';';

/// Separator between the order id and its suffix in an order reference.
pub const ORDER_SEPARATOR: char = '#';

/// Hryvnia, the only currency the gateway settles in.
pub const CURRENCY_UAH: &str = "UAH";

/// Module id under which payment-method settings are stored by default.
pub const DEFAULT_MODULE_ID: &str = "commerce_concordpay";

/// Notification field carrying the gateway's signature.
pub const MERCHANT_SIGNATURE_FIELD: &str = "merchantSignature";

/// Notification field carrying the transaction status.
pub const TRANSACTION_STATUS_FIELD: &str = "transactionStatus";

/// Notification field carrying the notification type.
pub const RESPONSE_TYPE_FIELD: &str = "type";

/// Kind of notification sent by the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Payment result.
    Payment,
    /// Refund (reversal) result.
    Reverse,
}

impl ResponseType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Reverse => "reverse",
        }
    }
}

impl FromStr for ResponseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(Self::Payment),
            "reverse" => Ok(Self::Reverse),
            other => Err(format!("unknown response type: {}", other)),
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order reference in the form `<order_id>#<suffix>`.
///
/// The suffix keeps references unique when the same order is paid more than
/// once. A reference without a separator is its own order id.
///
/// # Example
///
/// ```
/// use concordpay_lib::OrderReference;
///
/// let reference = OrderReference::new("42", "1700000000");
/// assert_eq!(reference.to_string(), "42#1700000000");
///
/// let parsed: OrderReference = "42#1700000000".parse().unwrap();
/// assert_eq!(parsed.order_id(), "42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderReference {
    order_id: String,
    suffix: Option<String>,
}

impl OrderReference {
    /// Compose a reference from an order id and a suffix.
    pub fn new(order_id: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            suffix: Some(suffix.into()),
        }
    }

    /// Parse a reference, splitting on the first separator.
    pub fn parse(reference: &str) -> Self {
        match reference.split_once(ORDER_SEPARATOR) {
            Some((order_id, suffix)) => Self::new(order_id, suffix),
            None => Self {
                order_id: reference.to_string(),
                suffix: None,
            },
        }
    }

    /// The merchant's order id.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// The part after the separator, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }
}

impl FromStr for OrderReference {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(f, "{}{}{}", self.order_id, ORDER_SEPARATOR, suffix),
            None => f.write_str(&self.order_id),
        }
    }
}
