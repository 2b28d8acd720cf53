//! ConcordPay signing core.
//!
//! Produces the HMAC-MD5 signature the gateway expects on payment requests
//! and verifies the signature it puts on payment notifications. Everything
//! here is a pure function of its inputs; the merchant secret is injected
//! through [`settings::SecretProvider`].
//!
//! # Features
//!
//! - **Signature Engine**: schema-ordered, `;`-joined serialization and HMAC-MD5
//! - **Response Validation**: constant-time signature check and outcome classification
//! - **Configuration Abstraction**: trait-based secret lookup, no global state
//!
//! # Example
//!
//! ```
//! use concordpay_lib::{compute_signature, validate, FieldSource, PaymentOutcome, Secret};
//! use concordpay_lib::{ValidationResult, RESPONSE_SCHEMA};
//!
//! let secret = Secret::from("s3cr3t");
//! let mut notification = FieldSource::new()
//!     .with("merchantAccount", "acct1")
//!     .with("orderReference", "ORD#1")
//!     .with("amount", "100")
//!     .with("currency", "UAH")
//!     .with("transactionStatus", "Approved");
//!
//! let signature = compute_signature(&notification, &RESPONSE_SCHEMA, &secret);
//! notification.insert("merchantSignature", signature.into_string());
//!
//! assert_eq!(
//!     validate(&notification, &secret),
//!     ValidationResult::Valid(PaymentOutcome::Approved)
//! );
//! ```

pub mod client;
pub mod errors;
pub mod fields;
pub mod outcome;
pub mod protocol;
pub mod request;
pub mod schema;
pub mod secret;
pub mod settings;
pub mod signature;
pub mod validator;

pub use client::ConcordpayClient;
pub use errors::{ConcordpayError, ConcordpayErrorCode};
pub use fields::{FieldSource, FieldValue};
pub use outcome::PaymentOutcome;
pub use protocol::{OrderReference, ResponseType};
pub use request::{PaymentRequest, SignedPaymentRequest};
pub use schema::{SignatureSchema, REQUEST_SCHEMA, RESPONSE_SCHEMA};
pub use secret::Secret;
pub use signature::{compute_signature, serialize, Signature};
pub use validator::{validate, ValidationResult};

/// Common result alias for ConcordPay operations.
pub type Result<T> = std::result::Result<T, ConcordpayError>;
