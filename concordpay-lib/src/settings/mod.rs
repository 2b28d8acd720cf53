//! Configuration provider abstraction.
//!
//! The core never reads settings storage itself. Hosts implement
//! [`SecretProvider`] (or [`SettingsProvider`], and delegate to
//! [`settings_secret`]) over whatever store they persist payment-method
//! settings in.
//!
//! ## Usage
//!
//! ```rust
//! use concordpay_lib::settings::{InMemorySettingsProvider, PaymentMethodSettings, SecretProvider};
//!
//! let provider = InMemorySettingsProvider::new()
//!     .with_settings("commerce_concordpay", PaymentMethodSettings::new("acct1", "s3cr3t"));
//!
//! let secret = provider.get_secret("commerce_concordpay").unwrap();
//! assert_eq!(secret.expose(), b"s3cr3t");
//! ```
//!
//! ## Security Considerations
//!
//! - An unset or empty secret is a configuration error, never an empty key
//! - Secrets are not cached; every call goes back to the provider
//! - Secrets are never logged or serialized by the core

mod memory;
mod traits;

pub use memory::InMemorySettingsProvider;
pub use traits::{settings_secret, PaymentMethodSettings, SecretProvider, SettingsProvider};
