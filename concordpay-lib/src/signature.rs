//! # Signature Engine
//!
//! Computes the gateway's HMAC-MD5 signature over a schema-selected,
//! `;`-joined token string.
//!
//! ## Wire compatibility
//!
//! - Fields are visited in schema order.
//! - A missing field contributes one empty token.
//! - A sequence contributes one token per element; an empty sequence
//!   contributes none.
//! - Tokens are joined with [`SIGNATURE_SEPARATOR`].
//! - The MAC is HMAC-MD5 keyed with the merchant secret, lowercase hex.
//!
//! MD5 is what the gateway verifies against. It is reproduced bit for bit.

use std::fmt;

use hmac::{Hmac, Mac};
use md5::Md5;
use serde::{Deserialize, Serialize};

use crate::fields::FieldSource;
use crate::protocol::SIGNATURE_SEPARATOR;
use crate::schema::SignatureSchema;
use crate::secret::Secret;

type HmacMd5 = Hmac<Md5>;

/// Lowercase hex signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    /// Hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the hex string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the string that gets signed.
///
/// # Example
///
/// ```
/// use concordpay_lib::{serialize, FieldSource, REQUEST_SCHEMA};
///
/// let fields = FieldSource::new()
///     .with("merchant_id", "1")
///     .with("order_id", "ORD#1")
///     .with("amount", "100")
///     .with("currency_iso", "UAH");
///
/// // `description` is missing and becomes an empty trailing token.
/// assert_eq!(serialize(&fields, &REQUEST_SCHEMA), "1;ORD#1;100;UAH;");
/// ```
pub fn serialize(fields: &FieldSource, schema: &SignatureSchema<'_>) -> String {
    let mut tokens: Vec<&str> = Vec::with_capacity(schema.len());
    for name in schema.fields() {
        match fields.get(name) {
            Some(value) => tokens.extend(value.tokens()),
            None => tokens.push(""),
        }
    }
    let mut separator = [0u8; 4];
    tokens.join(&*SIGNATURE_SEPARATOR.encode_utf8(&mut separator))
}

/// HMAC-MD5 of `message` keyed with `secret`, lowercase hex.
pub fn hmac_md5_hex(message: &[u8], secret: &Secret) -> Signature {
    // hmac 0.12 overrides `KeyInit::new_from_slice` for `Hmac<D>` to accept
    // keys of any length (RFC 2104: longer keys are hashed, shorter ones
    // padded), so it never returns `InvalidLength` here.
    let mut mac =
        HmacMd5::new_from_slice(secret.expose()).expect("HMAC can take key of any size");
    mac.update(message);
    Signature(hex::encode(mac.finalize().into_bytes()))
}

/// Compute the signature of `fields` under `schema`.
///
/// Pure: the same inputs always give the same signature.
pub fn compute_signature(
    fields: &FieldSource,
    schema: &SignatureSchema<'_>,
    secret: &Secret,
) -> Signature {
    hmac_md5_hex(serialize(fields, schema).as_bytes(), secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{REQUEST_SCHEMA, RESPONSE_SCHEMA};

    fn request_fields() -> FieldSource {
        FieldSource::new()
            .with("merchant_id", "1")
            .with("order_id", "ORD#1")
            .with("amount", "100")
            .with("currency_iso", "UAH")
            .with("description", "test")
    }

    fn response_fields() -> FieldSource {
        FieldSource::new()
            .with("merchantAccount", "acct1")
            .with("orderReference", "ORD#1")
            .with("amount", "100")
            .with("currency", "UAH")
    }

    #[test]
    fn rfc2202_vector() {
        let sig = hmac_md5_hex(b"what do ya want for nothing?", &Secret::from("Jefe"));
        assert_eq!(sig.as_str(), "750c783e6ab0b503eaa86e310a5db738");
    }

    #[test]
    fn rfc2202_key_longer_than_block() {
        let key = Secret::new(vec![0xaa; 80]);
        let sig = hmac_md5_hex(
            b"Test Using Larger Than Block-Size Key - Hash Key First",
            &key,
        );
        assert_eq!(sig.as_str(), "6b1ab7fe4bd7bf8f0b62e6ce61b9d0cd");
    }

    #[test]
    fn long_merchant_secret_is_accepted() {
        let fields = response_fields();
        let sig = compute_signature(&fields, &RESPONSE_SCHEMA, &Secret::new(vec![b'k'; 200]));
        assert_eq!(sig.as_str(), "7f0c516448a6bdee7272030eca4bb0f6");
    }

    #[test]
    fn request_golden_value() {
        let fields = request_fields();
        assert_eq!(serialize(&fields, &REQUEST_SCHEMA), "1;ORD#1;100;UAH;test");

        let sig = compute_signature(&fields, &REQUEST_SCHEMA, &Secret::from("s3cr3t"));
        assert_eq!(sig.as_str(), "fd6f53c4f6fa842bb06d90f345d06fa0");
    }

    #[test]
    fn response_golden_value() {
        let fields = FieldSource::new()
            .with("merchantAccount", "acct1")
            .with("orderReference", "ORD#1")
            .with("amount", "100")
            .with("currency", "UAH")
            .with("transactionStatus", "Approved");

        assert_eq!(serialize(&fields, &RESPONSE_SCHEMA), "acct1;ORD#1;100;UAH");
        let sig = compute_signature(&fields, &RESPONSE_SCHEMA, &Secret::from("s3cr3t"));
        assert_eq!(sig.as_str(), "154f7a008ce7c5c13ee193efdcb0319f");
    }

    #[test]
    fn deterministic() {
        let fields = request_fields();
        let secret = Secret::from("s3cr3t");
        let a = compute_signature(&fields, &REQUEST_SCHEMA, &secret);
        let b = compute_signature(&fields, &REQUEST_SCHEMA, &secret);
        assert_eq!(a, b);
    }

    #[test]
    fn missing_field_is_empty_token() {
        let mut fields = request_fields();
        fields.remove("description");

        assert_eq!(serialize(&fields, &REQUEST_SCHEMA), "1;ORD#1;100;UAH;");
        let sig = compute_signature(&fields, &REQUEST_SCHEMA, &Secret::from("s3cr3t"));
        assert_eq!(sig.as_str(), "6f0c530ca10846082a82d772b43d19ad");

        let explicit = request_fields().with("description", "");
        assert_eq!(
            sig,
            compute_signature(&explicit, &REQUEST_SCHEMA, &Secret::from("s3cr3t"))
        );
    }

    #[test]
    fn sequence_is_flattened_in_place() {
        let fields = request_fields().with("description", vec!["item1", "item2"]);
        assert_eq!(
            serialize(&fields, &REQUEST_SCHEMA),
            "1;ORD#1;100;UAH;item1;item2"
        );
        let sig = compute_signature(&fields, &REQUEST_SCHEMA, &Secret::from("s3cr3t"));
        assert_eq!(sig.as_str(), "8c58ba4ca416ca55c72713bf4c78dbd8");
    }

    #[test]
    fn empty_sequence_contributes_nothing() {
        let fields = request_fields().with("description", Vec::<String>::new());
        assert_eq!(serialize(&fields, &REQUEST_SCHEMA), "1;ORD#1;100;UAH");
    }

    #[test]
    fn field_order_is_part_of_the_contract() {
        let fields = request_fields();
        let secret = Secret::from("s3cr3t");
        let reordered = SignatureSchema::new(&[
            "order_id",
            "merchant_id",
            "amount",
            "currency_iso",
            "description",
        ]);

        assert_eq!(serialize(&fields, &reordered), "ORD#1;1;100;UAH;test");
        assert_ne!(
            compute_signature(&fields, &REQUEST_SCHEMA, &secret),
            compute_signature(&fields, &reordered, &secret)
        );
    }

    #[test]
    fn fields_outside_schema_are_ignored() {
        let secret = Secret::from("s3cr3t");
        let extra = request_fields().with("approve_url", "https://shop.example/ok");
        assert_eq!(
            compute_signature(&request_fields(), &REQUEST_SCHEMA, &secret),
            compute_signature(&extra, &REQUEST_SCHEMA, &secret)
        );
    }

    #[test]
    fn secret_changes_signature() {
        let fields = request_fields();
        assert_ne!(
            compute_signature(&fields, &REQUEST_SCHEMA, &Secret::from("s3cr3t")),
            compute_signature(&fields, &REQUEST_SCHEMA, &Secret::from("other"))
        );
    }

    #[test]
    fn lowercase_hex_output() {
        let sig = compute_signature(&request_fields(), &REQUEST_SCHEMA, &Secret::from("k"));
        assert_eq!(sig.as_str().len(), 32);
        assert!(sig
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
