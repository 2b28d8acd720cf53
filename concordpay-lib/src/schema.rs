//! Signature schemas: which fields are signed, and in which order.
//!
//! Field order is part of the gateway contract. Reordering a schema changes
//! every signature computed with it.

/// Ordered list of field names covered by a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignatureSchema<'a>(&'a [&'a str]);

/// Fields signed on an outgoing payment request.
pub const REQUEST_SCHEMA: SignatureSchema<'static> = SignatureSchema(&[
    "merchant_id",
    "order_id",
    "amount",
    "currency_iso",
    "description",
]);

/// Fields signed by the gateway on a payment notification.
pub const RESPONSE_SCHEMA: SignatureSchema<'static> =
    SignatureSchema(&["merchantAccount", "orderReference", "amount", "currency"]);

impl<'a> SignatureSchema<'a> {
    /// Build an ad-hoc schema. Duplicate names are not expected.
    pub const fn new(fields: &'a [&'a str]) -> Self {
        Self(fields)
    }

    /// Field names in signing order.
    pub fn fields(&self) -> &'a [&'a str] {
        self.0
    }

    /// Number of fields.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the schema names no fields.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` is covered by this schema.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name)
    }
}
