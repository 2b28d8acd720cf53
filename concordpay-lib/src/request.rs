//! Outgoing payment requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields::FieldSource;
use crate::protocol::CURRENCY_UAH;
use crate::schema::REQUEST_SCHEMA;
use crate::secret::Secret;
use crate::settings::PaymentMethodSettings;
use crate::signature::{compute_signature, Signature};

/// Payment request sent to the gateway checkout.
///
/// Only `merchant_id`, `order_id`, `amount`, `currency_iso` and
/// `description` are signed. The rest travel alongside unsigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Merchant account id.
    pub merchant_id: String,
    /// Order reference, usually `<order_id>#<suffix>`.
    pub order_id: String,
    /// Amount as the decimal text sent on the wire (e.g. "100.00").
    pub amount: String,
    /// ISO currency code.
    pub currency_iso: String,
    /// Payment description shown to the customer.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approve_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Merchant-defined values echoed back by the gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_params: Option<BTreeMap<String, String>>,
}

impl PaymentRequest {
    /// Create a request in hryvnia.
    pub fn new(
        merchant_id: impl Into<String>,
        order_id: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            order_id: order_id.into(),
            amount: amount.into(),
            currency_iso: CURRENCY_UAH.to_string(),
            description: description.into(),
            approve_url: None,
            decline_url: None,
            cancel_url: None,
            callback_url: None,
            language: None,
            add_params: None,
        }
    }

    /// Create a request with merchant id, redirect URLs and language taken
    /// from stored settings.
    pub fn from_settings(
        settings: &PaymentMethodSettings,
        order_id: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            approve_url: settings.approve_url.clone(),
            decline_url: settings.decline_url.clone(),
            cancel_url: settings.cancel_url.clone(),
            callback_url: settings.callback_url.clone(),
            language: settings.language.clone(),
            ..Self::new(settings.merchant_id.clone(), order_id, amount, description)
        }
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency_iso: impl Into<String>) -> Self {
        self.currency_iso = currency_iso.into();
        self
    }

    /// Set the notification endpoint.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Add one merchant-defined parameter.
    pub fn with_add_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_params
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// All present fields as a field source.
    ///
    /// Each merchant-defined parameter becomes its own `add_params[<key>]`
    /// field, the way the checkout form posts them.
    pub fn to_fields(&self) -> FieldSource {
        let mut fields = FieldSource::new()
            .with("merchant_id", self.merchant_id.as_str())
            .with("order_id", self.order_id.as_str())
            .with("amount", self.amount.as_str())
            .with("currency_iso", self.currency_iso.as_str())
            .with("description", self.description.as_str());

        let optional = [
            ("approve_url", &self.approve_url),
            ("decline_url", &self.decline_url),
            ("cancel_url", &self.cancel_url),
            ("callback_url", &self.callback_url),
            ("language", &self.language),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                fields.insert(name, value.as_str());
            }
        }
        for (key, value) in self.add_params.iter().flatten() {
            fields.insert(format!("add_params[{key}]"), value.as_str());
        }
        fields
    }

    /// Signature over the request schema.
    pub fn signature(&self, secret: &Secret) -> Signature {
        compute_signature(&self.to_fields(), &REQUEST_SCHEMA, secret)
    }

    /// Attach the signature.
    pub fn sign(self, secret: &Secret) -> SignedPaymentRequest {
        let signature = self.signature(secret);
        SignedPaymentRequest {
            request: self,
            signature,
        }
    }
}

/// A request ready to be posted to the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPaymentRequest {
    #[serde(flatten)]
    pub request: PaymentRequest,
    pub signature: Signature,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn golden_request_signature() {
        let request = PaymentRequest::new("1", "ORD#1", "100", "test");
        let signed = request.sign(&Secret::from("s3cr3t"));
        assert_eq!(
            signed.signature.as_str(),
            "fd6f53c4f6fa842bb06d90f345d06fa0"
        );
    }

    #[test]
    fn unsigned_fields_do_not_change_signature() {
        let secret = Secret::from("s3cr3t");
        let plain = PaymentRequest::new("1", "ORD#1", "100", "test");
        let with_urls = plain
            .clone()
            .with_callback_url("https://shop.example/concordpay/callback");
        assert_eq!(plain.signature(&secret), with_urls.signature(&secret));
    }

    #[test]
    fn add_params_are_carried_but_not_signed() {
        let secret = Secret::from("s3cr3t");
        let plain = PaymentRequest::new("1", "ORD#1", "100", "test");
        let extended = plain
            .clone()
            .with_add_param("cart_id", "42")
            .with_add_param("channel", "web");

        assert_eq!(plain.signature(&secret), extended.signature(&secret));
        assert_eq!(
            extended.signature(&secret).as_str(),
            "fd6f53c4f6fa842bb06d90f345d06fa0"
        );

        let fields = extended.to_fields();
        assert_eq!(fields.get_scalar("add_params[cart_id]"), Some("42"));
        assert_eq!(fields.get_scalar("add_params[channel]"), Some("web"));

        let value = serde_json::to_value(extended.sign(&secret)).unwrap();
        assert_eq!(value["add_params"], json!({"cart_id": "42", "channel": "web"}));
    }

    #[test]
    fn add_params_default_to_none() {
        let request: PaymentRequest = serde_json::from_value(json!({
            "merchant_id": "1",
            "order_id": "ORD#1",
            "amount": "100",
            "currency_iso": "UAH",
            "description": "test",
        }))
        .unwrap();
        assert_eq!(request.add_params, None);
    }

    #[test]
    fn from_settings_copies_merchant_and_urls() {
        let settings = PaymentMethodSettings::new("acct1", "k")
            .with_language("ua")
            .with_callback_url("https://shop.example/cb");
        let request = PaymentRequest::from_settings(&settings, "7#1", "12.50", "Order 7");

        assert_eq!(request.merchant_id, "acct1");
        assert_eq!(request.currency_iso, "UAH");
        assert_eq!(request.language.as_deref(), Some("ua"));
        assert_eq!(request.callback_url.as_deref(), Some("https://shop.example/cb"));
    }

    #[test]
    fn signed_request_wire_shape() {
        let signed = PaymentRequest::new("1", "ORD#1", "100", "test")
            .with_currency("UAH")
            .sign(&Secret::from("s3cr3t"));

        let value = serde_json::to_value(&signed).unwrap();
        assert_eq!(
            value,
            json!({
                "merchant_id": "1",
                "order_id": "ORD#1",
                "amount": "100",
                "currency_iso": "UAH",
                "description": "test",
                "signature": "fd6f53c4f6fa842bb06d90f345d06fa0",
            })
        );
    }
}
