//! Property-based tests for concordpay-lib
//!
//! These tests use proptest to verify signing invariants across a wide range
//! of inputs.

#[cfg(test)]
mod signature_properties {
    use concordpay_lib::{compute_signature, serialize, FieldSource, Secret, REQUEST_SCHEMA};
    use proptest::prelude::*;

    fn request(values: &[String; 5]) -> FieldSource {
        REQUEST_SCHEMA
            .fields()
            .iter()
            .zip(values.iter())
            .map(|(name, value)| (*name, value.as_str()))
            .collect()
    }

    proptest! {
        /// Same inputs, same signature
        #[test]
        fn deterministic(values in any::<[String; 5]>(), key in ".{0,64}") {
            let fields = request(&values);
            let secret = Secret::from(key.as_str());

            let a = compute_signature(&fields, &REQUEST_SCHEMA, &secret);
            let b = compute_signature(&fields, &REQUEST_SCHEMA, &secret);
            prop_assert_eq!(a, b);
        }

        /// Serialization is the schema-ordered join of the values
        #[test]
        fn serialization_joins_in_schema_order(values in any::<[String; 5]>()) {
            let fields = request(&values);
            prop_assert_eq!(serialize(&fields, &REQUEST_SCHEMA), values.join(";"));
        }

        /// A missing field signs exactly like an empty one
        #[test]
        fn missing_equals_empty(values in any::<[String; 5]>(), index in 0usize..5, key in "[a-z0-9]{1,32}") {
            let secret = Secret::from(key.as_str());
            let name = REQUEST_SCHEMA.fields()[index];

            let mut missing = request(&values);
            missing.remove(name);
            let empty = request(&values).with(name, "");

            prop_assert_eq!(
                compute_signature(&missing, &REQUEST_SCHEMA, &secret),
                compute_signature(&empty, &REQUEST_SCHEMA, &secret)
            );
        }

        /// A sequence value contributes its elements in order
        #[test]
        fn sequences_flatten_in_order(items in prop::collection::vec("[a-z]{0,8}", 1..6)) {
            let fields = FieldSource::new()
                .with("merchant_id", "m")
                .with("order_id", "o")
                .with("amount", "1")
                .with("currency_iso", "UAH")
                .with("description", items.clone());

            let expected = format!("m;o;1;UAH;{}", items.join(";"));
            prop_assert_eq!(serialize(&fields, &REQUEST_SCHEMA), expected);
        }

        /// Output is always 32 lowercase hex characters
        #[test]
        fn lowercase_hex(values in any::<[String; 5]>(), key in any::<Vec<u8>>()) {
            let signature = compute_signature(&request(&values), &REQUEST_SCHEMA, &Secret::new(key));
            prop_assert_eq!(signature.as_str().len(), 32);
            prop_assert!(signature.as_str().bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        }
    }
}

#[cfg(test)]
mod validation_properties {
    use concordpay_lib::{
        compute_signature, validate, FieldSource, PaymentOutcome, Secret, ValidationResult,
        RESPONSE_SCHEMA,
    };
    use proptest::prelude::*;

    fn notification(account: &str, reference: &str, amount: &str) -> FieldSource {
        FieldSource::new()
            .with("merchantAccount", account)
            .with("orderReference", reference)
            .with("amount", amount)
            .with("currency", "UAH")
            .with("transactionStatus", "Approved")
    }

    proptest! {
        /// Correctly signed notifications validate
        #[test]
        fn signed_notifications_validate(
            account in "[a-z0-9_]{1,16}",
            reference in "[A-Z0-9#]{1,16}",
            amount in "[0-9]{1,6}(\\.[0-9]{2})?",
            key in "[ -~]{1,40}",
        ) {
            let secret = Secret::from(key.as_str());
            let fields = notification(&account, &reference, &amount);
            let signature = compute_signature(&fields, &RESPONSE_SCHEMA, &secret);
            let signed = fields.with("merchantSignature", signature.into_string());

            prop_assert_eq!(validate(&signed, &secret), ValidationResult::Valid(PaymentOutcome::Approved));
        }

        /// Changing any one character of the signature is detected
        #[test]
        fn tampering_is_detected(index in 0usize..32, replacement in prop::sample::select(b"0123456789abcdef".to_vec()), key in "[a-z]{1,16}") {
            let secret = Secret::from(key.as_str());
            let fields = notification("acct1", "ORD#1", "100");
            let signature = compute_signature(&fields, &RESPONSE_SCHEMA, &secret).into_string();

            let mut bytes = signature.into_bytes();
            prop_assume!(bytes[index] != replacement);
            bytes[index] = replacement;
            let tampered = String::from_utf8(bytes).unwrap();

            let signed = fields.with("merchantSignature", tampered);
            prop_assert_eq!(validate(&signed, &secret), ValidationResult::SignatureMismatch);
        }
    }
}
