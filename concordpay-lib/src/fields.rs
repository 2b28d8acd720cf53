//! Raw request and notification payloads.
//!
//! The gateway signs flat key/value payloads where a value may also be a list
//! of scalars (for example per-item product names). [`FieldValue`] keeps that
//! distinction explicit so serialization can flatten lists in order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{ConcordpayError, Result};

/// A single payload value: a scalar or an ordered sequence of scalars.
///
/// # Example
///
/// ```
/// use concordpay_lib::FieldValue;
///
/// let amount: FieldValue = "100".into();
/// let items: FieldValue = vec!["coffee", "cake"].into();
///
/// assert_eq!(amount.tokens().collect::<Vec<_>>(), ["100"]);
/// assert_eq!(items.tokens().collect::<Vec<_>>(), ["coffee", "cake"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum FieldValue {
    /// One token.
    Scalar(String),
    /// Zero or more tokens, kept in order.
    Sequence(Vec<String>),
}

impl FieldValue {
    /// Tokens contributed to a signature, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::Sequence(values) => values.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    /// The scalar value, if this is not a sequence.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Sequence(_) => None,
        }
    }
}

/// Render a JSON scalar the way the gateway's reference integration does:
/// numbers follow [`number_to_string`], `true` is `"1"`, `false` and `null`
/// are empty.
fn scalar_from_json(value: Value) -> std::result::Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(number_to_string(&n)),
        Value::Bool(true) => Ok("1".to_string()),
        Value::Bool(false) | Value::Null => Ok(String::new()),
        Value::Array(_) => Err("nested arrays are not supported".to_string()),
        Value::Object(_) => Err("objects are not supported as field values".to_string()),
    }
}

/// Significant digits kept when a float is turned into text.
const FLOAT_PRECISION: usize = 14;

/// Render a JSON number as the gateway's PHP integration stringifies it.
///
/// Integer literals that fit in an `i64` print as-is. Everything else is a
/// float and prints with 14 significant digits and no trailing zeros, so
/// `100.00` signs as `100` and `100.50` as `100.5`. Exponents below -4 or
/// at least 14 switch to the `1.0E+25` form.
pub fn number_to_string(number: &serde_json::Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    match number.as_f64() {
        Some(float) => float_to_string(float),
        None => number.to_string(),
    }
}

fn float_to_string(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "NAN".to_string()
        } else if value.is_sign_negative() {
            "-INF".to_string()
        } else {
            "INF".to_string()
        };
    }

    // `{:.13e}` rounds to FLOAT_PRECISION significant digits: "-1.2345000000000e2".
    let formatted = format!("{:.*e}", FLOAT_PRECISION - 1, value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');

    let mut out = String::from(sign);
    if exponent < -4 || exponent >= FLOAT_PRECISION as i32 {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        out.push('.');
        out.push_str(if rest.is_empty() { "0" } else { rest });
        out.push('E');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.unsigned_abs().to_string());
        return out;
    }

    let point = exponent + 1;
    if point <= 0 {
        out.push_str("0.");
        out.push_str(&"0".repeat(point.unsigned_abs() as usize));
        out.push_str(digits);
    } else {
        let point = point as usize;
        if digits.len() <= point {
            out.push_str(digits);
            out.push_str(&"0".repeat(point - digits.len()));
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    }
    out
}

impl TryFrom<Value> for FieldValue {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(scalar_from_json)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Self::Sequence),
            other => scalar_from_json(other).map(Self::Scalar),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(value) => serializer.serialize_str(value),
            Self::Sequence(values) => values.serialize(serializer),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl<S: Into<String>> From<Vec<S>> for FieldValue {
    fn from(values: Vec<S>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

/// Mapping from field name to [`FieldValue`].
///
/// Lookups of absent fields are not errors; callers decide what a missing
/// field means. For signatures it is the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSource(BTreeMap<String, FieldValue>);

impl FieldSource {
    /// Create an empty field source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object payload.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already parsed JSON value. Only objects are accepted.
    pub fn from_json(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ConcordpayError::Serialization(
                "field source must be a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Remove a field.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    /// Look up a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Look up a scalar field. Sequences yield `None`.
    pub fn get_scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_scalar)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
