//! Wire types of the order lookup and the tagged value tree the renderer walks.

use crate::widget::LookupError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLookupRequest {
    pub order_uid: String,
}

impl OrderLookupRequest {
    pub fn new(order_uid: impl Into<String>) -> Self {
        Self { order_uid: order_uid.into() }
    }
}

/// A primitive JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(text) => f.write_str(text),
            Scalar::Bool(flag) => write!(f, "{}", flag),
            Scalar::Number(number) => {
                if let Some(int) = number.as_i64() {
                    write!(f, "{}", int)
                } else if let Some(uint) = number.as_u64() {
                    write!(f, "{}", uint)
                } else {
                    // f64 Display drops a zero fraction: 30.0 prints as "30".
                    write!(f, "{}", number.as_f64().unwrap_or(f64::NAN))
                }
            }
        }
    }
}

/// Which JSON container a nested value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
    Null,
}

/// A response value: either a leaf or a mapping of further values.
///
/// Arrays and `null` count as mappings, the way a browser treats them as
/// objects: array entries are keyed by their index and `null` has no entries.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Leaf(Scalar),
    Nested {
        shape: Shape,
        entries: Vec<(String, FieldValue)>,
    },
}

impl FieldValue {
    pub fn is_nested(&self) -> bool {
        matches!(self, FieldValue::Nested { .. })
    }

    /// Rebuilds the JSON this value was read from.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Leaf(Scalar::Text(text)) => Value::String(text.clone()),
            FieldValue::Leaf(Scalar::Number(number)) => Value::Number(number.clone()),
            FieldValue::Leaf(Scalar::Bool(flag)) => Value::Bool(*flag),
            FieldValue::Nested { shape: Shape::Null, .. } => Value::Null,
            FieldValue::Nested { shape: Shape::Array, entries } => {
                Value::Array(entries.iter().map(|(_, value)| value.to_json()).collect())
            }
            FieldValue::Nested { shape: Shape::Object, entries } => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

/// Leaves print as plain text, nested values as compact JSON.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Leaf(scalar) => fmt::Display::fmt(scalar, f),
            nested => write!(f, "{}", nested.to_json()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Leaf(Scalar::Text(text)),
            Value::Number(number) => FieldValue::Leaf(Scalar::Number(number)),
            Value::Bool(flag) => FieldValue::Leaf(Scalar::Bool(flag)),
            Value::Null => FieldValue::Nested {
                shape: Shape::Null,
                entries: Vec::new(),
            },
            Value::Array(items) => FieldValue::Nested {
                shape: Shape::Array,
                entries: items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item.into()))
                    .collect(),
            },
            Value::Object(map) => FieldValue::Nested {
                shape: Shape::Object,
                entries: map.into_iter().map(|(key, item)| (key, item.into())).collect(),
            },
        }
    }
}

/// The `CustomerOrder` part of a lookup response, in response key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDocument {
    pub fields: Vec<(String, FieldValue)>,
}

impl OrderDocument {
    /// Top-level key the order service puts the order under.
    pub const ROOT_KEY: &'static str = "CustomerOrder";

    /// Interprets a decoded response body.
    ///
    /// - an object without `CustomerOrder`, or any body that is neither an
    ///   object nor a string, yields an empty document;
    /// - a `CustomerOrder` that is nested in the [`FieldValue`] sense is read
    ///   like any other nested value: arrays by index, `null` as empty;
    /// - a `CustomerOrder` that is a string, number or boolean is
    ///   [`LookupError::MalformedOrder`];
    /// - a bare string is the service's failure message, [`LookupError::Rejected`].
    pub fn from_value(body: Value) -> Result<Self, LookupError> {
        match body {
            Value::Object(mut map) => match map.remove(Self::ROOT_KEY).map(FieldValue::from) {
                None => Ok(Self::default()),
                Some(FieldValue::Nested { entries, .. }) => Ok(Self { fields: entries }),
                Some(leaf) => Err(LookupError::MalformedOrder(format!(
                    "{} is not an object: {}",
                    Self::ROOT_KEY,
                    leaf.to_json()
                ))),
            },
            Value::String(message) => Err(LookupError::Rejected(message)),
            _ => Ok(Self::default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_string(&OrderLookupRequest::new("abc123")).unwrap();
        assert_eq!(body, r#"{"order_uid":"abc123"}"#);
    }

    #[test]
    fn test_document_keeps_response_order() {
        let doc = OrderDocument::from_value(json!({
            "CustomerOrder": {"zeta": 1, "alpha": {"b": 2, "a": 3}, "mid": "x"}
        }))
        .unwrap();

        let keys: Vec<&str> = doc.fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let FieldValue::Nested { entries, .. } = &doc.fields[1].1 else {
            panic!("alpha should be nested");
        };
        assert_eq!(entries[0].0, "b");
        assert_eq!(entries[1].0, "a");
    }

    #[test]
    fn test_arrays_and_null_count_as_nested() {
        let value = FieldValue::from(json!([{"sku": "X1"}, 7]));
        let FieldValue::Nested { shape, entries } = &value else {
            panic!("array should be nested");
        };
        assert_eq!(*shape, Shape::Array);
        assert_eq!(entries[0].0, "0");
        assert!(entries[0].1.is_nested());
        assert_eq!(entries[1].0, "1");

        let null = FieldValue::from(Value::Null);
        assert!(null.is_nested());
        assert_eq!(null.to_string(), "null");
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(FieldValue::from(json!(30)).to_string(), "30");
        assert_eq!(FieldValue::from(json!(30.0)).to_string(), "30");
        assert_eq!(FieldValue::from(json!(2.5)).to_string(), "2.5");
        assert_eq!(FieldValue::from(json!(-4)).to_string(), "-4");
        assert_eq!(FieldValue::from(json!(true)).to_string(), "true");
        assert_eq!(FieldValue::from(json!("Alice")).to_string(), "Alice");
        assert_eq!(FieldValue::from(json!({"a": [1, 2]})).to_string(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_response_shapes() {
        assert!(OrderDocument::from_value(json!({"Status": "ok"})).unwrap().is_empty());
        assert!(OrderDocument::from_value(json!([1, 2])).unwrap().is_empty());
        assert!(OrderDocument::from_value(Value::Null).unwrap().is_empty());

        assert!(matches!(
            OrderDocument::from_value(json!({"CustomerOrder": 5})),
            Err(LookupError::MalformedOrder(_))
        ));
        assert!(matches!(
            OrderDocument::from_value(json!({"CustomerOrder": "oops"})),
            Err(LookupError::MalformedOrder(_))
        ));
        assert!(OrderDocument::from_value(json!({"CustomerOrder": null})).unwrap().is_empty());

        let listed = OrderDocument::from_value(json!({"CustomerOrder": ["a", {"b": 1}]})).unwrap();
        assert_eq!(listed.fields[0], ("0".to_string(), FieldValue::from(json!("a"))));
        assert_eq!(listed.fields[1].0, "1");
        assert!(listed.fields[1].1.is_nested());
        assert_eq!(
            OrderDocument::from_value(json!("No same order")),
            Err(LookupError::Rejected("No same order".to_string()))
        );
    }
}
