use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One item as returned by DynamoDB: attribute name to typed value.
pub type RawItem = HashMap<String, AttributeValue>;

/// A plain record produced from a [`RawItem`].
///
/// Nested maps become nested objects; every other value is the untouched
/// payload of its typed wrapper.
pub type DecodedRecord = Map<String, Value>;

/// A DynamoDB typed value.
///
/// Serializes to and from the wire form `{ "<tag>": payload }`, so a
/// `RawItem` can be read straight from the JSON DynamoDB speaks.
/// Binary payloads are kept as base64 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "B")]
    B(String),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS")]
    Bs(Vec<String>),
    #[serde(rename = "M")]
    M(HashMap<String, AttributeValue>),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "BOOL")]
    Bool(bool),
}

impl AttributeValue {
    /// The single-letter (or short) type code used on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Bs(_) => "BS",
            AttributeValue::M(_) => "M",
            AttributeValue::L(_) => "L",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::Bool(_) => "BOOL",
        }
    }

    /// The payload under the type code, as JSON.
    ///
    /// Numbers stay strings and lists keep their typed elements. Maps are
    /// returned in their typed form too; use [`super::decode_item`] to
    /// flatten them.
    pub fn payload(&self) -> Value {
        match self {
            AttributeValue::S(s) | AttributeValue::N(s) | AttributeValue::B(s) => {
                Value::String(s.clone())
            }
            AttributeValue::Ss(values) | AttributeValue::Ns(values) | AttributeValue::Bs(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
            AttributeValue::M(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_tagged_json()))
                    .collect(),
            ),
            AttributeValue::L(items) => {
                Value::Array(items.iter().map(AttributeValue::to_tagged_json).collect())
            }
            AttributeValue::Null(flag) | AttributeValue::Bool(flag) => Value::Bool(*flag),
        }
    }

    /// The full wire form `{ tag: payload }`.
    pub fn to_tagged_json(&self) -> Value {
        let mut wrapper = Map::with_capacity(1);
        wrapper.insert(self.tag().to_string(), self.payload());
        Value::Object(wrapper)
    }
}
