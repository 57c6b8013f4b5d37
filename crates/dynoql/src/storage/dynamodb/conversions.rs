//! DynamoDB attribute conversion functions.
//!
//! Pure functions translating SDK attribute values into the core model.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dynoql_core::attribute::{AttributeValue, RawItem};

/// Convert an SDK item to a core [`RawItem`].
///
/// Attributes of a type this build does not know are dropped.
pub fn item_from_sdk(item: &HashMap<String, SdkAttributeValue>) -> RawItem {
    item.iter()
        .filter_map(|(name, value)| match attribute_from_sdk(value) {
            Some(converted) => Some((name.clone(), converted)),
            None => {
                tracing::warn!(attribute = %name, "Dropping attribute of unknown type");
                None
            }
        })
        .collect()
}

/// Convert one SDK attribute value, recursing through maps and lists.
pub fn attribute_from_sdk(value: &SdkAttributeValue) -> Option<AttributeValue> {
    let converted = match value {
        SdkAttributeValue::S(s) => AttributeValue::S(s.clone()),
        SdkAttributeValue::N(n) => AttributeValue::N(n.clone()),
        SdkAttributeValue::B(blob) => AttributeValue::B(encode_blob(blob)),
        SdkAttributeValue::Ss(values) => AttributeValue::Ss(values.clone()),
        SdkAttributeValue::Ns(values) => AttributeValue::Ns(values.clone()),
        SdkAttributeValue::Bs(blobs) => AttributeValue::Bs(blobs.iter().map(encode_blob).collect()),
        SdkAttributeValue::M(map) => AttributeValue::M(item_from_sdk(map)),
        SdkAttributeValue::L(values) => {
            AttributeValue::L(values.iter().filter_map(attribute_from_sdk).collect())
        }
        SdkAttributeValue::Null(flag) => AttributeValue::Null(*flag),
        SdkAttributeValue::Bool(flag) => AttributeValue::Bool(*flag),
        _ => return None,
    };
    Some(converted)
}

fn encode_blob(blob: &Blob) -> String {
    STANDARD.encode(blob.as_ref())
}
