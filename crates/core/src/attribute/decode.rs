use serde_json::Value;

use super::types::{AttributeValue, DecodedRecord, RawItem};

/// Flattens one DynamoDB item into a plain record.
///
/// `M` values are decoded recursively; every other value is replaced by its
/// payload, untouched. Lists are not descended into, so a map nested inside
/// an `L` keeps its typed form.
pub fn decode_item(item: &RawItem) -> DecodedRecord {
    item.iter()
        .map(|(name, value)| (name.clone(), decode_value(value)))
        .collect()
}

fn decode_value(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::M(inner) => Value::Object(decode_item(inner)),
        terminal => terminal.payload(),
    }
}
