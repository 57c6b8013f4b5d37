//! DynamoDB typed attribute values and their conversion to plain records.

mod decode;
mod types;

pub use decode::decode_item;
pub use types::{AttributeValue, DecodedRecord, RawItem};
