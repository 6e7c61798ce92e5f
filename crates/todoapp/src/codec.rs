//! # Tagged Records
//!
//! Lists and items are stored as JSON objects that name their own type:
//!
//! ```text
//! { "type": "List", "id": 0, "name": "...", "scope": "User", "scope_id": 42,
//!   "authors": [42],
//!   "items": [ { "type": "Item", "id": 0, "content": "...", "status": 0 } ] }
//! ```
//!
//! The `type` field lets a reader rebuild the right variant from an untyped JSON
//! tree. Decoding follows two rules:
//!
//! - At the top level of an owner file, an object without a known tag is kept
//!   as-is ([`Decoded::Foreign`]) and written back untouched on the next save.
//!   This lets newer writers add records older readers don't understand.
//! - Inside a list's `items` array the tag is mandatory: every element must be an
//!   `Item`. Anything else means the file is corrupt and decoding fails.
//!
//! ## Legacy records
//!
//! Owner files from the earlier bot tag records `ToDoList`/`ToDoItem` and store
//! a single `author_id` instead of `authors`/`scope_id`. Such records are
//! upgraded on read: the author becomes the only author and the scope target,
//! and the scope is `User`. The next save writes them in the current shape.

use crate::error::{Result, TodoError};
use crate::model::{Item, List};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ITEM_TAG: &str = "Item";
pub const LIST_TAG: &str = "List";
const TYPE_FIELD: &str = "type";
const LEGACY_ITEM_TAG: &str = "ToDoItem";
const LEGACY_LIST_TAG: &str = "ToDoList";

#[derive(Serialize)]
#[serde(tag = "type")]
enum RecordRef<'a> {
    Item(&'a Item),
    List(&'a List),
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Record {
    Item(Item),
    List(List),
}

/// Result of decoding one JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    List(List),
    Item(Item),
    Foreign(Value),
}

pub fn encode_item(item: &Item) -> Result<Value> {
    Ok(serde_json::to_value(RecordRef::Item(item))?)
}

pub fn encode_list(list: &List) -> Result<Value> {
    Ok(serde_json::to_value(RecordRef::List(list))?)
}

/// Rewrites a `ToDoList`/`ToDoItem` record into the current shape. Anything
/// else is returned unchanged.
fn upgrade_legacy(mut value: Value) -> Value {
    let Some(object) = value.as_object_mut() else {
        return value;
    };
    let tag = object
        .get(TYPE_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned);
    match tag.as_deref() {
        Some(LEGACY_ITEM_TAG) => {
            object.insert(TYPE_FIELD.to_string(), Value::from(ITEM_TAG));
        }
        Some(LEGACY_LIST_TAG) => {
            object.insert(TYPE_FIELD.to_string(), Value::from(LIST_TAG));
            object.remove("author");
            if let Some(author_id) = object.remove("author_id") {
                object
                    .entry("scope_id")
                    .or_insert_with(|| author_id.clone());
                object
                    .entry("authors")
                    .or_insert_with(|| Value::Array(vec![author_id]));
            }
            if let Some(Value::Array(items)) = object.get_mut("items") {
                for item in items.iter_mut() {
                    *item = upgrade_legacy(item.take());
                }
            }
            tracing::debug!("upgraded legacy list record");
        }
        _ => {}
    }
    value
}

pub fn decode(value: Value) -> Result<Decoded> {
    let value = upgrade_legacy(value);
    let known = matches!(
        value.get(TYPE_FIELD).and_then(Value::as_str),
        Some(ITEM_TAG | LIST_TAG)
    );
    if !known {
        return Ok(Decoded::Foreign(value));
    }

    Ok(match serde_json::from_value::<Record>(value)? {
        Record::Item(item) => Decoded::Item(item),
        Record::List(list) => Decoded::List(list),
    })
}

/// Decoded contents of one owner file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnerRecords {
    pub lists: Vec<List>,
    /// Records this version doesn't understand, preserved in file order.
    pub foreign: Vec<Value>,
}

pub fn decode_owner_file(records: Vec<Value>) -> Result<OwnerRecords> {
    let mut decoded = OwnerRecords::default();
    for record in records {
        match decode(record)? {
            Decoded::List(list) => decoded.lists.push(list),
            Decoded::Item(item) => {
                return Err(TodoError::Store(format!(
                    "Item {} found outside of any list",
                    item.id
                )))
            }
            Decoded::Foreign(value) => {
                tracing::debug!(record = %value, "keeping unrecognized record");
                decoded.foreign.push(value);
            }
        }
    }
    Ok(decoded)
}

/// Lists first, then foreign records.
pub fn encode_owner_file(lists: &[List], foreign: &[Value]) -> Result<Vec<Value>> {
    let mut records = Vec::with_capacity(lists.len() + foreign.len());
    for list in lists {
        records.push(encode_list(list)?);
    }
    records.extend(foreign.iter().cloned());
    Ok(records)
}

/// `serde(with)` adapter writing each item of a list as a tagged record.
pub(crate) mod tagged_items {
    use super::{Record, RecordRef};
    use crate::model::Item;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(items: &[Item], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(items.iter().map(RecordRef::Item))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Item>, D::Error> {
        Vec::<Record>::deserialize(deserializer)?
            .into_iter()
            .map(|record| match record {
                Record::Item(item) => Ok(item),
                Record::List(list) => Err(D::Error::custom(format!(
                    "list {} nested inside items",
                    list.id
                ))),
            })
            .collect()
    }
}
