use archieml_document::{FreeformItem, Value};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::{Config, Error, FreeformRepr, Result};

/// Convert with the default [`Config`]: freeform items become
/// `{"type": ..., "value": ...}` objects.
pub fn value_to_json(value: &Value) -> Result<JsonValue> {
    value_to_json_with_config(value, &Config::default())
}

pub fn value_to_json_with_config(value: &Value, config: &Config) -> Result<JsonValue> {
    match value {
        Value::Scalar(text) => Ok(JsonValue::String(text.clone())),
        Value::Mapping(map) => {
            let mut result = JsonMap::new();
            for (key, child) in map.iter() {
                result.insert(key.clone(), value_to_json_with_config(child, config)?);
            }
            Ok(JsonValue::Object(result))
        }
        Value::List(list) => {
            let mut result = Vec::with_capacity(list.len());
            for child in list.iter() {
                result.push(value_to_json_with_config(child, config)?);
            }
            Ok(JsonValue::Array(result))
        }
        Value::FreeformItem(item) => convert_item(item, config),
    }
}

fn convert_item(item: &FreeformItem, config: &Config) -> Result<JsonValue> {
    let content = value_to_json_with_config(&item.value, config)?;

    match &config.freeform_repr {
        FreeformRepr::Adjacent {
            tag,
            content: content_key,
        } => {
            if tag == content_key {
                return Err(Error::FreeformAdjacentConflict { field: tag.clone() });
            }
            let mut map = JsonMap::new();
            map.insert(tag.clone(), JsonValue::String(item.kind.clone()));
            map.insert(content_key.clone(), content);
            Ok(JsonValue::Object(map))
        }
        FreeformRepr::Internal { tag } => match content {
            JsonValue::Object(mut fields) => {
                if fields.contains_key(tag) {
                    return Err(Error::FreeformTagConflict { tag: tag.clone() });
                }
                fields.insert(tag.clone(), JsonValue::String(item.kind.clone()));
                Ok(JsonValue::Object(fields))
            }
            other => Ok(external(&item.kind, other)),
        },
        FreeformRepr::External => Ok(external(&item.kind, content)),
    }
}

fn external(kind: &str, content: JsonValue) -> JsonValue {
    let mut map = JsonMap::new();
    map.insert(kind.to_string(), content);
    JsonValue::Object(map)
}
