use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes any value, falling back to `T::default()` when the JSON shape doesn't match.
///
/// Used for every field of the remote payloads: a string where a list was expected, a number
/// where a string was expected, or `null` all degrade to "absent" instead of failing the record.
pub fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`deserialize_or_default`], but only JSON objects are considered
///
/// Serde's derived structs also accept arrays positionally; payload objects never arrive that
/// way, so an array (or any other non-object) is treated as absent.
pub fn deserialize_object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(object_from_value(value))
}

/// Deserializes a JSON array of objects element by element
///
/// Elements that aren't matching objects become `T::default()`; a non-array value yields an
/// empty Vec.
pub fn deserialize_object_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(objects_from_value(value))
}

pub(crate) fn object_from_value<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if value.is_object() { serde_json::from_value(value).unwrap_or_default() } else { T::default() }
}

pub(crate) fn objects_from_value<T>(value: Value) -> Vec<T>
where
    T: DeserializeOwned + Default,
{
    match value {
        Value::Array(items) => items.into_iter().map(object_from_value).collect(),
        _ => Vec::new(),
    }
}

/// Keeps whatever value is present, `null` included
///
/// Pair with `#[serde(default)]` so a missing key stays `None` while a present one is carried
/// through untouched.
pub fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
