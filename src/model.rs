// Wire types for the vehicle collection.
//
// Three shapes travel over HTTP: a `Vehicle` as the store returns it,
// a `NewVehicle` for POST and a `VehicleUpdate` for PUT. They differ in
// which keys must be present, so they are kept as separate types.

use serde::{de, Deserialize, Deserializer, Serialize};

/// A record as read back from the store. Fields are lenient because the
/// store owns the data and this client never rewrites it on read: a
/// field of an unexpected type reads as empty or unknown instead of
/// failing the whole snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub brand: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub model: String,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub production_year: Option<u16>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub convertible: Option<bool>,
}

impl Vehicle {
    /// True when this record carries the given identity.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

/// Create payload. All five keys are always serialized; `id` is `null`
/// when the store should assign one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub id: Option<String>,
    pub brand: String,
    pub model: String,
    pub production_year: u16,
    pub convertible: bool,
}

/// Update payload. The id travels in the path, never in the body, and an
/// unset `convertible` is left out so the stored value survives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VehicleUpdate {
    pub brand: String,
    pub model: String,
    pub production_year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convertible: Option<bool>,
}

/// Stores differ on whether ids are JSON strings or numbers; both end up
/// as the digit string the rest of the client compares against.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "vehicle id must be a string or a number, got {other}"
        ))),
    }
}

/// Null becomes empty; numbers and booleans are shown as written.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Accepts `1927` or `"1927"`; anything else reads as unknown.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_u64().and_then(|y| u16::try_from(y).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts `true` or `"true"` (any case); anything else reads as unset.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}
