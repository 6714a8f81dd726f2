use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A point of interest, exactly as persisted in the backing file
///
/// Decoding never rejects an object. Keys the record does not model, and
/// optional values that do not fit their type (`"rating": null`, an odd
/// timestamp), are kept in `extra` and written back unchanged. A key is only
/// ever held by one side: an optional field is `None` whenever `extra` holds
/// its key.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Place {
    /// Assigned by the store, never changed afterwards
    pub id: i64,
    pub name: String,
    /// Free-form category label
    #[serde(rename = "type")]
    pub place_type: String,
    /// Neighborhood; empty when not supplied
    pub quartier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commune: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Everything else found on the stored record
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl Place {
    pub fn has_type(&self, place_type: &str) -> bool {
        self.place_type == place_type
    }

    /// Drop a raw value kept under `key`, once the typed field owns it again
    pub fn clear_raw(&mut self, key: &str) {
        self.extra.remove(key);
    }
}

impl<'de> Deserialize<'de> for Place {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        Ok(Place {
            id: take_id(&mut fields),
            name: take_text(&mut fields, "name"),
            place_type: take_text(&mut fields, "type"),
            quartier: take_text(&mut fields, "quartier"),
            commune: take_optional(&mut fields, "commune"),
            lat: take_coordinate(&mut fields, "lat"),
            lng: take_coordinate(&mut fields, "lng"),
            created_at: take_optional(&mut fields, "created_at"),
            updated_at: take_optional(&mut fields, "updated_at"),
            last_modified: take_optional(&mut fields, "last_modified"),
            google_place_id: take_optional(&mut fields, "google_place_id"),
            rating: take_optional(&mut fields, "rating"),
            address: take_optional(&mut fields, "address"),
            extra: fields,
        })
    }
}

fn take_id(fields: &mut Map<String, Value>) -> i64 {
    match fields.remove("id") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

/// Text as stored; `null` reads as empty and other scalars as their JSON text
fn take_text(fields: &mut Map<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

fn take_coordinate(fields: &mut Map<String, Value>, key: &str) -> f64 {
    match fields.remove(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

fn take_optional<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.remove(key)?;
    match T::deserialize(&value) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            fields.insert(key.to_string(), value);
            None
        }
    }
}
