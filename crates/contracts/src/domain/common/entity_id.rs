use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a backend-owned record.
///
/// The backend is not consistent about id types: the settings registers
/// use integer ids while workflow documents carry uuid strings. Selection
/// and cache logic key on this type so both kinds behave uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl EntityId {
    pub fn as_string(&self) -> String {
        match self {
            EntityId::Int(n) => n.to_string(),
            EntityId::Str(s) => s.clone(),
        }
    }

    /// Parse a form/url value back into an id. Numeric strings normalize
    /// to `Int` so `"7"` and `7` key the same selection entry.
    pub fn from_string(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => EntityId::Int(n),
            Err(_) => EntityId::Str(s.to_string()),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(n) => write!(f, "{}", n),
            EntityId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Int(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::from_string(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId::from_string(&value)
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        EntityId::Str(value.to_string())
    }
}

/// Implemented by every aggregate so list machinery can extract the
/// selection key without knowing the record shape.
pub trait Identified {
    fn entity_id(&self) -> EntityId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_numeric_and_string_ids() {
        let n: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(n, EntityId::Int(42));

        let s: EntityId = serde_json::from_str("\"9b2e\"").unwrap();
        assert_eq!(s, EntityId::Str("9b2e".to_string()));
    }

    #[test]
    fn numeric_strings_normalize_to_int() {
        assert_eq!(EntityId::from("7"), EntityId::Int(7));
        assert_eq!(EntityId::from("7").as_string(), "7");
    }

    #[test]
    fn uuid_ids_round_trip_as_strings() {
        let id = Uuid::new_v4();
        let entity_id = EntityId::from(id);
        assert_eq!(entity_id.as_string(), id.to_string());
    }
}
