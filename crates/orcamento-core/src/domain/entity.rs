//! Domain Layer - Core Entity Trait
//!
//! Every record listed and edited through the admin implements [`Entity`].

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Core trait for all records served under `/api/<collection>`
pub trait Entity: Sized + Clone + DeserializeOwned + 'static {
    /// Body sent on create (POST) and update (PUT)
    type Payload: Serialize;

    /// Path segment under the API base, e.g. `"clientes"`
    const COLLECTION: &'static str;

    /// Returns the record's identifier
    fn id(&self) -> &RecordId;

    /// Human label used by selection dropdowns
    fn label(&self) -> String;
}

/// Opaque record identifier.
///
/// The API sends ids either as JSON strings or integers; both normalize to
/// their decimal/text form. An empty id means "not yet persisted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RecordId, E> {
                Ok(RecordId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<RecordId, E> {
                Ok(RecordId::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<RecordId, E> {
                Ok(RecordId::default())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<RecordId, D::Error> {
                d.deserialize_any(IdVisitor)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Deserialize a decimal sent either as a JSON number or a numeric string
/// (`"12.5"`, `"12,5"`). Null, empty strings and non-finite values
/// (`"NaN"`, `"inf"`) read as zero.
pub(crate) fn de_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct NumberVisitor;

    fn finite_or_zero(v: f64) -> f64 {
        if v.is_finite() {
            v
        } else {
            log::warn!("non-finite number {v} read as 0");
            0.0
        }
    }

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(finite_or_zero(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(0.0);
            }
            v.replace(',', ".")
                .parse()
                .map(finite_or_zero)
                .map_err(|_| E::custom(format!("invalid number: {v}")))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<f64, D::Error> {
            d.deserialize_any(NumberVisitor)
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}

/// Deserialize a non-negative integer count sent as a number or numeric
/// string. Fractions are truncated, negatives clamp to zero.
pub(crate) fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = de_number(deserializer)?;
    Ok(value.max(0.0).trunc() as u32)
}

/// Deserialize a list that may be missing or `null`
pub(crate) fn de_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
