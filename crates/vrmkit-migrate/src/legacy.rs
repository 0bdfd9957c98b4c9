//! Legacy data reader and field decoders.
//!
//! Legacy data is semi-structured JSON that may be missing, mistyped or cut
//! short anywhere. Every read goes through [`Field`], which keeps "present but
//! wrong" apart from "not there" so migrators can keep defaults for both while
//! still reporting the former.

use serde_json::{Map, Value};
use vrmkit_schema::vrm0::CURVE_LEN;
use vrmkit_schema::{EntityStore, StoreResult};

/// Result of decoding one legacy field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Present with the expected type.
    Valid(T),
    /// Present with an unexpected type.
    Invalid,
    /// Not present.
    Absent,
}

impl<T> Field<T> {
    /// Decodes an optional value with `decode`, which returns `None` on a type
    /// mismatch.
    pub fn decode<'a>(
        value: Option<&'a Value>,
        decode: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Self {
        match value {
            None => Field::Absent,
            Some(value) => decode(value).map_or(Field::Invalid, Field::Valid),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Field::Valid(_))
    }

    pub fn valid(self) -> Option<T> {
        match self {
            Field::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Valid(value) => Field::Valid(f(value)),
            Field::Invalid => Field::Invalid,
            Field::Absent => Field::Absent,
        }
    }
}

/// Why a text attachment could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentFault {
    /// The property is neither a text reference nor a text name.
    NotAText,
    /// The named text block does not exist.
    MissingText,
    /// The text content is not valid JSON.
    InvalidJson,
}

impl std::fmt::Display for AttachmentFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentFault::NotAText => write!(f, "property does not name a text attachment"),
            AttachmentFault::MissingText => write!(f, "named text attachment does not exist"),
            AttachmentFault::InvalidJson => write!(f, "text attachment is not valid JSON"),
        }
    }
}

/// Outcome of reading a legacy text attachment.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Parsed JSON, with object key order preserved.
    Json(Value),
    /// The property is not set.
    Missing,
    /// The property is set but unusable.
    Unreadable(AttachmentFault),
}

impl Attachment {
    /// The parsed value, treating every fault as absent.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Attachment::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Reads the JSON text attachment named by the rig object's `key` property.
///
/// The property either references a text block directly or holds its name.
/// The lines of the block are concatenated without separators before
/// parsing. Only store faults are errors.
pub fn read_text_json<S: EntityStore + ?Sized>(
    store: &S,
    rig: &str,
    key: &str,
) -> StoreResult<Attachment> {
    let Some(property) = store.object_property(rig, key)? else {
        return Ok(Attachment::Missing);
    };
    let Some(text_name) = property.text_name() else {
        return Ok(Attachment::Unreadable(AttachmentFault::NotAText));
    };
    let Some(text) = store.text(text_name)? else {
        return Ok(Attachment::Unreadable(AttachmentFault::MissingText));
    };

    Ok(match serde_json::from_str(&text.body()) {
        Ok(value) => Attachment::Json(value),
        Err(_) => Attachment::Unreadable(AttachmentFault::InvalidJson),
    })
}

pub fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Field<&'a str> {
    Field::decode(map.get(key), Value::as_str)
}

pub fn number_field(map: &Map<String, Value>, key: &str) -> Field<f64> {
    Field::decode(map.get(key), Value::as_f64)
}

pub fn bool_field(map: &Map<String, Value>, key: &str) -> Field<bool> {
    Field::decode(map.get(key), Value::as_bool)
}

pub fn array_field<'a>(map: &'a Map<String, Value>, key: &str) -> Field<&'a [Value]> {
    Field::decode(map.get(key), |value| value.as_array().map(Vec::as_slice))
}

pub fn object_field<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Field<&'a Map<String, Value>> {
    Field::decode(map.get(key), Value::as_object)
}

/// Number or 0 for anything else.
pub fn number_or_zero(value: &Value) -> f64 {
    value.as_f64().unwrap_or(0.0)
}

/// Decodes a legacy `{"x", "y", "z"}` vector. Missing or non-numeric
/// components read as 0.
pub fn vector3_field(map: &Map<String, Value>, key: &str) -> Field<[f64; 3]> {
    Field::decode(map.get(key), |value| {
        let vector = value.as_object()?;
        let component = |axis: &str| vector.get(axis).map_or(0.0, number_or_zero);
        Some([component("x"), component("y"), component("z")])
    })
}

/// Reorders a legacy `(x, y, z)` vector to `(x, z, y)`.
pub fn swap_yz([x, y, z]: [f64; 3]) -> [f64; 3] {
    [x, z, y]
}

/// Decodes a legacy look-at curve. Non-numeric items read as 0 and the list is
/// padded with 0 or truncated to [`CURVE_LEN`] values.
pub fn curve_field(map: &Map<String, Value>, key: &str) -> Field<[f64; CURVE_LEN]> {
    Field::decode(map.get(key), |value| {
        let items = value.as_array()?;
        let mut curve = [0.0; CURVE_LEN];
        for (slot, item) in curve.iter_mut().zip(items) {
            *slot = number_or_zero(item);
        }
        Some(curve)
    })
}

/// Joins a parent path and a key (`"spring_bone[0]"` + `"bones"`).
pub fn child_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

/// Joins a list path and an index (`"spring_bone"` + `0`).
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}
