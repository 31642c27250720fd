//! Typed field values and the patch applied to every device.
//!
//! A [`PatchMap`] is built once from operator input and merged into each
//! device's `extendedSettingsJson`: keys in the patch overwrite existing
//! keys, every other key is left untouched.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use smbulk_api::Device;

use crate::fields::FieldKind;

/// Operator input that does not fit the field's type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("'{value}' is not an integer")]
    NotAnInteger { value: String },

    #[error("extendedSettingsJson is not a JSON object")]
    SettingsNotObject,
}

/// A typed value for one catalog field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    StringArray(Vec<String>),
}

impl FieldValue {
    /// Parse raw operator input according to a field kind.
    ///
    /// Only integers can fail; booleans and lists accept any text.
    pub fn parse(kind: FieldKind, raw: &str) -> Result<Self, PatchError> {
        let raw = raw.trim();
        Ok(match kind {
            FieldKind::String => Self::String(raw.to_owned()),
            FieldKind::Boolean => Self::Boolean(parse_boolean(raw)),
            FieldKind::Integer => Self::Integer(parse_integer(raw)?),
            FieldKind::StringArray => Self::StringArray(parse_string_array(raw)),
        })
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::StringArray(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&FieldValue> for Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::StringArray(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Case-insensitive `"true"`; anything else, including empty input, is `false`.
pub fn parse_boolean(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// Base-10 integer with an optional sign.
pub fn parse_integer(raw: &str) -> Result<i64, PatchError> {
    let raw = raw.trim();
    raw.parse().map_err(|_| PatchError::NotAnInteger {
        value: raw.to_owned(),
    })
}

/// Comma-separated list: tokens trimmed, empty tokens dropped, order kept.
pub fn parse_string_array(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Field name → value, in the order the operator chose them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatchMap(IndexMap<String, FieldValue>);

impl PatchMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Choosing a field twice keeps its position and
    /// replaces the value.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Right-biased union into an existing settings object.
    pub fn merge_into(&self, settings: &mut Map<String, Value>) {
        for (name, value) in &self.0 {
            settings.insert(name.clone(), Value::from(value));
        }
    }

    /// Patch a device record in place.
    ///
    /// A missing or `null` `extendedSettingsJson` becomes an empty object
    /// first. Any other non-object value is left alone and reported.
    pub fn apply_to(&self, device: &mut Device) -> Result<(), PatchError> {
        let settings = device
            .extended_settings
            .get_or_insert_with(|| Value::Object(Map::new()));
        if settings.is_null() {
            *settings = Value::Object(Map::new());
        }
        let Value::Object(map) = settings else {
            return Err(PatchError::SettingsNotObject);
        };
        self.merge_into(map);
        Ok(())
    }
}
