//! Field-at-a-time decoding of the loosely typed request body.
//!
//! The request body is an open JSON object whose shape depends on the request
//! kind. Rather than deserialising it against a fixed schema, each request
//! builder reads exactly the fields it needs through a [`FieldReader`].
//! Unrecognised fields are ignored. A required field that is missing or holds
//! the wrong JSON type fails immediately; nothing is ever replaced by a
//! default unless the field is explicitly optional. An explicit `null` counts
//! as absent.

use std::str::FromStr;

use serde_json::{Map, Value};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::DecodeError;

/// Read-only view over one JSON object in the request body.
///
/// The reader remembers its dotted path from the body root so errors name the
/// exact field, for example `intent.slots.City.value`.
#[derive(Debug, Clone)]
pub(crate) struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    path: String,
}

impl<'a> FieldReader<'a> {
    /// Creates a reader over the body root.
    pub(crate) const fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            path: String::new(),
        }
    }

    /// Returns the dotted path of `key` below this reader.
    pub(crate) fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    fn child(&self, key: &str, object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            path: self.path_of(key),
        }
    }

    /// Reads a required string field.
    pub(crate) fn required_str(&self, key: &str) -> Result<&'a str, DecodeError> {
        self.optional_str(key)?
            .ok_or_else(|| DecodeError::missing_field(self.path_of(key)))
    }

    /// Reads an optional string field; a present non-string value still fails.
    pub(crate) fn optional_str(&self, key: &str) -> Result<Option<&'a str>, DecodeError> {
        self.get(key)
            .map(|value| {
                value.as_str().ok_or_else(|| {
                    DecodeError::unexpected_type(self.path_of(key), "a string", json_type(value))
                })
            })
            .transpose()
    }

    /// Reads a required nested object.
    pub(crate) fn required_object(&self, key: &str) -> Result<Self, DecodeError> {
        self.optional_object(key)?
            .ok_or_else(|| DecodeError::missing_field(self.path_of(key)))
    }

    /// Reads an optional nested object; a present non-object value still fails.
    pub(crate) fn optional_object(&self, key: &str) -> Result<Option<Self>, DecodeError> {
        self.get(key)
            .map(|value| {
                value
                    .as_object()
                    .map(|object| self.child(key, object))
                    .ok_or_else(|| {
                        DecodeError::unexpected_type(
                            self.path_of(key),
                            "an object",
                            json_type(value),
                        )
                    })
            })
            .transpose()
    }

    /// Reads a nested object, treating absence or any non-object value as
    /// "nothing there" instead of an error.
    pub(crate) fn lenient_object(&self, key: &str) -> Option<Self> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|object| self.child(key, object))
    }

    /// Reads a required string field and parses it into a closed enum.
    pub(crate) fn required_variant<T: FromStr>(&self, key: &str) -> Result<T, DecodeError> {
        let raw = self.required_str(key)?;
        self.parse_variant(key, raw)
    }

    /// Reads an optional string field and parses it into a closed enum.
    pub(crate) fn optional_variant<T: FromStr>(
        &self,
        key: &str,
    ) -> Result<Option<T>, DecodeError> {
        self.optional_str(key)?
            .map(|raw| self.parse_variant(key, raw))
            .transpose()
    }

    fn parse_variant<T: FromStr>(&self, key: &str, raw: &str) -> Result<T, DecodeError> {
        raw.parse()
            .map_err(|_| DecodeError::unknown_variant(self.path_of(key), raw))
    }

    /// Reads a required timestamp in the fixed `YYYY-MM-DDTHH:MM:SSZ` layout.
    pub(crate) fn timestamp(&self, key: &str) -> Result<OffsetDateTime, DecodeError> {
        parse_timestamp(self.required_str(key)?)
    }

    /// Iterates over the members of this object, requiring each to be an
    /// object itself.
    pub(crate) fn object_entries(
        &self,
    ) -> impl Iterator<Item = Result<(&'a str, FieldReader<'a>), DecodeError>> + '_ {
        self.object.iter().map(|(key, value)| {
            value
                .as_object()
                .map(|object| (key.as_str(), self.child(key, object)))
                .ok_or_else(|| {
                    DecodeError::unexpected_type(self.path_of(key), "an object", json_type(value))
                })
        })
    }
}

/// Parses a request timestamp.
///
/// Only the exact layout `YYYY-MM-DDTHH:MM:SSZ` is accepted: no fractional
/// seconds, no numeric offsets, no lower-case `z`, no signed years. The
/// result is in UTC.
pub(crate) fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DecodeError> {
    // `[year]` tolerates a leading sign; the wire layout does not.
    if !value.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(DecodeError::InvalidTimestamp {
            value: value.to_owned(),
            message: "expected a four-digit year".to_owned(),
            source: None,
        });
    }
    let layout = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
    PrimitiveDateTime::parse(value, layout)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|source| DecodeError::InvalidTimestamp {
            value: value.to_owned(),
            message: source.to_string(),
            source: Some(source),
        })
}

/// Names the JSON type of a value for error messages.
pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
