//! Plain action payloads.
//!
//! Every action travels as a [`PlainAction`]: a type id plus a flat map of
//! named [`Value`]s. The map is a `BTreeMap`, and encoders sort unordered
//! identity collections (material ids, validator sets) before writing them,
//! so equal actions always encode to equal bytes.
//!
//! Decoding is strict. A missing field, a value of the wrong type or an
//! out-of-range number is a [`PayloadError`], never a panic or a silent cast.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{ErrorKind, GameError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Address(Address),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
}

impl Value {
    const fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Address(_) => "address",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Value::Address(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

/// Decode-time structural failures. All of them are `MalformedPayload`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("unknown action type `{type_id}`")]
    UnknownType { type_id: String },

    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` must be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `{field}` is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("payload bytes could not be decoded: {0}")]
    Encoding(String),
}

impl PayloadError {
    pub fn out_of_range(field: &str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    fn wrong_type(field: &str, expected: &'static str, found: &Value) -> Self {
        Self::WrongType {
            field: field.to_owned(),
            expected,
            found: found.type_name(),
        }
    }
}

impl GameError for PayloadError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedPayload
    }

    fn error_code(&self) -> &'static str {
        match self {
            PayloadError::UnknownType { .. } => "PAYLOAD_UNKNOWN_TYPE",
            PayloadError::MissingField { .. } => "PAYLOAD_MISSING_FIELD",
            PayloadError::WrongType { .. } => "PAYLOAD_WRONG_TYPE",
            PayloadError::OutOfRange { .. } => "PAYLOAD_OUT_OF_RANGE",
            PayloadError::Encoding(_) => "PAYLOAD_ENCODING",
        }
    }
}

/// Flat `field -> value` map with typed accessors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload(BTreeMap<String, Value>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_owned(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    fn require(&self, field: &str) -> Result<&Value, PayloadError> {
        self.get(field).ok_or_else(|| PayloadError::MissingField {
            field: field.to_owned(),
        })
    }

    pub fn integer(&self, field: &str) -> Result<i64, PayloadError> {
        match self.require(field)? {
            Value::Integer(value) => Ok(*value),
            other => Err(PayloadError::wrong_type(field, "an integer", other)),
        }
    }

    /// Integer converted to `T`; negative or too large values are out of range.
    pub fn unsigned<T: TryFrom<i64>>(&self, field: &str) -> Result<T, PayloadError> {
        let value = self.integer(field)?;
        T::try_from(value).map_err(|_| PayloadError::out_of_range(field, format!("{value}")))
    }

    pub fn address(&self, field: &str) -> Result<Address, PayloadError> {
        match self.require(field)? {
            Value::Address(address) => Ok(*address),
            other => Err(PayloadError::wrong_type(field, "an address", other)),
        }
    }

    pub fn text(&self, field: &str) -> Result<&str, PayloadError> {
        match self.require(field)? {
            Value::Text(text) => Ok(text),
            other => Err(PayloadError::wrong_type(field, "text", other)),
        }
    }

    pub fn list(&self, field: &str) -> Result<&[Value], PayloadError> {
        match self.require(field)? {
            Value::List(values) => Ok(values),
            other => Err(PayloadError::wrong_type(field, "a list", other)),
        }
    }
}

/// Reads list elements with the same strictness as top-level fields.
pub(crate) mod element {
    use super::{PayloadError, Value};
    use crate::address::Address;

    pub(crate) fn address(field: &str, value: &Value) -> Result<Address, PayloadError> {
        match value {
            Value::Address(address) => Ok(*address),
            other => Err(PayloadError::wrong_type(field, "an address", other)),
        }
    }

    pub(crate) fn text<'v>(field: &str, value: &'v Value) -> Result<&'v str, PayloadError> {
        match value {
            Value::Text(text) => Ok(text),
            other => Err(PayloadError::wrong_type(field, "text", other)),
        }
    }

    pub(crate) fn bytes<'v>(field: &str, value: &'v Value) -> Result<&'v [u8], PayloadError> {
        match value {
            Value::Bytes(bytes) => Ok(bytes),
            other => Err(PayloadError::wrong_type(field, "bytes", other)),
        }
    }

    /// A two-element `[first, second]` list.
    pub(crate) fn pair<'v>(field: &str, value: &'v Value) -> Result<(&'v Value, &'v Value), PayloadError> {
        match value {
            Value::List(items) if items.len() == 2 => Ok((&items[0], &items[1])),
            Value::List(items) => Err(PayloadError::out_of_range(
                field,
                format!("expected a pair, found {} elements", items.len()),
            )),
            other => Err(PayloadError::wrong_type(field, "a list", other)),
        }
    }
}

/// Action as it travels between host and core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainAction {
    pub type_id: String,
    pub payload: Payload,
}

impl PlainAction {
    pub fn new(type_id: impl Into<String>, payload: Payload) -> Self {
        Self {
            type_id: type_id.into(),
            payload,
        }
    }

    /// Canonical wire bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        bincode::serialize(self).map_err(|error| PayloadError::Encoding(error.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PayloadError> {
        bincode::deserialize(bytes).map_err(|error| PayloadError::Encoding(error.to_string()))
    }
}

/// Conversion between a typed action and its plain payload.
pub trait PayloadCodec: Sized {
    const TYPE_ID: &'static str;

    fn to_payload(&self) -> Payload;

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError>;

    fn to_plain(&self) -> PlainAction {
        PlainAction::new(Self::TYPE_ID, self.to_payload())
    }
}
