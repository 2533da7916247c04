//! Typed values exchanged with the connection, the semantic field types they
//! map to, and result rows readable by column name.

use std::collections::HashMap;

use crate::error::{OrmError, Result};

/// Core value types for SQL parameters and result cells
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Boolean(bool),
}

impl Value {
    /// Name of the variant, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
            Value::Boolean(_) => "BOOLEAN",
        }
    }
}

/// Semantic type of a record field.
///
/// Only `Int64`, `Int32` and `Text` have coercion rules in the mapper; the
/// rest can be described but are rejected when a record is written or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int64,
    Int32,
    Text,
    Real,
    Boolean,
    Blob,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

fn mismatch(expected: &'static str, found: &Value) -> OrmError {
    OrmError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

impl TryFrom<Value> for i64 {
    type Error = OrmError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(v),
            other => Err(mismatch("INTEGER", &other)),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = OrmError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => i32::try_from(v).map_err(|_| OrmError::TypeMismatch {
                expected: "32-bit INTEGER",
                found: "out-of-range INTEGER",
            }),
            other => Err(mismatch("INTEGER", &other)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = OrmError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(mismatch("TEXT", &other)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = OrmError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Real(v) => Ok(v),
            other => Err(mismatch("REAL", &other)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = OrmError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(v) => Ok(v),
            // SQLite stores booleans as 0/1
            Value::Integer(v) => Ok(v != 0),
            other => Err(mismatch("BOOLEAN", &other)),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = OrmError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v),
            other => Err(mismatch("BLOB", &other)),
        }
    }
}

/// A single result row, addressed by column name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    pub values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Result<&Value> {
        self.values
            .get(column)
            .ok_or_else(|| OrmError::ColumnNotFound(column.to_string()))
    }

    pub fn get_i64(&self, column: &str) -> Result<i64> {
        i64::try_from(self.get(column)?.clone())
    }

    pub fn get_i32(&self, column: &str) -> Result<i32> {
        i32::try_from(self.get(column)?.clone())
    }

    pub fn get_text(&self, column: &str) -> Result<String> {
        String::try_from(self.get(column)?.clone())
    }
}
