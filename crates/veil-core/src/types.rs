use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

// ---------------------------------------------------------------------------
// FieldKind — the declared type of a response field
// ---------------------------------------------------------------------------

/// The declared kind of a top-level scalar response field.
///
/// Only `Int` and `Str` are in scope for minimization; fields of any
/// other kind pass through the engine unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Int,
    Str,
    Bool,
    Float,
    Bytes,
}

impl FieldKind {
    /// Whether the minimization transforms apply to this kind.
    pub fn is_transformable(&self) -> bool {
        matches!(self, FieldKind::Int | FieldKind::Str)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Int => write!(f, "int"),
            FieldKind::Str => write!(f, "string"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::Bytes => write!(f, "bytes"),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldValue — tagged scalar value
// ---------------------------------------------------------------------------

/// A scalar field value. The variant determines the field's [`FieldKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Int(i64),
    Str(String),
    Bool(bool),
    Float(f64),
    Bytes(Vec<u8>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Str(_) => FieldKind::Str,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Bytes(_) => FieldKind::Bytes,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

// ---------------------------------------------------------------------------
// Field — a named, typed response field
// ---------------------------------------------------------------------------

/// A named, typed field of a response record.
///
/// The kind is fixed at construction: [`Field::set`] rejects any write
/// that would change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Replace the field's value. The new value must carry the same
    /// kind the field already declares.
    pub fn set(&mut self, value: impl Into<FieldValue>) -> CoreResult<()> {
        let value = value.into();
        if value.kind() != self.value.kind() {
            return Err(CoreError::KindMismatch {
                field: self.name.clone(),
                declared: self.value.kind(),
                assigned: value.kind(),
            });
        }
        self.value = value;
        Ok(())
    }
}
