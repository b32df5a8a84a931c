use thiserror::Error;

use crate::types::FieldKind;

/// Errors produced by the core field model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A field write attempted to change the field's declared kind.
    /// Transforms must always produce a value of the kind the field
    /// already carries.
    #[error("field '{field}' is {declared}, cannot assign {assigned}")]
    KindMismatch {
        field: String,
        declared: FieldKind,
        assigned: FieldKind,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
