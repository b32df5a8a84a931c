use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::Field;

// ---------------------------------------------------------------------------
// Record — ordered collection of named, typed fields
// ---------------------------------------------------------------------------

/// An ordered collection of top-level scalar fields, as produced by a
/// downstream handler. Nested and repeated structures are out of scope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FieldWalk / FieldVisitor — the walker seam
//
// The engine never touches a message representation directly; it walks
// whatever implements FieldWalk. This keeps the disposition logic
// independent of the message-encoding technology.
// ---------------------------------------------------------------------------

/// Visitor invoked once per top-level scalar field, in declaration order.
pub trait FieldVisitor {
    fn visit(&mut self, field: &mut Field) -> CoreResult<()>;
}

/// A structured message whose fields can be enumerated and mutated in
/// place.
pub trait FieldWalk {
    fn walk(&mut self, visitor: &mut dyn FieldVisitor) -> CoreResult<()>;
}

impl FieldWalk for Record {
    fn walk(&mut self, visitor: &mut dyn FieldVisitor) -> CoreResult<()> {
        for field in &mut self.fields {
            visitor.visit(field)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ResponseBody — what a downstream handler hands back
// ---------------------------------------------------------------------------

/// The downstream handler's successful result.
///
/// Only `Message` bodies can be minimized; an `Opaque` body makes the
/// engine fail the call rather than forward unexamined data.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A structured message the engine can walk.
    Message(Record),
    /// Raw bytes the engine cannot inspect.
    Opaque(Vec<u8>),
}

impl ResponseBody {
    pub fn as_message(&self) -> Option<&Record> {
        match self {
            ResponseBody::Message(record) => Some(record),
            ResponseBody::Opaque(_) => None,
        }
    }
}

impl From<Record> for ResponseBody {
    fn from(record: Record) -> Self {
        ResponseBody::Message(record)
    }
}
