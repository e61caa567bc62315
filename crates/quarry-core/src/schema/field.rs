use super::ModelId;
use crate::stmt::Type;

use std::fmt;

/// One mapped field. Immutable once built.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The logical field name
    pub name: String,

    /// The column name
    pub column: String,

    /// Declared portable type
    pub ty: Type,

    pub nullable: bool,

    pub unique: bool,

    /// Length constraint, applied to bounded character types
    pub length: Option<usize>,

    /// True if the field is the primary key
    pub primary_key: bool,

    /// True if the field is the optimistic-lock version column
    pub version: bool,

    /// True if the field is excluded from persistence. Referencing a
    /// transient field in a statement is a configuration error.
    pub transient: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

impl FieldId {
    pub const fn new(model: ModelId, index: usize) -> Self {
        Self { model, index }
    }
}

impl From<&FieldId> for FieldId {
    fn from(val: &FieldId) -> Self {
        *val
    }
}

impl From<&FieldDef> for FieldId {
    fn from(val: &FieldDef) -> Self {
        val.id
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
