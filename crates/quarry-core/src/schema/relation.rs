use super::{FieldId, ModelId};

#[derive(Debug, Clone)]
pub enum Relation {
    HasMany(HasMany),
    ManyToMany(ManyToMany),
    BelongsTo(BelongsTo),
}

/// One-to-many through a foreign-key column on the child.
#[derive(Debug, Clone)]
pub struct HasMany {
    pub target: ModelId,

    /// The FK field on the child model
    pub foreign_key: FieldId,

    /// Delete dependent children before deleting the parent
    pub cascade_delete: bool,

    /// Fetch children immediately at hydration time; otherwise the relation
    /// hydrates as a lazy stub holding the parent key.
    pub eager: bool,
}

/// Many-to-many through a join table.
#[derive(Debug, Clone)]
pub struct ManyToMany {
    pub target: ModelId,

    pub join_table: String,

    /// Join-table column referencing the owning side's primary key
    pub source_column: String,

    /// Join-table column referencing the target side's primary key
    pub target_column: String,

    /// Delete join rows before deleting the parent
    pub cascade_delete: bool,

    pub eager: bool,
}

/// Many-to-one: this model owns the FK field.
#[derive(Debug, Clone)]
pub struct BelongsTo {
    pub target: ModelId,

    /// The FK field on this model
    pub field: FieldId,
}

impl Relation {
    pub fn target(&self) -> ModelId {
        match self {
            Self::HasMany(rel) => rel.target,
            Self::ManyToMany(rel) => rel.target,
            Self::BelongsTo(rel) => rel.target,
        }
    }

    pub fn is_cascade_delete(&self) -> bool {
        match self {
            Self::HasMany(rel) => rel.cascade_delete,
            Self::ManyToMany(rel) => rel.cascade_delete,
            Self::BelongsTo(_) => false,
        }
    }

    pub fn is_eager(&self) -> bool {
        match self {
            Self::HasMany(rel) => rel.eager,
            Self::ManyToMany(rel) => rel.eager,
            Self::BelongsTo(_) => false,
        }
    }

    pub fn as_has_many(&self) -> Option<&HasMany> {
        match self {
            Self::HasMany(rel) => Some(rel),
            _ => None,
        }
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToMany> {
        match self {
            Self::ManyToMany(rel) => Some(rel),
            _ => None,
        }
    }
}
