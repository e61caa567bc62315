use super::{FieldDef, ModelId, Relation};

/// How a primary key value is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorStrategy {
    /// The caller assigns the key
    None,

    /// Pre-fetch the next value from a named sequence, then include it in
    /// the insert column list
    Sequence(String),

    /// The engine assigns the key; read it back post-insert
    Identity,
}

#[derive(Debug, Clone, Default)]
pub enum Inheritance {
    #[default]
    None,

    /// All subtypes share one physical table; the named field distinguishes
    /// rows. `field` indexes into [`TableDef::fields`].
    SingleTable { field: usize },
}

/// A secondary index over one or more fields.
#[derive(Debug, Clone)]
pub struct IndexDef {
    pub name: String,

    /// Field indexes into [`TableDef::fields`]
    pub fields: Vec<usize>,

    pub unique: bool,
}

/// The description of one mapped type. Built once per type by an explicit
/// introspection pass and cached for the process lifetime.
#[derive(Debug, Clone)]
pub struct TableDef {
    pub id: ModelId,

    /// The logical model name, used in diagnostics
    pub model_name: String,

    /// The table name
    pub name: String,

    /// Ordered field list. Persistence and hydration rely on this order.
    pub fields: Vec<FieldDef>,

    /// Index of the primary-key field
    pub primary_key: Option<usize>,

    pub generator: GeneratorStrategy,

    /// Index of the optimistic-lock version field
    pub version_field: Option<usize>,

    pub inheritance: Inheritance,

    pub relations: Vec<Relation>,

    pub indexes: Vec<IndexDef>,
}

impl TableDef {
    pub fn field(&self, index: usize) -> &FieldDef {
        &self.fields[index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn primary_key_field(&self) -> Option<&FieldDef> {
        self.primary_key.map(|index| &self.fields[index])
    }

    pub fn version(&self) -> Option<&FieldDef> {
        self.version_field.map(|index| &self.fields[index])
    }

    /// Fields that map to columns, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|field| !field.transient)
    }

    /// The discriminator field for single-table inheritance.
    pub fn discriminator(&self) -> Option<&FieldDef> {
        match self.inheritance {
            Inheritance::SingleTable { field } => Some(&self.fields[field]),
            Inheritance::None => None,
        }
    }

    /// Relations that require delete-time handling before the parent row is
    /// removed.
    pub fn cascade_relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(|rel| rel.is_cascade_delete())
    }
}
