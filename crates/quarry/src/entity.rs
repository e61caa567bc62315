use quarry_core::schema::{ModelId, Registry, TableDef};
use quarry_core::stmt::{Value, ValueEnum, ValueRecord};
use quarry_core::{Error, Result};

use std::sync::Arc;

/// A persistable type.
///
/// Implementations describe their mapping with [`Entity::table`], which runs
/// at most once per process; the resulting [`TableDef`] is cached in the
/// global registry and shared by every session.
pub trait Entity: Sized {
    /// Identifies this type in the metadata registry. Must be unique across
    /// all registered entities in the process.
    const ID: ModelId;

    /// Build the mapping metadata. Called once, on first use; every mapping
    /// violation surfaces here as a configuration error.
    fn table() -> Result<TableDef>;

    /// Construct an instance from one hydrated row. Values arrive decoded to
    /// their declared portable types, in mapped column order.
    fn load(row: ValueRecord) -> Result<Self>;

    /// Current field values, in mapped column order. Transient fields are
    /// not included.
    fn values(&self) -> Vec<Value>;

    /// The primary key value.
    fn key(&self) -> Value;

    /// Store a generated primary key after an insert.
    fn set_key(&mut self, key: Value) -> Result<()>;

    /// The current optimistic-lock version, for version-tagged entities.
    fn version(&self) -> Option<i64> {
        None
    }

    fn set_version(&mut self, _version: i64) {}

    /// Attach the rows of an eagerly fetched relation. `relation` indexes
    /// into the relations declared by [`Entity::table`]; rows are decoded
    /// rows of the relation's target.
    fn load_relation(&mut self, relation: usize, _rows: Vec<ValueRecord>) -> Result<()> {
        Err(Error::configuration(format!(
            "entity does not accept rows for relation {relation}"
        )))
    }
}

/// The cached metadata for an entity type.
///
/// The first call per type runs the introspection pass; concurrent callers
/// block until it finishes and share the same [`TableDef`].
pub fn describe<E: Entity>() -> Result<Arc<TableDef>> {
    Registry::global().get_or_build(E::ID, E::table)
}

/// A field type stored as `Type::Enum` (variant name) or `Type::EnumInt`
/// (ordinal). [`EnumValue::to_value`] produces the dual-representation
/// statement value; the engine lowers it to the column's storage mode.
pub trait EnumValue: Sized {
    fn variant_name(&self) -> &'static str;

    fn ordinal(&self) -> i32;

    fn from_name(name: &str) -> Result<Self>;

    fn from_ordinal(ordinal: i32) -> Result<Self>;

    fn to_value(&self) -> Value {
        Value::Enum(ValueEnum::new(self.variant_name(), self.ordinal()))
    }

    /// Decode a stored enum value, accepting either representation.
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Self::from_name(&name),
            Value::I32(ordinal) => Self::from_ordinal(ordinal),
            Value::I64(ordinal) => Self::from_ordinal(i32::try_from(ordinal).map_err(|_| {
                Error::type_conversion(Value::I64(ordinal), "enum ordinal")
            })?),
            Value::Enum(repr) => Self::from_name(&repr.name),
            value => Err(Error::type_conversion(value, "enum")),
        }
    }
}
