mod builder;
pub use builder::{FieldSpec, TableBuilder};

mod field;
pub use field::{FieldDef, FieldId};

mod model;
pub use model::ModelId;

mod registry;
pub use registry::Registry;

mod relation;
pub use relation::{BelongsTo, HasMany, ManyToMany, Relation};

mod table;
pub use table::{GeneratorStrategy, IndexDef, Inheritance, TableDef};
