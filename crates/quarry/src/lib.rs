mod engine;

mod entity;
pub use entity::{describe, Entity, EnumValue};

pub mod relation;
pub use relation::Lazy;

mod session;
pub use session::{Session, SessionFactory};

pub mod stmt;
pub use stmt::{Column, Delete, Select, Update};

pub use quarry_core::driver;
pub use quarry_core::schema;
pub use quarry_core::schema::{FieldSpec, GeneratorStrategy, ModelId, TableBuilder, TableDef};
pub use quarry_core::stmt::{Type, Value, ValueEnum, ValueRecord};
pub use quarry_core::{Error, Result};
pub use quarry_sql::Flavor;
