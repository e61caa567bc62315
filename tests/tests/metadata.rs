//! Test the metadata registry at the façade level: introspection runs once
//! per process and registration is idempotent.

use tests::entities::*;
use tests::sqlite_factory;

use pretty_assertions::assert_eq;
use quarry::stmt::Select;
use quarry::{
    describe, Entity, FieldSpec, GeneratorStrategy, ModelId, Result, TableBuilder, TableDef, Type,
    Value, ValueRecord,
};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static BUILDS: AtomicUsize = AtomicUsize::new(0);

struct Counted {
    id: i64,
}

impl Entity for Counted {
    const ID: ModelId = ModelId(9001);

    fn table() -> Result<TableDef> {
        BUILDS.fetch_add(1, Ordering::SeqCst);
        TableBuilder::new(Self::ID, "Counted", "counted")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .generator(GeneratorStrategy::Identity)
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![self.id.into()]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

#[test]
fn introspection_runs_once_per_process() {
    let first = describe::<Counted>().unwrap();
    let second = describe::<Counted>().unwrap();

    assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn the_table_def_reflects_the_mapping() {
    let def = describe::<User>().unwrap();

    assert_eq!(def.model_name, "User");
    assert_eq!(def.name, "users");
    assert_eq!(def.fields.len(), 4);
    assert_eq!(def.fields[2].name, "email");
    assert!(def.fields[2].nullable);
    assert_eq!(def.primary_key, Some(0));
    assert_eq!(def.generator, GeneratorStrategy::Identity);
}

#[test]
fn registration_and_ddl_are_idempotent() {
    let mut factory = sqlite_factory().unwrap();

    // Registering again and re-running DDL leaves the schema alone.
    factory.register::<User>().unwrap();
    factory.create_tables().unwrap();

    let mut session = factory.open_session().unwrap();
    session.insert(&mut User::new("alice", 33)).unwrap();
    assert_eq!(session.count(Select::<User>::all()).unwrap(), 1);
}

#[test]
fn unique_fields_carry_an_implicit_index() {
    let def = describe::<Tag>().unwrap();

    assert_eq!(def.indexes.len(), 1);
    assert!(def.indexes[0].unique);
    assert_eq!(def.indexes[0].fields, vec![1]);
}
