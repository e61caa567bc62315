#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod flavor;
pub use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

mod verify;

// Fragment serializers
mod column_def;
mod expr;
mod statement;
mod value;

use crate::stmt::Statement;

use quarry_core::schema::{ModelId, Registry, TableDef};
use quarry_core::Result;

use std::sync::Arc;

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Metadata against which the statement is resolved
    registry: &'a Registry,

    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// FROM/JOIN tables of the statement being rendered. Position in this
    /// list is the table's alias index.
    sources: Vec<Arc<TableDef>>,

    /// True when column references should be alias-qualified.
    alias: bool,
}

impl<'a> Serializer<'a> {
    pub fn new(flavor: Flavor, registry: &'a Registry) -> Self {
        Self { registry, flavor }
    }

    pub fn sqlite(registry: &'a Registry) -> Self {
        Self::new(Flavor::Sqlite, registry)
    }

    pub fn postgresql(registry: &'a Registry) -> Self {
        Self::new(Flavor::Postgresql, registry)
    }

    pub fn oracle(registry: &'a Registry) -> Self {
        Self::new(Flavor::Oracle, registry)
    }

    pub fn sqlserver(registry: &'a Registry) -> Self {
        Self::new(Flavor::SqlServer, registry)
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Render a statement, verifying it against the registered metadata
    /// first. Rendering is pure; repeated calls yield identical SQL.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> Result<String> {
        self.verify(stmt)?;

        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            sources: Vec::new(),
            alias: false,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        Ok(ret)
    }

    fn table(&self, id: ModelId) -> Arc<TableDef> {
        match self.registry.get(id) {
            Some(table) => table,
            // Verification resolves every model before rendering starts.
            None => panic!("model {id:?} is not registered"),
        }
    }
}

impl<T> Formatter<'_, T> {
    fn flavor(&self) -> Flavor {
        self.serializer.flavor
    }

    fn table(&self, id: ModelId) -> Arc<TableDef> {
        self.serializer.table(id)
    }
}
