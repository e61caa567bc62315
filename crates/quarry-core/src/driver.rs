mod capability;
pub use capability::Capability;

mod response;
pub use response::{ColumnInfo, Rows};

mod sql;
pub use sql::Sql;

use crate::Result;

use std::fmt::Debug;

/// A live database connection. One connection backs one session; the
/// session serializes access, so `Send` without `Sync` is sufficient.
pub trait Connection: Debug + Send {
    /// Execute a single parameterized statement and return its result.
    fn execute(&mut self, sql: &Sql) -> Result<Rows>;

    /// The key assigned by the engine for the most recent insert on this
    /// connection. Only meaningful right after an identity insert when the
    /// engine cannot return keys inline.
    fn last_insert_id(&mut self) -> Result<i64>;

    /// Whether `column` exists on `table`, per the live catalog.
    fn column_exists(&mut self, table: &str, column: &str) -> Result<bool>;

    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    fn capability(&self) -> &Capability;
}

/// A connection source. Shared across sessions; each `connect` call hands
/// out an independent connection.
pub trait Driver: Debug + Send + Sync + 'static {
    fn connect(&self) -> Result<Box<dyn Connection>>;

    fn capability(&self) -> &Capability;
}
