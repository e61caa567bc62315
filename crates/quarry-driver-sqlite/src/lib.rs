mod value;
pub(crate) use value::Value;

use quarry_core::driver::{Capability, ColumnInfo, Driver, Rows, Sql};
use quarry_core::{Error, Result};

use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use url::Url;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

const CAPABILITY: Capability = Capability {
    create_if_not_exists: true,
    returning: true,
    sequences: false,
    identity: true,
};

static NEXT_MEMORY_DB: AtomicUsize = AtomicUsize::new(1);

/// SQLite driver. In-memory databases use a process-unique shared-cache URI
/// so every session opened from the same driver sees the same database.
#[derive(Debug)]
pub struct Sqlite {
    source: Source,
    capability: Capability,
}

#[derive(Debug)]
enum Source {
    File(PathBuf),
    InMemory {
        uri: String,
        /// Held for the driver's lifetime; a shared in-memory database is
        /// dropped when its last connection closes.
        _anchor: Mutex<RusqliteConnection>,
    },
}

impl Sqlite {
    /// Create a driver from a `sqlite:` connection URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::configuration(format!("invalid connection URL `{url_str}`: {err}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::configuration(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Ok(Self::open(url.path()))
        }
    }

    /// Create a fresh in-memory database.
    pub fn in_memory() -> Result<Self> {
        let id = NEXT_MEMORY_DB.fetch_add(1, Ordering::Relaxed);
        let uri = format!("file:quarry_mem_{id}?mode=memory&cache=shared");
        let anchor = open_uri(&uri)?;
        Ok(Self {
            source: Source::InMemory {
                uri,
                _anchor: Mutex::new(anchor),
            },
            capability: CAPABILITY,
        })
    }

    /// Open a database at the given file path, creating it if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
            capability: CAPABILITY,
        }
    }
}

impl Driver for Sqlite {
    fn connect(&self) -> Result<Box<dyn quarry_core::Connection>> {
        let conn = match &self.source {
            Source::File(path) => RusqliteConnection::open(path).map_err(sqlite_err)?,
            Source::InMemory { uri, .. } => open_uri(uri)?,
        };
        conn.busy_timeout(Duration::from_secs(5)).map_err(sqlite_err)?;
        Ok(Box::new(Connection {
            conn,
            capability: self.capability.clone(),
        }))
    }

    fn capability(&self) -> &Capability {
        &self.capability
    }
}

fn open_uri(uri: &str) -> Result<RusqliteConnection> {
    RusqliteConnection::open_with_flags(
        uri,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI,
    )
    .map_err(sqlite_err)
}

fn sqlite_err(err: rusqlite::Error) -> Error {
    Error::execution(err.to_string(), None)
}

#[derive(Debug)]
pub struct Connection {
    conn: RusqliteConnection,
    capability: Capability,
}

impl Connection {
    fn batch(&mut self, sql: &str) -> Result<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|err| Error::execution(err.to_string(), Some(sql.to_string())))
    }
}

impl quarry_core::Connection for Connection {
    fn execute(&mut self, sql: &Sql) -> Result<Rows> {
        let fail = |err: rusqlite::Error| Error::execution(err.to_string(), Some(sql.text.clone()));

        let mut stmt = self.conn.prepare_cached(&sql.text).map_err(fail)?;
        let params: Vec<Value> = sql.params.iter().cloned().map(Value::from).collect();

        // Statements with no result columns are writes.
        if stmt.column_count() == 0 {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(fail)?;
            return Ok(Rows::Count(count as u64));
        }

        let columns: Vec<ColumnInfo> = stmt
            .column_names()
            .into_iter()
            .map(ColumnInfo::named)
            .collect();
        let width = columns.len();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(fail)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(fail)? {
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                let value: Value = row.get(index).map_err(fail)?;
                values.push(value.into_inner());
            }
            out.push(values);
        }

        Ok(Rows::Values { columns, rows: out })
    }

    fn last_insert_id(&mut self) -> Result<i64> {
        Ok(self.conn.last_insert_rowid())
    }

    fn column_exists(&mut self, table: &str, column: &str) -> Result<bool> {
        // PRAGMA table_info returns no rows for a missing table.
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .map_err(sqlite_err)?;
        let mut rows = stmt.query([]).map_err(sqlite_err)?;
        while let Some(row) = rows.next().map_err(sqlite_err)? {
            let name: String = row.get(1).map_err(sqlite_err)?;
            if name == column {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn begin(&mut self) -> Result<()> {
        self.batch("BEGIN")
    }

    fn commit(&mut self) -> Result<()> {
        self.batch("COMMIT")
    }

    fn rollback(&mut self) -> Result<()> {
        self.batch("ROLLBACK")
    }

    fn capability(&self) -> &Capability {
        &self.capability
    }
}
