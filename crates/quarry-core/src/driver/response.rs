use crate::stmt::Value;

/// Result-set column metadata, as reported by the engine.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,

    /// Declared numeric precision, when the engine reports one
    pub precision: Option<u32>,

    /// Declared numeric scale, when the engine reports one
    pub scale: Option<i32>,
}

impl ColumnInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            precision: None,
            scale: None,
        }
    }
}

/// What a statement produced.
#[derive(Debug)]
pub enum Rows {
    /// Number of rows affected by a write
    Count(u64),

    /// A materialized result set
    Values {
        columns: Vec<ColumnInfo>,
        rows: Vec<Vec<Value>>,
    },
}

impl Rows {
    pub fn count(&self) -> u64 {
        match self {
            Rows::Count(count) => *count,
            Rows::Values { rows, .. } => rows.len() as u64,
        }
    }

    pub fn into_values(self) -> (Vec<ColumnInfo>, Vec<Vec<Value>>) {
        match self {
            Rows::Values { columns, rows } => (columns, rows),
            Rows::Count(_) => (Vec::new(), Vec::new()),
        }
    }
}
