use crate::stmt::{ColumnDef, ExprFunc, Type};

use quarry_core::driver::ColumnInfo;
use quarry_core::stmt::Value;
use quarry_core::{Error, Result};

use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// The SQL dialects understood by the serializer. Each flavor owns the
/// dialect-specific parts of rendering: placeholder style, type names,
/// function tokens, limit syntax, and DDL guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Sqlite,
    Postgresql,
    Oracle,
    SqlServer,
}

impl Flavor {
    /// The dialect token for a portable function. Dialects without an
    /// equivalent reject the statement up front rather than emitting SQL
    /// that fails at execution time.
    pub fn function_token(self, func: &ExprFunc) -> Result<&'static str> {
        match func {
            ExprFunc::IfNull(..) => match self {
                Self::Sqlite => Ok("IFNULL"),
                Self::Postgresql => Ok("COALESCE"),
                Self::Oracle => Ok("NVL"),
                Self::SqlServer => Err(Error::configuration(
                    "function IFNULL has no mapping for the SQL Server dialect",
                )),
            },
            func => Ok(func.name()),
        }
    }

    /// Whether INSERT can return generated keys inline.
    pub fn supports_returning(self) -> bool {
        matches!(self, Self::Sqlite | Self::Postgresql)
    }

    pub fn supports_null_ordering(self) -> bool {
        !matches!(self, Self::SqlServer)
    }

    pub fn create_if_not_exists(self) -> bool {
        matches!(self, Self::Sqlite | Self::Postgresql)
    }

    /// Statement fetching the next value of a named sequence.
    pub fn sequence_next_sql(self, sequence: &str) -> Result<String> {
        match self {
            Self::Postgresql => Ok(format!("SELECT nextval('{sequence}')")),
            Self::Oracle => Ok(format!("SELECT {sequence}.NEXTVAL FROM DUAL")),
            Self::SqlServer => Ok(format!("SELECT NEXT VALUE FOR {sequence}")),
            _ => Err(Error::configuration(format!(
                "the {self:?} dialect does not support sequences"
            ))),
        }
    }

    /// The positional parameter marker for the 1-based index `n`.
    pub fn placeholder(self, n: usize) -> String {
        match self {
            Self::Sqlite => format!("?{n}"),
            Self::Postgresql => format!("${n}"),
            Self::Oracle => format!(":{n}"),
            Self::SqlServer => format!("@p{n}"),
        }
    }

    /// Quote an identifier.
    pub fn quoted(self, name: &str) -> String {
        match self {
            Self::SqlServer => format!("[{name}]"),
            _ => format!("\"{name}\""),
        }
    }

    /// Keyword between a table name and its alias.
    pub(super) fn alias_sep(self) -> &'static str {
        match self {
            Self::Oracle => " ",
            _ => " AS ",
        }
    }

    pub(super) fn add_column_keyword(self) -> &'static str {
        match self {
            Self::Sqlite | Self::Postgresql => "ADD COLUMN",
            Self::Oracle | Self::SqlServer => "ADD",
        }
    }

    pub(super) fn identity_suffix(self) -> &'static str {
        match self {
            // Rendered as INTEGER PRIMARY KEY AUTOINCREMENT instead
            Self::Sqlite => "",
            Self::Postgresql | Self::Oracle => " GENERATED BY DEFAULT AS IDENTITY",
            Self::SqlServer => " IDENTITY(1,1)",
        }
    }

    /// The engine column type for a column definition.
    pub fn column_type(self, column: &ColumnDef) -> String {
        use Type::*;

        match self {
            Self::Sqlite => match column.ty {
                Boolean => "BOOLEAN".into(),
                Integer | EnumInt => "INTEGER".into(),
                BigInt | ForeignKey => "BIGINT".into(),
                Float => "REAL".into(),
                Double => "DOUBLE".into(),
                Text | Enum => bounded(column, "VARCHAR", "TEXT"),
                Timestamp => "TIMESTAMP".into(),
                Blob => "BLOB".into(),
                Clob => "TEXT".into(),
            },
            Self::Postgresql => match column.ty {
                Boolean => "BOOLEAN".into(),
                Integer | EnumInt => "INTEGER".into(),
                BigInt | ForeignKey => "BIGINT".into(),
                Float => "REAL".into(),
                Double => "DOUBLE PRECISION".into(),
                Text | Enum => bounded(column, "VARCHAR", "TEXT"),
                Timestamp => "TIMESTAMP".into(),
                Blob => "BYTEA".into(),
                Clob => "TEXT".into(),
            },
            Self::Oracle => match column.ty {
                Boolean => "NUMBER(1)".into(),
                Integer | EnumInt => "NUMBER(10)".into(),
                BigInt | ForeignKey => "NUMBER(19)".into(),
                Float => "BINARY_FLOAT".into(),
                Double => "BINARY_DOUBLE".into(),
                Text | Enum => bounded(column, "VARCHAR2", "VARCHAR2(4000)"),
                Timestamp => "TIMESTAMP".into(),
                Blob => "BLOB".into(),
                Clob => "CLOB".into(),
            },
            Self::SqlServer => match column.ty {
                Boolean => "BIT".into(),
                Integer | EnumInt => "INT".into(),
                BigInt | ForeignKey => "BIGINT".into(),
                Float => "REAL".into(),
                Double => "FLOAT".into(),
                Text | Enum => bounded(column, "NVARCHAR", "NVARCHAR(MAX)"),
                Timestamp => "DATETIME2".into(),
                Blob => "VARBINARY(MAX)".into(),
                Clob => "NVARCHAR(MAX)".into(),
            },
        }
    }

    /// Coerce a raw engine value to the declared portable type.
    pub fn decode(self, info: &ColumnInfo, ty: Type, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        // Oracle reports every numeric column as NUMBER(p,s); widen to the
        // family the precision and scale imply before the portable coercion.
        let value = match self {
            Self::Oracle => widen_number(info, value),
            _ => value,
        };

        match ty {
            Type::Boolean => value.to_bool().map(Value::Bool),
            Type::Integer | Type::EnumInt => value.to_i32().map(Value::I32),
            Type::BigInt | Type::ForeignKey => value.to_i64().map(Value::I64),
            Type::Float => value.to_f64().map(|v| Value::F32(v as f32)),
            Type::Double => value.to_f64().map(Value::F64),
            Type::Text | Type::Clob | Type::Enum => value.to_string_value().map(Value::String),
            Type::Timestamp => match value {
                Value::Timestamp(v) => Ok(Value::Timestamp(v)),
                Value::String(v) => NaiveDateTime::parse_from_str(&v, TIMESTAMP_FORMAT)
                    .map(Value::Timestamp)
                    .map_err(|_| Error::type_conversion(Value::String(v), "Timestamp")),
                value => Err(Error::type_conversion(value, "Timestamp")),
            },
            Type::Blob => match value {
                Value::Bytes(v) => Ok(Value::Bytes(v)),
                value => Err(Error::type_conversion(value, "Bytes")),
            },
        }
    }

    /// Pick a portable type for a result column with no mapped field, from
    /// the engine-reported precision and scale. Returns `None` when the
    /// engine reports nothing useful.
    pub fn sniff_numeric(self, info: &ColumnInfo) -> Option<Type> {
        match (info.precision, info.scale) {
            (_, Some(scale)) if scale > 0 => Some(Type::Double),
            (None, Some(_)) => Some(Type::Double),
            (None, None) => None,
            (Some(precision), _) if precision <= 9 => Some(Type::Integer),
            (Some(_), _) => Some(Type::BigInt),
        }
    }
}

fn bounded(column: &ColumnDef, with_length: &str, unbounded: &str) -> String {
    match column.length {
        Some(length) => format!("{with_length}({length})"),
        None => unbounded.into(),
    }
}

/// Move a generic NUMBER value into the representation its declared
/// precision and scale imply: fractional or unconstrained precision reads
/// as a double, small precision as a 32-bit integer, the rest as 64-bit.
fn widen_number(info: &ColumnInfo, value: Value) -> Value {
    let numeric = matches!(
        value,
        Value::I32(_) | Value::I64(_) | Value::F32(_) | Value::F64(_)
    );
    if !numeric {
        return value;
    }

    match (info.precision, info.scale) {
        (_, Some(scale)) if scale > 0 => match value.clone().to_f64() {
            Ok(v) => Value::F64(v),
            Err(_) => value,
        },
        (None, _) => match value.clone().to_f64() {
            Ok(v) => Value::F64(v),
            Err(_) => value,
        },
        (Some(precision), _) if precision <= 9 => match value.clone().to_i32() {
            Ok(v) => Value::I32(v),
            Err(_) => value,
        },
        (Some(_), _) => match value.clone().to_i64() {
            Ok(v) => Value::I64(v),
            Err(_) => value,
        },
    }
}
