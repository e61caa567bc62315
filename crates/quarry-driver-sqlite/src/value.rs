use quarry_core::stmt::Value as CoreValue;

use rusqlite::types::{
    FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value as SqlValue, ValueRef,
};

/// Timestamps are stored as text in this format; the engine-side decode pass
/// parses them back.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Bridges core values and rusqlite's parameter and column types.
#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    pub fn into_inner(self) -> CoreValue {
        self.0
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match &self.0 {
            CoreValue::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            CoreValue::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            CoreValue::I32(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            CoreValue::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            CoreValue::F32(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v as f64))),
            CoreValue::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            CoreValue::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            CoreValue::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            CoreValue::Timestamp(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.format(TIMESTAMP_FORMAT).to_string(),
            ))),
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            // Enums are lowered to their storage representation before the
            // statement reaches the driver.
            value => Err(rusqlite::Error::ToSqlConversionFailure(
                format!("cannot bind {value:?} as a SQLite parameter").into(),
            )),
        }
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Self(CoreValue::Null),
            ValueRef::Integer(v) => Self(CoreValue::I64(v)),
            ValueRef::Real(v) => Self(CoreValue::F64(v)),
            ValueRef::Text(v) => {
                let text = std::str::from_utf8(v)
                    .map_err(|err| FromSqlError::Other(Box::new(err)))?;
                Self(CoreValue::String(text.to_string()))
            }
            ValueRef::Blob(v) => Self(CoreValue::Bytes(v.to_vec())),
        })
    }
}
