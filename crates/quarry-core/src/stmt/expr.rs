use super::{ExprFunc, Query, Value};
use crate::schema::FieldId;

/// An operand inside a condition, projection, or assignment.
#[derive(Debug, Clone)]
pub enum Expr {
    /// References a mapped column. The owning table is resolved against the
    /// statement's FROM/JOIN list at render time and always alias-qualified.
    Column(ExprColumn),

    /// Function call (aggregate or scalar)
    Func(ExprFunc),

    /// A sub-select used as an operand
    Stmt(Box<Query>),

    /// A constant, bound as a positional parameter
    Value(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprColumn {
    pub field: FieldId,
}

impl Expr {
    pub fn column(field: impl Into<FieldId>) -> Self {
        Self::Column(ExprColumn {
            field: field.into(),
        })
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(..))
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(..))
    }

    /// Returns true if the operand is function-derived rather than a stored
    /// column. Hydration uses this to tell shape slots apart.
    pub fn is_func(&self) -> bool {
        matches!(self, Self::Func(..))
    }

    pub fn as_column(&self) -> Option<&ExprColumn> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            expr => panic!("expected value expression, but was {expr:?}"),
        }
    }
}

impl From<ExprFunc> for Expr {
    fn from(func: ExprFunc) -> Self {
        Self::Func(func)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Query> for Expr {
    fn from(query: Query) -> Self {
        Self::Stmt(Box::new(query))
    }
}
