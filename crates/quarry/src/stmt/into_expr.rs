use super::Column;
use crate::entity::Entity;

use quarry_core::stmt::{self, Value};

/// Conversion into a statement operand, typed by the column the operand
/// compares against.
pub trait IntoExpr<T> {
    fn into_expr(self) -> stmt::Expr;
}

impl<T: Into<Value>> IntoExpr<T> for T {
    fn into_expr(self) -> stmt::Expr {
        stmt::Expr::Value(self.into())
    }
}

impl IntoExpr<String> for &str {
    fn into_expr(self) -> stmt::Expr {
        stmt::Expr::value(self)
    }
}

// Nullable columns compare against bare values of the inner type.
impl<T: Into<Value>> IntoExpr<Option<T>> for T {
    fn into_expr(self) -> stmt::Expr {
        stmt::Expr::Value(self.into())
    }
}

impl IntoExpr<Option<String>> for &str {
    fn into_expr(self) -> stmt::Expr {
        stmt::Expr::value(self)
    }
}

// Column-to-column comparison, used in join conditions.
impl<T> IntoExpr<T> for Column<T> {
    fn into_expr(self) -> stmt::Expr {
        self.expr()
    }
}

// An entity reference compares by its primary key.
impl<E: Entity> IntoExpr<E> for &E {
    fn into_expr(self) -> stmt::Expr {
        stmt::Expr::Value(self.key())
    }
}
