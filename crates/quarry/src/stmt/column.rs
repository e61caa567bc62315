use super::{Expr, IntoExpr, Order, Select};

use quarry_core::schema::{FieldId, ModelId};
use quarry_core::stmt::{self, Comparator, ConditionChain, Direction, Value};

use std::fmt;
use std::marker::PhantomData;

/// A typed reference to one mapped field, usually exposed as an associated
/// constant on the entity type. Comparison methods capture conditions as
/// statement nodes instead of evaluating them.
pub struct Column<T> {
    field: FieldId,
    _p: PhantomData<T>,
}

impl<T> Column<T> {
    pub const fn new(model: ModelId, index: usize) -> Self {
        Self {
            field: FieldId::new(model, index),
            _p: PhantomData,
        }
    }

    pub fn field(self) -> FieldId {
        self.field
    }

    pub(crate) fn expr(self) -> stmt::Expr {
        stmt::Expr::column(self.field)
    }

    fn compare(self, op: Comparator, rhs: Option<stmt::Expr>) -> Expr<bool> {
        Expr::from_chain(ConditionChain::compare(self.expr(), op, rhs))
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Eq, Some(rhs.into_expr()))
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Ne, Some(rhs.into_expr()))
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Gt, Some(rhs.into_expr()))
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Ge, Some(rhs.into_expr()))
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Lt, Some(rhs.into_expr()))
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Le, Some(rhs.into_expr()))
    }

    pub fn like(self, pattern: impl Into<String>) -> Expr<bool> {
        self.compare(Comparator::Like, Some(stmt::Expr::value(pattern.into())))
    }

    pub fn is_null(self) -> Expr<bool> {
        self.compare(Comparator::IsNull, None)
    }

    pub fn is_not_null(self) -> Expr<bool> {
        self.compare(Comparator::IsNotNull, None)
    }

    /// `column IN (v1, v2, ...)`. The values bind as one placeholder each.
    pub fn in_list<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Expr<bool> {
        let list = Value::List(values.into_iter().map(Into::into).collect());
        self.compare(Comparator::In, Some(stmt::Expr::Value(list)))
    }

    /// `column IN (SELECT ...)`.
    pub fn in_select<E>(self, select: Select<E>) -> Expr<bool> {
        self.compare(Comparator::In, Some(select.untyped.into()))
    }

    pub fn asc(self) -> Order {
        Order::new(self.expr(), Direction::Asc)
    }

    pub fn desc(self) -> Order {
        Order::new(self.expr(), Direction::Desc)
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column({:?})", self.field)
    }
}
