use super::{Column, Expr, IntoExpr};
use crate::entity::Entity;

use quarry_core::stmt::{self, Connector};

use std::fmt;
use std::marker::PhantomData;

/// A typed bulk UPDATE plan. Assigns only the fields explicitly set; rows
/// matching the filter are updated in place, bypassing version checks.
pub struct Update<E> {
    pub(crate) untyped: stmt::Update,
    _p: PhantomData<E>,
}

impl<E: Entity> Update<E> {
    pub fn new() -> Self {
        Self::from_untyped(stmt::Update::new(E::ID))
    }

    pub fn filter(expr: Expr<bool>) -> Self {
        Self::new().and(expr)
    }

    pub(crate) fn from_untyped(untyped: stmt::Update) -> Self {
        Self {
            untyped,
            _p: PhantomData,
        }
    }

    pub fn set<T>(mut self, column: Column<T>, value: impl IntoExpr<T>) -> Self {
        self.untyped
            .assignments
            .set(column.field().index, value.into_expr());
        self
    }

    pub fn and(mut self, expr: Expr<bool>) -> Self {
        self.untyped.filter =
            std::mem::take(&mut self.untyped.filter).append(Connector::And, expr.into_chain());
        self
    }
}

impl<E: Entity> Default for Update<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Update<E> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            _p: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Update<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}
