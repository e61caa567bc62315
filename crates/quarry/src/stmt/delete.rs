use super::Expr;
use crate::entity::Entity;

use quarry_core::stmt::{self, Connector};

use std::fmt;
use std::marker::PhantomData;

/// A typed bulk DELETE plan. Cascade relations of matching rows are honored
/// when the plan runs.
pub struct Delete<E> {
    pub(crate) untyped: stmt::Delete,
    _p: PhantomData<E>,
}

impl<E: Entity> Delete<E> {
    pub fn all() -> Self {
        Self::from_untyped(stmt::Delete::new(E::ID))
    }

    pub fn filter(expr: Expr<bool>) -> Self {
        Self::all().and(expr)
    }

    pub(crate) fn from_untyped(untyped: stmt::Delete) -> Self {
        Self {
            untyped,
            _p: PhantomData,
        }
    }

    pub fn and(mut self, expr: Expr<bool>) -> Self {
        self.untyped.filter =
            std::mem::take(&mut self.untyped.filter).append(Connector::And, expr.into_chain());
        self
    }
}

impl<E> Clone for Delete<E> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            _p: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Delete<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}
