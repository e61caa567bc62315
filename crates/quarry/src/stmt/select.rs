use super::{Column, Delete, Expr, Func, Order, Update};
use crate::entity::Entity;

use quarry_core::stmt::{self, Connector, Join, JoinKind, OrderBy, Returning, SetOp};

use std::fmt;
use std::marker::PhantomData;

/// A typed SELECT plan over entity `E`. Builder methods consume and return
/// the plan; nothing touches the database until a session terminal runs it.
pub struct Select<E> {
    pub(crate) untyped: stmt::Query,
    _p: PhantomData<E>,
}

/// One explicit projection slot, either a plain column or a function.
#[derive(Debug, Clone)]
pub struct Selection {
    pub(crate) expr: stmt::Expr,
}

impl<T> From<Column<T>> for Selection {
    fn from(column: Column<T>) -> Self {
        Self {
            expr: column.expr(),
        }
    }
}

impl<T> From<Func<T>> for Selection {
    fn from(func: Func<T>) -> Self {
        Self { expr: func.untyped }
    }
}

impl<E: Entity> Select<E> {
    /// Select every row of `E`.
    pub fn all() -> Self {
        Self::from_untyped(stmt::Query::new(E::ID))
    }

    pub fn filter(expr: Expr<bool>) -> Self {
        Self::all().and(expr)
    }

    pub(crate) fn from_untyped(untyped: stmt::Query) -> Self {
        Self {
            untyped,
            _p: PhantomData,
        }
    }

    pub fn and(mut self, expr: Expr<bool>) -> Self {
        self.untyped.and(expr.into_chain());
        self
    }

    pub fn or(mut self, expr: Expr<bool>) -> Self {
        self.untyped.or(expr.into_chain());
        self
    }

    /// `INNER JOIN` against entity `O`. The joined table takes the next
    /// alias index, in declaration order.
    pub fn inner_join<O: Entity>(self, on: Expr<bool>) -> Self {
        self.join(JoinKind::Inner, O::ID, on)
    }

    pub fn left_outer_join<O: Entity>(self, on: Expr<bool>) -> Self {
        self.join(JoinKind::LeftOuter, O::ID, on)
    }

    fn join(mut self, kind: JoinKind, model: quarry_core::schema::ModelId, on: Expr<bool>) -> Self {
        self.untyped.joins.push(Join {
            kind,
            model,
            on: on.into_chain(),
        });
        self
    }

    pub fn group_by<T>(mut self, column: Column<T>) -> Self {
        self.untyped.group_by.push(column.expr());
        self
    }

    pub fn having(mut self, expr: Expr<bool>) -> Self {
        self.untyped.having =
            std::mem::take(&mut self.untyped.having).append(Connector::And, expr.into_chain());
        self
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.untyped
            .order_by
            .get_or_insert_with(OrderBy::default)
            .push(order.untyped);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.untyped.limit = Some(limit);
        self
    }

    /// Replace the star projection with an explicit shape. Results of a
    /// shaped select come back as raw rows, not entities.
    pub fn project(mut self, items: impl IntoIterator<Item = Selection>) -> Self {
        self.untyped.returning =
            Returning::Columns(items.into_iter().map(|item| item.expr).collect());
        self
    }

    /// Append a UNION operand. Both sides must project the same number of
    /// columns.
    pub fn union(mut self, other: Select<E>) -> Self {
        self.untyped.set_ops.push((SetOp::Union, other.untyped));
        self
    }

    pub fn intersect(mut self, other: Select<E>) -> Self {
        self.untyped.set_ops.push((SetOp::Intersect, other.untyped));
        self
    }

    /// Turn this plan into a DELETE with the same filter.
    pub fn delete(self) -> Delete<E> {
        Delete::from_untyped(stmt::Delete {
            model: E::ID,
            filter: self.untyped.filter,
        })
    }

    /// Turn this plan into an UPDATE with the same filter.
    pub fn update(self) -> Update<E> {
        let mut untyped = stmt::Update::new(E::ID);
        untyped.filter = self.untyped.filter;
        Update::from_untyped(untyped)
    }
}

impl<E> Clone for Select<E> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            _p: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Select<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}
