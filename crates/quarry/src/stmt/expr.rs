use quarry_core::stmt::{ConditionChain, Connector, Predicate};

use std::fmt;
use std::marker::PhantomData;

/// A captured condition, built by comparing typed columns.
///
/// `and`/`or` extend the underlying chain left-to-right; connectors keep
/// their append order and are not reordered by precedence. A multi-node
/// operand is parenthesized on append, so composition is the way to group:
/// `a.and(b.or(c))` renders as `a AND (b OR c)`.
pub struct Expr<T> {
    pub(crate) untyped: ConditionChain,
    _p: PhantomData<T>,
}

impl Expr<bool> {
    pub(crate) fn from_chain(untyped: ConditionChain) -> Self {
        Self {
            untyped,
            _p: PhantomData,
        }
    }

    pub fn and(mut self, other: Expr<bool>) -> Self {
        self.untyped = self.untyped.append(Connector::And, other.untyped);
        self
    }

    pub fn or(mut self, other: Expr<bool>) -> Self {
        self.untyped = self.untyped.append(Connector::Or, other.untyped);
        self
    }

    pub(crate) fn into_chain(self) -> ConditionChain {
        self.untyped
    }
}

/// Explicitly parenthesize a condition.
pub fn group(expr: Expr<bool>) -> Expr<bool> {
    Expr::from_chain(ConditionChain::new(Predicate::Group(expr.untyped)))
}

impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            _p: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}
