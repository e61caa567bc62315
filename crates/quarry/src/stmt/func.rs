use super::{Column, Expr, IntoExpr};

use quarry_core::stmt::{self, Comparator, ConditionChain, ExprFunc};

use std::fmt;
use std::marker::PhantomData;

/// A function operand, usable as a projection slot or compared in a HAVING
/// chain.
pub struct Func<T> {
    pub(crate) untyped: stmt::Expr,
    _p: PhantomData<T>,
}

/// `COUNT(*)`.
pub fn count() -> Func<i64> {
    Func::new(ExprFunc::count().into())
}

impl<T> Column<T> {
    pub fn count(self) -> Func<i64> {
        Func::new(ExprFunc::count_expr(self.expr()).into())
    }

    pub fn min(self) -> Func<T> {
        Func::new(ExprFunc::min(self.expr()).into())
    }

    pub fn max(self) -> Func<T> {
        Func::new(ExprFunc::max(self.expr()).into())
    }

    pub fn sum(self) -> Func<T> {
        Func::new(ExprFunc::sum(self.expr()).into())
    }

    pub fn avg(self) -> Func<f64> {
        Func::new(ExprFunc::avg(self.expr()).into())
    }

    /// The column's value, or `fallback` where it is null. Rejected up front
    /// on dialects without a mapping.
    pub fn if_null(self, fallback: impl IntoExpr<T>) -> Func<T> {
        Func::new(ExprFunc::ifnull(self.expr(), fallback.into_expr()).into())
    }
}

impl<T> Func<T> {
    fn new(untyped: stmt::Expr) -> Self {
        Self {
            untyped,
            _p: PhantomData,
        }
    }

    fn compare(self, op: Comparator, rhs: stmt::Expr) -> Expr<bool> {
        Expr::from_chain(ConditionChain::compare(self.untyped, op, Some(rhs)))
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Eq, rhs.into_expr())
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Ne, rhs.into_expr())
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Gt, rhs.into_expr())
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Ge, rhs.into_expr())
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Lt, rhs.into_expr())
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(Comparator::Le, rhs.into_expr())
    }
}

impl<T> Clone for Func<T> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            _p: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Func<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}
