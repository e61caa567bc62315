use super::Expr;

use indexmap::IndexMap;

/// SET-clause assignments for an update, keyed by field index on the target
/// model. Iteration order is assignment order.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    exprs: IndexMap<usize, Expr>,
}

impl Assignments {
    pub fn set(&mut self, field: usize, expr: impl Into<Expr>) {
        self.exprs.insert(field, expr.into());
    }

    pub fn contains(&self, field: usize) -> bool {
        self.exprs.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Expr)> + '_ {
        self.exprs.iter().map(|(field, expr)| (*field, expr))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Expr)> + '_ {
        self.exprs.iter_mut().map(|(field, expr)| (*field, expr))
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
