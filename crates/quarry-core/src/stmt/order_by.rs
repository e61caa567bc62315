use super::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    First,
    Last,
}

#[derive(Debug, Clone)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Direction,
    pub nulls: Option<NullOrdering>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderBy {
    pub exprs: Vec<OrderByExpr>,
}

impl OrderBy {
    pub fn push(&mut self, expr: OrderByExpr) {
        self.exprs.push(expr);
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
