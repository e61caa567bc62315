use quarry_core::stmt::{self, Direction, NullOrdering, OrderByExpr};

/// One ORDER BY term.
#[derive(Debug, Clone)]
pub struct Order {
    pub(crate) untyped: OrderByExpr,
}

impl Order {
    pub(crate) fn new(expr: stmt::Expr, direction: Direction) -> Self {
        Self {
            untyped: OrderByExpr {
                expr,
                direction,
                nulls: None,
            },
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.untyped.nulls = Some(NullOrdering::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.untyped.nulls = Some(NullOrdering::Last);
        self
    }
}
