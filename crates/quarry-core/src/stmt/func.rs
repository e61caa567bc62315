use super::Expr;

/// A function operand. Aggregates take a column operand (or none, for
/// `COUNT(*)`); `IfNull` is the portable scalar whose token differs per
/// dialect.
#[derive(Debug, Clone)]
pub enum ExprFunc {
    Avg(Box<Expr>),
    Count(Option<Box<Expr>>),
    IfNull(Box<Expr>, Box<Expr>),
    Max(Box<Expr>),
    Min(Box<Expr>),
    Sum(Box<Expr>),
}

impl ExprFunc {
    pub fn count() -> Self {
        Self::Count(None)
    }

    pub fn count_expr(expr: Expr) -> Self {
        Self::Count(Some(Box::new(expr)))
    }

    pub fn min(expr: Expr) -> Self {
        Self::Min(Box::new(expr))
    }

    pub fn max(expr: Expr) -> Self {
        Self::Max(Box::new(expr))
    }

    pub fn sum(expr: Expr) -> Self {
        Self::Sum(Box::new(expr))
    }

    pub fn avg(expr: Expr) -> Self {
        Self::Avg(Box::new(expr))
    }

    pub fn ifnull(expr: Expr, fallback: Expr) -> Self {
        Self::IfNull(Box::new(expr), Box::new(fallback))
    }

    /// The portable function name, before dialect translation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Avg(..) => "AVG",
            Self::Count(..) => "COUNT",
            Self::IfNull(..) => "IFNULL",
            Self::Max(..) => "MAX",
            Self::Min(..) => "MIN",
            Self::Sum(..) => "SUM",
        }
    }
}
