use super::Expr;

/// The select projection.
#[derive(Debug, Clone, Default)]
pub enum Returning {
    /// All mapped columns of the base type, in field order. Hydration relies
    /// on that order.
    #[default]
    Star,

    /// An explicit shape mixing plain columns and function expressions.
    Columns(Vec<Expr>),
}

impl Returning {
    pub fn is_star(&self) -> bool {
        matches!(self, Self::Star)
    }

    /// Projection arity, if explicitly shaped.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Self::Star => None,
            Self::Columns(exprs) => Some(exprs.len()),
        }
    }
}
