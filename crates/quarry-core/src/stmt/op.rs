use std::fmt;

/// Comparison operators between two operands (or one, for the null checks).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    In,
    IsNull,
    IsNotNull,
}

impl Comparator {
    /// True when the comparator takes no right-hand operand.
    pub fn is_unary(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Comparator::*;

        match self {
            Eq => "=".fmt(f),
            Ne => "<>".fmt(f),
            Gt => ">".fmt(f),
            Ge => ">=".fmt(f),
            Lt => "<".fmt(f),
            Le => "<=".fmt(f),
            Like => "LIKE".fmt(f),
            In => "IN".fmt(f),
            IsNull => "IS NULL".fmt(f),
            IsNotNull => "IS NOT NULL".fmt(f),
        }
    }
}

/// The logical connector recorded between one condition node and the next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => "AND".fmt(f),
            Self::Or => "OR".fmt(f),
        }
    }
}
