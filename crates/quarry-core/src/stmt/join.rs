use super::ConditionChain;
use crate::schema::ModelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

/// One join clause. Joins compose left-to-right in declaration order; the ON
/// condition is an equi-join style chain.
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub model: ModelId,
    pub on: ConditionChain,
}
