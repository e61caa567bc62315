use super::{ConditionChain, Connector, Expr, Join, OrderBy, Returning};
use crate::schema::ModelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    Intersect,
}

/// A fully assembled SELECT plan. Immutable once handed to the renderer;
/// rendering is pure and repeatable.
#[derive(Debug, Clone)]
pub struct Query {
    /// The base table's model
    pub model: ModelId,

    /// Join clauses, in declaration order
    pub joins: Vec<Join>,

    /// WHERE chain
    pub filter: ConditionChain,

    pub group_by: Vec<Expr>,

    /// HAVING chain
    pub having: ConditionChain,

    pub order_by: Option<OrderBy>,

    pub returning: Returning,

    pub limit: Option<u64>,

    /// UNION/INTERSECT operands, appended after the base query. Each operand
    /// must share the base query's projection arity.
    pub set_ops: Vec<(SetOp, Query)>,
}

impl Query {
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            joins: Vec::new(),
            filter: ConditionChain::default(),
            group_by: Vec::new(),
            having: ConditionChain::default(),
            order_by: None,
            returning: Returning::Star,
            limit: None,
            set_ops: Vec::new(),
        }
    }

    pub fn and(&mut self, chain: ConditionChain) {
        self.filter = std::mem::take(&mut self.filter).append(Connector::And, chain);
    }

    pub fn or(&mut self, chain: ConditionChain) {
        self.filter = std::mem::take(&mut self.filter).append(Connector::Or, chain);
    }

    /// The models in FROM/JOIN order. Position in this list is the table's
    /// alias index (`t0`, `t1`, ...).
    pub fn sources(&self) -> Vec<ModelId> {
        let mut sources = Vec::with_capacity(1 + self.joins.len());
        sources.push(self.model);
        sources.extend(self.joins.iter().map(|join| join.model));
        sources
    }
}
