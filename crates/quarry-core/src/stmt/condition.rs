use super::{Comparator, Connector, Expr};

/// A left-deep chain of predicates.
///
/// Nodes render in append order with their recorded AND/OR connectors; there
/// is no precedence reordering and no deduplication. Mixed AND/OR logic that
/// needs grouping must use an explicit [`Predicate::Group`].
#[derive(Debug, Clone, Default)]
pub struct ConditionChain {
    pub nodes: Vec<ConditionNode>,
}

/// One predicate in the chain plus the connector linking it to the previous
/// node (`None` for the first node).
#[derive(Debug, Clone)]
pub struct ConditionNode {
    pub connector: Option<Connector>,
    pub predicate: Predicate,
}

#[derive(Debug, Clone)]
pub enum Predicate {
    /// `lhs <op> rhs`, or `lhs IS [NOT] NULL` when the comparator is unary.
    Compare {
        lhs: Expr,
        op: Comparator,
        rhs: Option<Expr>,
    },

    /// A parenthesized nested chain.
    Group(ConditionChain),
}

impl ConditionChain {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            nodes: vec![ConditionNode {
                connector: None,
                predicate,
            }],
        }
    }

    pub fn compare(lhs: Expr, op: Comparator, rhs: Option<Expr>) -> Self {
        Self::new(Predicate::Compare { lhs, op, rhs })
    }

    /// Append a predicate with an `AND` connector, producing a new chain.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.push(Connector::And, predicate);
        self
    }

    /// Append a predicate with an `OR` connector, producing a new chain.
    pub fn or(mut self, predicate: Predicate) -> Self {
        self.push(Connector::Or, predicate);
        self
    }

    /// Append another chain. A single-node chain is spliced flat; a
    /// multi-node chain is wrapped in a group so two chains cannot silently
    /// merge into one ambiguous flat chain.
    pub fn append(mut self, connector: Connector, other: ConditionChain) -> Self {
        if self.nodes.is_empty() {
            return other;
        }
        match other.nodes.len() {
            0 => self,
            1 => {
                let node = other.nodes.into_iter().next().unwrap();
                self.push(connector, node.predicate);
                self
            }
            _ => {
                self.push(connector, Predicate::Group(other));
                self
            }
        }
    }

    fn push(&mut self, connector: Connector, predicate: Predicate) {
        let connector = if self.nodes.is_empty() {
            None
        } else {
            Some(connector)
        };
        self.nodes.push(ConditionNode {
            connector,
            predicate,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Walk every operand expression in the chain, groups included.
    pub fn for_each_expr(&self, f: &mut impl FnMut(&Expr)) {
        for node in &self.nodes {
            match &node.predicate {
                Predicate::Compare { lhs, rhs, .. } => {
                    f(lhs);
                    if let Some(rhs) = rhs {
                        f(rhs);
                    }
                }
                Predicate::Group(chain) => chain.for_each_expr(f),
            }
        }
    }

    /// Mutable variant of [`for_each_expr`](Self::for_each_expr).
    pub fn for_each_expr_mut(&mut self, f: &mut impl FnMut(&mut Expr)) {
        for node in &mut self.nodes {
            match &mut node.predicate {
                Predicate::Compare { lhs, rhs, .. } => {
                    f(lhs);
                    if let Some(rhs) = rhs {
                        f(rhs);
                    }
                }
                Predicate::Group(chain) => chain.for_each_expr_mut(f),
            }
        }
    }
}
