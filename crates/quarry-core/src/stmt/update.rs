use super::{Assignments, ConditionChain};
use crate::schema::ModelId;

/// An UPDATE plan. The SET clause holds explicitly assigned fields only; for
/// a whole-object update the engine assigns every mapped non-PK field and
/// adds the version constraint/increment when the model is version-tagged.
#[derive(Debug, Clone)]
pub struct Update {
    pub model: ModelId,
    pub assignments: Assignments,
    pub filter: ConditionChain,
}

impl Update {
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            assignments: Assignments::default(),
            filter: ConditionChain::default(),
        }
    }
}
