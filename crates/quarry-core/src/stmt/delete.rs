use super::ConditionChain;
use crate::schema::ModelId;

/// A DELETE plan. Cascade handling happens in the engine before the parent
/// row is removed.
#[derive(Debug, Clone)]
pub struct Delete {
    pub model: ModelId,
    pub filter: ConditionChain,
}

impl Delete {
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            filter: ConditionChain::default(),
        }
    }
}
