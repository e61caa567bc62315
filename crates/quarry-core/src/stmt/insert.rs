use super::Value;
use crate::schema::{FieldId, ModelId};

/// An INSERT plan. Columns are all non-generated fields; a generated primary
/// key is omitted and retrieved post-insert per the generator strategy.
#[derive(Debug, Clone)]
pub struct Insert {
    pub model: ModelId,

    /// Columns in insert order
    pub columns: Vec<FieldId>,

    /// One values row per record to insert
    pub rows: Vec<Vec<Value>>,

    /// Ask the engine to return this generated column, where supported.
    pub returning: Option<FieldId>,
}

impl Insert {
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            columns: Vec::new(),
            rows: Vec::new(),
            returning: None,
        }
    }
}
