use super::Statement;

use quarry_core::schema::{IndexDef, TableDef};

#[derive(Debug, Clone)]
pub struct CreateIndex {
    /// Name of the index
    pub name: String,

    /// Which table to index
    pub on: String,

    /// The columns to index
    pub columns: Vec<String>,

    /// When true, the index is unique
    pub unique: bool,
}

impl Statement {
    pub fn create_index(table: &TableDef, index: &IndexDef) -> Self {
        CreateIndex {
            name: index.name.clone(),
            on: table.name.clone(),
            columns: index
                .fields
                .iter()
                .map(|&field| table.field(field).column.clone())
                .collect(),
            unique: index.unique,
        }
        .into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
