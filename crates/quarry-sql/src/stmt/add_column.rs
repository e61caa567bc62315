use super::{ColumnDef, Statement};

use quarry_core::schema::{FieldDef, TableDef};

#[derive(Debug, Clone)]
pub struct AddColumn {
    /// The table to alter
    pub table: String,

    /// Definition of the new column
    pub column: ColumnDef,
}

impl Statement {
    pub fn add_column(table: &TableDef, field: &FieldDef) -> Self {
        AddColumn {
            table: table.name.clone(),
            column: ColumnDef::from_field(field, false),
        }
        .into()
    }
}

impl From<AddColumn> for Statement {
    fn from(value: AddColumn) -> Self {
        Self::AddColumn(value)
    }
}
