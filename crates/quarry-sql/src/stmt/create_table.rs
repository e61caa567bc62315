use super::{ColumnDef, Statement};

use quarry_core::schema::{GeneratorStrategy, TableDef};

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions, transient fields excluded
    pub columns: Vec<ColumnDef>,

    /// Index into `columns` of the primary key
    pub primary_key: Option<usize>,
}

impl Statement {
    pub fn create_table(table: &TableDef) -> Self {
        let identity = matches!(table.generator, GeneratorStrategy::Identity);

        let mut primary_key = None;
        let columns = table
            .columns()
            .enumerate()
            .map(|(index, field)| {
                if field.primary_key {
                    primary_key = Some(index);
                }
                ColumnDef::from_field(field, identity && field.primary_key)
            })
            .collect();

        CreateTable {
            name: table.name.clone(),
            columns,
            primary_key,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
