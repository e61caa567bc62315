use quarry_core::schema::FieldDef;
use quarry_core::stmt::Type;

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub ty: Type,
    pub length: Option<usize>,
    pub not_null: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
}

impl ColumnDef {
    pub(crate) fn from_field(field: &FieldDef, auto_increment: bool) -> ColumnDef {
        ColumnDef {
            name: field.column.clone(),
            ty: field.ty,
            length: field.length,
            not_null: !field.nullable,
            primary_key: field.primary_key,
            auto_increment,
        }
    }
}
