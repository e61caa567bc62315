use super::{Flavor, Formatter, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::ColumnDef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        // SQLite only auto-increments an INTEGER PRIMARY KEY column, with
        // the constraint folded into the column definition.
        if f.flavor() == Flavor::Sqlite && self.auto_increment {
            fmt!(f, Ident(&self.name) " INTEGER PRIMARY KEY AUTOINCREMENT");
            return;
        }

        let ty = f.flavor().column_type(self);
        fmt!(f, Ident(&self.name) " " ty);

        if self.auto_increment {
            let suffix = f.flavor().identity_suffix();
            fmt!(f, suffix);
        }

        if self.not_null && !self.primary_key {
            fmt!(f, " NOT NULL");
        }
    }
}
