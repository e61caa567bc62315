use std::mem;

use super::{Comma, Flavor, Formatter, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Statement::AddColumn(stmt) => stmt.to_sql(f),
            stmt::Statement::CreateIndex(stmt) => stmt.to_sql(f),
            stmt::Statement::CreateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Query(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let sources: Vec<_> = self
            .sources()
            .into_iter()
            .map(|model| f.table(model))
            .collect();
        let prev_sources = mem::replace(&mut f.sources, sources);
        let prev_alias = mem::replace(&mut f.alias, true);

        fmt!(f, "SELECT ");

        if f.flavor() == Flavor::SqlServer {
            if let Some(limit) = self.limit {
                fmt!(f, "TOP " limit " ");
            }
        }

        match &self.returning {
            stmt::Returning::Star => {
                let base = f.sources[0].clone();
                let mut s = "";
                for field in base.columns() {
                    let column = stmt::ExprColumn { field: field.id };
                    fmt!(f, s);
                    (&column).to_sql(f);
                    s = ", ";
                }
            }
            stmt::Returning::Columns(exprs) => fmt!(f, Comma(exprs)),
        }

        let base = f.sources[0].clone();
        let sep = f.flavor().alias_sep();
        fmt!(f, " FROM " Ident(&base.name) sep "t0");

        for (i, join) in self.joins.iter().enumerate() {
            let table = f.sources[i + 1].clone();
            let keyword = match join.kind {
                stmt::JoinKind::Inner => " JOIN ",
                stmt::JoinKind::LeftOuter => " LEFT OUTER JOIN ",
            };
            let on = &join.on;
            let alias = i + 1;
            fmt!(f, keyword Ident(&table.name) sep "t" alias " ON " on);
        }

        if !self.filter.is_empty() {
            let filter = &self.filter;
            fmt!(f, " WHERE " filter);
        }

        if !self.group_by.is_empty() {
            fmt!(f, " GROUP BY " Comma(&self.group_by));
        }

        if !self.having.is_empty() {
            let having = &self.having;
            fmt!(f, " HAVING " having);
        }

        for (op, operand) in &self.set_ops {
            let keyword = match op {
                stmt::SetOp::Union => " UNION ",
                stmt::SetOp::Intersect => " INTERSECT ",
            };
            fmt!(f, keyword operand);
        }

        if let Some(order_by) = &self.order_by {
            fmt!(f, " ORDER BY " Comma(&order_by.exprs));
        }

        match (f.flavor(), self.limit) {
            (Flavor::Sqlite | Flavor::Postgresql, Some(limit)) => fmt!(f, " LIMIT " limit),
            (Flavor::Oracle, Some(limit)) => fmt!(f, " FETCH FIRST " limit " ROWS ONLY"),
            // SQL Server renders the limit as TOP in the select head
            _ => {}
        }

        f.sources = prev_sources;
        f.alias = prev_alias;
    }
}

impl ToSql for &stmt::OrderByExpr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let expr = &self.expr;
        let direction = match self.direction {
            stmt::Direction::Asc => "ASC",
            stmt::Direction::Desc => "DESC",
        };

        match self.nulls {
            Some(nulls) if !f.flavor().supports_null_ordering() => {
                // Emulate NULLS FIRST/LAST with a leading CASE sort key
                let (when_null, otherwise) = match nulls {
                    stmt::NullOrdering::First => ("0", "1"),
                    stmt::NullOrdering::Last => ("1", "0"),
                };
                fmt!(
                    f,
                    "CASE WHEN " expr " IS NULL THEN " when_null
                    " ELSE " otherwise " END, " expr " " direction
                );
            }
            Some(nulls) => {
                let nulls = match nulls {
                    stmt::NullOrdering::First => " NULLS FIRST",
                    stmt::NullOrdering::Last => " NULLS LAST",
                };
                fmt!(f, expr " " direction nulls);
            }
            None => fmt!(f, expr " " direction),
        }
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = f.table(self.model);
        let prev_sources = mem::replace(&mut f.sources, vec![table.clone()]);
        let prev_alias = mem::replace(&mut f.alias, false);

        let columns = Comma(
            self.columns
                .iter()
                .map(|field| Ident(table.field(field.index).column.clone())),
        );
        fmt!(f, "INSERT INTO " Ident(&table.name) " (" columns ") VALUES ");

        let mut s = "";
        for row in &self.rows {
            fmt!(f, s "(");
            let mut inner = "";
            for value in row {
                fmt!(f, inner value);
                inner = ", ";
            }
            fmt!(f, ")");
            s = ", ";
        }

        if let Some(field) = self.returning {
            let column = Ident(table.field(field.index).column.clone());
            fmt!(f, " RETURNING " column);
        }

        f.sources = prev_sources;
        f.alias = prev_alias;
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = f.table(self.model);
        let prev_sources = mem::replace(&mut f.sources, vec![table.clone()]);
        let prev_alias = mem::replace(&mut f.alias, false);

        fmt!(f, "UPDATE " Ident(&table.name) " SET ");

        let mut s = "";
        for (index, expr) in self.assignments.iter() {
            let column = Ident(table.field(index).column.clone());
            fmt!(f, s column " = " expr);
            s = ", ";
        }

        if !self.filter.is_empty() {
            let filter = &self.filter;
            fmt!(f, " WHERE " filter);
        }

        f.sources = prev_sources;
        f.alias = prev_alias;
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = f.table(self.model);
        let prev_sources = mem::replace(&mut f.sources, vec![table]);
        let prev_alias = mem::replace(&mut f.alias, false);

        let name = f.sources[0].name.clone();
        fmt!(f, "DELETE FROM " Ident(name));

        if !self.filter.is_empty() {
            let filter = &self.filter;
            fmt!(f, " WHERE " filter);
        }

        f.sources = prev_sources;
        f.alias = prev_alias;
    }
}

struct ColumnsWithConstraints<'a>(&'a stmt::CreateTable);

impl ToSql for ColumnsWithConstraints<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        // SQLite folds an auto-incrementing primary key into its column
        // definition; the trailing constraint would conflict with it.
        let trailing_pk = match self.0.primary_key {
            Some(pk) if f.flavor() == Flavor::Sqlite && self.0.columns[pk].auto_increment => false,
            Some(_) => true,
            None => false,
        };

        for (index, column) in self.0.columns.iter().enumerate() {
            fmt!(f, "\n    " column);
            if index < self.0.columns.len() - 1 {
                fmt!(f, ",");
            }
        }

        match self.0.primary_key {
            Some(pk) if trailing_pk => {
                let column = Ident(self.0.columns[pk].name.clone());
                fmt!(f, ",\n    PRIMARY KEY (" column ")\n");
            }
            _ => fmt!(f, "\n"),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match f.flavor() {
            Flavor::Sqlite | Flavor::Postgresql => {
                fmt!(f, "CREATE TABLE IF NOT EXISTS " Ident(&self.name));
            }
            Flavor::Oracle => fmt!(f, "CREATE TABLE " Ident(&self.name)),
            Flavor::SqlServer => {
                let name = self.name.as_str();
                fmt!(f, "IF OBJECT_ID(N'" name "', N'U') IS NULL CREATE TABLE " Ident(name));
            }
        }

        fmt!(f, " (" ColumnsWithConstraints(self) ")");
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let unique = if self.unique { "UNIQUE " } else { "" };
        let if_not_exists = if f.flavor().create_if_not_exists() {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let columns = Comma(self.columns.iter().map(|column| Ident(column.as_str())));

        fmt!(
            f,
            "CREATE " unique "INDEX " if_not_exists Ident(&self.name)
            " ON " Ident(&self.on) " (" columns ")"
        );
    }
}

impl ToSql for &stmt::AddColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let keyword = f.flavor().add_column_keyword();
        let column = &self.column;
        fmt!(f, "ALTER TABLE " Ident(&self.table) " " keyword " " column);
    }
}
