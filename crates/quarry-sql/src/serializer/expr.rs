use super::{Formatter, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Expr::Column(column) => column.to_sql(f),
            stmt::Expr::Func(func) => func.to_sql(f),
            stmt::Expr::Stmt(query) => {
                let query = &**query;
                fmt!(f, "(" query ")");
            }
            stmt::Expr::Value(value) => value.to_sql(f),
        }
    }
}

impl ToSql for &stmt::ExprColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let Some(pos) = f
            .sources
            .iter()
            .position(|table| table.id == self.field.model)
        else {
            // Verification scopes every column before rendering starts.
            panic!("column {:?} is not in scope", self.field);
        };

        let column = f.sources[pos].field(self.field.index).column.clone();

        if f.alias {
            fmt!(f, "t" pos "." Ident(column));
        } else {
            fmt!(f, Ident(column));
        }
    }
}

impl ToSql for &stmt::ExprFunc {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use stmt::ExprFunc::*;

        match self {
            Count(None) => fmt!(f, "COUNT(*)"),
            Count(Some(expr)) => {
                let expr = &**expr;
                fmt!(f, "COUNT(" expr ")");
            }
            Avg(expr) | Max(expr) | Min(expr) | Sum(expr) => {
                let name = self.name();
                let expr = &**expr;
                fmt!(f, name "(" expr ")");
            }
            IfNull(expr, fallback) => {
                let token = match f.flavor().function_token(self) {
                    Ok(token) => token,
                    // Verification rejects unmapped functions up front.
                    Err(_) => panic!("unmapped function {:?} reached rendering", self.name()),
                };
                let expr = &**expr;
                let fallback = &**fallback;
                fmt!(f, token "(" expr ", " fallback ")");
            }
        }
    }
}

impl ToSql for &stmt::ConditionChain {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        for node in &self.nodes {
            match node.connector {
                Some(stmt::Connector::And) => fmt!(f, " AND "),
                Some(stmt::Connector::Or) => fmt!(f, " OR "),
                None => {}
            }
            (&node.predicate).to_sql(f);
        }
    }
}

impl ToSql for &stmt::Predicate {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Predicate::Compare { lhs, op, rhs } => {
                let token = op.to_string();
                match rhs {
                    _ if op.is_unary() => fmt!(f, lhs " " token),
                    Some(rhs) => fmt!(f, lhs " " token " " rhs),
                    // Verification checks operand arity.
                    None => panic!("comparator {op:?} requires a right-hand operand"),
                }
            }
            stmt::Predicate::Group(chain) => fmt!(f, "(" chain ")"),
        }
    }
}
