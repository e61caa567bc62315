use super::Serializer;

use crate::stmt::{self, Statement};

use quarry_core::schema::{ModelId, TableDef};
use quarry_core::{Error, Result};

use std::sync::Arc;

/// Fail-fast checks that run before any SQL is rendered. Everything caught
/// here is a configuration error: a statement referencing metadata that
/// does not exist, or a construct the target dialect cannot express.
impl Serializer<'_> {
    pub(super) fn verify(&self, stmt: &Statement) -> Result<()> {
        match stmt {
            Statement::AddColumn(_) | Statement::CreateIndex(_) | Statement::CreateTable(_) => {
                Ok(())
            }
            Statement::Delete(stmt) => self.verify_delete(stmt),
            Statement::Insert(stmt) => self.verify_insert(stmt),
            Statement::Query(stmt) => self.verify_query(stmt),
            Statement::Update(stmt) => self.verify_update(stmt),
        }
    }

    fn lookup(&self, model: ModelId) -> Result<Arc<TableDef>> {
        self.registry
            .get(model)
            .ok_or_else(|| Error::configuration(format!("model {model:?} is not registered")))
    }

    fn verify_query(&self, query: &stmt::Query) -> Result<()> {
        let mut sources = Vec::new();
        for model in query.sources() {
            sources.push(self.lookup(model)?);
        }

        for join in &query.joins {
            self.verify_chain(&join.on, &sources)?;
        }
        self.verify_chain(&query.filter, &sources)?;
        for expr in &query.group_by {
            self.verify_expr(expr, &sources)?;
        }
        self.verify_chain(&query.having, &sources)?;

        if let stmt::Returning::Columns(exprs) = &query.returning {
            for expr in exprs {
                self.verify_expr(expr, &sources)?;
            }
        }

        if let Some(order_by) = &query.order_by {
            for expr in &order_by.exprs {
                self.verify_expr(&expr.expr, &sources)?;
            }
        }

        let arity = projection_arity(query, &sources[0]);
        for (_, operand) in &query.set_ops {
            self.verify_query(operand)?;
            let operand_table = self.lookup(operand.model)?;
            let operand_arity = projection_arity(operand, &operand_table);
            if arity != operand_arity {
                return Err(Error::configuration(format!(
                    "set operation arity mismatch: {arity} columns vs {operand_arity}"
                )));
            }
        }

        Ok(())
    }

    fn verify_insert(&self, insert: &stmt::Insert) -> Result<()> {
        let table = self.lookup(insert.model)?;

        for field in &insert.columns {
            self.verify_field(*field, &table)?;
        }

        for row in &insert.rows {
            if row.len() != insert.columns.len() {
                return Err(Error::configuration(format!(
                    "insert into `{}` has {} columns but a row of {} values",
                    table.model_name,
                    insert.columns.len(),
                    row.len()
                )));
            }
        }

        if let Some(field) = insert.returning {
            self.verify_field(field, &table)?;
            if !self.flavor.supports_returning() {
                return Err(Error::configuration(format!(
                    "the {:?} dialect cannot return generated keys inline",
                    self.flavor
                )));
            }
        }

        Ok(())
    }

    fn verify_update(&self, update: &stmt::Update) -> Result<()> {
        let table = self.lookup(update.model)?;
        let sources = [table.clone()];

        if update.assignments.is_empty() {
            return Err(Error::configuration(format!(
                "update of `{}` assigns no fields",
                table.model_name
            )));
        }

        for (index, expr) in update.assignments.iter() {
            let field = quarry_core::schema::FieldId::new(update.model, index);
            self.verify_field(field, &table)?;
            self.verify_expr(expr, &sources)?;
        }

        self.verify_chain(&update.filter, &sources)
    }

    fn verify_delete(&self, delete: &stmt::Delete) -> Result<()> {
        let table = self.lookup(delete.model)?;
        self.verify_chain(&delete.filter, &[table])
    }

    fn verify_chain(&self, chain: &stmt::ConditionChain, sources: &[Arc<TableDef>]) -> Result<()> {
        for node in &chain.nodes {
            match &node.predicate {
                stmt::Predicate::Compare { lhs, op, rhs } => {
                    self.verify_expr(lhs, sources)?;
                    match rhs {
                        Some(rhs) if op.is_unary() => {
                            return Err(Error::configuration(format!(
                                "comparator {op:?} takes no right-hand operand, got {rhs:?}"
                            )));
                        }
                        Some(rhs) => self.verify_expr(rhs, sources)?,
                        None if op.is_unary() => {}
                        None => {
                            return Err(Error::configuration(format!(
                                "comparator {op:?} requires a right-hand operand"
                            )));
                        }
                    }
                }
                stmt::Predicate::Group(chain) => self.verify_chain(chain, sources)?,
            }
        }
        Ok(())
    }

    fn verify_expr(&self, expr: &stmt::Expr, sources: &[Arc<TableDef>]) -> Result<()> {
        match expr {
            stmt::Expr::Column(column) => {
                let table = sources
                    .iter()
                    .find(|table| table.id == column.field.model)
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "column {:?} does not belong to any queried table",
                            column.field
                        ))
                    })?;
                self.verify_field(column.field, table)
            }
            stmt::Expr::Func(func) => {
                self.flavor.function_token(func)?;
                match func {
                    stmt::ExprFunc::Count(None) => Ok(()),
                    stmt::ExprFunc::Count(Some(expr))
                    | stmt::ExprFunc::Avg(expr)
                    | stmt::ExprFunc::Max(expr)
                    | stmt::ExprFunc::Min(expr)
                    | stmt::ExprFunc::Sum(expr) => self.verify_expr(expr, sources),
                    stmt::ExprFunc::IfNull(expr, fallback) => {
                        self.verify_expr(expr, sources)?;
                        self.verify_expr(fallback, sources)
                    }
                }
            }
            stmt::Expr::Stmt(query) => self.verify_query(query),
            stmt::Expr::Value(_) => Ok(()),
        }
    }

    fn verify_field(&self, field: quarry_core::schema::FieldId, table: &TableDef) -> Result<()> {
        let Some(def) = table.fields.get(field.index) else {
            return Err(Error::configuration(format!(
                "model `{}` has no field at index {}",
                table.model_name, field.index
            )));
        };
        if def.transient {
            return Err(Error::configuration(format!(
                "field `{}.{}` is transient and cannot appear in a statement",
                table.model_name, def.name
            )));
        }
        Ok(())
    }
}

fn projection_arity(query: &stmt::Query, base: &TableDef) -> usize {
    query
        .returning
        .arity()
        .unwrap_or_else(|| base.columns().count())
}
