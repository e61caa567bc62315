use quarry_core::schema::Registry;
use quarry_core::stmt::{self, Type, Value};
use quarry_core::{Error, Result};

/// Rewrite enum operands in a query into their storage representation.
///
/// A typed enum value carries both its variant name and ordinal; the column
/// it compares against decides which one is bound. Everything else passes
/// through untouched.
pub(crate) fn lower_query(query: &mut stmt::Query) -> Result<()> {
    for join in &mut query.joins {
        lower_chain(&mut join.on)?;
    }
    lower_chain(&mut query.filter)?;
    lower_chain(&mut query.having)?;
    for (_, operand) in &mut query.set_ops {
        lower_query(operand)?;
    }
    Ok(())
}

pub(crate) fn lower_update(update: &mut stmt::Update) -> Result<()> {
    if let Some(table) = Registry::global().get(update.model) {
        for (index, expr) in update.assignments.iter_mut() {
            let ty = table.fields.get(index).map(|field| field.ty);
            lower_expr(expr, ty)?;
        }
    }
    lower_chain(&mut update.filter)
}

pub(crate) fn lower_delete(delete: &mut stmt::Delete) -> Result<()> {
    lower_chain(&mut delete.filter)
}

fn lower_chain(chain: &mut stmt::ConditionChain) -> Result<()> {
    for node in &mut chain.nodes {
        match &mut node.predicate {
            stmt::Predicate::Compare { lhs, rhs, .. } => {
                let ty = operand_type(lhs);
                lower_expr(lhs, None)?;
                if let Some(rhs) = rhs {
                    lower_expr(rhs, ty)?;
                }
            }
            stmt::Predicate::Group(chain) => lower_chain(chain)?,
        }
    }
    Ok(())
}

/// The declared type of a column operand, when its model is registered.
/// Unregistered models are left for statement verification to reject.
fn operand_type(expr: &stmt::Expr) -> Option<Type> {
    let column = expr.as_column()?;
    let table = Registry::global().get(column.field.model)?;
    table.fields.get(column.field.index).map(|field| field.ty)
}

fn lower_expr(expr: &mut stmt::Expr, ty: Option<Type>) -> Result<()> {
    match expr {
        stmt::Expr::Value(value) => lower_value(value, ty),
        stmt::Expr::Stmt(query) => lower_query(query),
        _ => Ok(()),
    }
}

/// Pick the storage representation of an enum value. With no column context
/// the variant name is used.
pub(crate) fn lower_value(value: &mut Value, ty: Option<Type>) -> Result<()> {
    match value {
        Value::Enum(_) => {
            let Value::Enum(repr) = std::mem::take(value) else {
                unreachable!()
            };
            *value = match ty {
                Some(Type::EnumInt) => Value::I32(repr.ordinal),
                Some(Type::Enum) | None => Value::String(repr.name),
                Some(other) => {
                    return Err(Error::configuration(format!(
                        "enum value `{}` bound against a column of type {other:?}",
                        repr.name
                    )))
                }
            };
            Ok(())
        }
        Value::List(items) => {
            for item in items {
                lower_value(item, ty)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
