use super::{hydrate, lower};
use crate::entity::{describe, Entity};
use crate::session::Session;
use crate::stmt::{Delete, Select, Update};

use quarry_core::driver::{Rows, Sql};
use quarry_core::schema::{FieldId, GeneratorStrategy, ModelId, Registry, Relation, TableDef};
use quarry_core::stmt::{self, Comparator, ConditionChain, Returning, Type, Value, ValueRecord};
use quarry_core::{Error, Result};
use quarry_sql::Statement as SqlStatement;

pub(crate) fn select_all<E: Entity>(session: &mut Session, select: Select<E>) -> Result<Vec<E>> {
    let mut query = select.untyped;
    lower::lower_query(&mut query)?;
    let rows = session.run_query(query)?;
    hydrate::hydrate_entities(session, rows)
}

pub(crate) fn count<E: Entity>(session: &mut Session, select: Select<E>) -> Result<i64> {
    let mut query = select.untyped;
    query.returning = Returning::Columns(vec![stmt::ExprFunc::count().into()]);
    lower::lower_query(&mut query)?;

    let rows = session.run_query(query)?;
    let (_, raws) = rows.into_values();
    match raws.into_iter().next().and_then(|raw| raw.into_iter().next()) {
        Some(value) => value.to_i64(),
        None => Ok(0),
    }
}

/// Run a shaped select and return the raw projection rows. Column slots
/// decode per their mapped types; function slots decode per the engine's
/// reported column metadata, where it reports any.
pub(crate) fn select_rows<E: Entity>(
    session: &mut Session,
    select: Select<E>,
) -> Result<Vec<ValueRecord>> {
    let table = describe::<E>()?;
    let mut query = select.untyped;
    lower::lower_query(&mut query)?;

    let returning = query.returning.clone();
    let rows = session.run_query(query)?;
    let (columns, raws) = rows.into_values();
    let flavor = session.flavor();

    let mut records = Vec::with_capacity(raws.len());
    for raw in raws {
        let record = match &returning {
            Returning::Star => hydrate::decode_row(flavor, &table, &columns, raw)?,
            Returning::Columns(exprs) => {
                let mut fields = Vec::with_capacity(raw.len());
                for (index, value) in raw.into_iter().enumerate() {
                    let info = columns.get(index);
                    let ty = exprs
                        .get(index)
                        .and_then(|expr| expr.as_column())
                        .and_then(|column| {
                            let owner = Registry::global().get(column.field.model)?;
                            owner.fields.get(column.field.index).map(|field| field.ty)
                        })
                        .or_else(|| info.and_then(|info| flavor.sniff_numeric(info)));
                    let decoded = match (ty, info) {
                        (Some(ty), Some(info)) => flavor.decode(info, ty, value)?,
                        _ => value,
                    };
                    fields.push(decoded);
                }
                ValueRecord::from_vec(fields)
            }
        };
        records.push(record);
    }
    Ok(records)
}

pub(crate) fn insert_entity<E: Entity>(session: &mut Session, entity: &mut E) -> Result<()> {
    let table = describe::<E>()?;
    let mut values = checked_values(&table, entity.values())?;

    // Sequence keys are fetched ahead of the insert and travel with it.
    let mut sequence_key = None;
    if let GeneratorStrategy::Sequence(sequence) = &table.generator {
        let sql = session.flavor().sequence_next_sql(sequence)?;
        let value = session.scalar(Sql::new(sql, Vec::new()), true)?;
        sequence_key = Some(value.to_i64()?);
    }

    let identity = matches!(table.generator, GeneratorStrategy::Identity);

    let mut insert = stmt::Insert::new(E::ID);
    let mut row = Vec::with_capacity(values.len());
    for (pos, field) in table.columns().enumerate() {
        let mut value = std::mem::take(&mut values[pos]);
        if field.primary_key {
            if identity {
                continue;
            }
            if let Some(key) = sequence_key {
                value = Value::I64(key);
            }
        }
        if field.version {
            value = version_value(field.ty, 0);
        }
        lower::lower_value(&mut value, Some(field.ty))?;
        insert.columns.push(field.id);
        row.push(value);
    }
    insert.rows.push(row);

    if identity && session.capability().returning {
        insert.returning = table.primary_key_field().map(|field| field.id);
    }

    let rows = session.execute_stmt(&SqlStatement::from(insert), true)?;

    if identity {
        let key = match rows {
            Rows::Values { rows, .. } => rows
                .into_iter()
                .next()
                .and_then(|raw| raw.into_iter().next())
                .ok_or_else(|| {
                    Error::execution("insert returned no generated key", None)
                })?
                .to_i64()?,
            Rows::Count(_) => session.last_insert_id()?,
        };
        entity.set_key(Value::I64(key))?;
    } else if let Some(key) = sequence_key {
        entity.set_key(Value::I64(key))?;
    }

    if table.version().is_some() {
        entity.set_version(0);
    }
    Ok(())
}

/// Whole-object update by primary key. For version-tagged entities the
/// update is constrained to the version the entity read; zero affected rows
/// is a concurrency conflict and leaves the session rollback-only.
pub(crate) fn update_entity<E: Entity>(session: &mut Session, entity: &mut E) -> Result<()> {
    let table = describe::<E>()?;
    let mut values = checked_values(&table, entity.values())?;
    let pk = primary_key(&table)?;

    let mut update = stmt::Update::new(E::ID);
    for (pos, field) in table.columns().enumerate() {
        if field.primary_key || field.version {
            continue;
        }
        let mut value = std::mem::take(&mut values[pos]);
        lower::lower_value(&mut value, Some(field.ty))?;
        update.assignments.set(field.id.index, stmt::Expr::Value(value));
    }

    update.filter = ConditionChain::compare(
        stmt::Expr::column(pk.id),
        Comparator::Eq,
        Some(stmt::Expr::Value(entity.key())),
    );

    let mut read_version = None;
    if let Some(version) = table.version() {
        let current = entity.version().ok_or_else(|| {
            Error::configuration(format!(
                "model `{}` is version-tagged but the entity reports no version",
                table.model_name
            ))
        })?;
        update.assignments.set(
            version.id.index,
            stmt::Expr::Value(version_value(version.ty, current + 1)),
        );
        update.filter = update.filter.and(stmt::Predicate::Compare {
            lhs: stmt::Expr::column(version.id),
            op: Comparator::Eq,
            rhs: Some(stmt::Expr::Value(version_value(version.ty, current))),
        });
        read_version = Some(current);
    }

    let affected = session
        .execute_stmt(&SqlStatement::from(update), true)?
        .count();

    if affected == 0 {
        if let Some(version) = read_version {
            session.abort();
            return Err(Error::concurrency_conflict(format!(
                "`{}` key {:?} was changed or deleted since version {version} was read",
                table.model_name,
                entity.key()
            )));
        }
        return Ok(());
    }

    if let Some(version) = read_version {
        entity.set_version(version + 1);
    }
    Ok(())
}

/// Insert-or-update by primary key, decomposed into an existence probe
/// followed by the matching statement.
pub(crate) fn save_entity<E: Entity>(session: &mut Session, entity: &mut E) -> Result<()> {
    let table = describe::<E>()?;
    let pk = primary_key(&table)?;

    let exists = !entity.key().is_null() && {
        let mut query = stmt::Query::new(E::ID);
        query.filter = ConditionChain::compare(
            stmt::Expr::column(pk.id),
            Comparator::Eq,
            Some(stmt::Expr::Value(entity.key())),
        );
        query.returning = Returning::Columns(vec![stmt::ExprFunc::count().into()]);
        let rows = session.run_query(query)?;
        let (_, raws) = rows.into_values();
        match raws.into_iter().next().and_then(|raw| raw.into_iter().next()) {
            Some(value) => value.to_i64()? > 0,
            None => false,
        }
    };

    if exists {
        update_entity(session, entity)
    } else {
        insert_entity(session, entity)
    }
}

pub(crate) fn exec_update<E: Entity>(session: &mut Session, update: Update<E>) -> Result<u64> {
    let mut update = update.untyped;
    lower::lower_update(&mut update)?;
    Ok(session
        .execute_stmt(&SqlStatement::from(update), true)?
        .count())
}

pub(crate) fn delete_entity<E: Entity>(session: &mut Session, entity: &E) -> Result<()> {
    let table = describe::<E>()?;
    let pk = primary_key(&table)?;
    let filter = ConditionChain::compare(
        stmt::Expr::column(pk.id),
        Comparator::Eq,
        Some(stmt::Expr::Value(entity.key())),
    );
    delete_where(session, &table, filter)?;
    Ok(())
}

pub(crate) fn exec_delete<E: Entity>(session: &mut Session, delete: Delete<E>) -> Result<u64> {
    let table = describe::<E>()?;
    let mut stmt = delete.untyped;
    lower::lower_delete(&mut stmt)?;
    delete_where(session, &table, stmt.filter)
}

/// Delete the rows matching `filter`, running cascade relations first.
/// Cascades need the keys of the doomed rows, so they cost one extra select
/// per level; models without cascade relations skip it.
fn delete_where(session: &mut Session, table: &TableDef, filter: ConditionChain) -> Result<u64> {
    if table.cascade_relations().next().is_some() {
        let keys = select_keys(session, table, filter.clone())?;
        if !keys.is_empty() {
            for relation in table.cascade_relations() {
                match relation {
                    Relation::HasMany(rel) => {
                        let child = session.table(rel.target)?;
                        let child_filter = in_chain(rel.foreign_key, &keys);
                        delete_where(session, &child, child_filter)?;
                    }
                    Relation::ManyToMany(rel) => {
                        session.delete_join_rows(rel, &keys)?;
                    }
                    Relation::BelongsTo(_) => {}
                }
            }
        }
    }

    let stmt = stmt::Delete {
        model: table.id,
        filter,
    };
    Ok(session
        .execute_stmt(&SqlStatement::from(stmt), true)?
        .count())
}

/// Fetch the rows of relation `relation` of the parent model, for one
/// parent key. Backs deferred relation loading.
pub(crate) fn fetch_related<E: Entity>(
    session: &mut Session,
    parent: ModelId,
    relation: usize,
    key: Value,
) -> Result<Vec<E>> {
    let parent_table = session.table(parent)?;
    let relation_def = parent_table.relations.get(relation).ok_or_else(|| {
        Error::configuration(format!(
            "model `{}` has no relation {relation}",
            parent_table.model_name
        ))
    })?;
    if relation_def.target() != E::ID {
        return Err(Error::configuration(format!(
            "relation {relation} of `{}` targets {:?}, not {:?}",
            parent_table.model_name,
            relation_def.target(),
            E::ID
        )));
    }

    match relation_def {
        Relation::HasMany(rel) => {
            let query = filtered_query(rel.target, rel.foreign_key, std::slice::from_ref(&key));
            let rows = session.run_query(query)?;
            hydrate::hydrate_entities(session, rows)
        }
        Relation::ManyToMany(rel) => {
            let pairs = session.join_pairs(rel, std::slice::from_ref(&key))?;
            let targets: Vec<Value> = pairs.into_iter().map(|(_, target)| target).collect();
            if targets.is_empty() {
                return Ok(Vec::new());
            }
            let child = session.table(rel.target)?;
            let pk = primary_key(&child)?;
            let query = filtered_query(rel.target, pk.id, &targets);
            let rows = session.run_query(query)?;
            hydrate::hydrate_entities(session, rows)
        }
        Relation::BelongsTo(_) => Err(Error::configuration(
            "belongs-to relations hydrate as plain fields, not lazily",
        )),
    }
}

/// `SELECT * FROM target WHERE field IN (keys)`.
pub(crate) fn filtered_query(target: ModelId, field: FieldId, keys: &[Value]) -> stmt::Query {
    let mut query = stmt::Query::new(target);
    query.filter = in_chain(field, keys);
    query
}

/// Run a star query and decode the raw rows without materializing entities.
pub(crate) fn fetch_records(
    session: &mut Session,
    query: stmt::Query,
) -> Result<Vec<ValueRecord>> {
    let table = session.table(query.model)?;
    let rows = session.run_query(query)?;
    let (columns, raws) = rows.into_values();
    raws.into_iter()
        .map(|raw| hydrate::decode_row(session.flavor(), &table, &columns, raw))
        .collect()
}

fn select_keys(
    session: &mut Session,
    table: &TableDef,
    filter: ConditionChain,
) -> Result<Vec<Value>> {
    let pk = primary_key(table)?;
    let mut query = stmt::Query::new(table.id);
    query.filter = filter;
    query.returning = Returning::Columns(vec![stmt::Expr::column(pk.id)]);

    let rows = session.run_query(query)?;
    let (columns, raws) = rows.into_values();
    let flavor = session.flavor();

    raws.into_iter()
        .filter_map(|raw| raw.into_iter().next())
        .map(|value| {
            let info = columns
                .first()
                .cloned()
                .unwrap_or_else(|| quarry_core::driver::ColumnInfo::named(&pk.column));
            flavor.decode(&info, pk.ty, value)
        })
        .collect()
}

fn in_chain(field: FieldId, keys: &[Value]) -> ConditionChain {
    ConditionChain::compare(
        stmt::Expr::column(field),
        Comparator::In,
        Some(stmt::Expr::Value(Value::List(keys.to_vec()))),
    )
}

fn checked_values(table: &TableDef, values: Vec<Value>) -> Result<Vec<Value>> {
    let mapped = table.columns().count();
    if values.len() != mapped {
        return Err(Error::configuration(format!(
            "`{}::values` returned {} values for {mapped} mapped fields",
            table.model_name,
            values.len()
        )));
    }
    Ok(values)
}

fn primary_key(table: &TableDef) -> Result<&quarry_core::schema::FieldDef> {
    table.primary_key_field().ok_or_else(|| {
        Error::configuration(format!(
            "model `{}` has no primary key",
            table.model_name
        ))
    })
}

fn version_value(ty: Type, version: i64) -> Value {
    match ty {
        Type::Integer => Value::I32(version as i32),
        _ => Value::I64(version),
    }
}
