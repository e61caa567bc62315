use crate::entity::{describe, Entity};
use crate::session::Session;

use quarry_core::driver::{ColumnInfo, Rows};
use quarry_core::schema::{Relation, TableDef};
use quarry_core::stmt::{Value, ValueRecord};
use quarry_core::{Error, Result};
use quarry_sql::Flavor;

/// Decode one raw row into mapped field order, coercing every slot to its
/// declared portable type.
pub(crate) fn decode_row(
    flavor: Flavor,
    table: &TableDef,
    columns: &[ColumnInfo],
    raw: Vec<Value>,
) -> Result<ValueRecord> {
    let mut fields = Vec::with_capacity(raw.len());
    for (index, (field, value)) in table.columns().zip(raw).enumerate() {
        let info = columns
            .get(index)
            .cloned()
            .unwrap_or_else(|| ColumnInfo::named(&field.column));
        fields.push(flavor.decode(&info, field.ty, value)?);
    }
    Ok(ValueRecord::from_vec(fields))
}

/// Materialize a star-projected result set into entities, then fetch and
/// attach eager relations. Lazy relations stubs are the entity's own
/// concern: `load` sees the parent key in its row.
pub(crate) fn hydrate_entities<E: Entity>(session: &mut Session, rows: Rows) -> Result<Vec<E>> {
    let table = describe::<E>()?;
    let (columns, raw_rows) = rows.into_values();

    let mut entities = Vec::with_capacity(raw_rows.len());
    let mut keys = Vec::with_capacity(raw_rows.len());
    for raw in raw_rows {
        let record = decode_row(session.flavor(), &table, &columns, raw)?;
        let entity = E::load(record)?;
        keys.push(entity.key());
        entities.push(entity);
    }

    if !entities.is_empty() {
        for (index, relation) in table.relations.iter().enumerate() {
            if relation.is_eager() {
                attach_eager(session, index, relation, &keys, &mut entities)?;
            }
        }
    }

    Ok(entities)
}

/// Fetch the rows of one eager relation for every parent in a single pass,
/// then hand each parent its slice.
fn attach_eager<E: Entity>(
    session: &mut Session,
    index: usize,
    relation: &Relation,
    keys: &[Value],
    entities: &mut [E],
) -> Result<()> {
    match relation {
        Relation::HasMany(rel) => {
            let child = session.table(rel.target)?;
            let fk_pos = column_position(&child, rel.foreign_key.index)?;

            let query = super::exec::filtered_query(rel.target, rel.foreign_key, keys);
            let rows = super::exec::fetch_records(session, query)?;

            for (entity, key) in entities.iter_mut().zip(keys) {
                let mine: Vec<ValueRecord> = rows
                    .iter()
                    .filter(|row| &row[fk_pos] == key)
                    .cloned()
                    .collect();
                entity.load_relation(index, mine)?;
            }
        }
        Relation::ManyToMany(rel) => {
            let pairs = session.join_pairs(rel, keys)?;

            let child = session.table(rel.target)?;
            let pk = child.primary_key_field().ok_or_else(|| {
                Error::configuration(format!(
                    "many-to-many target `{}` has no primary key",
                    child.model_name
                ))
            })?;
            let pk_pos = column_position(&child, pk.id.index)?;

            let mut targets: Vec<Value> = Vec::new();
            for (_, target) in &pairs {
                if !targets.contains(target) {
                    targets.push(target.clone());
                }
            }

            let rows = if targets.is_empty() {
                Vec::new()
            } else {
                let query = super::exec::filtered_query(rel.target, pk.id, &targets);
                super::exec::fetch_records(session, query)?
            };

            for (entity, key) in entities.iter_mut().zip(keys) {
                let mine: Vec<ValueRecord> = pairs
                    .iter()
                    .filter(|(source, _)| source == key)
                    .filter_map(|(_, target)| {
                        rows.iter().find(|row| &row[pk_pos] == target).cloned()
                    })
                    .collect();
                entity.load_relation(index, mine)?;
            }
        }
        Relation::BelongsTo(_) => {}
    }
    Ok(())
}

/// The position of field `index` among the table's mapped columns, which is
/// also its slot in a star-projected row.
pub(crate) fn column_position(table: &TableDef, index: usize) -> Result<usize> {
    table
        .columns()
        .position(|field| field.id.index == index)
        .ok_or_else(|| {
            Error::configuration(format!(
                "model `{}` has no mapped column for field {index}",
                table.model_name
            ))
        })
}
