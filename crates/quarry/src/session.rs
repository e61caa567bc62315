use crate::engine::exec;
use crate::entity::{describe, Entity};
use crate::stmt::{Delete, Select, Update};

use quarry_core::driver::{Capability, Connection, Driver, Rows, Sql};
use quarry_core::schema::{ManyToMany, ModelId, Registry, TableDef};
use quarry_core::stmt::{self, Comparator, ConditionChain, Type, Value, ValueRecord};
use quarry_core::{Error, Result};
use quarry_sql::stmt::ColumnDef;
use quarry_sql::{Flavor, Serializer, Statement as SqlStatement};

use log::{debug, warn};

use std::sync::Arc;

/// Builds sessions against one driver and dialect.
///
/// Entities are registered up front; `create_tables` then brings the engine
/// schema in line with the registered metadata.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    driver: Arc<dyn Driver>,
    flavor: Flavor,
    models: Vec<ModelId>,
}

impl SessionFactory {
    pub fn new(flavor: Flavor, driver: impl Driver) -> Self {
        Self {
            driver: Arc::new(driver),
            flavor,
            models: Vec::new(),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Run the mapping introspection for `E` and include it in DDL passes.
    /// Registering a type twice is a no-op.
    pub fn register<E: Entity>(&mut self) -> Result<&mut Self> {
        describe::<E>()?;
        if !self.models.contains(&E::ID) {
            self.models.push(E::ID);
        }
        Ok(self)
    }

    /// Create missing tables, indexes, and join tables for every registered
    /// entity. Existing tables are left alone, except that a missing
    /// single-table discriminator column is added, so tables created before
    /// inheritance was introduced keep working.
    pub fn create_tables(&self) -> Result<()> {
        let mut conn = self.driver.connect()?;
        let serializer = Serializer::new(self.flavor, Registry::global());
        let mut join_tables: Vec<String> = Vec::new();

        for &model in &self.models {
            let table = Registry::global().get(model).ok_or_else(|| {
                Error::configuration(format!("model {model:?} is not registered"))
            })?;

            let exists = table_exists(conn.as_mut(), &table)?;
            if !exists {
                execute_ddl(conn.as_mut(), &serializer, &SqlStatement::create_table(&table))?;
                for index in &table.indexes {
                    execute_ddl(
                        conn.as_mut(),
                        &serializer,
                        &SqlStatement::create_index(&table, index),
                    )?;
                }
            } else if let Some(discriminator) = table.discriminator() {
                if !conn.column_exists(&table.name, &discriminator.column)? {
                    execute_ddl(
                        conn.as_mut(),
                        &serializer,
                        &SqlStatement::add_column(&table, discriminator),
                    )?;
                }
            }

            for relation in &table.relations {
                let Some(m2m) = relation.as_many_to_many() else {
                    continue;
                };
                if join_tables.contains(&m2m.join_table) {
                    continue;
                }
                join_tables.push(m2m.join_table.clone());

                if !conn.column_exists(&m2m.join_table, &m2m.source_column)? {
                    let stmt = quarry_sql::stmt::CreateTable {
                        name: m2m.join_table.clone(),
                        columns: vec![
                            join_column(&m2m.source_column),
                            join_column(&m2m.target_column),
                        ],
                        primary_key: None,
                    };
                    execute_ddl(conn.as_mut(), &serializer, &stmt.into())?;
                }
            }
        }
        Ok(())
    }

    pub fn open_session(&self) -> Result<Session> {
        Ok(Session::new(self.driver.connect()?, self.flavor))
    }
}

fn table_exists(conn: &mut dyn Connection, table: &TableDef) -> Result<bool> {
    let Some(probe) = table.columns().next() else {
        return Ok(false);
    };
    conn.column_exists(&table.name, &probe.column)
}

fn execute_ddl(
    conn: &mut dyn Connection,
    serializer: &Serializer<'_>,
    stmt: &SqlStatement,
) -> Result<()> {
    let mut params = Vec::new();
    let sql = serializer.serialize(stmt, &mut params)?;
    debug!(target: "quarry", "{sql}");
    conn.execute(&Sql::new(sql, params))?;
    Ok(())
}

fn join_column(name: &str) -> ColumnDef {
    ColumnDef {
        name: name.to_string(),
        ty: Type::ForeignKey,
        length: None,
        not_null: true,
        primary_key: false,
        auto_increment: false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Aborted,
    Committed,
    RolledBack,
    Closed,
}

/// One unit of work over one connection.
///
/// Reads run in autocommit; the first mutating statement opens the
/// transaction, which `commit` or `rollback` then finishes. A session whose
/// statement failed becomes rollback-only. Commit, rollback, and close are
/// all terminal: no further statements run afterwards.
#[derive(Debug)]
pub struct Session {
    conn: Box<dyn Connection>,
    flavor: Flavor,
    capability: Capability,
    state: State,
    in_tx: bool,
}

impl Session {
    pub(crate) fn new(conn: Box<dyn Connection>, flavor: Flavor) -> Self {
        let capability = conn.capability().clone();
        Self {
            conn,
            flavor,
            capability,
            state: State::Open,
            in_tx: false,
        }
    }

    pub fn all<E: Entity>(&mut self, select: Select<E>) -> Result<Vec<E>> {
        exec::select_all(self, select)
    }

    pub fn first<E: Entity>(&mut self, mut select: Select<E>) -> Result<Option<E>> {
        if select.untyped.limit.is_none() && select.untyped.set_ops.is_empty() {
            select.untyped.limit = Some(1);
        }
        Ok(exec::select_all(self, select)?.into_iter().next())
    }

    /// Load one entity by primary key.
    pub fn find<E: Entity>(&mut self, key: impl Into<Value>) -> Result<Option<E>> {
        let table = self.table(E::ID)?;
        let pk = table.primary_key_field().ok_or_else(|| {
            Error::configuration(format!("model `{}` has no primary key", table.model_name))
        })?;

        let mut query = stmt::Query::new(E::ID);
        query.filter = ConditionChain::compare(
            stmt::Expr::column(pk.id),
            Comparator::Eq,
            Some(stmt::Expr::Value(key.into())),
        );
        self.first(Select::from_untyped(query))
    }

    pub fn count<E: Entity>(&mut self, select: Select<E>) -> Result<i64> {
        exec::count(self, select)
    }

    /// Run a shaped select and return the raw projection rows.
    pub fn rows<E: Entity>(&mut self, select: Select<E>) -> Result<Vec<ValueRecord>> {
        exec::select_rows(self, select)
    }

    /// Insert the entity, assigning its generated key (and initial version)
    /// on the way out.
    pub fn insert<E: Entity>(&mut self, entity: &mut E) -> Result<()> {
        exec::insert_entity(self, entity)
    }

    /// Whole-object update by primary key. Version-tagged entities update
    /// only if the stored version still matches the one they read; a
    /// mismatch is a concurrency conflict.
    pub fn update<E: Entity>(&mut self, entity: &mut E) -> Result<()> {
        exec::update_entity(self, entity)
    }

    /// Insert-or-update by primary key.
    pub fn save<E: Entity>(&mut self, entity: &mut E) -> Result<()> {
        exec::save_entity(self, entity)
    }

    /// Delete the entity's row, cascading to dependent relations first.
    pub fn delete<E: Entity>(&mut self, entity: &E) -> Result<()> {
        exec::delete_entity(self, entity)
    }

    pub fn exec_update<E: Entity>(&mut self, update: Update<E>) -> Result<u64> {
        exec::exec_update(self, update)
    }

    pub fn exec_delete<E: Entity>(&mut self, delete: Delete<E>) -> Result<u64> {
        exec::exec_delete(self, delete)
    }

    /// Add a join-table row for relation `relation` of `S`, linking `source`
    /// to `target`. Linking is idempotent only if the join table says so.
    pub fn link<S: Entity, T: Entity>(
        &mut self,
        source: &S,
        relation: usize,
        target: &T,
    ) -> Result<()> {
        let rel = self.many_to_many::<S>(relation, T::ID)?;
        let text = format!(
            "INSERT INTO {} ({}, {}) VALUES ({}, {});",
            self.flavor.quoted(&rel.join_table),
            self.flavor.quoted(&rel.source_column),
            self.flavor.quoted(&rel.target_column),
            self.flavor.placeholder(1),
            self.flavor.placeholder(2),
        );
        self.execute_raw(Sql::new(text, vec![source.key(), target.key()]), true)?;
        Ok(())
    }

    /// Remove the join-table row linking `source` to `target`.
    pub fn unlink<S: Entity, T: Entity>(
        &mut self,
        source: &S,
        relation: usize,
        target: &T,
    ) -> Result<()> {
        let rel = self.many_to_many::<S>(relation, T::ID)?;
        let text = format!(
            "DELETE FROM {} WHERE {} = {} AND {} = {};",
            self.flavor.quoted(&rel.join_table),
            self.flavor.quoted(&rel.source_column),
            self.flavor.placeholder(1),
            self.flavor.quoted(&rel.target_column),
            self.flavor.placeholder(2),
        );
        self.execute_raw(Sql::new(text, vec![source.key(), target.key()]), true)?;
        Ok(())
    }

    pub fn commit(&mut self) -> Result<()> {
        self.check_open()?;
        if self.in_tx {
            if let Err(err) = self.conn.commit() {
                self.state = State::Aborted;
                return Err(err);
            }
            self.in_tx = false;
        }
        self.state = State::Committed;
        Ok(())
    }

    /// Discard the transaction. Also the only way forward after a failed
    /// statement.
    pub fn rollback(&mut self) -> Result<()> {
        match self.state {
            State::Open | State::Aborted => {}
            State::Committed => {
                return Err(Error::session_state("session is already committed"))
            }
            State::RolledBack => {
                return Err(Error::session_state("session is already rolled back"))
            }
            State::Closed => return Err(Error::session_state("session is closed")),
        }
        if self.in_tx {
            self.conn.rollback()?;
            self.in_tx = false;
        }
        self.state = State::RolledBack;
        Ok(())
    }

    /// Release the connection. An unfinished transaction is rolled back.
    pub fn close(mut self) -> Result<()> {
        if self.in_tx {
            self.conn.rollback()?;
            self.in_tx = false;
        }
        self.state = State::Closed;
        Ok(())
    }

    pub(crate) fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub(crate) fn capability(&self) -> &Capability {
        &self.capability
    }

    pub(crate) fn abort(&mut self) {
        if self.state == State::Open {
            self.state = State::Aborted;
        }
    }

    pub(crate) fn table(&self, model: ModelId) -> Result<Arc<TableDef>> {
        Registry::global()
            .get(model)
            .ok_or_else(|| Error::configuration(format!("model {model:?} is not registered")))
    }

    pub(crate) fn load_related<E: Entity>(
        &mut self,
        parent: ModelId,
        relation: usize,
        key: Value,
    ) -> Result<Vec<E>> {
        exec::fetch_related(self, parent, relation, key)
    }

    pub(crate) fn last_insert_id(&mut self) -> Result<i64> {
        self.conn.last_insert_id()
    }

    pub(crate) fn run_query(&mut self, query: stmt::Query) -> Result<Rows> {
        self.execute_stmt(&SqlStatement::from(query), false)
    }

    /// Serialize and run one statement. A serialization failure is a
    /// configuration error and leaves the session usable; an execution
    /// failure makes it rollback-only.
    pub(crate) fn execute_stmt(&mut self, stmt: &SqlStatement, mutating: bool) -> Result<Rows> {
        self.check_open()?;
        let serializer = Serializer::new(self.flavor, Registry::global());
        let mut params = Vec::new();
        let sql = serializer.serialize(stmt, &mut params)?;
        self.execute_raw(Sql::new(sql, params), mutating)
    }

    pub(crate) fn execute_raw(&mut self, sql: Sql, mutating: bool) -> Result<Rows> {
        self.check_open()?;
        if mutating {
            if let Err(err) = self.ensure_tx() {
                self.state = State::Aborted;
                return Err(err);
            }
        }
        debug!(target: "quarry", "{} [{} params]", sql.text, sql.params.len());
        match self.conn.execute(&sql) {
            Ok(rows) => Ok(rows),
            Err(err) => {
                self.state = State::Aborted;
                Err(err)
            }
        }
    }

    /// Run a statement expected to produce a single value.
    pub(crate) fn scalar(&mut self, sql: Sql, mutating: bool) -> Result<Value> {
        let text = sql.text.clone();
        let rows = self.execute_raw(sql, mutating)?;
        let (_, raws) = rows.into_values();
        raws.into_iter()
            .next()
            .and_then(|raw| raw.into_iter().next())
            .ok_or_else(|| Error::execution("statement returned no rows", Some(text)))
    }

    /// Read the (source, target) key pairs of a join table for the given
    /// source keys.
    pub(crate) fn join_pairs(
        &mut self,
        rel: &ManyToMany,
        keys: &[Value],
    ) -> Result<Vec<(Value, Value)>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let markers: Vec<String> = (1..=keys.len())
            .map(|n| self.flavor.placeholder(n))
            .collect();
        let text = format!(
            "SELECT {}, {} FROM {} WHERE {} IN ({});",
            self.flavor.quoted(&rel.source_column),
            self.flavor.quoted(&rel.target_column),
            self.flavor.quoted(&rel.join_table),
            self.flavor.quoted(&rel.source_column),
            markers.join(", "),
        );
        let rows = self.execute_raw(Sql::new(text, keys.to_vec()), false)?;
        let (_, raws) = rows.into_values();
        Ok(raws
            .into_iter()
            .map(|raw| {
                let mut it = raw.into_iter();
                let source = it.next().unwrap_or_default();
                let target = it.next().unwrap_or_default();
                (source, target)
            })
            .collect())
    }

    /// Remove every join row whose source key is in `keys`.
    pub(crate) fn delete_join_rows(&mut self, rel: &ManyToMany, keys: &[Value]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let markers: Vec<String> = (1..=keys.len())
            .map(|n| self.flavor.placeholder(n))
            .collect();
        let text = format!(
            "DELETE FROM {} WHERE {} IN ({});",
            self.flavor.quoted(&rel.join_table),
            self.flavor.quoted(&rel.source_column),
            markers.join(", "),
        );
        Ok(self
            .execute_raw(Sql::new(text, keys.to_vec()), true)?
            .count())
    }

    fn many_to_many<S: Entity>(&mut self, relation: usize, target: ModelId) -> Result<ManyToMany> {
        let table = self.table(S::ID)?;
        let rel = table.relations.get(relation).ok_or_else(|| {
            Error::configuration(format!(
                "model `{}` has no relation {relation}",
                table.model_name
            ))
        })?;
        let Some(m2m) = rel.as_many_to_many() else {
            return Err(Error::configuration(format!(
                "relation {relation} of `{}` is not many-to-many",
                table.model_name
            )));
        };
        if m2m.target != target {
            return Err(Error::configuration(format!(
                "relation {relation} of `{}` targets {:?}, not {target:?}",
                table.model_name, m2m.target
            )));
        }
        Ok(m2m.clone())
    }

    fn check_open(&self) -> Result<()> {
        match self.state {
            State::Open => Ok(()),
            State::Aborted => Err(Error::session_state(
                "a statement failed; the session can only be rolled back or closed",
            )),
            State::Committed => Err(Error::session_state("session is already committed")),
            State::RolledBack => Err(Error::session_state("session is already rolled back")),
            State::Closed => Err(Error::session_state("session is closed")),
        }
    }

    fn ensure_tx(&mut self) -> Result<()> {
        if !self.in_tx {
            self.conn.begin()?;
            self.in_tx = true;
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.in_tx {
            if let Err(err) = self.conn.rollback() {
                warn!(target: "quarry", "rollback on drop failed: {err}");
            }
            self.in_tx = false;
        }
    }
}
