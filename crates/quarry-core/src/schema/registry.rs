use super::{ModelId, TableDef};
use crate::Result;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Process-wide metadata cache, keyed by model identity.
///
/// A table definition is built at most once per model and is safe for
/// concurrent read afterwards. First-build races are resolved by building
/// under the write lock.
#[derive(Debug, Default)]
pub struct Registry {
    tables: RwLock<HashMap<ModelId, Arc<TableDef>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry for the process lifetime.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn get(&self, id: ModelId) -> Option<Arc<TableDef>> {
        self.tables.read().unwrap().get(&id).cloned()
    }

    /// Return the cached definition for `id`, building it with `build` on
    /// first use. Every caller observes the identical `Arc`.
    pub fn get_or_build(
        &self,
        id: ModelId,
        build: impl FnOnce() -> Result<TableDef>,
    ) -> Result<Arc<TableDef>> {
        if let Some(def) = self.get(id) {
            return Ok(def);
        }

        let mut tables = self.tables.write().unwrap();
        if let Some(def) = tables.get(&id) {
            return Ok(def.clone());
        }

        let def = Arc::new(build()?);
        tables.insert(id, def.clone());
        Ok(def)
    }
}
