use crate::entity::Entity;
use crate::session::Session;

use quarry_core::schema::ModelId;
use quarry_core::stmt::Value;
use quarry_core::{Error, Result};

/// A to-many relation that hydrates on demand.
///
/// Eager relations hydrate as `Loaded` together with their parent. Lazy
/// relations hydrate as `Deferred`, remembering only the parent key; the
/// rows are fetched on the first [`Lazy::load`] call, which needs a live
/// session. Accessing a deferred relation without loading it is an error,
/// never an implicit query.
#[derive(Debug)]
pub enum Lazy<E> {
    Loaded(Vec<E>),
    Deferred {
        parent: ModelId,
        relation: usize,
        key: Value,
    },
}

impl<E: Entity> Lazy<E> {
    pub fn loaded(items: Vec<E>) -> Self {
        Self::Loaded(items)
    }

    /// A stub for relation `relation` of the parent model, keyed by the
    /// parent row's primary key.
    pub fn deferred(parent: ModelId, relation: usize, key: Value) -> Self {
        Self::Deferred {
            parent,
            relation,
            key,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The loaded rows. Fails if the relation was never loaded.
    pub fn get(&self) -> Result<&[E]> {
        match self {
            Self::Loaded(items) => Ok(items),
            Self::Deferred { .. } => Err(Error::session_state(
                "lazy relation accessed before it was loaded",
            )),
        }
    }

    /// Fetch the related rows if still deferred, then return them. Loading
    /// twice is a no-op.
    pub fn load(&mut self, session: &mut Session) -> Result<&[E]> {
        if let Self::Deferred {
            parent,
            relation,
            key,
        } = self
        {
            let items = session.load_related::<E>(*parent, *relation, key.clone())?;
            *self = Self::Loaded(items);
        }
        match self {
            Self::Loaded(items) => Ok(items),
            Self::Deferred { .. } => unreachable!(),
        }
    }
}

impl<E> Default for Lazy<E> {
    fn default() -> Self {
        Self::Loaded(Vec::new())
    }
}
