/// An optimistic-locked update affected zero rows.
///
/// Callers can catch this kind and retry or merge. The in-memory version of
/// the entity is never advanced on this path.
#[derive(Debug)]
pub(super) struct ConcurrencyConflictError {
    pub(super) message: String,
}

impl std::error::Error for ConcurrencyConflictError {}

impl core::fmt::Display for ConcurrencyConflictError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "concurrency conflict: {}", self.message)
    }
}
