/// An operation was attempted on a session that no longer permits it.
#[derive(Debug)]
pub(super) struct SessionStateError {
    pub(super) message: String,
}

impl std::error::Error for SessionStateError {}

impl core::fmt::Display for SessionStateError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid session state: {}", self.message)
    }
}
