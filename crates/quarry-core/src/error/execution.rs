/// A failure reported by the underlying engine.
///
/// The engine's original message is preserved, wrapped in a uniform kind so
/// callers don't need engine-specific handling. The attempted SQL text is
/// kept for diagnostics.
#[derive(Debug)]
pub(super) struct ExecutionError {
    pub(super) message: String,
    pub(super) sql: Option<String>,
}

impl std::error::Error for ExecutionError {}

impl core::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.sql {
            Some(sql) => write!(f, "execution failed: {}; sql={sql}", self.message),
            None => write!(f, "execution failed: {}", self.message),
        }
    }
}
