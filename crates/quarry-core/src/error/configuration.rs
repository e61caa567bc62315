/// The caller's mapping or statement is invalid.
///
/// Raised at metadata-build or statement-build time: missing primary key
/// where a relation requires one, invalid version-field type, reference to a
/// transient field, unmapped dialect function.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    pub(super) message: String,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping: {}", self.message)
    }
}
