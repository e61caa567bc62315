mod adhoc;
mod concurrency_conflict;
mod configuration;
mod execution;
mod session_state;
mod type_conversion;

use adhoc::AdhocError;
use concurrency_conflict::ConcurrencyConflictError;
use configuration::ConfigurationError;
use execution::ExecutionError;
use session_state::SessionStateError;
use std::sync::Arc;
use type_conversion::TypeConversionError;

/// Return early with an ad-hoc [`Error`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Create an ad-hoc [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Quarry.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),

    /// The caller's mapping or statement is wrong. Detected at metadata-build
    /// or statement-build time and never downgraded.
    Configuration(ConfigurationError),

    /// An optimistic-locked update affected zero rows.
    ConcurrencyConflict(ConcurrencyConflictError),

    /// The underlying engine rejected or failed a statement. Preserves the
    /// engine's message and the attempted SQL text.
    Execution(ExecutionError),

    /// An operation was attempted on a session in a terminal state.
    SessionState(SessionStateError),

    TypeConversion(TypeConversionError),

    Unknown,
}

impl Error {
    #[doc(hidden)]
    pub fn from_args(args: std::fmt::Arguments<'_>) -> Self {
        Self::from(ErrorKind::Adhoc(AdhocError {
            message: args.to_string(),
        }))
    }

    /// A configuration error: the caller's mapping is wrong (missing primary
    /// key, invalid version field, transient field reference, unmapped
    /// dialect function, ...).
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::from(ErrorKind::Configuration(ConfigurationError {
            message: message.into(),
        }))
    }

    /// An optimistic-locking conflict: a version-constrained update affected
    /// zero rows.
    pub fn concurrency_conflict(message: impl Into<String>) -> Self {
        Self::from(ErrorKind::ConcurrencyConflict(ConcurrencyConflictError {
            message: message.into(),
        }))
    }

    /// An execution error from the underlying engine, with the attempted SQL
    /// text preserved for diagnostics.
    pub fn execution(message: impl Into<String>, sql: Option<String>) -> Self {
        Self::from(ErrorKind::Execution(ExecutionError {
            message: message.into(),
            sql,
        }))
    }

    pub fn session_state(message: impl Into<String>) -> Self {
        Self::from(ErrorKind::SessionState(SessionStateError {
            message: message.into(),
        }))
    }

    pub fn type_conversion(value: crate::stmt::Value, to_type: &'static str) -> Self {
        Self::from(ErrorKind::TypeConversion(TypeConversionError {
            value,
            to_type,
        }))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration(_))
    }

    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self.kind(), ErrorKind::ConcurrencyConflict(_))
    }

    pub fn is_execution(&self) -> bool {
        matches!(self.kind(), ErrorKind::Execution(_))
    }

    pub fn is_session_state(&self) -> bool {
        matches!(self.kind(), ErrorKind::SessionState(_))
    }

    /// The SQL text of the failed statement, if this is an execution error.
    pub fn sql(&self) -> Option<&str> {
        for err in self.chain() {
            if let ErrorKind::Execution(exec) = err.kind() {
                return exec.sql.as_deref();
            }
        }
        None
    }

    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, ending with the root cause.
    pub fn context(self, consequent: impl Into<Error>) -> Error {
        let mut err = consequent.into();
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Configuration(err) => core::fmt::Display::fmt(err, f),
            ConcurrencyConflict(err) => core::fmt::Display::fmt(err, f),
            Execution(err) => core::fmt::Display::fmt(err, f),
            SessionState(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown quarry error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
