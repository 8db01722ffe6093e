use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Crate-wide error type. Loader phases and the module engine share it so
/// errors cross the hook boundary without translation.
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// A specifier could not be resolved to any module identity.
    Resolution { specifier: String, cause: String },
    /// Synthesizing or reading a fake's replacement source failed.
    Synthesis { fake: String, cause: String },
    Syntax(String),
    Reference(String),
    Type(String),
    Circular(String),
}

impl Display for LoaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Resolution { specifier, cause } => {
                write!(f, "cannot resolve module '{}': {}", specifier, cause)
            }
            LoaderError::Synthesis { fake, cause } => write!(f, "{} - {}", fake, cause),
            LoaderError::Syntax(m) => write!(f, "{}", m),
            LoaderError::Reference(m) => write!(f, "{}", m),
            LoaderError::Type(m) => write!(f, "{}", m),
            LoaderError::Circular(identity) => write!(f, "circular import of '{}'", identity),
        }
    }
}

impl Error for LoaderError {}
