use std::fmt::Display;

use thiserror::Error;

use crate::{OperationKind, Path};

/// Errors that abort a transformation. None of them are transient: they
/// signal that the operations or the transformation tables are inconsistent
/// with the protocol and the exchange must not continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Two operations cannot both be legal against the same base state, e.g.
    /// adding and removing the same property concurrently. Indicates broken
    /// causality tracking in the caller.
    #[error("{server} and {client} cannot both be applied to {path} from the same base state")]
    IllegalConcurrentEdit {
        server: OperationKind,
        client: OperationKind,
        path: Path,
    },

    /// There is no transformation function for the given pair of kinds. For
    /// path transformations `server` is the kind of the ancestor operation.
    #[error("No transformation function is registered for {server} (server) and {client} (client)")]
    UnknownOperationPair {
        server: OperationKind,
        client: OperationKind,
    },

    /// The same key has been registered twice while building the registry.
    #[error("A transformation function is already registered for {0}")]
    DuplicateRegistration(RegistrationKey),
}

impl TransformError {
    /// Exchanges the server and client kinds reported by the error.
    #[must_use]
    pub(crate) fn with_swapped_roles(self) -> Self {
        match self {
            TransformError::IllegalConcurrentEdit {
                server,
                client,
                path,
            } => TransformError::IllegalConcurrentEdit {
                server: client,
                client: server,
                path,
            },
            TransformError::UnknownOperationPair { server, client } => {
                TransformError::UnknownOperationPair {
                    server: client,
                    client: server,
                }
            }
            TransformError::DuplicateRegistration(_) => self,
        }
    }
}

/// Key of an entry in the transformation function registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKey {
    Pair(OperationKind, OperationKind),
    Path(OperationKind),
}

impl Display for RegistrationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationKey::Pair(server, client) => write!(f, "({server}, {client})"),
            RegistrationKey::Path(kind) => write!(f, "descendants of {kind}"),
        }
    }
}

/// Errors raised when an operation does not fit the document it's applied
/// to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyError {
    #[error("Path {0} does not exist in the document")]
    PathNotFound(Path),

    #[error("Expected {expected} at {path} but found {found}")]
    TypeMismatch {
        path: Path,
        expected: &'static str,
        found: &'static str,
    },

    /// The index is outside of the array or string at `path`.
    #[error("Index {index} is out of bounds at {path} which has {length} elements")]
    IndexOutOfBounds {
        path: Path,
        index: usize,
        length: usize,
    },

    #[error("Property {key:?} already exists at {path}")]
    PropertyAlreadyExists { path: Path, key: String },

    #[error("Property {key:?} does not exist at {path}")]
    PropertyNotFound { path: Path, key: String },

    /// The text in the document differs from the one the remove operation
    /// was created for.
    #[error("Text to-be-removed {expected:?} does not match {found:?} at {path}")]
    RemovedTextMismatch {
        path: Path,
        expected: String,
        found: String,
    },

    #[error("Number {0} cannot be represented in a document")]
    InvalidNumber(f64),
}
