use std::fmt;

use thiserror::Error;

/// What kind of name failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Class,
    Field,
    Getter,
    Operation,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefKind::Class => "class",
            RefKind::Field => "field",
            RefKind::Getter => "getter",
            RefKind::Operation => "operation",
        })
    }
}

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("unknown {kind} '{name}'")]
    UnknownReference { kind: RefKind, name: String },

    #[error("ambiguous reference '{name}' (candidates: {})", .candidates.join(", "))]
    AmbiguousReference {
        name: String,
        candidates: Vec<String>,
    },

    #[error("excessive scope '{0}'")]
    ExcessiveScope(String),

    #[error("incomplete scope '{0}'")]
    IncompleteScope(String),

    #[error("invalid type cast scope '{0}'")]
    InvalidTypeCast(String),

    #[error("malformed scope '{0}'")]
    MalformedScope(String),

    #[error("operation '{name}' rejected its arguments")]
    OperationFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("internal error - {0}")]
    InternalInvariantViolation(String),
}

impl ScopeError {
    pub(crate) fn unknown(kind: RefKind, name: impl Into<String>) -> Self {
        ScopeError::UnknownReference {
            kind,
            name: name.into(),
        }
    }

    /// Invariant violations point at a resolver/cascade mismatch rather than
    /// at bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, ScopeError::InternalInvariantViolation(_))
    }
}
