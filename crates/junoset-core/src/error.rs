// ── Core error types ──
//
// Three kinds only: the model was rejected before anything was sent,
// device output could not be decoded, or the session collaborator
// failed. Nothing here is retried.

use std::num::ParseIntError;

use strum::Display;
use thiserror::Error;

use crate::schema::{BlockId, FieldId};

/// The model cannot be turned into statements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("conflict between '{first}' and '{second}'")]
    Conflict { first: FieldId, second: FieldId },

    #[error("{block} block is empty")]
    EmptyBlock { block: BlockId },

    #[error("'{field}' must not be empty")]
    EmptyValue { field: FieldId },

    #[error("'{field}' must fit on a single line")]
    MultilineValue { field: FieldId },

    #[error("'{field}' cannot be 0, which means unset for this field")]
    UnsetSentinel { field: FieldId },
}

/// A recognized statement carried a value of the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: failed to convert value from '{value}' to integer for '{field}': {source}")]
pub struct ParseError {
    /// 1-based line number in the parsed text.
    pub line_number: usize,
    pub line: String,
    pub field: FieldId,
    pub value: String,
    #[source]
    pub source: ParseIntError,
}

/// Inspectable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Parse,
    Transport,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("unreadable device output: {0}")]
    Parse(#[from] ParseError),

    /// The session collaborator failed during `operation`.
    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: junoset_api::Error,
    },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Transport { .. } => ErrorKind::Transport,
        }
    }

    pub(crate) fn transport(operation: &'static str) -> impl FnOnce(junoset_api::Error) -> Self {
        move |source| Self::Transport { operation, source }
    }

    /// The underlying session error, if this is a transport failure.
    pub fn transport_source(&self) -> Option<&junoset_api::Error> {
        match self {
            Self::Transport { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Another session holds the configuration lock.
    pub fn is_lock_denied(&self) -> bool {
        self.transport_source()
            .is_some_and(junoset_api::Error::is_lock_denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_names_both_fields() {
        let err = ValidationError::Conflict {
            first: FieldId::SshNoTcpForwarding,
            second: FieldId::SshTcpForwarding,
        };
        assert_eq!(
            err.to_string(),
            "conflict between 'services.ssh.no_tcp_forwarding' and 'services.ssh.tcp_forwarding'"
        );
    }

    #[test]
    fn kinds_follow_variants() {
        let err = CoreError::from(ValidationError::EmptyBlock {
            block: BlockId::Services,
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "invalid configuration: services block is empty");

        let err = CoreError::transport("lock")(junoset_api::Error::LockDenied {
            message: "held by netops".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_lock_denied());
    }
}
