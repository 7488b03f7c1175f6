use thiserror::Error;

/// Top-level error type for the `junoset-api` crate.
///
/// Covers every failure mode of a device session: process spawning,
/// stream I/O, protocol framing, and errors reported by the device
/// itself. `junoset-core` wraps these as opaque transport failures.
#[derive(Debug, Error)]
pub enum Error {
    // ── Process / stream ────────────────────────────────────────────
    /// The ssh subprocess could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the session stream failed.
    #[error("session I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device closed the stream before a complete message arrived.
    #[error("session closed by peer")]
    Closed,

    /// No reply within the configured timeout.
    #[error("session timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Protocol ────────────────────────────────────────────────────
    /// Malformed XML or an unexpected message shape.
    #[error("protocol error: {message}")]
    Protocol { message: String },

    // ── Device-reported ─────────────────────────────────────────────
    /// The configuration lock is held by another session.
    #[error("configuration lock denied: {message}")]
    LockDenied { message: String },

    /// The device rejected the commit.
    #[error("configuration rejected: {message}")]
    CommitFailed { message: String },

    /// Any other `rpc-error` returned by the device.
    #[error("{operation} rejected by device: {message}")]
    Rpc { operation: String, message: String },

    /// A session operation was used in the wrong state (e.g. commit without lock).
    #[error("invalid session state: {message}")]
    InvalidState { message: String },
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Protocol {
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Returns `true` for failures that may succeed if the caller retries
    /// the whole cycle later. The core never retries on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Closed | Self::LockDenied { .. }
        )
    }

    /// Returns `true` if another session holds the configuration lock.
    pub fn is_lock_denied(&self) -> bool {
        matches!(self, Self::LockDenied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_denied_is_transient() {
        let err = Error::LockDenied {
            message: "configuration database locked by user netops".into(),
        };
        assert!(err.is_transient());
        assert!(err.is_lock_denied());
    }

    #[test]
    fn commit_failure_is_not_transient() {
        let err = Error::CommitFailed {
            message: "statement must contain additional statements".into(),
        };
        assert!(!err.is_transient());
        assert_eq!(
            err.to_string(),
            "configuration rejected: statement must contain additional statements"
        );
    }
}
