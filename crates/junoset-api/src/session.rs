// ── Session transport contract ──
//
// Everything the mapping engine needs from a device: a transactional
// session over which ordered statements are applied and committed, and
// a query channel returning the device's own statement text.

use std::future::Future;

use crate::error::Error;

/// The command that returns a subtree as relative `set` statements.
pub fn display_set_command(scope: &str) -> String {
    format!("show configuration {scope} | display set relative")
}

/// A device session provider.
///
/// Implementations own connection handling, credentials, and transport
/// security. Callers hold the returned session for one read or
/// read-modify-write cycle and always finish with [`close`](Self::close).
/// No method retries; every failure is returned as-is.
pub trait Transport: Send + Sync {
    /// Per-session state (stream handles, candidate buffer, ...).
    type Session: Send;

    /// Open a new session with the device.
    fn open(&self) -> impl Future<Output = Result<Self::Session, Error>> + Send;

    /// Take the exclusive candidate configuration lock.
    fn lock(&self, session: &mut Self::Session) -> impl Future<Output = Result<(), Error>> + Send;

    /// Load `set` / `delete` statements into the candidate, in order.
    fn apply(
        &self,
        session: &mut Self::Session,
        statements: &[String],
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// Commit the candidate with a log message.
    fn commit(
        &self,
        session: &mut Self::Session,
        comment: &str,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// Throw away uncommitted candidate changes.
    fn discard(&self, session: &mut Self::Session)
    -> impl Future<Output = Result<(), Error>> + Send;

    /// Run an operational command and return its raw text output.
    fn query(
        &self,
        session: &mut Self::Session,
        command: &str,
    ) -> impl Future<Output = Result<String, Error>> + Send;

    /// End the session, releasing any lock it holds.
    fn close(&self, session: Self::Session) -> impl Future<Output = Result<(), Error>> + Send;
}
