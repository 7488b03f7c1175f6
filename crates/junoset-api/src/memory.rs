// In-process device
//
// A small stand-in for a Junos box: a committed configuration held as
// flat `set` paths, per-session candidates, one exclusive lock, and a
// journal of every operation. Used by the CLI for offline snapshot
// files and by tests to observe exactly what a cycle sent.
//
// Statements are treated structurally: `set` adds a line unless an
// identical one exists, `delete` removes every line under the given path.
// Paths registered as single-valued leaves keep one value, so a `set`
// there replaces the previous line the way a device does.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use strum::{Display, IntoStaticStr};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Error;
use crate::session::Transport;

const DISPLAY_SET_SUFFIX: &str = " | display set relative";

/// Transport operations, as recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    Open,
    Lock,
    Apply,
    Commit,
    Discard,
    Query,
    Close,
}

/// Whether a value-carrying path holds one value or accumulates many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf {
    Single,
    Multi,
}

#[derive(Debug)]
struct LeafPath {
    tokens: Vec<String>,
    kind: Leaf,
}

impl LeafPath {
    /// Statement tokens extend this path by at least a value.
    fn covers(&self, tokens: &[&str]) -> bool {
        tokens.len() > self.tokens.len()
            && self.tokens.iter().zip(tokens).all(|(leaf, token)| leaf == token)
    }
}

/// Index of the most specific registered path a statement falls under.
fn leaf_of(leaves: &[LeafPath], line: &str) -> Option<usize> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    leaves
        .iter()
        .enumerate()
        .filter(|(_, leaf)| leaf.covers(&tokens))
        .max_by_key(|(_, leaf)| leaf.tokens.len())
        .map(|(index, _)| index)
}

/// One successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub session: u64,
    pub comment: String,
    /// Committed configuration after this commit, as full paths.
    pub lines: Vec<String>,
}

#[derive(Debug, Default)]
struct DeviceState {
    committed: Vec<String>,
    commits: Vec<CommitRecord>,
    journal: Vec<Operation>,
    lock_holder: Option<u64>,
    next_session: u64,
    failures: HashMap<Operation, Error>,
}

impl DeviceState {
    fn check(&mut self, operation: Operation) -> Result<(), Error> {
        self.journal.push(operation);
        match self.failures.remove(&operation) {
            Some(err) => {
                debug!(%operation, error = %err, "injected failure");
                Err(err)
            }
            None => Ok(()),
        }
    }
}

/// Shared handle to an in-memory device. Clones see the same device.
#[derive(Debug, Clone, Default)]
pub struct MemoryDevice {
    state: Arc<Mutex<DeviceState>>,
    leaves: Arc<Vec<LeafPath>>,
}

/// Session state held by the caller between operations.
#[derive(Debug)]
pub struct MemorySession {
    id: u64,
    candidate: Option<Vec<String>>,
}

impl MemorySession {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register value-carrying paths (full paths, without `set`).
    ///
    /// A statement belongs to the longest registered path it extends.
    /// Register list paths as [`Leaf::Multi`] when they nest under a
    /// single-valued one, so their values are not mistaken for it.
    pub fn with_leaves<I, S>(mut self, leaves: I) -> Self
    where
        I: IntoIterator<Item = (S, Leaf)>,
        S: AsRef<str>,
    {
        let leaves = leaves
            .into_iter()
            .map(|(path, kind)| LeafPath {
                tokens: path.as_ref().split_whitespace().map(str::to_owned).collect(),
                kind,
            })
            .collect();
        self.leaves = Arc::new(leaves);
        self
    }

    /// Device whose committed configuration is the given `set` lines.
    ///
    /// Accepts the output of `show configuration | display set`: full
    /// paths with a leading `set`. Blank lines and `#` comments are
    /// ignored.
    pub fn from_snapshot(text: &str) -> Result<Self, Error> {
        let mut committed = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(path) = line.strip_prefix("set ") else {
                return Err(Error::Protocol {
                    message: format!("snapshot line {}: expected 'set ...', got '{line}'", index + 1),
                });
            };
            set_line(&mut committed, &[], path.trim());
        }
        debug!(lines = committed.len(), "loaded snapshot");
        Ok(Self {
            state: Arc::new(Mutex::new(DeviceState {
                committed,
                ..DeviceState::default()
            })),
            leaves: Arc::default(),
        })
    }

    /// Committed configuration in snapshot form (one `set` line each).
    pub async fn snapshot(&self) -> String {
        let state = self.state.lock().await;
        let mut out = String::new();
        for line in &state.committed {
            let _ = writeln!(out, "set {line}");
        }
        out
    }

    /// Committed configuration as full paths without the `set` keyword.
    pub async fn committed_lines(&self) -> Vec<String> {
        self.state.lock().await.committed.clone()
    }

    pub async fn commits(&self) -> Vec<CommitRecord> {
        self.state.lock().await.commits.clone()
    }

    /// Every operation attempted so far, in order.
    pub async fn journal(&self) -> Vec<Operation> {
        self.state.lock().await.journal.clone()
    }

    pub async fn is_locked(&self) -> bool {
        self.state.lock().await.lock_holder.is_some()
    }

    /// Make the next attempt of `operation` fail with `error`.
    pub async fn fail_next(&self, operation: Operation, error: Error) {
        self.state.lock().await.failures.insert(operation, error);
    }

    /// Take the configuration lock on behalf of an outside session.
    pub async fn hold_lock(&self, holder: u64) {
        self.state.lock().await.lock_holder = Some(holder);
    }

    pub async fn release_lock(&self) {
        self.state.lock().await.lock_holder = None;
    }
}

impl Transport for MemoryDevice {
    type Session = MemorySession;

    async fn open(&self) -> Result<MemorySession, Error> {
        let mut state = self.state.lock().await;
        state.check(Operation::Open)?;
        state.next_session += 1;
        debug!(session = state.next_session, "memory session opened");
        Ok(MemorySession {
            id: state.next_session,
            candidate: None,
        })
    }

    async fn lock(&self, session: &mut MemorySession) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.check(Operation::Lock)?;
        match state.lock_holder {
            Some(holder) if holder != session.id => Err(Error::LockDenied {
                message: format!("configuration database locked by session {holder}"),
            }),
            _ => {
                state.lock_holder = Some(session.id);
                Ok(())
            }
        }
    }

    async fn apply(&self, session: &mut MemorySession, statements: &[String]) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.check(Operation::Apply)?;
        let mut candidate = session
            .candidate
            .take()
            .unwrap_or_else(|| state.committed.clone());
        for statement in statements {
            if let Err(err) = apply_statement(&mut candidate, &self.leaves, statement) {
                session.candidate = Some(candidate);
                return Err(err);
            }
        }
        debug!(session = session.id, count = statements.len(), "statements applied");
        session.candidate = Some(candidate);
        Ok(())
    }

    async fn commit(&self, session: &mut MemorySession, comment: &str) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.check(Operation::Commit)?;
        if state.lock_holder != Some(session.id) {
            return Err(Error::InvalidState {
                message: "commit requires the configuration lock".into(),
            });
        }
        if let Some(candidate) = session.candidate.take() {
            state.committed = candidate;
        }
        let record = CommitRecord {
            session: session.id,
            comment: comment.to_owned(),
            lines: state.committed.clone(),
        };
        state.commits.push(record);
        debug!(session = session.id, comment, "committed");
        Ok(())
    }

    async fn discard(&self, session: &mut MemorySession) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.check(Operation::Discard)?;
        session.candidate = None;
        Ok(())
    }

    async fn query(&self, _session: &mut MemorySession, command: &str) -> Result<String, Error> {
        let mut state = self.state.lock().await;
        state.check(Operation::Query)?;
        let scope = command
            .strip_prefix("show configuration ")
            .and_then(|rest| rest.strip_suffix(DISPLAY_SET_SUFFIX))
            .ok_or_else(|| Error::Rpc {
                operation: "command".into(),
                message: format!("syntax error: {command}"),
            })?;
        let scope: Vec<&str> = scope.split_whitespace().collect();

        let mut out = String::from("<configuration-output>\n");
        for line in &state.committed {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() > scope.len() && tokens.starts_with(&scope) {
                let _ = writeln!(out, "set {}", after_tokens(line, scope.len()));
            }
        }
        out.push_str("</configuration-output>\n");
        Ok(out)
    }

    async fn close(&self, session: MemorySession) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        if state.lock_holder == Some(session.id) {
            state.lock_holder = None;
        }
        state.check(Operation::Close)?;
        debug!(session = session.id, "memory session closed");
        Ok(())
    }
}

fn apply_statement(
    lines: &mut Vec<String>,
    leaves: &[LeafPath],
    statement: &str,
) -> Result<(), Error> {
    let statement = statement.trim();
    if let Some(path) = statement.strip_prefix("set ") {
        set_line(lines, leaves, path.trim());
        Ok(())
    } else if let Some(path) = statement.strip_prefix("delete ") {
        let prefix: Vec<&str> = path.split_whitespace().collect();
        lines.retain(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            !tokens.starts_with(&prefix)
        });
        Ok(())
    } else {
        Err(Error::Rpc {
            operation: "load-configuration".into(),
            message: format!("syntax error: {statement}"),
        })
    }
}

fn set_line(lines: &mut Vec<String>, leaves: &[LeafPath], path: &str) {
    if lines.iter().any(|line| line == path) {
        return;
    }
    if let Some(index) = leaf_of(leaves, path).filter(|&i| leaves[i].kind == Leaf::Single) {
        lines.retain(|line| leaf_of(leaves, line) != Some(index));
    }
    lines.push(path.to_owned());
}

/// The rest of `line` after its first `count` tokens, spacing intact.
fn after_tokens(line: &str, count: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..count {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest.split_at(end).1.trim_start();
    }
    rest
}
