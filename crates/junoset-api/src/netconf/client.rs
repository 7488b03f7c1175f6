// NETCONF-over-ssh client
//
// Spawns the local ssh client with the `netconf` subsystem and speaks
// NETCONF 1.0 over its stdio. Authentication and host key policy are
// whatever ssh does; this module only frames and decodes messages.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use super::rpc::{self, Reply};
use crate::error::Error;
use crate::session::Transport;
use crate::transport::NetconfConfig;

const READ_CHUNK: usize = 8192;

/// [`Transport`] implementation that talks to a Junos device over NETCONF.
#[derive(Debug, Clone)]
pub struct NetconfTransport {
    config: NetconfConfig,
}

impl NetconfTransport {
    pub fn new(config: NetconfConfig) -> Self {
        Self { config }
    }

    /// Connection settings this transport was built with.
    pub fn config(&self) -> &NetconfConfig {
        &self.config
    }
}

/// One live NETCONF session (one ssh child process).
pub struct NetconfSession {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
    buf: Vec<u8>,
    next_message_id: u64,
    session_id: Option<String>,
    timeout: Duration,
}

impl NetconfSession {
    /// Session id announced in the device hello, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    async fn send(&mut self, message: &str) -> Result<(), Error> {
        self.stdin.write_all(message.as_bytes()).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Read until one full framed message is buffered.
    async fn read_message(&mut self) -> Result<String, Error> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some((message, consumed)) = rpc::split_message(&self.buf) {
                self.buf.drain(..consumed);
                return Ok(message);
            }
            let read = tokio::time::timeout(self.timeout, self.stdout.read(&mut chunk))
                .await
                .map_err(|_| Error::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                })??;
            if read == 0 {
                return Err(Error::Closed);
            }
            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Send one RPC and decode its reply.
    async fn call(&mut self, operation: &str, body: &str) -> Result<Reply, Error> {
        self.next_message_id += 1;
        let message_id = self.next_message_id;
        debug!(operation, message_id, "sending rpc");
        self.send(&rpc::rpc(message_id, body)).await?;
        let raw = self.read_message().await?;
        let reply = rpc::parse_reply(&raw)?;
        for warning in reply.errors.iter().filter(|e| !e.is_fatal()) {
            warn!(operation, message = %warning.message, "device warning");
        }
        Ok(reply)
    }

    /// Send one RPC and turn any fatal `rpc-error` into an [`Error::Rpc`].
    async fn call_checked(&mut self, operation: &str, body: &str) -> Result<Reply, Error> {
        let reply = self.call(operation, body).await?;
        match reply.fatal_message() {
            Some(message) => Err(Error::Rpc {
                operation: operation.to_owned(),
                message,
            }),
            None => Ok(reply),
        }
    }
}

impl Transport for NetconfTransport {
    type Session = NetconfSession;

    async fn open(&self) -> Result<NetconfSession, Error> {
        let program = self.config.ssh_program.display().to_string();
        debug!(host = %self.config.host, port = self.config.port, %program, "opening netconf session");

        let mut child = Command::new(&self.config.ssh_program)
            .args(self.config.ssh_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| Error::Protocol {
            message: format!("{program}: stdin not captured"),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| Error::Protocol {
            message: format!("{program}: stdout not captured"),
        })?;

        let mut session = NetconfSession {
            child,
            stdin,
            stdout,
            buf: Vec::new(),
            next_message_id: 0,
            session_id: None,
            timeout: self.config.timeout,
        };

        let greeting = session.read_message().await?;
        session.session_id = rpc::parse_hello(&greeting)?;
        session.send(&rpc::client_hello()).await?;
        debug!(session_id = ?session.session_id, "netconf hello exchanged");
        Ok(session)
    }

    async fn lock(&self, session: &mut NetconfSession) -> Result<(), Error> {
        let reply = session.call("lock", rpc::lock_candidate()).await?;
        match reply.fatal_message() {
            Some(message) => Err(Error::LockDenied { message }),
            None => Ok(()),
        }
    }

    async fn apply(&self, session: &mut NetconfSession, statements: &[String]) -> Result<(), Error> {
        if statements.is_empty() {
            return Ok(());
        }
        debug!(count = statements.len(), "loading statements");
        session
            .call_checked("load-configuration", &rpc::load_set(statements))
            .await?;
        Ok(())
    }

    async fn commit(&self, session: &mut NetconfSession, comment: &str) -> Result<(), Error> {
        let reply = session.call("commit", &rpc::commit(comment)).await?;
        match reply.fatal_message() {
            Some(message) => Err(Error::CommitFailed { message }),
            None => Ok(()),
        }
    }

    async fn discard(&self, session: &mut NetconfSession) -> Result<(), Error> {
        session
            .call_checked("discard-changes", rpc::discard_changes())
            .await?;
        Ok(())
    }

    async fn query(&self, session: &mut NetconfSession, command: &str) -> Result<String, Error> {
        let reply = session.call_checked("command", &rpc::command(command)).await?;
        Ok(reply.data)
    }

    async fn close(&self, mut session: NetconfSession) -> Result<(), Error> {
        let result = session
            .call_checked("close-session", rpc::close_session())
            .await
            .map(|_| ());

        drop(session.stdin);
        let timeout = session.timeout;
        match tokio::time::timeout(timeout, session.child.wait()).await {
            Ok(Ok(status)) => debug!(%status, "ssh exited"),
            Ok(Err(e)) => warn!(error = %e, "failed to reap ssh"),
            Err(_) => {
                warn!("ssh did not exit after close-session, killing");
                session.child.kill().await?;
            }
        }
        result
    }
}
