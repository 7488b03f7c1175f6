// ── Replace-strategy coordinator ──
//
// Drives one write transaction against a session: lock, delete every
// managed path (replace only), set the built statements, commit. Any
// failure once the lock is held discards the candidate, so the committed
// configuration is either fully replaced or untouched.

use strum::Display;
use tracing::{debug, info, warn};

use junoset_api::Transport;

use crate::build::build;
use crate::error::{CoreError, ValidationError};
use crate::model::SystemConfig;
use crate::schema;
use crate::statement::StatementSet;

/// Coordinator progress through one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReplaceState {
    Idle,
    Deleting,
    Setting,
    Committing,
    Failed,
}

/// Whether existing managed statements are cleared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    /// Set only; used when the resource is first created.
    Create,
    /// Delete every managed path, then set.
    Replace,
}

/// Every command a transaction would load, in order.
pub fn plan(config: &SystemConfig, strategy: Strategy) -> Result<Vec<String>, ValidationError> {
    let statements = build(config)?;
    let mut commands = match strategy {
        Strategy::Replace => schema::delete_commands(),
        Strategy::Create => Vec::new(),
    };
    commands.extend(statements.set_commands());
    Ok(commands)
}

pub struct ReplaceCoordinator<'a, T: Transport> {
    transport: &'a T,
    state: ReplaceState,
}

impl<'a, T: Transport> ReplaceCoordinator<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            state: ReplaceState::Idle,
        }
    }

    pub fn state(&self) -> ReplaceState {
        self.state
    }

    fn enter(&mut self, state: ReplaceState) {
        debug!(from = %self.state, to = %state, "replace state");
        self.state = state;
    }

    /// Delete-then-set in a fresh session.
    pub async fn replace(
        &mut self,
        config: &SystemConfig,
        comment: &str,
    ) -> Result<StatementSet, CoreError> {
        self.run(config, comment, Strategy::Replace).await
    }

    /// Set-only in a fresh session.
    pub async fn create(
        &mut self,
        config: &SystemConfig,
        comment: &str,
    ) -> Result<StatementSet, CoreError> {
        self.run(config, comment, Strategy::Create).await
    }

    /// Build the model, then open a session, execute, and close it.
    /// Validation failures never reach the device.
    pub async fn run(
        &mut self,
        config: &SystemConfig,
        comment: &str,
        strategy: Strategy,
    ) -> Result<StatementSet, CoreError> {
        let statements = build(config)?;
        let mut session = self
            .transport
            .open()
            .await
            .map_err(CoreError::transport("open"))?;
        let result = self
            .execute(&mut session, &statements, comment, strategy)
            .await;
        close_session(self.transport, session).await;
        result.map(|()| statements)
    }

    /// Run the transaction on an already open session.
    pub async fn execute(
        &mut self,
        session: &mut T::Session,
        statements: &StatementSet,
        comment: &str,
        strategy: Strategy,
    ) -> Result<(), CoreError> {
        if let Err(err) = self.transport.lock(session).await {
            // Nothing was loaded by this session; there is nothing to discard.
            self.enter(ReplaceState::Failed);
            return Err(CoreError::transport("lock")(err));
        }

        let result = self.load_and_commit(session, statements, comment, strategy).await;
        if let Err(ref err) = result {
            warn!(state = %self.state, error = %err, "transaction failed, discarding candidate");
            self.enter(ReplaceState::Failed);
            if let Err(discard_err) = self.transport.discard(session).await {
                warn!(error = %discard_err, "discard failed");
            }
        }
        result
    }

    async fn load_and_commit(
        &mut self,
        session: &mut T::Session,
        statements: &StatementSet,
        comment: &str,
        strategy: Strategy,
    ) -> Result<(), CoreError> {
        if strategy == Strategy::Replace {
            self.enter(ReplaceState::Deleting);
            self.transport
                .apply(session, &schema::delete_commands())
                .await
                .map_err(CoreError::transport("delete"))?;
        }

        self.enter(ReplaceState::Setting);
        self.transport
            .apply(session, &statements.set_commands())
            .await
            .map_err(CoreError::transport("set"))?;

        self.enter(ReplaceState::Committing);
        self.transport
            .commit(session, comment)
            .await
            .map_err(CoreError::transport("commit"))?;

        self.enter(ReplaceState::Idle);
        info!(%strategy, statements = statements.len(), comment, "configuration committed");
        Ok(())
    }
}

/// Close a session; a failure here does not change the outcome.
pub(crate) async fn close_session<T: Transport>(transport: &T, session: T::Session) {
    if let Err(err) = transport.close(session).await {
        warn!(error = %err, "failed to close session");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use junoset_api::{Error, MemoryDevice, Operation};

    fn config() -> SystemConfig {
        SystemConfig {
            host_name: Some("edge2".into()),
            ..SystemConfig::default()
        }
    }

    #[test]
    fn replace_plan_deletes_before_setting() {
        let commands = plan(&config(), Strategy::Replace).unwrap();
        let deletes = schema::delete_commands();
        assert_eq!(&commands[..deletes.len()], deletes.as_slice());
        assert_eq!(commands.last().unwrap(), "set system host-name edge2");

        let commands = plan(&config(), Strategy::Create).unwrap();
        assert_eq!(commands, ["set system host-name edge2"]);
    }

    #[tokio::test]
    async fn state_returns_to_idle_after_commit() {
        let device = MemoryDevice::new();
        let mut coordinator = ReplaceCoordinator::new(&device);
        coordinator.replace(&config(), "test").await.unwrap();
        assert_eq!(coordinator.state(), ReplaceState::Idle);
    }

    #[tokio::test]
    async fn commit_failure_discards_and_reports_failed() {
        let device = MemoryDevice::new();
        device
            .fail_next(
                Operation::Commit,
                Error::CommitFailed {
                    message: "mgd: error".into(),
                },
            )
            .await;

        let mut coordinator = ReplaceCoordinator::new(&device);
        let err = coordinator.replace(&config(), "test").await.unwrap_err();

        assert_eq!(coordinator.state(), ReplaceState::Failed);
        assert!(err.to_string().starts_with("commit failed"));
        assert_eq!(
            device.journal().await,
            [
                Operation::Open,
                Operation::Lock,
                Operation::Apply,
                Operation::Apply,
                Operation::Commit,
                Operation::Discard,
                Operation::Close,
            ]
        );
    }

    #[tokio::test]
    async fn invalid_model_never_opens_a_session() {
        let device = MemoryDevice::new();
        let bad = SystemConfig {
            services: Some(crate::model::Services::default()),
            ..SystemConfig::default()
        };
        let mut coordinator = ReplaceCoordinator::new(&device);
        let err = coordinator.replace(&bad, "test").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
        assert!(device.journal().await.is_empty());
    }
}
