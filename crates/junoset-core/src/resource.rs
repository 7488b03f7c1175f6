// ── Resource lifecycle ──
//
// create / read / update / delete / import for the `system` subtree.
// Every operation runs inside a `Cycle`, which holds the subtree lock
// from session open until close so two cycles never interleave on the
// same device.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use junoset_api::{Transport, display_set_command};

use crate::build::build;
use crate::error::CoreError;
use crate::model::SystemConfig;
use crate::parse::parse;
use crate::replace::{ReplaceCoordinator, Strategy, close_session};
use crate::schema::SCOPE;

/// Identity of the one resource this subtree maps to.
pub const RESOURCE_ID: &str = "system";

pub const CREATE_COMMENT: &str = "create resource junos_system";
pub const UPDATE_COMMENT: &str = "update resource junos_system";

/// Serializes cycles against one subtree. Clones share the lock.
#[derive(Debug, Clone, Default)]
pub struct SubtreeLock(Arc<Mutex<()>>);

impl SubtreeLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}

/// The `system` subtree of one device.
pub struct SystemResource<T: Transport> {
    transport: T,
    lock: SubtreeLock,
    create_comment: String,
    update_comment: String,
}

impl<T: Transport> SystemResource<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            lock: SubtreeLock::new(),
            create_comment: CREATE_COMMENT.to_owned(),
            update_comment: UPDATE_COMMENT.to_owned(),
        }
    }

    /// Share a lock with other handles to the same device.
    pub fn with_lock(mut self, lock: SubtreeLock) -> Self {
        self.lock = lock;
        self
    }

    /// Use one commit comment for both create and update.
    pub fn with_commit_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.create_comment.clone_from(&comment);
        self.update_comment = comment;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Wait for exclusive access to the subtree.
    pub async fn begin(&self) -> Cycle<'_, T> {
        let guard = self.lock.acquire().await;
        debug!(resource = RESOURCE_ID, "cycle started");
        Cycle {
            resource: self,
            _guard: guard,
        }
    }

    pub async fn read(&self) -> Result<SystemConfig, CoreError> {
        self.begin().await.read().await
    }
}

/// One exclusive read or read-modify-write cycle.
pub struct Cycle<'a, T: Transport> {
    resource: &'a SystemResource<T>,
    _guard: MutexGuard<'a, ()>,
}

impl<T: Transport> Cycle<'_, T> {
    /// Read the subtree in a fresh session.
    pub async fn read(self) -> Result<SystemConfig, CoreError> {
        let transport = &self.resource.transport;
        let mut session = transport
            .open()
            .await
            .map_err(CoreError::transport("open"))?;
        let result = read_in(transport, &mut session).await;
        close_session(transport, session).await;
        result
    }

    /// Set the model without clearing what is already there, then read back.
    pub async fn create(self, config: &SystemConfig) -> Result<SystemConfig, CoreError> {
        let resource = self.resource;
        self.write(config, &resource.create_comment, Strategy::Create).await
    }

    /// Replace every managed statement with the model, then read back.
    pub async fn update(self, config: &SystemConfig) -> Result<SystemConfig, CoreError> {
        let resource = self.resource;
        self.write(config, &resource.update_comment, Strategy::Replace).await
    }

    /// The subtree cannot be removed from a device; the configuration is
    /// left exactly as it is.
    #[allow(clippy::unused_async)]
    pub async fn delete(self) -> Result<(), CoreError> {
        info!(resource = RESOURCE_ID, "delete leaves device configuration unchanged");
        Ok(())
    }

    /// Read the subtree and pair it with its resource id.
    pub async fn import(self) -> Result<(String, SystemConfig), CoreError> {
        let config = self.read().await?;
        Ok((RESOURCE_ID.to_owned(), config))
    }

    async fn write(
        self,
        config: &SystemConfig,
        comment: &str,
        strategy: Strategy,
    ) -> Result<SystemConfig, CoreError> {
        let statements = build(config)?;
        let transport = &self.resource.transport;
        let mut session = transport
            .open()
            .await
            .map_err(CoreError::transport("open"))?;

        let mut coordinator = ReplaceCoordinator::new(transport);
        let result = match coordinator
            .execute(&mut session, &statements, comment, strategy)
            .await
        {
            Ok(()) => read_in(transport, &mut session).await,
            Err(err) => Err(err),
        };
        close_session(transport, session).await;
        result
    }
}

async fn read_in<T: Transport>(
    transport: &T,
    session: &mut T::Session,
) -> Result<SystemConfig, CoreError> {
    let output = transport
        .query(session, &display_set_command(SCOPE))
        .await
        .map_err(CoreError::transport("read"))?;
    Ok(parse(&output)?)
}
