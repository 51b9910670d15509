//! Collaborators shared by the syncers.

use crate::character::CharacterCatalog;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::event::SyncEvent;
use crate::remote::RemoteSession;
use crate::store::PlayerStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::trace;

/// Everything a sync operation needs besides the player record itself.
///
/// The remote session is optional: without one every refresh is a no-op.
/// The store and catalog are required and checked once in
/// [`SyncContextBuilder::build`].
pub struct SyncContext {
    session: Option<Arc<dyn RemoteSession>>,
    store: Arc<dyn PlayerStore>,
    catalog: Arc<dyn CharacterCatalog>,
    events: Option<mpsc::Sender<SyncEvent>>,
    config: SyncConfig,
}

impl SyncContext {
    pub fn builder() -> SyncContextBuilder {
        SyncContextBuilder::default()
    }

    pub fn session(&self) -> Option<&Arc<dyn RemoteSession>> {
        self.session.as_ref()
    }

    /// The session, but only when it is allowed to read the account's own data.
    pub fn self_owned_session(&self) -> Option<&Arc<dyn RemoteSession>> {
        self.session.as_ref().filter(|s| s.is_self_owned())
    }

    pub fn store(&self) -> &Arc<dyn PlayerStore> {
        &self.store
    }

    pub fn catalog(&self) -> &Arc<dyn CharacterCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Fire-and-forget notification.
    pub(crate) fn emit(&self, event: SyncEvent) {
        if let Some(tx) = &self.events {
            if let Err(e) = tx.try_send(event) {
                trace!("Dropped sync event: {}", e);
            }
        }
    }
}

/// Builder for [`SyncContext`].
#[derive(Default)]
pub struct SyncContextBuilder {
    session: Option<Arc<dyn RemoteSession>>,
    store: Option<Arc<dyn PlayerStore>>,
    catalog: Option<Arc<dyn CharacterCatalog>>,
    events: Option<mpsc::Sender<SyncEvent>>,
    config: SyncConfig,
}

impl SyncContextBuilder {
    pub fn session(mut self, session: Arc<dyn RemoteSession>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn store(mut self, store: Arc<dyn PlayerStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn catalog(mut self, catalog: Arc<dyn CharacterCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn events(mut self, events: mpsc::Sender<SyncEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Fails when the store or catalog is missing or the config is invalid.
    pub fn build(self) -> SyncResult<SyncContext> {
        let store = self.store.ok_or(SyncError::MissingCollaborator("player store"))?;
        let catalog = self
            .catalog
            .ok_or(SyncError::MissingCollaborator("character catalog"))?;
        self.config.validate()?;

        Ok(SyncContext {
            session: self.session,
            store,
            catalog,
            events: self.events,
            config: self.config,
        })
    }
}
