use std::sync::Arc;

use tracing::{debug, warn};

use super::{
    NowPlayingError,
    platform::{AudioSession, InterruptionObserver, ObserverToken},
    types::{CategoryOptions, SessionCategory, SessionMode},
};

/// Owns the platform audio session on behalf of the coordinator.
///
/// Holds at most one interruption observer. Every method must be called
/// from the coordinator's main context.
pub(crate) struct SessionGateway {
    session: Arc<dyn AudioSession>,
    observer: Option<ObserverToken>,
    initialized: bool,
}

impl SessionGateway {
    pub(crate) fn new(session: Arc<dyn AudioSession>) -> Self {
        Self {
            session,
            observer: None,
            initialized: false,
        }
    }

    /// Set category, mode and options, then activate.
    ///
    /// Platform failures are returned as they are.
    pub(crate) fn initialize(
        &mut self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), NowPlayingError> {
        self.session.set_category(category, mode, options)?;
        self.session.set_active(true)?;
        self.initialized = true;

        debug!(?category, ?mode, ?options, "Audio session initialized");
        Ok(())
    }

    /// (Re)activate the session before publishing.
    pub(crate) fn ensure_active(&self) -> Result<(), NowPlayingError> {
        self.session.set_active(true).map_err(|e| {
            warn!(error = %e, "Could not activate audio session");
            NowPlayingError::AudioSessionInactive
        })
    }

    /// Deactivate, discarding any failure.
    pub(crate) fn deactivate(&mut self) {
        if let Err(e) = self.session.set_active(false) {
            debug!(error = %e, "Ignoring audio session deactivation failure");
        }
        self.initialized = false;
    }

    /// Register `observer`, removing the one held before it.
    pub(crate) fn observe_interruptions(&mut self, observer: InterruptionObserver) -> ObserverToken {
        self.clear_observer();

        let token = self.session.add_interruption_observer(observer);
        self.observer = Some(token);
        token
    }

    /// Remove the held observer if it is still `token`.
    pub(crate) fn stop_observing(&mut self, token: ObserverToken) -> bool {
        if self.observer != Some(token) {
            return false;
        }

        self.clear_observer();
        true
    }

    pub(crate) fn clear_observer(&mut self) {
        if let Some(token) = self.observer.take() {
            self.session.remove_interruption_observer(token);
            debug!(?token, "Interruption observer removed");
        }
    }

    pub(crate) fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.initialized
    }
}
