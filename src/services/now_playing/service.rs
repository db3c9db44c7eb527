use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use tracing::warn;

use super::{
    NowPlayingError,
    coordinator::Coordinator,
    registry::RemoteCommandHandlers,
    types::{
        CategoryOptions, DynamicNowPlayingInfo, InterruptionEvent, RemoteCommandEvent,
        SessionCategory, SessionMode, StaticNowPlayingInfo,
    },
};

/// Boxed event stream handed out by [`NowPlayingService`]
pub type EventStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

#[async_trait]
/// Now-playing capability consumed by applications
///
/// Reports track metadata and transport state to the system media surface,
/// relays remote commands and surfaces audio-session interruptions.
pub trait NowPlayingService: Send + Sync {
    /// Publish track metadata
    ///
    /// # Errors
    /// Returns `InvalidDuration` or `AudioSessionInactive`
    async fn update_static_info(&self, info: StaticNowPlayingInfo) -> Result<(), NowPlayingError>;

    /// Publish playback position and rate
    ///
    /// # Errors
    /// Returns `InvalidPlaybackState` or `AudioSessionInactive`
    async fn update_dynamic_info(&self, info: DynamicNowPlayingInfo)
    -> Result<(), NowPlayingError>;

    /// Register handlers for remote commands, replacing previous ones
    ///
    /// # Errors
    /// Returns error if the coordinator is no longer running
    async fn setup_remote_commands(
        &self,
        handlers: RemoteCommandHandlers,
    ) -> Result<(), NowPlayingError>;

    /// Stream remote command events for the configured commands
    ///
    /// # Errors
    /// Returns error if the coordinator is no longer running
    async fn remote_command_events(&self)
    -> Result<EventStream<RemoteCommandEvent>, NowPlayingError>;

    /// Stream audio-session interruptions
    ///
    /// # Errors
    /// Returns error if the coordinator is no longer running
    async fn interruption_events(&self) -> Result<EventStream<InterruptionEvent>, NowPlayingError>;

    /// Configure and activate the audio session
    ///
    /// # Errors
    /// Returns the platform's session error as-is
    async fn initialize_audio_session(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), NowPlayingError>;

    /// Return to idle. Never fails.
    async fn reset(&self);
}

/// [`NowPlayingService`] backed by a [`Coordinator`]
#[derive(Debug, Clone)]
pub struct LiveNowPlayingService {
    coordinator: Coordinator,
}

impl LiveNowPlayingService {
    /// Wrap a coordinator
    pub fn new(coordinator: Coordinator) -> Self {
        Self { coordinator }
    }

    /// The underlying coordinator
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }
}

#[async_trait]
impl NowPlayingService for LiveNowPlayingService {
    async fn update_static_info(&self, info: StaticNowPlayingInfo) -> Result<(), NowPlayingError> {
        self.coordinator.update_static_info(info).await
    }

    async fn update_dynamic_info(
        &self,
        info: DynamicNowPlayingInfo,
    ) -> Result<(), NowPlayingError> {
        self.coordinator.update_dynamic_info(info).await
    }

    async fn setup_remote_commands(
        &self,
        handlers: RemoteCommandHandlers,
    ) -> Result<(), NowPlayingError> {
        self.coordinator.setup_remote_commands(handlers).await
    }

    async fn remote_command_events(
        &self,
    ) -> Result<EventStream<RemoteCommandEvent>, NowPlayingError> {
        let events = self.coordinator.configured_command_events().await?;
        Ok(events.boxed())
    }

    async fn interruption_events(&self) -> Result<EventStream<InterruptionEvent>, NowPlayingError> {
        let events = self.coordinator.interruption_events().await?;
        Ok(events.boxed())
    }

    async fn initialize_audio_session(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), NowPlayingError> {
        self.coordinator
            .initialize_audio_session(category, mode, options)
            .await
    }

    async fn reset(&self) {
        if let Err(e) = self.coordinator.reset().await {
            warn!(error = %e, "Reset skipped");
        }
    }
}

/// Inert [`NowPlayingService`] for tests and previews.
///
/// Every operation succeeds and the streams never yield.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNowPlayingService;

#[async_trait]
impl NowPlayingService for NoopNowPlayingService {
    async fn update_static_info(&self, _info: StaticNowPlayingInfo) -> Result<(), NowPlayingError> {
        Ok(())
    }

    async fn update_dynamic_info(
        &self,
        _info: DynamicNowPlayingInfo,
    ) -> Result<(), NowPlayingError> {
        Ok(())
    }

    async fn setup_remote_commands(
        &self,
        _handlers: RemoteCommandHandlers,
    ) -> Result<(), NowPlayingError> {
        Ok(())
    }

    async fn remote_command_events(
        &self,
    ) -> Result<EventStream<RemoteCommandEvent>, NowPlayingError> {
        Ok(stream::pending().boxed())
    }

    async fn interruption_events(&self) -> Result<EventStream<InterruptionEvent>, NowPlayingError> {
        Ok(stream::pending().boxed())
    }

    async fn initialize_audio_session(
        &self,
        _category: SessionCategory,
        _mode: SessionMode,
        _options: CategoryOptions,
    ) -> Result<(), NowPlayingError> {
        Ok(())
    }

    async fn reset(&self) {}
}
