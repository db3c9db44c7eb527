//! The now-playing coordinator.
//!
//! A single thread owns the metadata snapshot, the command registrations
//! and the interruption observer. Every operation is one job on that
//! thread, so concurrent callers never interleave.

mod main_context;
mod state;
mod subscription;

use std::time::Duration;

use futures::Stream;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::{info, instrument};

use main_context::MainContext;
use state::MainState;
pub use subscription::{EventSubscription, InterruptionEvents, RemoteCommandEvents};

use super::{
    NowPlayingError,
    platform::Platform,
    registry::{HandlerBridge, RemoteCommandHandlers},
    types::{
        CategoryOptions, DynamicNowPlayingInfo, RemoteCommand, SessionCategory, SessionMode,
        StaticNowPlayingInfo,
    },
};

/// How long a hardware callback waits on an asynchronous handler by default
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(5);

/// Externally visible coordinator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    /// No session, no commands, no subscriptions
    #[default]
    Idle,
    /// Session initialized, commands enabled or a subscription active
    Configured,
}

/// Serializes every now-playing operation onto one UI-affinity thread.
///
/// Cloning yields another handle to the same coordinator.
#[derive(Clone)]
pub struct Coordinator {
    main: MainContext,
    state: watch::Receiver<CoordinatorState>,
}

impl Coordinator {
    /// Create a coordinator with the default handler timeout.
    ///
    /// # Errors
    /// Returns `RuntimeUnavailable` if the handler worker can't start, or
    /// `MainContextUnavailable` if the main context thread can't start
    pub fn new(platform: Platform) -> Result<Self, NowPlayingError> {
        Self::with_handler_timeout(platform, DEFAULT_HANDLER_TIMEOUT)
    }

    /// Create a coordinator whose hardware callbacks wait at most
    /// `timeout` for asynchronous handlers.
    ///
    /// # Errors
    /// Returns `RuntimeUnavailable` if the handler worker can't start, or
    /// `MainContextUnavailable` if the main context thread can't start
    pub fn with_handler_timeout(
        platform: Platform,
        timeout: Duration,
    ) -> Result<Self, NowPlayingError> {
        let bridge = HandlerBridge::spawn(timeout)?;
        let (state_tx, state_rx) = watch::channel(CoordinatorState::Idle);

        let main = MainContext::spawn(MainState::new(platform, bridge, state_tx))?;
        info!(?timeout, "Now-playing coordinator started");

        Ok(Self {
            main,
            state: state_rx,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> CoordinatorState {
        *self.state.borrow()
    }

    /// Stream of lifecycle states, starting with the current one
    pub fn state_monitored(&self) -> impl Stream<Item = CoordinatorState> + Send + use<> {
        WatchStream::new(self.state.clone())
    }

    /// Set the session category, mode and options, then activate it.
    ///
    /// # Errors
    /// Returns `Session` with the platform's error if it rejects the
    /// configuration or the activation
    #[instrument(skip(self), err)]
    pub async fn initialize_audio_session(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), NowPlayingError> {
        self.main
            .run(move |state| state.initialize_audio_session(category, mode, options))
            .await?
    }

    /// Replace every command registration with `handlers`.
    ///
    /// All platform slots are cleared first, including those held by
    /// event subscriptions, whose streams then end.
    ///
    /// # Errors
    /// Returns `MainContextUnavailable` if the main context is gone
    #[instrument(skip_all, fields(commands = handlers.enabled_commands().len()), err)]
    pub async fn setup_remote_commands(
        &self,
        handlers: RemoteCommandHandlers,
    ) -> Result<(), NowPlayingError> {
        self.main
            .run(move |state| state.setup_remote_commands(handlers))
            .await
    }

    /// Commands enabled by the most recent [`setup_remote_commands`](Self::setup_remote_commands)
    ///
    /// # Errors
    /// Returns `MainContextUnavailable` if the main context is gone
    pub async fn configured_commands(&self) -> Result<Vec<RemoteCommand>, NowPlayingError> {
        self.main.run(|state| state.configured_commands()).await
    }

    /// Enable `commands` and stream the hardware events they receive.
    ///
    /// The slots are cleared before being claimed, so the most recent
    /// configurer of a slot receives its events. Commands sharing a slot
    /// collapse into one registration configured by the last of them. Ending the subscription
    /// disables and unregisters the slots it still holds.
    ///
    /// # Errors
    /// Returns `MainContextUnavailable` if the main context is gone
    #[instrument(skip_all, err)]
    pub async fn remote_command_events(
        &self,
        commands: impl IntoIterator<Item = RemoteCommand>,
    ) -> Result<RemoteCommandEvents, NowPlayingError> {
        let commands: Vec<RemoteCommand> = commands.into_iter().collect();

        let (tx, rx) = mpsc::unbounded_channel();
        let id = self
            .main
            .run(move |state| state.subscribe_commands(&commands, tx))
            .await?;

        Ok(EventSubscription::new(rx, self.main.clone(), move |state| {
            state.end_command_subscription(id);
        }))
    }

    /// Stream the commands of the most recent handler configuration.
    ///
    /// # Errors
    /// Returns `MainContextUnavailable` if the main context is gone
    pub async fn configured_command_events(&self) -> Result<RemoteCommandEvents, NowPlayingError> {
        let commands = self.configured_commands().await?;
        self.remote_command_events(commands).await
    }

    /// Stream audio-session interruptions.
    ///
    /// Only one observer is held; subscribing again ends the previous
    /// stream. Notifications with an unrecognized shape are dropped.
    ///
    /// # Errors
    /// Returns `MainContextUnavailable` if the main context is gone
    #[instrument(skip(self), err)]
    pub async fn interruption_events(&self) -> Result<InterruptionEvents, NowPlayingError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = self
            .main
            .run(move |state| state.subscribe_interruptions(tx))
            .await?;

        Ok(EventSubscription::new(rx, self.main.clone(), move |state| {
            state.end_interruption_subscription(token);
        }))
    }

    /// Apply track metadata and publish it.
    ///
    /// # Errors
    /// Returns `InvalidDuration` for a negative or NaN duration, leaving
    /// the snapshot untouched, or `AudioSessionInactive` if the session
    /// can't be activated
    #[instrument(skip_all, fields(title = ?info.title), err)]
    pub async fn update_static_info(
        &self,
        info: StaticNowPlayingInfo,
    ) -> Result<(), NowPlayingError> {
        self.main
            .run(move |state| state.update_static_info(&info))
            .await?
    }

    /// Apply playback position and rate and publish them.
    ///
    /// # Errors
    /// Returns `InvalidPlaybackState` for a negative or NaN elapsed time or
    /// rate, leaving the snapshot untouched, or `AudioSessionInactive` if
    /// the session can't be activated
    #[instrument(skip(self), level = "trace", err)]
    pub async fn update_dynamic_info(
        &self,
        info: DynamicNowPlayingInfo,
    ) -> Result<(), NowPlayingError> {
        self.main
            .run(move |state| state.update_dynamic_info(&info))
            .await?
    }

    /// Return to idle: clear metadata and published info, drop every
    /// command registration and the interruption observer, and deactivate
    /// the session. Idempotent.
    ///
    /// # Errors
    /// Returns `MainContextUnavailable` if the main context is gone
    #[instrument(skip(self), err)]
    pub async fn reset(&self) -> Result<(), NowPlayingError> {
        self.main.run(MainState::reset).await
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("state", &self.state())
            .finish()
    }
}
