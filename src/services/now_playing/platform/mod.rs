//! Injected platform capabilities.
//!
//! The command center, audio session and info center are process-wide
//! singletons on a real platform. The coordinator is their only caller and
//! always calls them from its main context.

mod memory;

use std::sync::Arc;

pub use memory::{MemoryAudioSession, MemoryCommandCenter, MemoryInfoCenter, MemoryPlatform};

use super::{
    SessionError,
    types::{
        CategoryOptions, CommandConfiguration, CommandStatus, InterruptionNotification,
        NowPlayingInfo, PlatformCommand, RawCommandEvent, SessionCategory, SessionMode,
    },
};

/// Callback registered on a command slot
pub type CommandTarget = Arc<dyn Fn(&RawCommandEvent) -> CommandStatus + Send + Sync>;

/// Callback registered for interruption notifications
pub type InterruptionObserver = Arc<dyn Fn(&InterruptionNotification) + Send + Sync>;

/// Identifies a registered command target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// Identifies a registered interruption observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(pub u64);

/// Platform surface that displays now-playing metadata
pub trait NowPlayingInfoCenter: Send + Sync {
    /// Replace the published dictionary, `None` clears it
    fn set_now_playing_info(&self, info: Option<NowPlayingInfo>);
}

/// Platform registry of remote commands and their targets
pub trait RemoteCommandCenter: Send + Sync {
    /// Enable or disable a slot
    fn set_enabled(&self, command: PlatformCommand, enabled: bool);

    /// Push slot configuration
    fn configure(&self, command: PlatformCommand, configuration: CommandConfiguration);

    /// Register a target on a slot
    fn add_target(&self, command: PlatformCommand, target: CommandTarget) -> TargetId;

    /// Unregister one target
    fn remove_target(&self, command: PlatformCommand, target: TargetId);

    /// Unregister every target on a slot
    fn remove_all_targets(&self, command: PlatformCommand);

    /// Start delivering hardware remote-control events
    fn begin_receiving_remote_control_events(&self);

    /// Stop delivering hardware remote-control events
    fn end_receiving_remote_control_events(&self);
}

/// Platform audio session
pub trait AudioSession: Send + Sync {
    /// Set category, mode and options
    ///
    /// # Errors
    /// Returns error if the platform rejects the configuration
    fn set_category(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), SessionError>;

    /// Activate or deactivate the session
    ///
    /// # Errors
    /// Returns error if the platform refuses the transition
    fn set_active(&self, active: bool) -> Result<(), SessionError>;

    /// Register an interruption observer
    fn add_interruption_observer(&self, observer: InterruptionObserver) -> ObserverToken;

    /// Unregister an interruption observer
    fn remove_interruption_observer(&self, token: ObserverToken);
}

/// The platform capabilities consumed by the coordinator
#[derive(Clone)]
pub struct Platform {
    /// Now-playing info center
    pub info_center: Arc<dyn NowPlayingInfoCenter>,
    /// Remote command center
    pub command_center: Arc<dyn RemoteCommandCenter>,
    /// Audio session
    pub audio_session: Arc<dyn AudioSession>,
}

impl Platform {
    /// Bundle platform capabilities
    pub fn new(
        info_center: Arc<dyn NowPlayingInfoCenter>,
        command_center: Arc<dyn RemoteCommandCenter>,
        audio_session: Arc<dyn AudioSession>,
    ) -> Self {
        Self {
            info_center,
            command_center,
            audio_session,
        }
    }
}

impl From<&MemoryPlatform> for Platform {
    fn from(memory: &MemoryPlatform) -> Self {
        Self::new(
            memory.info_center.clone(),
            memory.command_center.clone(),
            memory.audio_session.clone(),
        )
    }
}
