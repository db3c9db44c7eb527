//! Now-playing metadata and remote-command integration.
//!
//! Reports what an application is playing to the system media surface
//! (lock screen, control center), relays hardware remote commands back to
//! it, and surfaces audio-session interruptions as event streams.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nowplaying::services::now_playing::{
//!     Coordinator, CommandStatus, Handler, MemoryPlatform, Platform, RemoteCommand,
//!     RemoteCommandHandlers, StaticNowPlayingInfo,
//! };
//!
//! # async fn run() -> Result<(), nowplaying::services::now_playing::NowPlayingError> {
//! let platform = MemoryPlatform::new();
//! let coordinator = Coordinator::new(Platform::from(&platform))?;
//!
//! let handlers = RemoteCommandHandlers::new()
//!     .with_handler(RemoteCommand::Play, Handler::action(|| CommandStatus::Success));
//! coordinator.setup_remote_commands(handlers).await?;
//!
//! coordinator
//!     .update_static_info(StaticNowPlayingInfo::new("Blue in Green", 337.0))
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Now-playing services.
pub mod services;

/// Tracing subscriber setup.
pub mod tracing_config;
