//! Now-playing and remote-control integration.
//!
//! Reports track metadata and transport state to the system media surface,
//! relays hardware remote commands to the application, and surfaces
//! audio-session interruptions. All platform access goes through
//! [`Coordinator`], which serializes it onto a single thread.

/// Artwork images and their content hashes
pub mod artwork;
pub mod coordinator;
mod error;
/// Mutable now-playing snapshot
pub mod metadata;
pub mod platform;
pub mod registry;
mod service;
mod session;
/// Command, event, info and session vocabulary
pub mod types;

pub use artwork::{Artwork, ArtworkHash};
pub use coordinator::{
    Coordinator, CoordinatorState, DEFAULT_HANDLER_TIMEOUT, EventSubscription,
    InterruptionEvents, RemoteCommandEvents,
};
pub use error::{HandlerError, NowPlayingError, SessionError};
pub use metadata::NowPlayingMetadata;
pub use platform::{MemoryPlatform, Platform};
pub use registry::{Handler, HandlerResult, RemoteCommandHandlers};
pub use service::{EventStream, LiveNowPlayingService, NoopNowPlayingService, NowPlayingService};
pub use types::*;
