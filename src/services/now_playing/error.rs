/// Errors that can occur during now-playing operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NowPlayingError {
    /// Static info carried a negative or non-finite duration
    #[error("Track duration must be a non-negative number of seconds")]
    InvalidDuration,

    /// Dynamic info carried a negative elapsed time or playback rate
    #[error("Elapsed time and playback rate must be non-negative")]
    InvalidPlaybackState,

    /// The audio session could not be (re)activated before publishing
    #[error("Audio session is inactive")]
    AudioSessionInactive,

    /// The platform rejected an audio session configuration
    #[error("Audio session operation failed: {0}")]
    Session(#[from] SessionError),

    /// The UI-affinity context has shut down
    #[error("Main context is no longer running")]
    MainContextUnavailable,

    /// The asynchronous handler worker could not be started
    #[error("Asynchronous command handler runtime could not be started")]
    RuntimeUnavailable,
}

/// Errors reported by the platform audio session
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Category, mode or options were rejected
    #[error("Category rejected: {0}")]
    CategoryRejected(String),

    /// The session could not be activated
    #[error("Activation failed: {0}")]
    ActivationFailed(String),

    /// The session could not be deactivated
    #[error("Deactivation failed: {0}")]
    DeactivationFailed(String),
}

/// Error returned by asynchronous command handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
