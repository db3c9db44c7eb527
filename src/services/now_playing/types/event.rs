use bitflags::bitflags;
use serde::Serialize;

use super::{PlatformCommand, RemoteCommand};

/// A remote command received from the hardware, with its resolved payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RemoteCommandEvent {
    /// Play requested
    Play,
    /// Pause requested
    Pause,
    /// Stop requested
    Stop,
    /// Play/pause toggle requested
    TogglePlayPause,
    /// Language option change requested
    ChangeLanguageOption,
    /// Playback rate change requested
    ChangePlaybackRate {
        /// Requested rate
        rate: f32,
    },
    /// Repeat mode change requested
    ChangeRepeatMode {
        /// Platform repeat type code
        repeat_type: i64,
    },
    /// Shuffle mode change requested
    ChangeShuffleMode {
        /// Platform shuffle type code
        shuffle_type: i64,
    },
    /// Next track requested
    NextTrack,
    /// Previous track requested
    PreviousTrack,
    /// Skip forward requested
    SkipForward {
        /// Interval in seconds
        interval: f64,
    },
    /// Skip backward requested
    SkipBackward {
        /// Interval in seconds
        interval: f64,
    },
    /// Seek requested
    ChangePlaybackPosition {
        /// Target position in seconds
        position: f64,
    },
    /// Rating submitted
    Rating {
        /// Submitted rating
        value: f32,
    },
    /// Like toggled
    Like {
        /// True when the like is being removed
        is_negative: bool,
    },
    /// Dislike toggled
    Dislike {
        /// True when the dislike is being removed
        is_negative: bool,
    },
    /// Bookmark toggled
    Bookmark {
        /// True when the bookmark is being removed
        is_negative: bool,
    },
}

impl RemoteCommandEvent {
    /// Translate a raw hardware event received on `command`'s slot.
    ///
    /// Returns `None` when the payload doesn't fit the command, which happens
    /// when the hardware delivers something the current configuration
    /// doesn't expect.
    pub fn project(command: &RemoteCommand, raw: &RawCommandEvent) -> Option<Self> {
        use CommandPayload as P;

        let event = match (command, &raw.payload) {
            (RemoteCommand::Play, _) => Self::Play,
            (RemoteCommand::Pause, _) => Self::Pause,
            (RemoteCommand::Stop, _) => Self::Stop,
            (RemoteCommand::TogglePlayPause, _) => Self::TogglePlayPause,
            (RemoteCommand::NextTrack, _) => Self::NextTrack,
            (RemoteCommand::PreviousTrack, _) => Self::PreviousTrack,
            (RemoteCommand::ChangeLanguageOption { .. }, _) => Self::ChangeLanguageOption,
            (RemoteCommand::ChangePlaybackRate { .. }, P::PlaybackRate(rate)) => {
                Self::ChangePlaybackRate { rate: *rate }
            }
            (RemoteCommand::ChangeRepeatMode, P::RepeatMode(repeat_type)) => {
                Self::ChangeRepeatMode {
                    repeat_type: *repeat_type,
                }
            }
            (RemoteCommand::ChangeShuffleMode, P::ShuffleMode(shuffle_type)) => {
                Self::ChangeShuffleMode {
                    shuffle_type: *shuffle_type,
                }
            }
            (RemoteCommand::SkipForward { .. }, P::SkipInterval(interval)) => Self::SkipForward {
                interval: *interval,
            },
            (RemoteCommand::SkipBackward { .. }, P::SkipInterval(interval)) => {
                Self::SkipBackward {
                    interval: *interval,
                }
            }
            (RemoteCommand::ChangePlaybackPosition, P::PlaybackPosition(position)) => {
                Self::ChangePlaybackPosition {
                    position: *position,
                }
            }
            (RemoteCommand::Rating { .. }, P::Rating(value)) => Self::Rating { value: *value },
            (RemoteCommand::Like { .. }, P::Feedback { is_negative }) => Self::Like {
                is_negative: *is_negative,
            },
            (RemoteCommand::Dislike { .. }, P::Feedback { is_negative }) => Self::Dislike {
                is_negative: *is_negative,
            },
            (RemoteCommand::Bookmark { .. }, P::Feedback { is_negative }) => Self::Bookmark {
                is_negative: *is_negative,
            },
            _ => return None,
        };

        Some(event)
    }
}

/// Payload shape of a raw hardware event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandPayload {
    /// No payload
    None,
    /// Feedback toggle
    Feedback {
        /// True when the feedback is being removed
        is_negative: bool,
    },
    /// Repeat type code
    RepeatMode(i64),
    /// Shuffle type code
    ShuffleMode(i64),
    /// Requested playback rate
    PlaybackRate(f32),
    /// Submitted rating
    Rating(f32),
    /// Seek target in seconds
    PlaybackPosition(f64),
    /// Skip interval in seconds
    SkipInterval(f64),
}

/// An event as delivered by the platform's command center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCommandEvent {
    /// Slot the event was delivered on
    pub command: PlatformCommand,
    /// Event payload
    pub payload: CommandPayload,
}

impl RawCommandEvent {
    /// An event without payload
    pub fn plain(command: PlatformCommand) -> Self {
        Self {
            command,
            payload: CommandPayload::None,
        }
    }

    /// An event with payload
    pub fn new(command: PlatformCommand, payload: CommandPayload) -> Self {
        Self { command, payload }
    }
}

/// Audio-session interruption transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InterruptionEvent {
    /// Another process took audio focus
    Began,
    /// The interruption is over
    Ended {
        /// Whether playback may resume on its own
        should_resume: bool,
    },
}

impl InterruptionEvent {
    /// Parse a raw interruption notification.
    ///
    /// Notifications without a recognised type code yield `None`.
    pub fn from_notification(notification: &InterruptionNotification) -> Option<Self> {
        match notification.type_code? {
            InterruptionNotification::TYPE_BEGAN => Some(Self::Began),
            InterruptionNotification::TYPE_ENDED => {
                let should_resume = notification
                    .option_bits
                    .map(|bits| {
                        InterruptionOptions::from_bits_truncate(bits)
                            .contains(InterruptionOptions::SHOULD_RESUME)
                    })
                    .unwrap_or(false);
                Some(Self::Ended { should_resume })
            }
            _ => None,
        }
    }
}

bitflags! {
    /// Option bits attached to an interruption-ended notification
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InterruptionOptions: u64 {
        /// Playback may resume
        const SHOULD_RESUME = 1;
    }
}

/// Interruption notification as posted by the platform.
///
/// Both entries are optional because the platform does not guarantee the
/// payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterruptionNotification {
    /// Interruption type code
    pub type_code: Option<u64>,
    /// Interruption option bits
    pub option_bits: Option<u64>,
}

impl InterruptionNotification {
    /// Type code for an interruption that began
    pub const TYPE_BEGAN: u64 = 1;
    /// Type code for an interruption that ended
    pub const TYPE_ENDED: u64 = 0;

    /// A "began" notification
    pub fn began() -> Self {
        Self {
            type_code: Some(Self::TYPE_BEGAN),
            option_bits: None,
        }
    }

    /// An "ended" notification with the given options
    pub fn ended(options: InterruptionOptions) -> Self {
        Self {
            type_code: Some(Self::TYPE_ENDED),
            option_bits: Some(options.bits()),
        }
    }
}
