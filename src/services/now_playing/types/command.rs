use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A hardware or control-center transport command the application can enable.
///
/// Variants with a payload carry the configuration pushed to the platform
/// when the command is enabled. Two commands with different configuration
/// are distinct keys even if they target the same platform slot.
#[derive(Debug, Clone)]
pub enum RemoteCommand {
    /// Start playback
    Play,
    /// Pause playback
    Pause,
    /// Stop playback
    Stop,
    /// Toggle between play and pause
    TogglePlayPause,
    /// Enable or disable a language option (subtitles, audio track)
    ChangeLanguageOption {
        /// Whether this targets the enable or the disable slot
        is_enabled: bool,
    },
    /// Change the playback rate
    ChangePlaybackRate {
        /// Rates offered to the user
        rates: Vec<f32>,
    },
    /// Change the repeat mode
    ChangeRepeatMode,
    /// Change the shuffle mode
    ChangeShuffleMode,
    /// Skip to the next track
    NextTrack,
    /// Skip to the previous track
    PreviousTrack,
    /// Skip forward by an interval
    SkipForward {
        /// Preferred skip intervals in seconds
        intervals: Vec<f32>,
    },
    /// Skip backward by an interval
    SkipBackward {
        /// Preferred skip intervals in seconds
        intervals: Vec<f32>,
    },
    /// Seek to an absolute position
    ChangePlaybackPosition,
    /// Rate the current item
    Rating {
        /// Lowest selectable rating
        min: f32,
        /// Highest selectable rating
        max: f32,
    },
    /// Like the current item
    Like {
        /// Whether the like is currently active
        is_active: bool,
        /// Title shown in the control center
        title: String,
    },
    /// Dislike the current item
    Dislike {
        /// Whether the dislike is currently active
        is_active: bool,
        /// Title shown in the control center
        title: String,
    },
    /// Bookmark the current item
    Bookmark {
        /// Whether the bookmark is currently active
        is_active: bool,
        /// Title shown in the control center
        title: String,
    },
}

impl RemoteCommand {
    /// The platform slot this command is registered on.
    ///
    /// Pure lookup; pushing the command's configuration happens in the
    /// registry's mapping step.
    pub fn platform_command(&self) -> PlatformCommand {
        match self {
            Self::Play => PlatformCommand::Play,
            Self::Pause => PlatformCommand::Pause,
            Self::Stop => PlatformCommand::Stop,
            Self::TogglePlayPause => PlatformCommand::TogglePlayPause,
            Self::ChangeLanguageOption { is_enabled: true } => {
                PlatformCommand::EnableLanguageOption
            }
            Self::ChangeLanguageOption { is_enabled: false } => {
                PlatformCommand::DisableLanguageOption
            }
            Self::ChangePlaybackRate { .. } => PlatformCommand::ChangePlaybackRate,
            Self::ChangeRepeatMode => PlatformCommand::ChangeRepeatMode,
            Self::ChangeShuffleMode => PlatformCommand::ChangeShuffleMode,
            Self::NextTrack => PlatformCommand::NextTrack,
            Self::PreviousTrack => PlatformCommand::PreviousTrack,
            Self::SkipForward { .. } => PlatformCommand::SkipForward,
            Self::SkipBackward { .. } => PlatformCommand::SkipBackward,
            Self::ChangePlaybackPosition => PlatformCommand::ChangePlaybackPosition,
            Self::Rating { .. } => PlatformCommand::Rating,
            Self::Like { .. } => PlatformCommand::Like,
            Self::Dislike { .. } => PlatformCommand::Dislike,
            Self::Bookmark { .. } => PlatformCommand::Bookmark,
        }
    }

    /// Configuration the platform slot needs, if the variant carries any
    pub fn configuration(&self) -> Option<CommandConfiguration> {
        match self {
            Self::ChangePlaybackRate { rates } => {
                Some(CommandConfiguration::SupportedPlaybackRates(rates.clone()))
            }
            Self::SkipForward { intervals } | Self::SkipBackward { intervals } => {
                Some(CommandConfiguration::PreferredIntervals(intervals.clone()))
            }
            Self::Rating { min, max } => Some(CommandConfiguration::RatingRange {
                min: *min,
                max: *max,
            }),
            Self::Like { is_active, title }
            | Self::Dislike { is_active, title }
            | Self::Bookmark { is_active, title } => Some(CommandConfiguration::Feedback {
                is_active: *is_active,
                localized_title: title.clone(),
            }),
            _ => None,
        }
    }
}

fn hash_floats<H: Hasher>(values: &[f32], state: &mut H) {
    values.len().hash(state);
    for value in values {
        value.to_bits().hash(state);
    }
}

fn floats_eq(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

impl PartialEq for RemoteCommand {
    fn eq(&self, other: &Self) -> bool {
        use RemoteCommand::*;

        match (self, other) {
            (ChangeLanguageOption { is_enabled: a }, ChangeLanguageOption { is_enabled: b }) => {
                a == b
            }
            (ChangePlaybackRate { rates: a }, ChangePlaybackRate { rates: b }) => floats_eq(a, b),
            (SkipForward { intervals: a }, SkipForward { intervals: b })
            | (SkipBackward { intervals: a }, SkipBackward { intervals: b }) => floats_eq(a, b),
            (Rating { min: a, max: b }, Rating { min: c, max: d }) => {
                a.to_bits() == c.to_bits() && b.to_bits() == d.to_bits()
            }
            (
                Like {
                    is_active: a,
                    title: b,
                },
                Like {
                    is_active: c,
                    title: d,
                },
            )
            | (
                Dislike {
                    is_active: a,
                    title: b,
                },
                Dislike {
                    is_active: c,
                    title: d,
                },
            )
            | (
                Bookmark {
                    is_active: a,
                    title: b,
                },
                Bookmark {
                    is_active: c,
                    title: d,
                },
            ) => a == c && b == d,
            _ => {
                self.configuration().is_none()
                    && other.configuration().is_none()
                    && self.platform_command() == other.platform_command()
            }
        }
    }
}

impl Eq for RemoteCommand {}

impl Hash for RemoteCommand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.platform_command().hash(state);
        match self {
            Self::ChangePlaybackRate { rates } => hash_floats(rates, state),
            Self::SkipForward { intervals } | Self::SkipBackward { intervals } => {
                hash_floats(intervals, state);
            }
            Self::Rating { min, max } => {
                min.to_bits().hash(state);
                max.to_bits().hash(state);
            }
            Self::Like { is_active, title }
            | Self::Dislike { is_active, title }
            | Self::Bookmark { is_active, title } => {
                is_active.hash(state);
                title.hash(state);
            }
            _ => {}
        }
    }
}

/// A command slot on the platform's shared command center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformCommand {
    /// Play slot
    Play,
    /// Pause slot
    Pause,
    /// Stop slot
    Stop,
    /// Toggle play/pause slot
    TogglePlayPause,
    /// Enable language option slot
    EnableLanguageOption,
    /// Disable language option slot
    DisableLanguageOption,
    /// Change playback rate slot
    ChangePlaybackRate,
    /// Change repeat mode slot
    ChangeRepeatMode,
    /// Change shuffle mode slot
    ChangeShuffleMode,
    /// Next track slot
    NextTrack,
    /// Previous track slot
    PreviousTrack,
    /// Skip forward slot
    SkipForward,
    /// Skip backward slot
    SkipBackward,
    /// Change playback position slot
    ChangePlaybackPosition,
    /// Rating slot
    Rating,
    /// Like slot
    Like,
    /// Dislike slot
    Dislike,
    /// Bookmark slot
    Bookmark,
}

impl PlatformCommand {
    /// Every slot on the command center
    pub const ALL: [PlatformCommand; 18] = [
        Self::Play,
        Self::Pause,
        Self::Stop,
        Self::TogglePlayPause,
        Self::EnableLanguageOption,
        Self::DisableLanguageOption,
        Self::ChangePlaybackRate,
        Self::ChangeRepeatMode,
        Self::ChangeShuffleMode,
        Self::NextTrack,
        Self::PreviousTrack,
        Self::SkipForward,
        Self::SkipBackward,
        Self::ChangePlaybackPosition,
        Self::Rating,
        Self::Like,
        Self::Dislike,
        Self::Bookmark,
    ];
}

/// Per-slot configuration pushed to the command center
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandConfiguration {
    /// Rates offered by the playback rate slot
    SupportedPlaybackRates(Vec<f32>),
    /// Intervals offered by a skip slot
    PreferredIntervals(Vec<f32>),
    /// Range offered by the rating slot
    RatingRange {
        /// Lowest rating
        min: f32,
        /// Highest rating
        max: f32,
    },
    /// State and label of a feedback slot
    Feedback {
        /// Whether the feedback is active
        is_active: bool,
        /// Label shown to the user
        localized_title: String,
    },
}

/// Result reported back to the platform for a handled command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandStatus {
    /// The command was handled
    Success,
    /// Nothing to act on for this command
    NoSuchContent,
    /// No item is currently playing
    NoActionableNowPlayingItem,
    /// The output device is unavailable
    DeviceNotFound,
    /// The handler failed
    CommandFailed,
}
