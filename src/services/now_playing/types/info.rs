use serde::Serialize;

use crate::services::now_playing::artwork::Artwork;

/// Kind of media being reported to the now-playing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Audio-only content
    #[default]
    Audio,

    /// Video content
    Video,
}

impl MediaType {
    /// Raw value used by the platform's now-playing dictionary
    pub fn raw_value(self) -> u32 {
        match self {
            Self::Audio => 1,
            Self::Video => 2,
        }
    }
}

/// Track metadata that changes only when the track changes.
///
/// Produced by the application on every metadata change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticNowPlayingInfo {
    /// Track title
    pub title: Option<String>,
    /// Track artist
    pub artist: Option<String>,
    /// Album title
    pub album: Option<String>,
    /// Cover image
    pub artwork: Option<Artwork>,
    /// Track duration in seconds
    pub duration: f64,
    /// Audio or video
    pub media_type: MediaType,
}

impl StaticNowPlayingInfo {
    /// Info with a title and duration, everything else left empty
    pub fn new(title: impl Into<String>, duration: f64) -> Self {
        Self {
            title: Some(title.into()),
            duration,
            ..Self::default()
        }
    }

    /// Set the artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the album title
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the cover image
    pub fn with_artwork(mut self, artwork: Artwork) -> Self {
        self.artwork = Some(artwork);
        self
    }

    /// Set the media type
    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }
}

/// Playback progress, reported frequently (e.g. every second).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DynamicNowPlayingInfo {
    /// Elapsed playback time in seconds
    pub elapsed_time: f64,
    /// Playback rate, 0 when paused
    pub playback_rate: f32,
}

impl DynamicNowPlayingInfo {
    /// Create progress info
    pub fn new(elapsed_time: f64, playback_rate: f32) -> Self {
        Self {
            elapsed_time,
            playback_rate,
        }
    }
}

/// Bounds of published artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtworkBounds {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// The now-playing dictionary handed to the platform's info center.
///
/// Absent text fields are already resolved to their display defaults.
/// The artwork entry is omitted entirely when no artwork is cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlayingInfo {
    /// Track title, "Unknown" when absent
    pub title: String,
    /// Track artist, "Unknown" when absent
    pub artist: String,
    /// Album title, empty when absent
    pub album_title: String,
    /// Track duration in seconds
    pub playback_duration: f64,
    /// Elapsed playback time in seconds
    pub elapsed_playback_time: f64,
    /// Playback rate
    pub playback_rate: f32,
    /// Raw media type value
    pub media_type: u32,
    /// Artwork bounds, present only when artwork is published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork_bounds: Option<ArtworkBounds>,
    /// Artwork image
    #[serde(skip)]
    pub artwork: Option<Artwork>,
}
