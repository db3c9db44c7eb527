use tracing::debug;

use super::{
    NowPlayingError,
    artwork::{Artwork, ArtworkHash, compute_artwork_hash},
    types::{DynamicNowPlayingInfo, MediaType, NowPlayingInfo, StaticNowPlayingInfo},
};

const UNKNOWN: &str = "Unknown";

fn is_negative_or_nan(value: f64) -> bool {
    value.is_nan() || value < 0.0
}

/// Mutable now-playing snapshot owned by the coordinator.
///
/// Artwork and its hash only change together, and only when the incoming
/// artwork hashes differently from the cached one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NowPlayingMetadata {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    artwork: Option<Artwork>,
    artwork_hash: Option<ArtworkHash>,
    duration: f64,
    elapsed_time: f64,
    playback_rate: f32,
    media_type: MediaType,
}

impl NowPlayingMetadata {
    /// Apply track metadata.
    ///
    /// # Errors
    /// Returns `NowPlayingError::InvalidDuration` for a negative or NaN
    /// duration, leaving the snapshot untouched.
    pub fn apply_static(&mut self, info: &StaticNowPlayingInfo) -> Result<(), NowPlayingError> {
        if is_negative_or_nan(info.duration) {
            return Err(NowPlayingError::InvalidDuration);
        }

        let new_hash = compute_artwork_hash(info.artwork.as_ref());

        self.title = info.title.clone();
        self.artist = info.artist.clone();
        self.album = info.album.clone();
        self.duration = info.duration;
        self.media_type = info.media_type;

        if new_hash != self.artwork_hash {
            debug!(hash = ?new_hash, "Artwork changed");
            self.artwork = info.artwork.clone();
            self.artwork_hash = new_hash;
        }

        Ok(())
    }

    /// Apply playback progress.
    ///
    /// # Errors
    /// Returns `NowPlayingError::InvalidPlaybackState` for a negative or NaN
    /// elapsed time or rate, leaving the snapshot untouched.
    pub fn apply_dynamic(&mut self, info: &DynamicNowPlayingInfo) -> Result<(), NowPlayingError> {
        if is_negative_or_nan(info.elapsed_time)
            || is_negative_or_nan(f64::from(info.playback_rate))
        {
            return Err(NowPlayingError::InvalidPlaybackState);
        }

        self.elapsed_time = info.elapsed_time;
        self.playback_rate = info.playback_rate;

        Ok(())
    }

    /// Render the snapshot into the platform's now-playing dictionary
    pub fn to_published_form(&self) -> NowPlayingInfo {
        NowPlayingInfo {
            title: self.title.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            artist: self.artist.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            album_title: self.album.clone().unwrap_or_default(),
            playback_duration: self.duration,
            elapsed_playback_time: self.elapsed_time,
            playback_rate: self.playback_rate,
            media_type: self.media_type.raw_value(),
            artwork_bounds: self.artwork.as_ref().map(Artwork::bounds),
            artwork: self.artwork.clone(),
        }
    }

    /// Hash of the cached artwork
    pub fn artwork_hash(&self) -> Option<ArtworkHash> {
        self.artwork_hash
    }

    /// Return to the empty state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use image::{DynamicImage, Rgb, RgbImage};

    use super::*;

    fn artwork(color: [u8; 3]) -> Artwork {
        Artwork::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            16,
            16,
            Rgb(color),
        )))
    }

    #[test]
    fn negative_duration_leaves_snapshot_unchanged() {
        let mut metadata = NowPlayingMetadata::default();
        metadata
            .apply_static(&StaticNowPlayingInfo::new("First", 120.0))
            .unwrap();
        let before = metadata.clone();

        let result = metadata.apply_static(&StaticNowPlayingInfo::new("Second", -1.0));

        assert_eq!(result, Err(NowPlayingError::InvalidDuration));
        assert_eq!(metadata, before);
    }

    #[test]
    fn nan_duration_is_rejected() {
        let mut metadata = NowPlayingMetadata::default();

        let result = metadata.apply_static(&StaticNowPlayingInfo::new("Track", f64::NAN));

        assert_eq!(result, Err(NowPlayingError::InvalidDuration));
    }

    #[test]
    fn negative_progress_leaves_snapshot_unchanged() {
        let mut metadata = NowPlayingMetadata::default();
        metadata
            .apply_dynamic(&DynamicNowPlayingInfo::new(10.0, 1.0))
            .unwrap();
        let before = metadata.clone();

        assert_eq!(
            metadata.apply_dynamic(&DynamicNowPlayingInfo::new(-0.5, 1.0)),
            Err(NowPlayingError::InvalidPlaybackState)
        );
        assert_eq!(
            metadata.apply_dynamic(&DynamicNowPlayingInfo::new(3.0, -1.0)),
            Err(NowPlayingError::InvalidPlaybackState)
        );
        assert_eq!(metadata, before);
    }

    #[test]
    fn same_artwork_keeps_cached_hash() {
        let mut metadata = NowPlayingMetadata::default();
        let info = StaticNowPlayingInfo::new("Track", 60.0).with_artwork(artwork([9, 9, 9]));

        metadata.apply_static(&info).unwrap();
        let first_hash = metadata.artwork_hash();
        metadata.apply_static(&info).unwrap();

        assert!(first_hash.is_some());
        assert_eq!(metadata.artwork_hash(), first_hash);
    }

    #[test]
    fn new_artwork_replaces_cached_artwork() {
        let mut metadata = NowPlayingMetadata::default();
        let green = artwork([0, 255, 0]);
        let white = artwork([255, 255, 255]);

        metadata
            .apply_static(&StaticNowPlayingInfo::new("A", 60.0).with_artwork(green))
            .unwrap();
        let first_hash = metadata.artwork_hash();
        metadata
            .apply_static(&StaticNowPlayingInfo::new("B", 60.0).with_artwork(white.clone()))
            .unwrap();

        assert_ne!(metadata.artwork_hash(), first_hash);
        assert_eq!(metadata.to_published_form().artwork, Some(white));
    }

    #[test]
    fn dropping_artwork_clears_it() {
        let mut metadata = NowPlayingMetadata::default();
        metadata
            .apply_static(&StaticNowPlayingInfo::new("A", 1.0).with_artwork(artwork([1, 1, 1])))
            .unwrap();

        metadata
            .apply_static(&StaticNowPlayingInfo::new("B", 1.0))
            .unwrap();

        assert_eq!(metadata.artwork_hash(), None);
        assert_eq!(metadata.to_published_form().artwork_bounds, None);
    }

    #[test]
    fn published_form_fills_defaults() {
        let mut metadata = NowPlayingMetadata::default();
        metadata
            .apply_static(
                &StaticNowPlayingInfo::new("Song", 200.0)
                    .with_artist("Band")
                    .with_artwork(artwork([5, 5, 5])),
            )
            .unwrap();
        metadata
            .apply_dynamic(&DynamicNowPlayingInfo::new(12.0, 1.0))
            .unwrap();

        metadata.reset();
        let published = metadata.to_published_form();

        assert_eq!(published.title, "Unknown");
        assert_eq!(published.artist, "Unknown");
        assert_eq!(published.album_title, "");
        assert_eq!(published.playback_duration, 0.0);
        assert_eq!(published.elapsed_playback_time, 0.0);
        assert_eq!(published.playback_rate, 0.0);
        assert_eq!(published.media_type, MediaType::Audio.raw_value());
        assert!(published.artwork.is_none());
        assert!(published.artwork_bounds.is_none());
    }

    #[test]
    fn published_form_serializes_without_artwork_key() {
        let json = serde_json::to_value(NowPlayingMetadata::default().to_published_form()).unwrap();

        assert!(json.get("artwork_bounds").is_none());
        assert!(json.get("artwork").is_none());
        assert_eq!(json["title"], "Unknown");
    }
}
