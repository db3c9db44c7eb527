use std::{fmt, io::Cursor, sync::Arc};

use image::{DynamicImage, ImageResult, codecs::jpeg::JpegEncoder, imageops::FilterType};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::types::ArtworkBounds;

/// Edge length of the thumbnail that gets hashed
const HASH_THUMBNAIL_SIZE: u32 = 100;

/// JPEG quality of the hashed thumbnail (0.8 on a 0..1 scale)
const HASH_JPEG_QUALITY: u8 = 80;

/// Cover image shown on the now-playing surface.
///
/// Cheap to clone. Two artworks are equal when their dimensions and pixel
/// data are equal.
#[derive(Clone)]
pub struct Artwork {
    image: Arc<DynamicImage>,
}

impl Artwork {
    /// Wrap a decoded image
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Decode an encoded image (PNG or JPEG)
    ///
    /// # Errors
    /// Returns error if the bytes are not a supported image
    pub fn from_bytes(bytes: &[u8]) -> ImageResult<Self> {
        image::load_from_memory(bytes).map(Self::new)
    }

    /// The decoded image
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Image bounds in pixels
    pub fn bounds(&self) -> ArtworkBounds {
        ArtworkBounds {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Content hash used to detect artwork changes.
    ///
    /// Not a security hash. Returns `None` when re-encoding fails.
    pub fn content_hash(&self) -> Option<ArtworkHash> {
        let thumbnail = self
            .image
            .resize_exact(HASH_THUMBNAIL_SIZE, HASH_THUMBNAIL_SIZE, FilterType::Triangle)
            .to_rgb8();

        let mut encoded = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut encoded, HASH_JPEG_QUALITY);
        if let Err(e) = thumbnail.write_with_encoder(encoder) {
            debug!(error = %e, "Artwork re-encoding failed, skipping hash");
            return None;
        }

        let digest = Sha256::digest(encoded.get_ref());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Some(ArtworkHash(bytes))
    }
}

impl PartialEq for Artwork {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
            || (self.image.width() == other.image.width()
                && self.image.height() == other.image.height()
                && self.image.color() == other.image.color()
                && self.image.as_bytes() == other.image.as_bytes())
    }
}

impl fmt::Debug for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artwork")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

impl From<DynamicImage> for Artwork {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

/// Optional-artwork hash, `None` when there is no artwork or hashing failed
pub fn compute_artwork_hash(artwork: Option<&Artwork>) -> Option<ArtworkHash> {
    artwork.and_then(Artwork::content_hash)
}

/// SHA-256 digest of an artwork thumbnail
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtworkHash([u8; 32]);

impl ArtworkHash {
    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ArtworkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ArtworkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArtworkHash({self})")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> Artwork {
        Artwork::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb(color),
        )))
    }

    #[test]
    fn same_pixels_hash_identically() {
        let first = solid(32, 32, [200, 10, 10]);
        let second = solid(32, 32, [200, 10, 10]);

        assert_eq!(first, second);
        assert_eq!(first.content_hash(), second.content_hash());
        assert!(first.content_hash().is_some());
    }

    #[test]
    fn different_pixels_hash_differently() {
        let red = solid(32, 32, [200, 10, 10]);
        let blue = solid(32, 32, [10, 10, 200]);

        assert_ne!(red.content_hash(), blue.content_hash());
    }

    #[test]
    fn images_with_alpha_are_hashable() {
        let artwork = Artwork::new(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            8,
            Rgba([0, 128, 255, 100]),
        )));

        assert!(artwork.content_hash().is_some());
    }

    #[test]
    fn missing_artwork_has_no_hash() {
        assert_eq!(compute_artwork_hash(None), None);
    }

    #[test]
    fn hash_displays_as_hex() {
        let hash = solid(4, 4, [1, 2, 3]).content_hash().unwrap();

        assert_eq!(hash.to_string().len(), 64);
    }

    #[test]
    fn bounds_report_original_size() {
        let artwork = solid(640, 480, [0, 0, 0]);

        assert_eq!(
            artwork.bounds(),
            ArtworkBounds {
                width: 640,
                height: 480
            }
        );
    }
}
