//! Background images, one per hour of the day.
//!
//! All 24 images are loaded up front by [`HourlyImages::preload`]; a frame
//! is never rendered against a partially loaded set.

use std::path::PathBuf;

use tracing::{debug, info};

/// Number of hourly images, one for each hour `0..=23`.
pub const HOURS_PER_DAY: u8 = 24;

/// Errors that can occur while loading background images.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The image file could not be read or decoded.
    #[error("failed to load image for hour {hour} from {}: {message}", path.display())]
    Load {
        /// Hour the image belongs to.
        hour: u8,
        /// File the provider tried.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// The provider was asked for an hour outside `0..=23`.
    #[error("no image slot for hour {hour}")]
    HourOutOfRange {
        /// The requested hour.
        hour: u8,
    },
}

/// Loader for the per-hour background images.
pub trait ImageProvider {
    /// Decoded image type.
    type Image;

    /// Load the image shown during `hour`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] if the image cannot be produced.
    fn load_image(&self, hour: u8) -> Result<Self::Image, ImageError>;
}

/// The complete set of 24 hourly images.
#[derive(Debug, Clone)]
pub struct HourlyImages<I> {
    images: Vec<I>,
}

impl<I> HourlyImages<I> {
    /// Load every hour's image from `provider`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ImageError`] encountered.
    pub fn preload<P>(provider: &P) -> Result<Self, ImageError>
    where
        P: ImageProvider<Image = I> + ?Sized,
    {
        let mut images = Vec::with_capacity(usize::from(HOURS_PER_DAY));
        for hour in 0..HOURS_PER_DAY {
            images.push(provider.load_image(hour)?);
            debug!(hour, "hourly image loaded");
        }
        info!(count = images.len(), "hourly images preloaded");
        Ok(Self { images })
    }

    /// Image for `hour`, or `None` if `hour` is not in `0..=23`.
    pub fn get(&self, hour: u8) -> Option<&I> {
        self.images.get(usize::from(hour))
    }

    /// Number of loaded images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no images are loaded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Provider that names each image after its hour.
    struct LabelProvider;

    impl ImageProvider for LabelProvider {
        type Image = String;

        fn load_image(&self, hour: u8) -> Result<String, ImageError> {
            Ok(format!("{hour}.png"))
        }
    }

    /// Provider with a missing file for one hour.
    struct GapProvider {
        missing: u8,
    }

    impl ImageProvider for GapProvider {
        type Image = u8;

        fn load_image(&self, hour: u8) -> Result<u8, ImageError> {
            if hour == self.missing {
                return Err(ImageError::Load {
                    hour,
                    path: PathBuf::from(format!("{hour}.png")),
                    message: "not found".to_owned(),
                });
            }
            Ok(hour)
        }
    }

    #[test]
    fn preload_fills_every_hour() {
        let images = HourlyImages::preload(&LabelProvider).unwrap();
        assert_eq!(images.len(), 24);
        assert_eq!(images.get(0).unwrap(), "0.png");
        assert_eq!(images.get(23).unwrap(), "23.png");
        assert!(images.get(24).is_none());
    }

    #[test]
    fn preload_stops_at_first_failure() {
        let err = HourlyImages::preload(&GapProvider { missing: 13 }).unwrap_err();
        assert!(matches!(err, ImageError::Load { hour: 13, .. }));
    }
}
