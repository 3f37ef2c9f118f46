use retouch_image::ImageError;
use retouch_io::IoError;

/// An error type for the edit session.
///
/// Every variant is recoverable: the session keeps its previous state.
#[derive(thiserror::Error, Debug)]
pub enum EditError {
    /// The operation needs a loaded image.
    #[error("No image loaded")]
    NoImageLoaded,

    /// The file could not be read or decoded.
    #[error("Failed to load the image. {0}")]
    LoadError(#[source] IoError),

    /// The image could not be encoded or written.
    #[error("Failed to save the image. {0}")]
    SaveError(#[source] IoError),

    /// The filter strength does not resolve to a usable kernel size.
    #[error("Invalid kernel size {0}")]
    InvalidKernelSize(usize),

    /// The resize would produce an image without pixels.
    #[error("Resize to {0}x{1} would produce an empty image")]
    DegenerateResize(usize, usize),

    /// A resize step factor that is not a positive finite number.
    #[error("Invalid resize step factor {0}")]
    InvalidStepFactor(f64),

    /// Any other image processing failure.
    #[error(transparent)]
    Image(ImageError),
}

impl From<ImageError> for EditError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::InvalidKernelSize(size) => EditError::InvalidKernelSize(size),
            ImageError::DegenerateResize(width, height) => {
                EditError::DegenerateResize(width, height)
            }
            other => EditError::Image(other),
        }
    }
}
