use std::path::PathBuf;

/// Failures while reading or writing image files.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// The path to read from does not exist.
    #[error("No such image file: {0}")]
    FileDoesNotExist(PathBuf),

    /// The extension of the destination does not name a known format.
    #[error("Unknown image format for {0}")]
    InvalidFileExtension(PathBuf),

    /// The file could not be opened or mapped.
    #[error("File access failed. {0}")]
    FileError(#[from] std::io::Error),

    /// The decoded pixels do not form a valid image.
    #[error("Decoded pixels are not a valid image. {0}")]
    ImageCreationError(#[from] retouch_image::ImageError),

    /// The contents could not be decoded.
    #[error("Could not decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// The encoder rejected the image.
    #[error("Could not encode the image. {0}")]
    ImageEncodeError(#[source] image::ImageError),
}
