use crate::image::ChannelLayout;

/// An error type for the image and image processing modules.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when an image is created with a zero width or height.
    #[error("Image dimensions must be positive, got {0}x{1}")]
    ZeroSizedImage(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the number of samples of an image overflows `usize`.
    #[error("Image of {0}x{1} pixels is too large to allocate")]
    ImageTooLarge(usize, usize),

    /// Error when source and destination layouts disagree.
    #[error("Channel layout mismatch: expected {0}, got {1}")]
    ChannelLayoutMismatch(ChannelLayout, ChannelLayout),

    /// Error when a kernel side length is zero or too large.
    #[error("Invalid kernel size {0}")]
    InvalidKernelSize(usize),

    /// Error when the kernel weights do not form a square of the given side.
    #[error("Kernel weights ({0}) do not match a {1}x{1} kernel")]
    InvalidKernelWeights(usize, usize),

    /// Error when a resize would produce an empty image.
    #[error("Resize target {0}x{1} has a non-positive dimension")]
    DegenerateResize(usize, usize),

    /// Error raised by the resampling backend.
    #[error("Resampling failed. {0}")]
    ResizeError(String),
}
