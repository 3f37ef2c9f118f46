use std::path::Path;

use retouch_image::{ChannelLayout, Image, ImageSize};
use retouch_imgproc::{
    color,
    filter::{self, kernels, FilterKind},
    interpolation::InterpolationMode,
    padding::BorderMode,
    resize,
};
use retouch_io::functional as F;

use crate::error::EditError;

/// The image axis a resize step acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The horizontal axis.
    Width,
    /// The vertical axis.
    Height,
}

/// Whether a resize step grows or shrinks the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Grow by the configured factor.
    Increase,
    /// Shrink by the configured factor.
    Decrease,
}

/// An editing operation that replaces the current image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOp {
    /// Reduce the image to a single luminance channel.
    Grayscale,
    /// Convolve the image with the kernel of `kind`.
    Filter {
        /// The filter to apply.
        kind: FilterKind,
        /// The user strength, multiplied by 10 and truncated to get the kernel size.
        strength: f64,
    },
    /// Resize one axis by a single step.
    Resize {
        /// The axis to resize.
        axis: Axis,
        /// Grow or shrink.
        direction: Direction,
    },
}

/// The observable state of an [`EditSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No image has been loaded.
    Empty,
    /// A current image is held.
    Loaded,
}

/// Settings of an [`EditSession`].
///
/// # Example
///
/// ```
/// use retouch::SessionConfig;
/// use retouch::imgproc::padding::BorderMode;
///
/// let config = SessionConfig::default()
///     .with_viewport([800, 600].into())
///     .with_border(BorderMode::Reflect101);
///
/// assert_eq!(config.viewport.width, 800);
/// assert_eq!(config.grow_factor, 1.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Bound of the display buffer.
    pub viewport: ImageSize,
    /// Border policy of the convolution filters.
    pub border: BorderMode,
    /// Factor applied by an increase step.
    pub grow_factor: f64,
    /// Factor applied by a decrease step.
    pub shrink_factor: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport: ImageSize {
                width: 500,
                height: 500,
            },
            border: BorderMode::Replicate,
            grow_factor: 1.1,
            shrink_factor: 0.9,
        }
    }
}

impl SessionConfig {
    /// Set the bound of the display buffer.
    pub fn with_viewport(mut self, viewport: ImageSize) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the border policy of the convolution filters.
    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    /// Set the factors of the increase and decrease steps.
    ///
    /// Factors are checked when a step runs; a factor that is not positive and
    /// finite makes the step fail with [`EditError::InvalidStepFactor`].
    pub fn with_step_factors(mut self, grow_factor: f64, shrink_factor: f64) -> Self {
        self.grow_factor = grow_factor;
        self.shrink_factor = shrink_factor;
        self
    }
}

/// Length of an axis after one resize step, truncated toward zero.
fn step_len(len: usize, factor: f64) -> usize {
    (len as f64 * factor) as usize
}

/// A single-document editing session.
///
/// The session owns the working image. Every operation builds a new image and
/// swaps it in only on success, so a failed operation leaves the previous image
/// untouched. Callers only ever receive shared references or derived copies.
///
/// # Example
///
/// ```
/// use retouch::{EditError, EditSession};
/// use retouch::image::{ChannelLayout, Image};
///
/// let mut session = EditSession::new();
/// assert!(matches!(session.grayscale(), Err(EditError::NoImageLoaded)));
///
/// session.load_image(Image::from_size_val([100, 80].into(), ChannelLayout::Rgb, 0).unwrap());
/// let gray = session.grayscale().unwrap();
/// assert_eq!(gray.layout(), ChannelLayout::Gray);
/// ```
#[derive(Debug, Default)]
pub struct EditSession {
    config: SessionConfig,
    current: Option<Image>,
}

impl EditSession {
    /// Create an empty session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// The configuration of the session.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The current state of the session.
    pub fn state(&self) -> SessionState {
        match self.current {
            Some(_) => SessionState::Loaded,
            None => SessionState::Empty,
        }
    }

    /// The current image, if any.
    pub fn current(&self) -> Option<&Image> {
        self.current.as_ref()
    }

    fn image(&self) -> Result<&Image, EditError> {
        self.current.as_ref().ok_or(EditError::NoImageLoaded)
    }

    fn replace(&mut self, image: Image) -> &Image {
        log::debug!(
            "current image replaced: {} {}",
            image.size(),
            image.layout()
        );
        self.current.insert(image)
    }

    /// Decode an image file and make it the current image.
    ///
    /// On failure the session keeps its previous state.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&Image, EditError> {
        let path = path.as_ref();
        let image = F::read_image_any_rgb8(path).map_err(EditError::LoadError)?;
        log::debug!("loaded {}", path.display());
        Ok(self.replace(image))
    }

    /// Make an already decoded image the current image.
    pub fn load_image(&mut self, image: Image) -> &Image {
        self.replace(image)
    }

    /// Drop the current image and go back to the empty state.
    pub fn close(&mut self) {
        self.current = None;
    }

    /// Apply an editing operation to the current image.
    pub fn apply(&mut self, op: EditOp) -> Result<&Image, EditError> {
        match op {
            EditOp::Grayscale => self.grayscale(),
            EditOp::Filter { kind, strength } => self.apply_filter(kind, strength),
            EditOp::Resize { axis, direction } => self.resize_step(axis, direction),
        }
    }

    /// Replace the current image with its grayscale version.
    ///
    /// Applying it to an image that is already grayscale leaves the pixels as they are.
    pub fn grayscale(&mut self) -> Result<&Image, EditError> {
        let src = self.image()?;

        let mut gray = Image::from_size_val(src.size(), ChannelLayout::Gray, 0)?;
        color::gray_from_rgb(src, &mut gray)?;

        Ok(self.replace(gray))
    }

    /// Replace the current image with its convolution by the kernel of `kind`.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidKernelSize`] when `strength * 10` truncates to zero.
    pub fn apply_filter(&mut self, kind: FilterKind, strength: f64) -> Result<&Image, EditError> {
        let src = self.image()?;
        let kernel = kernels::kernel_for(kind, strength)?;

        log::debug!(
            "applying {} with a {}x{} kernel",
            kind,
            kernel.size(),
            kernel.size()
        );

        let mut dst = Image::from_size_val(src.size(), src.layout(), 0)?;
        filter::filter2d(src, &mut dst, &kernel, self.config.border)?;

        Ok(self.replace(dst))
    }

    /// Resize one axis of the current image by a single step with linear interpolation.
    ///
    /// The new length is the old one times the configured factor, truncated; the
    /// other axis keeps its length.
    ///
    /// # Errors
    ///
    /// [`EditError::DegenerateResize`] when the new length would be zero,
    /// [`EditError::InvalidStepFactor`] when the configured factor is not positive
    /// and finite, and [`EditError::Image`] when the new size cannot be allocated.
    pub fn resize_step(&mut self, axis: Axis, direction: Direction) -> Result<&Image, EditError> {
        let src = self.image()?;

        let factor = match direction {
            Direction::Increase => self.config.grow_factor,
            Direction::Decrease => self.config.shrink_factor,
        };
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EditError::InvalidStepFactor(factor));
        }

        let size = src.size();
        let new_size = match axis {
            Axis::Width => ImageSize {
                width: step_len(size.width, factor),
                ..size
            },
            Axis::Height => ImageSize {
                height: step_len(size.height, factor),
                ..size
            },
        };

        let dst = resize::resize(src, new_size, InterpolationMode::Bilinear)?;

        Ok(self.replace(dst))
    }

    /// Grow the height of the current image by one step.
    pub fn increase_height(&mut self) -> Result<&Image, EditError> {
        self.resize_step(Axis::Height, Direction::Increase)
    }

    /// Shrink the height of the current image by one step.
    pub fn decrease_height(&mut self) -> Result<&Image, EditError> {
        self.resize_step(Axis::Height, Direction::Decrease)
    }

    /// Grow the width of the current image by one step.
    pub fn increase_width(&mut self) -> Result<&Image, EditError> {
        self.resize_step(Axis::Width, Direction::Increase)
    }

    /// Shrink the width of the current image by one step.
    pub fn decrease_width(&mut self) -> Result<&Image, EditError> {
        self.resize_step(Axis::Width, Direction::Decrease)
    }

    /// Encode the current image to `path`, the extension selecting the format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditError> {
        let path = path.as_ref();
        let image = self.image()?;

        F::write_image_any(path, image).map_err(EditError::SaveError)?;
        log::debug!("saved {} to {}", image.size(), path.display());

        Ok(())
    }

    /// Render the current image for display inside `max_size`.
    ///
    /// The image is shrunk with a box filter when it exceeds the bound, then
    /// converted to RGBA with an opaque alpha channel. The current image is not
    /// modified.
    pub fn current_display_buffer(&self, max_size: ImageSize) -> Result<Image, EditError> {
        let src = self.image()?;

        let fitted = resize::resize_to_fit(src, max_size)?;
        let mut rgba = Image::from_size_val(fitted.size(), ChannelLayout::Rgba, 0)?;
        color::rgba_from_image(&fitted, &mut rgba)?;

        Ok(rgba)
    }

    /// Render the current image for display inside the configured viewport.
    pub fn display_buffer(&self) -> Result<Image, EditError> {
        self.current_display_buffer(self.config.viewport)
    }
}
