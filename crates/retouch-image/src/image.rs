use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use retouch_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// The arrangement of the samples of a single pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// One luminance sample per pixel.
    Gray,
    /// Three color samples per pixel in red, green, blue order.
    Rgb,
    /// Display order with an alpha sample appended.
    Rgba,
}

impl ChannelLayout {
    /// Number of samples stored per pixel.
    pub const fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

impl std::fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ChannelLayout::Gray => "gray",
            ChannelLayout::Rgb => "rgb",
            ChannelLayout::Rgba => "rgba",
        };
        f.write_str(name)
    }
}

/// Number of samples of an image, or an error when no buffer can hold them.
fn num_samples(size: ImageSize, layout: ChannelLayout) -> Result<usize, ImageError> {
    size.width
        .checked_mul(size.height)
        .and_then(|n| n.checked_mul(layout.num_channels()))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(ImageError::ImageTooLarge(size.width, size.height))
}

/// Represents an image with 8-bit pixel data.
///
/// The samples are stored densely in row-major order with shape (H, W, C),
/// where C is given by the [`ChannelLayout`] tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    size: ImageSize,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl Image {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `layout` - The channel layout of the pixel data.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If either dimension is zero, or the length of the pixel data does not match
    /// the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use retouch_image::{ChannelLayout, Image, ImageSize};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     ChannelLayout::Rgb,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, layout: ChannelLayout, data: Vec<u8>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSizedImage(size.width, size.height));
        }

        let expected = num_samples(size, layout)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, layout, data })
    }

    /// Create a new image with the given size filled with a single value.
    ///
    /// # Examples
    ///
    /// ```
    /// use retouch_image::{ChannelLayout, Image, ImageSize};
    ///
    /// let image = Image::from_size_val([4, 2].into(), ChannelLayout::Gray, 7).unwrap();
    ///
    /// assert_eq!(image.as_slice(), &[7u8; 8]);
    /// ```
    pub fn from_size_val(
        size: ImageSize,
        layout: ChannelLayout,
        val: u8,
    ) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSizedImage(size.width, size.height));
        }
        let data = vec![val; num_samples(size, layout)?];
        Image::new(size, layout, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the channel layout of the image.
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.layout.num_channels()
    }

    /// Number of samples in a single row.
    pub fn row_stride(&self) -> usize {
        self.size.width * self.num_channels()
    }

    /// Get the pixel data of the image.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the pixel data of the image mutably.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get a single sample, or `None` when the index is out of bounds.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `ch` - The channel index.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Option<&u8> {
        if x >= self.width() || y >= self.height() || ch >= self.num_channels() {
            return None;
        }
        self.data.get((y * self.width() + x) * self.num_channels() + ch)
    }

    /// Get the samples of row `y`.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        let stride = self.row_stride();
        self.data.get(y * stride..(y + 1) * stride)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelLayout, Image, ImageSize};
    use crate::ImageError;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.to_string(), "10x20");
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            ChannelLayout::Rgb,
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.row_stride(), 30);
        Ok(())
    }

    #[test]
    fn image_invalid_length() {
        let res = Image::new([2, 2].into(), ChannelLayout::Rgb, vec![0u8; 4]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(4, 12)));
    }

    #[test]
    fn image_zero_sized() {
        let res = Image::new([0, 3].into(), ChannelLayout::Gray, vec![]);
        assert_eq!(res, Err(ImageError::ZeroSizedImage(0, 3)));
    }

    #[test]
    fn image_get_and_row() -> Result<(), ImageError> {
        let image = Image::new([2, 2].into(), ChannelLayout::Gray, vec![1, 2, 3, 4])?;
        assert_eq!(image.get(1, 0, 0), Some(&2));
        assert_eq!(image.get(0, 1, 0), Some(&3));
        assert_eq!(image.get(2, 0, 0), None);
        assert_eq!(image.get(0, 0, 1), None);
        assert_eq!(image.row(1), Some(&[3u8, 4][..]));
        assert_eq!(image.row(2), None);
        Ok(())
    }

    #[test]
    fn image_too_large() {
        let huge = ImageSize {
            width: usize::MAX,
            height: 4,
        };
        assert_eq!(
            Image::from_size_val(huge, ChannelLayout::Rgb, 0),
            Err(ImageError::ImageTooLarge(usize::MAX, 4))
        );
        assert_eq!(
            Image::new(huge, ChannelLayout::Gray, vec![]),
            Err(ImageError::ImageTooLarge(usize::MAX, 4))
        );
    }

    #[test]
    fn layout_channels() {
        assert_eq!(ChannelLayout::Gray.num_channels(), 1);
        assert_eq!(ChannelLayout::Rgb.num_channels(), 3);
        assert_eq!(ChannelLayout::Rgba.num_channels(), 4);
    }
}
