use super::gray::rgb_from_gray;
use crate::parallel;
use retouch_image::{ChannelLayout, Image, ImageError};

fn rgba_from_rgb(src: &Image, dst: &mut Image) {
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[..3].copy_from_slice(src_pixel);
        dst_pixel[3] = u8::MAX;
    });
}

/// Convert an image to display order with an opaque alpha channel.
///
/// A grayscale source is first broadcast to RGB with [`rgb_from_gray`]; then 255
/// is appended as alpha. An RGBA source is copied as is.
///
/// # Arguments
///
/// * `src` - The input image of any layout.
/// * `dst` - The output RGBA image.
///
/// Precondition: the output image must have 4 channels.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use retouch_image::{ChannelLayout, Image};
/// use retouch_imgproc::color::rgba_from_image;
///
/// let gray = Image::new([2, 1].into(), ChannelLayout::Gray, vec![10, 20]).unwrap();
/// let mut rgba = Image::from_size_val(gray.size(), ChannelLayout::Rgba, 0).unwrap();
///
/// rgba_from_image(&gray, &mut rgba).unwrap();
/// assert_eq!(rgba.as_slice(), &[10, 10, 10, 255, 20, 20, 20, 255]);
/// ```
pub fn rgba_from_image(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if dst.layout() != ChannelLayout::Rgba {
        return Err(ImageError::ChannelLayoutMismatch(
            ChannelLayout::Rgba,
            dst.layout(),
        ));
    }

    match src.layout() {
        ChannelLayout::Gray => {
            let mut rgb = Image::from_size_val(src.size(), ChannelLayout::Rgb, 0)?;
            rgb_from_gray(src, &mut rgb)?;
            rgba_from_rgb(&rgb, dst);
        }
        ChannelLayout::Rgb => rgba_from_rgb(src, dst),
        ChannelLayout::Rgba => dst.as_slice_mut().copy_from_slice(src.as_slice()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use retouch_image::{ChannelLayout, Image, ImageError};

    #[test]
    fn rgba_from_rgb() -> Result<(), ImageError> {
        let image = Image::new([2, 1].into(), ChannelLayout::Rgb, vec![1, 2, 3, 4, 5, 6])?;
        let mut rgba = Image::from_size_val(image.size(), ChannelLayout::Rgba, 0)?;

        super::rgba_from_image(&image, &mut rgba)?;

        assert_eq!(rgba.as_slice(), &[1, 2, 3, 255, 4, 5, 6, 255]);
        Ok(())
    }

    #[test]
    fn rgba_from_gray() -> Result<(), ImageError> {
        let image = Image::new([1, 2].into(), ChannelLayout::Gray, vec![9, 8])?;
        let mut rgba = Image::from_size_val(image.size(), ChannelLayout::Rgba, 0)?;

        super::rgba_from_image(&image, &mut rgba)?;

        assert_eq!(rgba.as_slice(), &[9, 9, 9, 255, 8, 8, 8, 255]);
        assert_eq!(rgba.size(), image.size());
        Ok(())
    }

    #[test]
    fn rgba_wrong_dst() -> Result<(), ImageError> {
        let image = Image::from_size_val([2, 2].into(), ChannelLayout::Rgb, 0)?;
        let mut dst = Image::from_size_val(image.size(), ChannelLayout::Rgb, 0)?;

        assert!(super::rgba_from_image(&image, &mut dst).is_err());
        Ok(())
    }
}
