use crate::parallel;
use retouch_image::{ChannelLayout, Image, ImageError};

/// Define the RGB weights for the grayscale conversion in 14-bit fixed point.
///
/// 0.299, 0.587 and 0.114 scaled by 2^14; the weights add up to exactly 2^14.
const RW: u32 = 4899;
const GW: u32 = 9617;
const BW: u32 = 1868;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * RW + g as u32 * GW + b as u32 * BW + ROUND) >> SHIFT) as u8
}

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The alpha sample of an RGBA source is ignored. A grayscale source is copied
/// unchanged, so the conversion can be applied repeatedly.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the output image must have 1 channel.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use retouch_image::{ChannelLayout, Image, ImageSize};
/// use retouch_imgproc::color::gray_from_rgb;
///
/// let image = Image::from_size_val([4, 5].into(), ChannelLayout::Rgb, 0).unwrap();
/// let mut gray = Image::from_size_val(image.size(), ChannelLayout::Gray, 0).unwrap();
///
/// gray_from_rgb(&image, &mut gray).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn gray_from_rgb(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if dst.layout() != ChannelLayout::Gray {
        return Err(ImageError::ChannelLayoutMismatch(
            ChannelLayout::Gray,
            dst.layout(),
        ));
    }

    match src.layout() {
        ChannelLayout::Gray => dst.as_slice_mut().copy_from_slice(src.as_slice()),
        ChannelLayout::Rgb | ChannelLayout::Rgba => {
            parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
                dst_pixel[0] = luma(src_pixel[0], src_pixel[1], src_pixel[2]);
            });
        }
    }

    Ok(())
}

/// Convert a grayscale image to an RGB image by replicating the grayscale value across all three channels.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input image must have 1 channel.
/// Precondition: the output image must have 3 channels.
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_gray(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.layout() != ChannelLayout::Gray {
        return Err(ImageError::ChannelLayoutMismatch(
            ChannelLayout::Gray,
            src.layout(),
        ));
    }

    if dst.layout() != ChannelLayout::Rgb {
        return Err(ImageError::ChannelLayoutMismatch(
            ChannelLayout::Rgb,
            dst.layout(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.fill(src_pixel[0]);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use retouch_image::{ChannelLayout, Image, ImageError};

    #[test]
    fn gray_from_rgb_weights() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            [4, 1].into(),
            ChannelLayout::Rgb,
            vec![
                255, 0, 0,
                0, 255, 0,
                0, 0, 255,
                255, 255, 255,
            ],
        )?;
        let mut gray = Image::from_size_val(image.size(), ChannelLayout::Gray, 0)?;

        super::gray_from_rgb(&image, &mut gray)?;

        assert_eq!(gray.as_slice(), &[76, 150, 29, 255]);
        Ok(())
    }

    #[test]
    fn gray_from_rgb_shape() -> Result<(), ImageError> {
        let image = Image::from_size_val([7, 3].into(), ChannelLayout::Rgb, 42)?;
        let mut gray = Image::from_size_val(image.size(), ChannelLayout::Gray, 0)?;

        super::gray_from_rgb(&image, &mut gray)?;

        assert_eq!(gray.size(), image.size());
        assert_eq!(gray.num_channels(), 1);
        assert!(gray.as_slice().iter().all(|&v| v == 42));
        Ok(())
    }

    #[test]
    fn gray_from_gray_is_copy() -> Result<(), ImageError> {
        let image = Image::new([2, 2].into(), ChannelLayout::Gray, vec![1, 2, 3, 4])?;
        let mut gray = Image::from_size_val(image.size(), ChannelLayout::Gray, 0)?;

        super::gray_from_rgb(&image, &mut gray)?;

        assert_eq!(gray, image);
        Ok(())
    }

    #[test]
    fn gray_from_rgb_wrong_dst() -> Result<(), ImageError> {
        let image = Image::from_size_val([2, 2].into(), ChannelLayout::Rgb, 0)?;
        let mut dst = Image::from_size_val(image.size(), ChannelLayout::Rgb, 0)?;

        let res = super::gray_from_rgb(&image, &mut dst);
        assert_eq!(
            res,
            Err(ImageError::ChannelLayoutMismatch(
                ChannelLayout::Gray,
                ChannelLayout::Rgb
            ))
        );
        Ok(())
    }

    #[test]
    fn rgb_from_gray() -> Result<(), ImageError> {
        let image = Image::new([2, 1].into(), ChannelLayout::Gray, vec![7, 200])?;
        let mut rgb = Image::from_size_val(image.size(), ChannelLayout::Rgb, 0)?;

        super::rgb_from_gray(&image, &mut rgb)?;

        assert_eq!(rgb.as_slice(), &[7, 7, 7, 200, 200, 200]);
        Ok(())
    }
}
