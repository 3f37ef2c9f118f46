use crate::interpolation::{linear_taps, InterpolationMode};
use crate::parallel;
use fast_image_resize as fr;
use retouch_image::{ChannelLayout, Image, ImageError, ImageSize};

/// Resize an image to the size of the destination image.
///
/// The function resizes an image to a new size using the specified interpolation mode.
/// It supports every channel layout.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, already allocated with the target size.
/// * `interpolation` - The interpolation mode to use.
///
/// PRECONDITION: `src` and `dst` must have the same channel layout.
///
/// # Example
///
/// ```
/// use retouch_image::{ChannelLayout, Image, ImageSize};
/// use retouch_imgproc::interpolation::InterpolationMode;
/// use retouch_imgproc::resize::resize_native;
///
/// let image = Image::from_size_val([4, 5].into(), ChannelLayout::Rgb, 0).unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::from_size_val(new_size, ChannelLayout::Rgb, 0).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native(
    src: &Image,
    dst: &mut Image,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.layout() != dst.layout() {
        return Err(ImageError::ChannelLayoutMismatch(src.layout(), dst.layout()));
    }

    match interpolation {
        InterpolationMode::Bilinear => {
            resize_bilinear(src, dst);
            Ok(())
        }
        InterpolationMode::Area => resize_area(src, dst),
    }
}

/// Resize an image to a new size, allocating the output.
///
/// # Errors
///
/// Returns [`ImageError::DegenerateResize`] if either target dimension is zero.
pub fn resize(
    src: &Image,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image, ImageError> {
    if new_size.width == 0 || new_size.height == 0 {
        return Err(ImageError::DegenerateResize(new_size.width, new_size.height));
    }

    let mut dst = Image::from_size_val(new_size, src.layout(), 0)?;
    resize_native(src, &mut dst, interpolation)?;

    Ok(dst)
}

/// Compute the size of an image scaled uniformly to fit inside `max_size`.
///
/// A size already within bounds is returned unchanged. Otherwise both dimensions
/// are multiplied by `min(max_w / w, max_h / h)` and rounded, never below 1 nor
/// above the bound.
pub fn fit_size(size: ImageSize, max_size: ImageSize) -> Result<ImageSize, ImageError> {
    if max_size.width == 0 || max_size.height == 0 {
        return Err(ImageError::DegenerateResize(max_size.width, max_size.height));
    }

    if size.width <= max_size.width && size.height <= max_size.height {
        return Ok(size);
    }

    let scale = f64::min(
        max_size.width as f64 / size.width as f64,
        max_size.height as f64 / size.height as f64,
    );

    let scaled = |len: usize, max: usize| ((len as f64 * scale).round() as usize).clamp(1, max);

    Ok(ImageSize {
        width: scaled(size.width, max_size.width),
        height: scaled(size.height, max_size.height),
    })
}

/// Shrink an image to fit inside `max_size` using a box filter approximation of
/// area averaging.
///
/// An image already within bounds is returned as an unchanged copy.
///
/// # Example
///
/// ```
/// use retouch_image::{ChannelLayout, Image, ImageSize};
/// use retouch_imgproc::resize::resize_to_fit;
///
/// let image = Image::from_size_val([1000, 250].into(), ChannelLayout::Rgb, 0).unwrap();
/// let preview = resize_to_fit(&image, [500, 500].into()).unwrap();
///
/// assert_eq!(preview.size(), ImageSize { width: 500, height: 125 });
/// ```
pub fn resize_to_fit(src: &Image, max_size: ImageSize) -> Result<Image, ImageError> {
    let new_size = fit_size(src.size(), max_size)?;
    if new_size == src.size() {
        return Ok(src.clone());
    }

    resize(src, new_size, InterpolationMode::Area)
}

fn resize_bilinear(src: &Image, dst: &mut Image) {
    let num_channels = src.num_channels();
    let stride = src.row_stride();
    let src_data = src.as_slice();

    let x_taps = linear_taps(src.cols(), dst.cols());
    let y_taps = linear_taps(src.rows(), dst.rows());

    parallel::par_fill_rows(dst, |y, dst_row| {
        let ty = y_taps[y];
        let row0 = &src_data[ty.i0 * stride..(ty.i0 + 1) * stride];
        let row1 = &src_data[ty.i1 * stride..(ty.i1 + 1) * stride];

        for (tx, dst_pixel) in x_taps.iter().zip(dst_row.chunks_exact_mut(num_channels)) {
            let (o0, o1) = (tx.i0 * num_channels, tx.i1 * num_channels);
            for (ch, d) in dst_pixel.iter_mut().enumerate() {
                let top = row0[o0 + ch] as f32 * (1.0 - tx.frac) + row0[o1 + ch] as f32 * tx.frac;
                let bottom =
                    row1[o0 + ch] as f32 * (1.0 - tx.frac) + row1[o1 + ch] as f32 * tx.frac;
                let value = top * (1.0 - ty.frac) + bottom * ty.frac;
                *d = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    });
}

fn pixel_type(layout: ChannelLayout) -> fr::PixelType {
    match layout {
        ChannelLayout::Gray => fr::PixelType::U8,
        ChannelLayout::Rgb => fr::PixelType::U8x3,
        ChannelLayout::Rgba => fr::PixelType::U8x4,
    }
}

/// Shrink with the box filter of [fast_image_resize](https://crates.io/crates/fast_image_resize).
///
/// This approximates area averaging: each destination sample averages the whole
/// source samples whose centers fall in its footprint, without weighting the
/// partially covered ones. Exact for integer shrink factors.
fn resize_area(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    let pixel_type = pixel_type(src.layout());
    let (dst_width, dst_height) = (dst.width() as u32, dst.height() as u32);

    let src_image = fr::images::ImageRef::new(
        src.width() as u32,
        src.height() as u32,
        src.as_slice(),
        pixel_type,
    )
    .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    let mut dst_image =
        fr::images::Image::from_slice_u8(dst_width, dst_height, dst.as_slice_mut(), pixel_type)
            .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Box));

    fr::Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    Ok(())
}
