use retouch_image::{Image, ImageError};

use super::kernels::Kernel;
use crate::{padding::BorderMode, parallel};

/// Convolve an image with a square kernel.
///
/// Every output sample is the weighted sum of the kernel neighborhood of the
/// matching input sample, computed independently per channel. The kernel is
/// applied without flipping and anchored at `(size / 2, size / 2)`. Samples
/// outside the image are resolved with `border`. The sum is rounded and clamped
/// to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The kernel to apply.
/// * `border` - The border policy for out of bounds samples.
///
/// PRECONDITION: `src` and `dst` must have the same size and channel layout.
///
/// # Example
///
/// ```
/// use retouch_image::{ChannelLayout, Image, ImageSize};
/// use retouch_imgproc::filter::{filter2d, kernels};
/// use retouch_imgproc::padding::BorderMode;
///
/// let image = Image::from_size_val([4, 5].into(), ChannelLayout::Rgb, 9).unwrap();
/// let mut blurred = Image::from_size_val(image.size(), ChannelLayout::Rgb, 0).unwrap();
///
/// let kernel = kernels::box_blur_kernel(3).unwrap();
/// filter2d(&image, &mut blurred, &kernel, BorderMode::Replicate).unwrap();
///
/// assert_eq!(blurred.as_slice(), image.as_slice());
/// ```
pub fn filter2d(
    src: &Image,
    dst: &mut Image,
    kernel: &Kernel,
    border: BorderMode,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.layout() != dst.layout() {
        return Err(ImageError::ChannelLayoutMismatch(src.layout(), dst.layout()));
    }

    let (rows, cols) = (src.rows(), src.cols());
    let num_channels = src.num_channels();
    let ksize = kernel.size();
    let anchor = kernel.anchor() as isize;
    let src_data = src.as_slice();
    let stride = src.row_stride();

    // sample offsets of each kernel column for every output column
    let col_offsets = (0..cols)
        .flat_map(|x| {
            (0..ksize).map(move |kx| {
                border.map_index(x as isize + kx as isize - anchor, cols) * num_channels
            })
        })
        .collect::<Vec<_>>();

    parallel::par_fill_rows(dst, |y, dst_row| {
        let mut acc = vec![0f32; dst_row.len()];

        for ky in 0..ksize {
            let sy = border.map_index(y as isize + ky as isize - anchor, rows);
            let src_row = &src_data[sy * stride..(sy + 1) * stride];
            let weights = kernel.row(ky);

            for (x, acc_pixel) in acc.chunks_exact_mut(num_channels).enumerate() {
                let offsets = &col_offsets[x * ksize..(x + 1) * ksize];
                for (&offset, &w) in offsets.iter().zip(weights.iter()) {
                    let src_pixel = &src_row[offset..offset + num_channels];
                    for (a, &s) in acc_pixel.iter_mut().zip(src_pixel.iter()) {
                        *a += w * s as f32;
                    }
                }
            }
        }

        dst_row
            .iter_mut()
            .zip(acc.iter())
            .for_each(|(d, &a)| *d = a.round().clamp(0.0, 255.0) as u8);
    });

    Ok(())
}
