use rayon::prelude::*;

use retouch_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// The rows of `src` and `dst` are processed in parallel; within a row the closure
/// receives the samples of one source pixel and one destination pixel. The number
/// of samples per pixel follows each image's own channel layout.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows(src: &Image, dst: &mut Image, f: impl Fn(&[u8], &mut [u8]) + Send + Sync) {
    let (c1, c2) = (src.num_channels(), dst.num_channels());
    let cols = src.cols();

    src.as_slice()
        .par_chunks_exact(c1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(c2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(c1)
                .zip(dst_chunk.chunks_exact_mut(c2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Fill each row of the destination image in parallel.
///
/// The closure receives the row index and the mutable samples of that row.
pub fn par_fill_rows(dst: &mut Image, f: impl Fn(usize, &mut [u8]) + Send + Sync) {
    let stride = dst.row_stride();

    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}
