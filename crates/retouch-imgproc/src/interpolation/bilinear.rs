/// The two source samples and the weight of the second one for a destination index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinearTap {
    pub i0: usize,
    pub i1: usize,
    pub frac: f32,
}

/// Compute the linear interpolation taps along one axis.
///
/// Destination sample `i` is mapped to the source coordinate
/// `(i + 0.5) * src_len / dst_len - 0.5`, i.e. pixel centers are aligned. Coordinates
/// past either edge are clamped to the edge sample.
///
/// PRECONDITION: `src_len` and `dst_len` must be positive.
pub(crate) fn linear_taps(src_len: usize, dst_len: usize) -> Vec<LinearTap> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;

    (0..dst_len)
        .map(|i| {
            let u = (i as f64 + 0.5) * scale - 0.5;
            let iu = u.floor();
            let (i0, frac) = if iu < 0.0 {
                (0, 0.0)
            } else if iu as usize >= last {
                (last, 0.0)
            } else {
                (iu as usize, (u - iu) as f32)
            };
            LinearTap {
                i0,
                i1: (i0 + 1).min(last),
                frac,
            }
        })
        .collect()
}
