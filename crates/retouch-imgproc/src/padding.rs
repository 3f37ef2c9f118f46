/// How a neighborhood sample falling outside the image is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderMode {
    /// Repeat the outermost row or column.
    ///
    /// Example: ...d c b a | a a a a...
    #[default]
    Replicate,

    /// Mirror the image around its outermost row or column, without repeating it.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,
}

impl BorderMode {
    /// Mirror around the edge samples; the mirrored sequence has period `2 * (len - 1)`.
    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let period = 2 * (len as isize - 1);
        let i = i.rem_euclid(period);
        if i < len as isize {
            i as usize
        } else {
            (period - i) as usize
        }
    }

    /// Map a possibly out of range coordinate into `[0, len)`.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Reflect101`: mirror excluding edge
    ///
    /// PRECONDITION: `len` must be positive.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            BorderMode::Replicate => i.clamp(0, len as isize - 1) as usize,
            BorderMode::Reflect101 => Self::reflect101(i, len),
        }
    }
}
