use retouch_image::ImageError;

/// Largest supported kernel side length.
pub const MAX_KERNEL_SIZE: usize = 255;

/// A square matrix of weights stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from its side length and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernelSize`] if `size` is zero or above
    /// [`MAX_KERNEL_SIZE`], and [`ImageError::InvalidKernelWeights`] if the number of
    /// weights is not `size * size`.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, ImageError> {
        if size == 0 || size > MAX_KERNEL_SIZE {
            return Err(ImageError::InvalidKernelSize(size));
        }
        if weights.len() != size * size {
            return Err(ImageError::InvalidKernelWeights(weights.len(), size));
        }
        Ok(Self { size, weights })
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Offset of the anchor from the top-left corner, on both axes.
    pub fn anchor(&self) -> usize {
        self.size / 2
    }

    /// Weights in row-major order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weights of kernel row `ky`.
    pub fn row(&self, ky: usize) -> &[f32] {
        &self.weights[ky * self.size..(ky + 1) * self.size]
    }
}

/// The filters offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Box blur with a size derived from the strength.
    Blur,
    /// Fixed 3x3 sharpen kernel.
    Sharpen,
    /// Fixed 3x3 edge detection kernel.
    EdgeDetection,
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            FilterKind::Blur => "Blur",
            FilterKind::Sharpen => "Sharpen",
            FilterKind::EdgeDetection => "Edge Detection",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").trim() {
            "blur" => Ok(FilterKind::Blur),
            "sharpen" => Ok(FilterKind::Sharpen),
            "edge detection" | "edge" => Ok(FilterKind::EdgeDetection),
            _ => Err(format!("unknown filter kind: {s}")),
        }
    }
}

/// Convert a user strength into a kernel side length.
///
/// The strength is multiplied by 10 and truncated toward zero. Negative and NaN
/// strengths saturate to 0.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] when the resulting size is zero or
/// larger than [`MAX_KERNEL_SIZE`].
pub fn kernel_size_from_strength(strength: f64) -> Result<usize, ImageError> {
    let size = (strength * 10.0) as usize;
    if size == 0 || size > MAX_KERNEL_SIZE {
        return Err(ImageError::InvalidKernelSize(size));
    }
    Ok(size)
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The side length of the kernel.
///
/// # Returns
///
/// A `kernel_size x kernel_size` kernel where every weight is `1 / kernel_size²`.
pub fn box_blur_kernel(kernel_size: usize) -> Result<Kernel, ImageError> {
    if kernel_size == 0 || kernel_size > MAX_KERNEL_SIZE {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }
    let weight = 1.0 / (kernel_size * kernel_size) as f32;
    Kernel::new(kernel_size, vec![weight; kernel_size * kernel_size])
}

/// Create the 3x3 sharpen kernel.
pub fn sharpen_kernel() -> Kernel {
    Kernel {
        size: 3,
        weights: vec![-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0],
    }
}

/// Create the 3x3 edge detection kernel.
pub fn edge_kernel() -> Kernel {
    Kernel {
        size: 3,
        weights: vec![-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
    }
}

/// Build the kernel for a filter kind and user strength.
///
/// Only [`FilterKind::Blur`] depends on the strength, but the strength is
/// validated for every kind so an out of range value is always reported.
pub fn kernel_for(kind: FilterKind, strength: f64) -> Result<Kernel, ImageError> {
    let kernel_size = kernel_size_from_strength(strength)?;
    match kind {
        FilterKind::Blur => box_blur_kernel(kernel_size),
        FilterKind::Sharpen => Ok(sharpen_kernel()),
        FilterKind::EdgeDetection => Ok(edge_kernel()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_blur_kernel() -> Result<(), ImageError> {
        let kernel = box_blur_kernel(4)?;
        assert_eq!(kernel.size(), 4);
        assert_eq!(kernel.anchor(), 2);
        assert!(kernel.weights().iter().all(|&w| w == 1.0 / 16.0));
        approx::assert_relative_eq!(kernel.weights().iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_box_blur_kernel_zero() {
        assert_eq!(box_blur_kernel(0), Err(ImageError::InvalidKernelSize(0)));
    }

    #[test]
    fn test_fixed_kernels() {
        let sharpen = sharpen_kernel();
        assert_eq!(sharpen.size(), 3);
        assert_eq!(sharpen.row(1), &[-1.0, 9.0, -1.0]);
        assert_eq!(sharpen.weights().iter().sum::<f32>(), 1.0);

        let edge = edge_kernel();
        assert_eq!(edge.row(0), &[-1.0, -1.0, -1.0]);
        assert_eq!(edge.weights().iter().sum::<f32>(), 0.0);
    }

    #[test]
    fn test_kernel_size_from_strength() -> Result<(), ImageError> {
        assert_eq!(kernel_size_from_strength(2.0)?, 20);
        assert_eq!(kernel_size_from_strength(1.0)?, 10);
        assert_eq!(kernel_size_from_strength(10.0)?, 100);
        assert_eq!(kernel_size_from_strength(0.35)?, 3);
        assert_eq!(
            kernel_size_from_strength(0.05),
            Err(ImageError::InvalidKernelSize(0))
        );
        assert_eq!(
            kernel_size_from_strength(f64::NAN),
            Err(ImageError::InvalidKernelSize(0))
        );
        assert_eq!(
            kernel_size_from_strength(-1.0),
            Err(ImageError::InvalidKernelSize(0))
        );
        assert!(kernel_size_from_strength(f64::INFINITY).is_err());
        Ok(())
    }

    #[test]
    fn test_kernel_for() -> Result<(), ImageError> {
        assert_eq!(kernel_for(FilterKind::Blur, 2.0)?.size(), 20);
        assert_eq!(kernel_for(FilterKind::Sharpen, 7.3)?, sharpen_kernel());
        assert_eq!(kernel_for(FilterKind::EdgeDetection, 1.0)?, edge_kernel());
        assert!(kernel_for(FilterKind::Sharpen, 0.0).is_err());
        Ok(())
    }

    #[test]
    fn test_kernel_new_invalid() {
        assert_eq!(
            Kernel::new(2, vec![0.0; 3]),
            Err(ImageError::InvalidKernelWeights(3, 2))
        );
        assert_eq!(
            Kernel::new(MAX_KERNEL_SIZE + 1, vec![]),
            Err(ImageError::InvalidKernelSize(MAX_KERNEL_SIZE + 1))
        );
    }

    #[test]
    fn test_filter_kind_from_str() {
        assert_eq!("Blur".parse::<FilterKind>(), Ok(FilterKind::Blur));
        assert_eq!("sharpen".parse::<FilterKind>(), Ok(FilterKind::Sharpen));
        assert_eq!("Edge Detection".parse::<FilterKind>(), Ok(FilterKind::EdgeDetection));
        assert_eq!("edge-detection".parse::<FilterKind>(), Ok(FilterKind::EdgeDetection));
        assert!("emboss".parse::<FilterKind>().is_err());
        assert_eq!(FilterKind::EdgeDetection.to_string(), "Edge Detection");
    }
}
