//! Filter operations
//!
//! This module provides the kernels offered by the editor and the convolution
//! engine that applies them.

/// Filter kernels
pub mod kernels;

/// Convolution operations
mod convolution;
pub use convolution::*;

pub use kernels::{FilterKind, Kernel};
