mod display;
mod gray;

pub use display::rgba_from_image;
pub use gray::{gray_from_rgb, rgb_from_gray};
