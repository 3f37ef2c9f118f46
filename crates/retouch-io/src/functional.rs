use std::path::Path;

use retouch_image::{ChannelLayout, Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as three-channel RGB8.
///
/// The format is guessed from the file contents and any format supported by the
/// image crate is accepted. Grayscale, alpha and 16-bit images are converted to
/// RGB8.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image containing the decoded data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(&file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap[..]))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, ChannelLayout::Rgb, img.into_rgb8().into_raw())?)
}

/// Writes the image to the given file path.
///
/// The encoder is chosen from the file extension. Grayscale, RGB and RGBA images
/// are accepted, subject to what the chosen format can store.
///
/// # Arguments
///
/// * `file_path` - The destination path; its extension selects the format.
/// * `image` - The image to encode.
pub fn write_image_any(file_path: impl AsRef<Path>, image: &Image) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = image::ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    let color = match image.layout() {
        ChannelLayout::Gray => image::ExtendedColorType::L8,
        ChannelLayout::Rgb => image::ExtendedColorType::Rgb8,
        ChannelLayout::Rgba => image::ExtendedColorType::Rgba8,
    };

    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        color,
        format,
    )
    .map_err(IoError::ImageEncodeError)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_image_any_rgb8, write_image_any};
    use crate::error::IoError;
    use retouch_image::{ChannelLayout, Image, ImageSize};

    fn gradient(size: ImageSize) -> Result<Image, IoError> {
        let data = (0..size.width * size.height * 3)
            .map(|i| (i % 251) as u8)
            .collect();
        Ok(Image::new(size, ChannelLayout::Rgb, data)?)
    }

    #[test]
    fn write_read_png_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        let image = gradient([9, 6].into())?;
        write_image_any(&file_path, &image)?;

        let decoded = read_image_any_rgb8(&file_path)?;
        assert_eq!(decoded, image);
        Ok(())
    }

    #[test]
    fn write_gray_read_as_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        let gray = Image::new([2, 2].into(), ChannelLayout::Gray, vec![0, 64, 128, 255])?;
        write_image_any(&file_path, &gray)?;

        let decoded = read_image_any_rgb8(&file_path)?;
        assert_eq!(decoded.layout(), ChannelLayout::Rgb);
        assert_eq!(
            decoded.as_slice(),
            &[0, 0, 0, 64, 64, 64, 128, 128, 128, 255, 255, 255]
        );
        Ok(())
    }

    #[test]
    fn write_read_jpeg_shape() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("photo.jpg");

        let image = gradient([32, 24].into())?;
        write_image_any(&file_path, &image)?;

        let decoded = read_image_any_rgb8(&file_path)?;
        assert_eq!(decoded.size(), image.size());
        assert_eq!(decoded.num_channels(), 3);
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_any_rgb8("/definitely/not/here.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_corrupt_file() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("corrupt.png");
        std::fs::write(&file_path, b"this is not an image")?;

        let res = read_image_any_rgb8(&file_path);
        assert!(matches!(res, Err(IoError::ImageDecodeError(_))));
        Ok(())
    }

    #[test]
    fn write_unknown_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.unknown");

        let image = gradient([2, 2].into())?;
        let res = write_image_any(&file_path, &image);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
