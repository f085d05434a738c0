use std::path::Path;

use kornia_io::png::{read_image_png_rgba8, write_image_png_rgba8};

use crate::{canvas::Canvas, error::CanvasError};

fn check_extension(file_path: &Path) -> Result<(), CanvasError> {
    match file_path.extension() {
        Some(extension) if extension == "png" => Ok(()),
        _ => Err(CanvasError::InvalidFileExtension(file_path.to_path_buf())),
    }
}

/// Write a canvas to a PNG file as 8-bit RGBA.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file, it must end with `.png`.
/// * `canvas` - The canvas to write.
pub fn write_canvas_png(file_path: impl AsRef<Path>, canvas: &Canvas) -> Result<(), CanvasError> {
    let file_path = file_path.as_ref();
    check_extension(file_path)?;

    write_image_png_rgba8(file_path, canvas.as_rgba8())?;

    log::info!("wrote {} canvas to {}", canvas.size(), file_path.display());
    Ok(())
}

/// Read an 8-bit RGBA PNG file into a canvas.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
pub fn read_canvas_png(file_path: impl AsRef<Path>) -> Result<Canvas, CanvasError> {
    let image = read_image_png_rgba8(file_path)?;
    Canvas::new(image.size(), image.as_slice().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kornia_image::ImageSize;

    #[test]
    fn test_write_read_png() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("overlay.png");

        let mut canvas = Canvas::from_size_val(
            ImageSize {
                width: 7,
                height: 3,
            },
            [10, 20, 30, 255],
        )?;
        canvas.blend_pixel(6, 2, [255, 0, 0, 255]);
        write_canvas_png(&file_path, &canvas)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let back = read_canvas_png(&file_path)?;
        assert_eq!(back.size(), canvas.size());
        assert_eq!(back.as_slice(), canvas.as_slice());
        assert_eq!(back.get_pixel(6, 2)?, [255, 0, 0, 255]);
        Ok(())
    }

    #[test]
    fn test_rejects_extension() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let canvas = Canvas::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            [0, 0, 0, 255],
        )?;
        let res = write_canvas_png(tmp_dir.path().join("overlay.jpg"), &canvas);
        assert!(matches!(res, Err(CanvasError::InvalidFileExtension(_))));
        Ok(())
    }
}
