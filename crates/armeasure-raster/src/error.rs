/// An error type for the raster module.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// Error when a canvas has a zero dimension.
    #[error("Invalid canvas size ({0}x{1})")]
    InvalidSize(usize, usize),

    /// Error when a pixel lies outside the canvas.
    #[error("Pixel ({0}, {1}) is out of bounds")]
    PixelOutOfBounds(usize, usize),

    /// Error from the underlying image.
    #[error(transparent)]
    ImageError(#[from] kornia_image::ImageError),

    /// Error to read or write the image file.
    #[error(transparent)]
    IoError(#[from] kornia_io::error::IoError),

    /// Error when the file does not carry a `.png` extension.
    #[error("The file extension is not png: {0}")]
    InvalidFileExtension(std::path::PathBuf),
}
