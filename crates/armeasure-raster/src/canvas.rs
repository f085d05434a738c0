use std::ops;

use armeasure_geometry::Viewport;
use kornia_image::{allocator::CpuAllocator, color_spaces::Rgba8, Image, ImageSize};

use crate::error::CanvasError;

/// The image size matching a viewport.
///
/// # Examples
///
/// ```
/// use armeasure_geometry::Viewport;
/// use armeasure_raster::viewport_size;
///
/// let size = viewport_size(&Viewport::new(10, 20)?);
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// # Ok::<(), armeasure_geometry::GeometryError>(())
/// ```
pub fn viewport_size(viewport: &Viewport) -> ImageSize {
    ImageSize {
        width: viewport.width() as usize,
        height: viewport.height() as usize,
    }
}

/// An RGBA8 image with straight alpha that drawing composites onto.
///
/// Wraps a kornia [`Rgba8`] image and dereferences to the inner [`Image`], so the image
/// accessors and the kornia image functions apply directly.
pub struct Canvas(Rgba8<CpuAllocator>);

impl ops::Deref for Canvas {
    type Target = Image<u8, 4, CpuAllocator>;

    fn deref(&self) -> &Self::Target {
        self.0.as_image()
    }
}

impl ops::DerefMut for Canvas {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_image_mut()
    }
}

impl Canvas {
    /// Number of channels per pixel.
    pub const CHANNELS: usize = 4;

    /// Create a new canvas from pixel data.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the data length does not match.
    pub fn new(size: ImageSize, data: Vec<u8>) -> Result<Self, CanvasError> {
        if size.width == 0 || size.height == 0 {
            return Err(CanvasError::InvalidSize(size.width, size.height));
        }
        Ok(Self(Rgba8::from_size_vec(size, data, CpuAllocator)?))
    }

    /// Create a canvas filled with a single color.
    pub fn from_size_val(size: ImageSize, color: [u8; 4]) -> Result<Self, CanvasError> {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(size.width * size.height * Self::CHANNELS)
            .collect();
        Self::new(size, data)
    }

    /// Get as reference the typed RGBA image.
    pub fn as_rgba8(&self) -> &Rgba8<CpuAllocator> {
        &self.0
    }

    /// Get as mutable reference the underlying image.
    pub fn as_image_mut(&mut self) -> &mut Image<u8, 4, CpuAllocator> {
        self.0.as_image_mut()
    }

    /// Get the color of a pixel.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<[u8; 4], CanvasError> {
        if x >= self.cols() || y >= self.rows() {
            return Err(CanvasError::PixelOutOfBounds(x, y));
        }
        let start = (y * self.cols() + x) * Self::CHANNELS;
        let mut pixel = [0u8; 4];
        pixel.copy_from_slice(&self.as_slice()[start..start + Self::CHANNELS]);
        Ok(pixel)
    }

    /// Composite a color over a pixel, ignoring coordinates outside the canvas.
    #[inline]
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.cols() as i64 || y >= self.rows() as i64 {
            return;
        }
        let start = (y as usize * self.cols() + x as usize) * Self::CHANNELS;
        let dst = &mut self.as_slice_mut()[start..start + Self::CHANNELS];

        let alpha = color[3] as u32;
        match alpha {
            0 => {}
            255 => dst.copy_from_slice(&color),
            _ => {
                let inv = 255 - alpha;
                for c in 0..3 {
                    dst[c] = ((color[c] as u32 * alpha + dst[c] as u32 * inv + 127) / 255) as u8;
                }
                dst[3] = (alpha + (dst[3] as u32 * inv + 127) / 255) as u8;
            }
        }
    }
}
