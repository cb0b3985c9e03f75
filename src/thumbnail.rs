use image::DynamicImage;

use crate::error::Result;

/// Decodes an image and downscales it to fit a bounding square, aspect
/// ratio preserved. Failures here are independent of metadata decoding.
pub struct ThumbnailRenderer {
    max_size: u32,
}

impl ThumbnailRenderer {
    pub fn new(max_size: u32) -> Self {
        Self { max_size }
    }

    pub fn render(&self, bytes: &[u8]) -> Result<DynamicImage> {
        let image = image::load_from_memory(bytes)?;
        Ok(image.thumbnail(self.max_size, self.max_size))
    }
}
