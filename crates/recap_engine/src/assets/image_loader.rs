//! Image loading for texture data

use std::path::Path;

use crate::assets::AssetError;

/// Decoded RGBA8 pixels ready for upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data, first row at the top
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Whether any pixel is not fully opaque
    pub has_alpha: bool,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// The image is flipped vertically so that row 0 is the bottom, which is
    /// what OpenGL texture coordinates expect.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;
        let has_alpha = img.color().has_alpha();
        let rgba_img = img.flipv().to_rgba8();
        let (width, height) = rgba_img.dimensions();

        let data = rgba_img.into_raw();
        let has_alpha = has_alpha && data.chunks_exact(4).any(|pixel| pixel[3] < u8::MAX);

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);
        Ok(Self {
            data,
            width,
            height,
            has_alpha,
        })
    }

    /// Create a solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let data = color.repeat(pixel_count);

        Self {
            data,
            width,
            height,
            has_alpha: color[3] < u8::MAX,
        }
    }

    /// The 1x1 white texture bound when a mesh has none
    pub fn white() -> Self {
        Self::solid_color(1, 1, [u8::MAX; 4])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_color_fills_every_pixel() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.data.len(), 4 * 4 * 4);
        assert_eq!(&img.data[60..64], &[255, 0, 0, 255]);
        assert!(!img.has_alpha);
    }

    #[test]
    fn translucent_color_reports_alpha() {
        assert!(ImageData::solid_color(1, 1, [0, 0, 0, 128]).has_alpha);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = ImageData::from_file("does/not/exist.png");
        assert!(matches!(result, Err(AssetError::LoadFailed(_))));
    }
}
