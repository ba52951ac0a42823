use std::io::Cursor;

use image::{ImageReader, Limits, RgbaImage};

use super::{error::AvatarError, surface::Rect};

/// Width of the reference skin layout. Every region below is expressed in
/// these units and multiplied by [`SkinTexture::scale`].
pub const BASE_TEXTURE_WIDTH: u32 = 64;

/// Largest texture side accepted (HD skins top out at 32x).
pub const MAX_TEXTURE_SIDE: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SkinRegion {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn scaled(&self, scale: u32) -> Rect {
        Rect::new(
            self.x * scale,
            self.y * scale,
            self.width * scale,
            self.height * scale,
        )
    }
}

/// Front of the head, base layer.
pub const FACE_REGION: SkinRegion = SkinRegion::new(8, 8, 8, 8);

/// Front of the hat/helm overlay layer.
pub const HELM_REGION: SkinRegion = SkinRegion::new(40, 8, 8, 8);

#[derive(Debug, Clone)]
pub struct SkinTexture {
    pixels: RgbaImage,
    scale: u32,
}

impl SkinTexture {
    pub fn decode(bytes: &[u8]) -> Result<Self, AvatarError> {
        if bytes.is_empty() {
            return Err(AvatarError::ImageDecodeFailed(
                "La textura está vacía.".to_string(),
            ));
        }

        // Only the header is read here, so a tiny file declaring a huge
        // canvas is rejected before anything is allocated for it.
        let (width, height) = open_reader(bytes)?
            .into_dimensions()
            .map_err(|err| AvatarError::ImageDecodeFailed(err.to_string()))?;
        check_dimensions(width, height)?;

        let mut limits = Limits::default();
        limits.max_image_width = Some(MAX_TEXTURE_SIDE);
        limits.max_image_height = Some(MAX_TEXTURE_SIDE);
        let mut reader = open_reader(bytes)?;
        reader.limits(limits);
        let image = reader
            .decode()
            .map_err(|err| AvatarError::ImageDecodeFailed(err.to_string()))?;
        Self::from_rgba(image.to_rgba8())
    }

    /// Accepts square skins of any multiple of 64 and the legacy half-height
    /// layout (64x32 and its multiples), which still carries the head.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, AvatarError> {
        let (width, height) = pixels.dimensions();
        let scale = check_dimensions(width, height)?;

        Ok(Self { pixels, scale })
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn region(&self, region: SkinRegion) -> Rect {
        region.scaled(self.scale)
    }
}

fn open_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, AvatarError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| AvatarError::ImageDecodeFailed(err.to_string()))
}

/// Returns the texture scale for a valid skin size.
fn check_dimensions(width: u32, height: u32) -> Result<u32, AvatarError> {
    let valid_width = width > 0 && width <= MAX_TEXTURE_SIDE && width % BASE_TEXTURE_WIDTH == 0;
    let valid_height = height == width || height * 2 == width;
    if !valid_width || !valid_height {
        return Err(AvatarError::UnsupportedTextureDimensions { width, height });
    }
    Ok(width / BASE_TEXTURE_WIDTH)
}
