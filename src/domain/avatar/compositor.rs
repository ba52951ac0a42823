use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::{
    error::AvatarError,
    surface::{RasterSurface, Rect, SurfaceFactory},
    texture::{SkinTexture, FACE_REGION, HELM_REGION},
};

pub const MAX_AVATAR_SIZE: u32 = 2048;

const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAvatar {
    pub bytes: Vec<u8>,
    pub size: u32,
}

impl EncodedAvatar {
    pub fn mime(&self) -> &'static str {
        PNG_MIME
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{PNG_MIME};base64,{}", STANDARD.encode(&self.bytes))
    }
}

/// Inset of the face layer so the helm, drawn at full size, frames it.
pub fn face_offset(size: u32) -> u32 {
    (size as f64 / 18.0).round() as u32
}

pub fn validate_output_size(size: u32) -> Result<u32, AvatarError> {
    if size == 0 || size > MAX_AVATAR_SIZE {
        return Err(AvatarError::InvalidOutputSize(size));
    }
    Ok(size)
}

/// Paints the face and then the helm overlay of `texture` onto a fresh
/// `size x size` surface. Layer order is fixed: the helm is stretched over the
/// whole canvas and only its transparent pixels let the face through.
pub fn paint_avatar<F: SurfaceFactory>(
    texture: &SkinTexture,
    size: u32,
    factory: &F,
) -> Result<F::Surface, AvatarError> {
    let size = validate_output_size(size)?;
    let offset = face_offset(size);
    let face_side = size - offset - offset;

    let mut surface = factory.create(size, size)?;
    surface.set_smoothing(false);

    surface.copy_region(
        texture.pixels(),
        texture.region(FACE_REGION),
        Rect::new(offset, offset, face_side, face_side),
    );
    surface.copy_region(
        texture.pixels(),
        texture.region(HELM_REGION),
        Rect::new(0, 0, size, size),
    );

    Ok(surface)
}

pub fn composite_avatar<F: SurfaceFactory>(
    texture: &SkinTexture,
    size: u32,
    factory: &F,
) -> Result<EncodedAvatar, AvatarError> {
    let surface = paint_avatar(texture, size, factory)?;
    let bytes = surface.encode_png()?;
    Ok(EncodedAvatar { bytes, size })
}
