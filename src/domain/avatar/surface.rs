use image::{
    codecs::png::PngEncoder,
    imageops::{self, FilterType},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};

use super::error::AvatarError;

/// Largest surface side the default factory hands out.
pub const MAX_SURFACE_SIDE: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// 2D drawing target the compositor paints on.
pub trait RasterSurface {
    fn dimensions(&self) -> (u32, u32);

    fn set_smoothing(&mut self, enabled: bool);

    /// Draws `src` of `source` stretched into `dst`, source-over.
    fn copy_region(&mut self, source: &RgbaImage, src: Rect, dst: Rect);

    fn encode_png(&self) -> Result<Vec<u8>, AvatarError>;
}

pub trait SurfaceFactory {
    type Surface: RasterSurface;

    fn create(&self, width: u32, height: u32) -> Result<Self::Surface, AvatarError>;
}

#[derive(Debug, Clone)]
pub struct PixelSurface {
    pixels: RgbaImage,
    smoothing: bool,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            smoothing: true,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    fn blend_at(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return;
        }
        let target = self.pixels.get_pixel_mut(x, y);
        *target = source_over(*target, color);
    }

    fn copy_nearest(&mut self, source: &RgbaImage, src: Rect, dst: Rect) {
        let max_x = source.width().saturating_sub(1);
        let max_y = source.height().saturating_sub(1);
        for dy in 0..dst.height {
            let sy = src.y + sample_index(dy, src.height, dst.height);
            for dx in 0..dst.width {
                let sx = src.x + sample_index(dx, src.width, dst.width);
                let color = *source.get_pixel(sx.min(max_x), sy.min(max_y));
                self.blend_at(dst.x + dx, dst.y + dy, color);
            }
        }
    }

    fn copy_smoothed(&mut self, source: &RgbaImage, src: Rect, dst: Rect) {
        let region = imageops::crop_imm(source, src.x, src.y, src.width, src.height).to_image();
        if region.width() == 0 || region.height() == 0 {
            return;
        }
        let resized = imageops::resize(&region, dst.width, dst.height, FilterType::Triangle);
        for (dx, dy, color) in resized.enumerate_pixels() {
            self.blend_at(dst.x + dx, dst.y + dy, *color);
        }
    }
}

impl RasterSurface for PixelSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn set_smoothing(&mut self, enabled: bool) {
        self.smoothing = enabled;
    }

    fn copy_region(&mut self, source: &RgbaImage, src: Rect, dst: Rect) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        if self.smoothing {
            self.copy_smoothed(source, src, dst);
        } else {
            self.copy_nearest(source, src, dst);
        }
    }

    fn encode_png(&self) -> Result<Vec<u8>, AvatarError> {
        let (width, height) = self.pixels.dimensions();
        let mut output = Vec::<u8>::new();
        let encoder = PngEncoder::new(&mut output);
        encoder
            .write_image(&self.pixels, width, height, ColorType::Rgba8.into())
            .map_err(|err| AvatarError::EncodeFailed(err.to_string()))?;
        Ok(output)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PixelSurfaceFactory {
    pub max_side: u32,
}

impl Default for PixelSurfaceFactory {
    fn default() -> Self {
        Self {
            max_side: MAX_SURFACE_SIDE,
        }
    }
}

impl SurfaceFactory for PixelSurfaceFactory {
    type Surface = PixelSurface;

    fn create(&self, width: u32, height: u32) -> Result<PixelSurface, AvatarError> {
        if width == 0 || height == 0 || width > self.max_side || height > self.max_side {
            return Err(AvatarError::SurfaceUnavailable(format!(
                "superficie {width}x{height} fuera del rango permitido (máximo {})",
                self.max_side
            )));
        }
        Ok(PixelSurface::new(width, height))
    }
}

/// Pixel-centre nearest sampling: destination pixel `d` of a `dst_len` span
/// reads source pixel `floor((2d + 1) * src_len / (2 * dst_len))`.
fn sample_index(d: u32, src_len: u32, dst_len: u32) -> u32 {
    let numerator = (2 * d as u64 + 1) * src_len as u64;
    (numerator / (2 * dst_len as u64)) as u32
}

fn source_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let value = (src[channel] as f32 * src_alpha
            + dst[channel] as f32 * dst_alpha * (1.0 - src_alpha))
            / out_alpha;
        out[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}
