//! Skin avatar compositing: the front of the head with the hat layer on top,
//! flattened into a square PNG.

pub mod compositor;
pub mod error;
pub mod surface;
pub mod texture;

pub use compositor::{composite_avatar, face_offset, EncodedAvatar, MAX_AVATAR_SIZE};
pub use error::AvatarError;
pub use surface::{PixelSurface, PixelSurfaceFactory, RasterSurface, Rect, SurfaceFactory};
pub use texture::{SkinTexture, MAX_TEXTURE_SIDE};
