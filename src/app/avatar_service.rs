use std::{future::Future, time::Duration};

use futures_util::future::join_all;

use crate::{
    domain::avatar::{
        compositor::{composite_avatar, validate_output_size},
        AvatarError, EncodedAvatar, PixelSurfaceFactory, SkinTexture, SurfaceFactory,
    },
    infrastructure::http::texture_loader::{HttpTextureLoader, ImageSource, TextureLoader},
};

pub const DEFAULT_TEXTURE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a skin, waits for it at most `timeout`, and composites the avatar.
/// Holds no per-render state, so one renderer can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct AvatarRenderer<L = HttpTextureLoader, F = PixelSurfaceFactory> {
    loader: L,
    surfaces: F,
    timeout: Duration,
}

impl AvatarRenderer {
    pub fn new() -> Result<Self, AvatarError> {
        Ok(Self::with_parts(
            HttpTextureLoader::new()?,
            PixelSurfaceFactory::default(),
        ))
    }
}

impl<L, F> AvatarRenderer<L, F>
where
    L: TextureLoader,
    F: SurfaceFactory + Clone + Send + 'static,
{
    pub fn with_parts(loader: L, surfaces: F) -> Self {
        Self {
            loader,
            surfaces,
            timeout: DEFAULT_TEXTURE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches and decodes a skin. The whole wait, decode included, is
    /// bounded by the renderer timeout.
    pub async fn load_texture(&self, source: &ImageSource) -> Result<SkinTexture, AvatarError> {
        self.bounded(source, async {
            let bytes = self.loader.fetch(source).await?;
            run_blocking(move || SkinTexture::decode(&bytes)).await
        })
        .await
    }

    pub async fn render_avatar(
        &self,
        source: &ImageSource,
        size: u32,
    ) -> Result<EncodedAvatar, AvatarError> {
        validate_output_size(size)?;
        let surfaces = self.surfaces.clone();
        let (avatar, scale) = self
            .bounded(source, async {
                let bytes = self.loader.fetch(source).await?;
                run_blocking(move || {
                    let texture = SkinTexture::decode(&bytes)?;
                    let avatar = composite_avatar(&texture, size, &surfaces)?;
                    Ok((avatar, texture.scale()))
                })
                .await
            })
            .await?;
        log::debug!(
            "Avatar {size}x{size} generado desde {} (escala {scale})",
            source.describe()
        );
        Ok(avatar)
    }

    /// Renders every source concurrently; one failure does not affect the rest.
    pub async fn render_many(
        &self,
        sources: &[ImageSource],
        size: u32,
    ) -> Vec<Result<EncodedAvatar, AvatarError>> {
        join_all(sources.iter().map(|source| self.render_avatar(source, size))).await
    }

    async fn bounded<T>(
        &self,
        source: &ImageSource,
        work: impl Future<Output = Result<T, AvatarError>>,
    ) -> Result<T, AvatarError> {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "Tiempo de espera agotado cargando textura {}",
                    source.describe()
                );
                Err(AvatarError::TimedOut(self.timeout))
            }
        }
    }
}

/// Decoding and compositing are CPU bound; they run on the blocking pool so
/// the async workers stay free. A timed out job finishes in the background
/// and its result is dropped.
async fn run_blocking<T, W>(work: W) -> Result<T, AvatarError>
where
    T: Send + 'static,
    W: FnOnce() -> Result<T, AvatarError> + Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        AvatarError::ImageDecodeFailed(format!("La tarea de decodificación falló: {err}"))
    })?
}
