use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("No se pudo cargar o decodificar la textura de skin: {0}")]
    ImageDecodeFailed(String),

    #[error("No se pudo crear la superficie de dibujo: {0}")]
    SurfaceUnavailable(String),

    #[error("No se pudo codificar el avatar como PNG: {0}")]
    EncodeFailed(String),

    #[error(
        "Dimensiones de textura no soportadas {width}x{height}. \
         El ancho debe ser múltiplo de 64 y no mayor que 2048"
    )]
    UnsupportedTextureDimensions { width: u32, height: u32 },

    #[error("Tamaño de avatar inválido: {0}")]
    InvalidOutputSize(u32),

    #[error("Tiempo de espera agotado cargando la textura ({0:?})")]
    TimedOut(Duration),
}

impl AvatarError {
    /// Errors after which showing the default avatar is the right move, as
    /// opposed to retrying the same source.
    pub fn wants_placeholder(&self) -> bool {
        matches!(
            self,
            AvatarError::ImageDecodeFailed(_) | AvatarError::UnsupportedTextureDimensions { .. }
        )
    }
}

impl From<AvatarError> for String {
    fn from(err: AvatarError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bad_textures_want_a_placeholder() {
        assert!(AvatarError::ImageDecodeFailed("x".into()).wants_placeholder());
        assert!(AvatarError::UnsupportedTextureDimensions {
            width: 100,
            height: 100
        }
        .wants_placeholder());
        assert!(!AvatarError::EncodeFailed("x".into()).wants_placeholder());
        assert!(!AvatarError::SurfaceUnavailable("x".into()).wants_placeholder());
        assert!(!AvatarError::TimedOut(Duration::from_secs(1)).wants_placeholder());
    }

    #[test]
    fn encode_failures_are_not_reported_as_missing_surfaces() {
        let message = String::from(AvatarError::EncodeFailed("disco lleno".into()));

        assert!(message.starts_with("No se pudo codificar el avatar como PNG"));
        assert!(message.ends_with("disco lleno"));
    }
}
