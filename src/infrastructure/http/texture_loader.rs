use std::{future::Future, path::PathBuf, time::Duration};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs;

use crate::domain::avatar::AvatarError;

/// Skins larger than this are not Minecraft skins.
pub const MAX_TEXTURE_BYTES: u64 = 5 * 1024 * 1024;

/// Prefixes `convertFileSrc` produces for local files served through the
/// asset protocol (`asset://` on Linux/macOS, `http(s)://asset.localhost` on
/// Windows). The rest is the percent-encoded path.
const ASSET_PREFIXES: [&str; 3] = [
    "asset://localhost/",
    "http://asset.localhost/",
    "https://asset.localhost/",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    Path(PathBuf),
    DataUrl(String),
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Classifies a frontend `src` string the way an `<img>` would resolve it.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("data:") {
            return Self::DataUrl(trimmed.to_string());
        }
        if let Some(encoded) = ASSET_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
        {
            let path = urlencoding::decode(encoded)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| encoded.to_string());
            return Self::Path(PathBuf::from(path));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self::Url(trimmed.to_string());
        }
        let path = trimmed.strip_prefix("file://").unwrap_or(trimmed);
        Self::Path(PathBuf::from(path))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => path.display().to_string(),
            Self::DataUrl(_) => "data URL".to_string(),
            Self::Bytes(bytes) => format!("{} bytes en memoria", bytes.len()),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Resolves an [`ImageSource`] to raw (still encoded) texture bytes.
pub trait TextureLoader {
    fn fetch(
        &self,
        source: &ImageSource,
    ) -> impl Future<Output = Result<Vec<u8>, AvatarError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTextureLoader {
    client: Client,
    max_bytes: u64,
}

pub fn build_texture_client() -> Result<Client, AvatarError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent("ConicLauncher/0.1")
        .build()
        .map_err(|err| {
            AvatarError::ImageDecodeFailed(format!("No se pudo crear cliente HTTP: {err}"))
        })
}

impl HttpTextureLoader {
    pub fn new() -> Result<Self, AvatarError> {
        Ok(Self::with_client(build_texture_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            max_bytes: MAX_TEXTURE_BYTES,
        }
    }

    fn ensure_within_limit(&self, len: u64, origin: &str) -> Result<(), AvatarError> {
        if len > self.max_bytes {
            return Err(AvatarError::ImageDecodeFailed(format!(
                "La textura {origin} excede el tamaño máximo permitido ({len} bytes)"
            )));
        }
        Ok(())
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, AvatarError> {
        let response = self.client.get(url).send().await.map_err(|err| {
            AvatarError::ImageDecodeFailed(format!("Falló la petición de textura {url}: {err}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AvatarError::ImageDecodeFailed(format!(
                "HTTP {status} al descargar textura {url}"
            )));
        }
        if let Some(len) = response.content_length() {
            self.ensure_within_limit(len, url)?;
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(next_chunk) = stream.next().await {
            let chunk = next_chunk.map_err(|err| {
                AvatarError::ImageDecodeFailed(format!("Error leyendo textura {url}: {err}"))
            })?;
            bytes.extend_from_slice(&chunk);
            self.ensure_within_limit(bytes.len() as u64, url)?;
        }
        Ok(bytes)
    }

    async fn fetch_path(&self, path: &std::path::Path) -> Result<Vec<u8>, AvatarError> {
        let metadata = fs::metadata(path).await.map_err(|err| {
            AvatarError::ImageDecodeFailed(format!(
                "No se pudo abrir textura {}: {err}",
                path.display()
            ))
        })?;
        self.ensure_within_limit(metadata.len(), &path.display().to_string())?;

        fs::read(path).await.map_err(|err| {
            AvatarError::ImageDecodeFailed(format!(
                "No se pudo leer textura {}: {err}",
                path.display()
            ))
        })
    }
}

impl TextureLoader for HttpTextureLoader {
    async fn fetch(&self, source: &ImageSource) -> Result<Vec<u8>, AvatarError> {
        let bytes = match source {
            ImageSource::Url(url) => self.fetch_url(url).await?,
            ImageSource::Path(path) => self.fetch_path(path).await?,
            ImageSource::DataUrl(raw) => decode_data_url(raw)?,
            ImageSource::Bytes(bytes) => bytes.clone(),
        };
        self.ensure_within_limit(bytes.len() as u64, &source.describe())?;
        Ok(bytes)
    }
}

/// `data:[<mime>][;base64],<payload>`
pub fn decode_data_url(raw: &str) -> Result<Vec<u8>, AvatarError> {
    let body = raw
        .strip_prefix("data:")
        .ok_or_else(|| {
            AvatarError::ImageDecodeFailed("El data URL no empieza con data:".to_string())
        })?;
    let (header, payload) = body
        .split_once(',')
        .ok_or_else(|| {
            AvatarError::ImageDecodeFailed("El data URL no tiene contenido".to_string())
        })?;

    if header.split(';').any(|part| part.eq_ignore_ascii_case("base64")) {
        STANDARD
            .decode(payload.trim())
            .map_err(|err| {
                AvatarError::ImageDecodeFailed(format!("Base64 inválido en data URL: {err}"))
            })
    } else {
        Ok(urlencoding::decode_binary(payload.as_bytes()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classifies_sources() {
        assert_eq!(
            ImageSource::parse("https://textures.minecraft.net/texture/abc"),
            ImageSource::Url("https://textures.minecraft.net/texture/abc".to_string())
        );
        assert_eq!(
            ImageSource::parse("file:///tmp/skin.png"),
            ImageSource::Path(PathBuf::from("/tmp/skin.png"))
        );
        assert!(matches!(
            ImageSource::parse("data:image/png;base64,AQID"),
            ImageSource::DataUrl(_)
        ));
    }

    #[test]
    fn asset_protocol_urls_resolve_to_local_paths() {
        assert_eq!(
            ImageSource::parse("asset://localhost/%2Fhome%2Fana%2Fskins%2Fsteve.png"),
            ImageSource::Path(PathBuf::from("/home/ana/skins/steve.png"))
        );
        assert_eq!(
            ImageSource::parse("http://asset.localhost/C%3A%5CSkins%5Calex.png"),
            ImageSource::Path(PathBuf::from("C:\\Skins\\alex.png"))
        );
        assert_eq!(
            ImageSource::parse("https://textures.minecraft.net/texture/abc"),
            ImageSource::Url("https://textures.minecraft.net/texture/abc".to_string())
        );
    }

    #[test]
    fn data_urls_decode_base64_and_percent_payloads() {
        assert_eq!(decode_data_url("data:image/png;base64,AQID").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode_data_url("data:,a%20b").unwrap(), b"a b".to_vec());
        assert!(decode_data_url("data:image/png;base64").is_err());
    }

    #[tokio::test]
    async fn reads_textures_from_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("skin.png");
        std::fs::write(&path, [9, 8, 7]).unwrap();
        let loader = HttpTextureLoader::new().unwrap();

        let bytes = loader.fetch(&ImageSource::Path(path)).await.unwrap();

        assert_eq!(bytes, vec![9, 8, 7]);
    }

    #[tokio::test]
    async fn missing_file_is_a_decode_failure() {
        let temp = tempfile::tempdir().unwrap();
        let loader = HttpTextureLoader::new().unwrap();

        let err = loader
            .fetch(&ImageSource::Path(temp.path().join("nope.png")))
            .await
            .unwrap_err();

        assert!(matches!(err, AvatarError::ImageDecodeFailed(_)));
    }

    #[tokio::test]
    async fn oversized_in_memory_payload_is_rejected() {
        let loader = HttpTextureLoader {
            client: Client::new(),
            max_bytes: 4,
        };

        let err = loader
            .fetch(&ImageSource::Bytes(vec![0; 5]))
            .await
            .unwrap_err();

        assert!(matches!(err, AvatarError::ImageDecodeFailed(_)));
    }
}
