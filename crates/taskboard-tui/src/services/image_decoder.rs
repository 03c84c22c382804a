use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use taskboard_core::{TaskboardError, TaskboardResult};

/// One file read into an inline data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub name: String,
    pub data_uri: String,
}

/// Turns a picked file into something an image attachment can hold.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    async fn decode(&self, path: &Path) -> TaskboardResult<DecodedImage>;
}

/// Reads files from disk and base64-encodes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDataUriDecoder;

impl FileDataUriDecoder {
    /// Media type guessed from the extension, as the file picker would report it.
    pub fn media_type(path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            Some("avif") => "image/avif",
            _ => "application/octet-stream",
        }
    }

    pub fn encode(media_type: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
    }
}

#[async_trait]
impl ImageDecoder for FileDataUriDecoder {
    async fn decode(&self, path: &Path) -> TaskboardResult<DecodedImage> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| TaskboardError::Decode {
                name: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Decoded {} ({} bytes)", path.display(), bytes.len());
        Ok(DecodedImage {
            data_uri: Self::encode(Self::media_type(path), &bytes),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_media_type_by_extension() {
        assert_eq!(FileDataUriDecoder::media_type(Path::new("a.PNG")), "image/png");
        assert_eq!(FileDataUriDecoder::media_type(Path::new("b.jpeg")), "image/jpeg");
        assert_eq!(
            FileDataUriDecoder::media_type(Path::new("notes")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_decode_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pixel.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let image = FileDataUriDecoder.decode(&path).await.unwrap();
        assert_eq!(image.name, "pixel.gif");
        assert_eq!(image.data_uri, "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn test_missing_file_is_decode_error() {
        let dir = tempdir().unwrap();
        let err = FileDataUriDecoder
            .decode(&dir.path().join("gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskboardError::Decode { .. }));
    }
}
