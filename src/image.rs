use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::{Error, Result, types::ImageMimeType};

/// Base64 encoded image ready to be sent as inline data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub base64_data: String,
    pub mime_type: ImageMimeType,
}

impl ImageAsset {
    /// Wraps data that is already base64 encoded
    pub fn new(base64_data: impl Into<String>, mime_type: ImageMimeType) -> Self {
        Self {
            base64_data: base64_data.into(),
            mime_type,
        }
    }

    pub fn from_bytes(bytes: impl AsRef<[u8]>, mime_type: ImageMimeType) -> Self {
        Self::new(general_purpose::STANDARD.encode(bytes), mime_type)
    }

    /// Reads an image file, inferring its type from the extension
    ///
    /// Fails with [Error::NotFound] when nothing exists at `path` and with
    /// [Error::UnsupportedFormat] when the extension is not a supported image type.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = check_path(path)?;
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(bytes, mime_type))
    }

    /// [ImageAsset::load] on the tokio file system
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await? {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let mime_type = mime_type_for(path)?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(bytes, mime_type))
    }
}

fn check_path(path: &Path) -> Result<ImageMimeType> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    mime_type_for(path)
}

fn mime_type_for(path: &Path) -> Result<ImageMimeType> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    ImageMimeType::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: extension.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

    #[test]
    fn png_round_trips_through_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, PNG_BYTES).unwrap();

        let asset = ImageAsset::load(&path).unwrap();
        assert_eq!(asset.mime_type, ImageMimeType::Png);
        let decoded = general_purpose::STANDARD
            .decode(&asset.base64_data)
            .unwrap();
        assert_eq!(decoded, PNG_BYTES);
    }

    #[test]
    fn bmp_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.bmp");
        std::fs::write(&path, b"BM").unwrap();

        let err = ImageAsset::load(&path).unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedFormat { ref extension, .. } if extension == "bmp"),
            "{err:?}"
        );
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image");
        std::fs::write(&path, PNG_BYTES).unwrap();

        assert!(matches!(
            ImageAsset::load(&path),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.png");

        let err = ImageAsset::load(&path).unwrap_err();
        assert!(matches!(err, Error::NotFound(ref missing) if *missing == path));
    }

    #[test]
    fn uppercase_jpg_maps_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.JPG");
        std::fs::write(&path, [0xffu8, 0xd8, 0xff]).unwrap();

        let asset = ImageAsset::load(&path).unwrap();
        assert_eq!(asset.mime_type, ImageMimeType::Jpeg);
        assert_eq!(asset.base64_data, "/9j/");
    }

    #[tokio::test]
    async fn async_load_matches_sync_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.webp");
        std::fs::write(&path, PNG_BYTES).unwrap();

        let asset = ImageAsset::load_async(&path).await.unwrap();
        assert_eq!(asset, ImageAsset::load(&path).unwrap());

        let missing = dir.path().join("gone.webp");
        assert!(matches!(
            ImageAsset::load_async(&missing).await,
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn from_bytes_encodes_standard_base64() {
        let asset = ImageAsset::from_bytes(b"hello", ImageMimeType::Heic);
        assert_eq!(asset.base64_data, "aGVsbG8=");
        assert_eq!(asset.mime_type, ImageMimeType::Heic);
    }
}
