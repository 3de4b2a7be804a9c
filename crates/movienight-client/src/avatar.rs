use crate::error::ApiError;
use std::path::Path;

/// An image ready to be sent as the `file` field of `POST /upload/avatar`.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ApiError> {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name)?;
        Ok(Self { file_name, content_type, bytes })
    }

    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::UnsupportedAvatar(path.display().to_string()))?
            .to_string();
        // Check the type before reading a possibly large file
        let content_type = content_type_for(&file_name)?;
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { file_name, content_type, bytes })
    }
}

/// The backend accepts png, jpeg, webp and gif only
pub fn content_type_for(file_name: &str) -> Result<&'static str, ApiError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        _ => Err(ApiError::UnsupportedAvatar(file_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("me.PNG").unwrap(), "image/png");
        assert_eq!(content_type_for("me.jpeg").unwrap(), "image/jpeg");
        assert_eq!(content_type_for("me.jpg").unwrap(), "image/jpeg");
        assert!(matches!(content_type_for("me.bmp"), Err(ApiError::UnsupportedAvatar(_))));
        assert!(content_type_for("noext").is_err());
    }

    #[tokio::test]
    async fn test_from_path_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kim.webp");
        std::fs::write(&path, b"RIFF....WEBP").unwrap();

        let file = AvatarFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "kim.webp");
        assert_eq!(file.content_type, "image/webp");
        assert_eq!(file.bytes, b"RIFF....WEBP".to_vec());
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AvatarFile::from_path(&dir.path().join("gone.png")).await.unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
    }
}
