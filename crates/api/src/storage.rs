//! Backing files for game images.
//!
//! Files live flat in one directory (served at `/images`) under a
//! store-assigned name; the `images` table records that name.

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;

/// An uploaded file held in memory until the workflow decides to keep it.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name the client gave the file. Only its extension is used.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// A backing file could not be removed. Logged, never shown to the user.
#[derive(Debug, thiserror::Error)]
#[error("Failed to delete image file '{filename}': {source}")]
pub struct FileCleanupFailure {
    pub filename: String,
    #[source]
    pub source: io::Error,
}

/// Directory-backed image file storage.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
}

impl ImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a stored file.
    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Write an upload under a fresh name and return that name.
    pub async fn write(&self, upload: &UploadedFile) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;
        let filename = stored_filename(&upload.file_name, &upload.content_type);
        tokio::fs::write(self.path_of(&filename), &upload.bytes).await?;
        tracing::debug!(%filename, size = upload.bytes.len(), "Image file written");
        Ok(filename)
    }

    /// Delete a stored file. A file that is already gone counts as deleted.
    pub async fn remove(&self, filename: &str) -> Result<(), FileCleanupFailure> {
        if !is_plain_filename(filename) {
            return Err(FileCleanupFailure {
                filename: filename.to_string(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a plain file name"),
            });
        }
        match tokio::fs::remove_file(self.path_of(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(FileCleanupFailure {
                filename: filename.to_string(),
                source,
            }),
        }
    }
}

/// `<uuid>.<ext>`, taking the extension from the client's file name or,
/// failing that, from the content type.
fn stored_filename(original: &str, content_type: &str) -> String {
    let from_name = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let from_type = content_type
        .split_once('/')
        .map(|(_, sub)| sub.split(['+', ';']).next().unwrap_or(sub).to_ascii_lowercase());

    let ext = from_name
        .into_iter()
        .chain(from_type)
        .find(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());

    format!("{}.{ext}", uuid::Uuid::new_v4().simple())
}

fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.into(),
            content_type: content_type.into(),
            bytes: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[test]
    fn extension_from_file_name() {
        let name = stored_filename("cover.PNG", "image/png");
        assert!(name.ends_with(".png"), "{name}");
        assert_eq!(name.len(), 32 + 4);
    }

    #[test]
    fn extension_from_content_type_when_name_has_none() {
        assert!(stored_filename("cover", "image/svg+xml").ends_with(".svg"));
    }

    #[test]
    fn hostile_extension_is_ignored() {
        assert!(stored_filename("x.p/../ng", "application/octet-stream").ends_with(".bin"));
        assert!(stored_filename("a.<script>", "").ends_with(".bin"));
    }

    #[tokio::test]
    async fn write_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path().join("images"));

        let filename = storage.write(&upload("c.png", "image/png")).await.unwrap();
        assert!(storage.path_of(&filename).exists());

        storage.remove(&filename).await.unwrap();
        assert!(!storage.path_of(&filename).exists());
    }

    #[tokio::test]
    async fn removing_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());
        assert!(storage.remove("gone.png").await.is_ok());
    }

    #[tokio::test]
    async fn traversal_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());
        let err = storage.remove("../etc/passwd").await.unwrap_err();
        assert_eq!(err.source.kind(), io::ErrorKind::InvalidInput);
    }
}
