//! Persistence of uploaded CVs and photos.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::domain::document::{DocumentKind, DocumentMeta};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file type `{0}` is not accepted")]
    UnsupportedType(String),
    #[error("file exceeds {0}")]
    TooLarge(&'static str),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// A file received with a request and parked on local disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub meta: DocumentMeta,
    pub path: PathBuf,
}

/// Destination for accepted uploads.
pub trait UploadStore {
    /// Stores the file and returns its path relative to the upload root.
    fn save(&self, kind: DocumentKind, file: &UploadedFile) -> Result<String, StorageError>;
    /// Removes a previously stored file; missing files are ignored.
    fn discard(&self, stored_path: &str);
}

/// Stores uploads under a directory served at the uploads base URL.
#[derive(Clone, Debug)]
pub struct LocalUploadStore {
    root: PathBuf,
}

impl LocalUploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Picks a short lowercase extension from the original name or the MIME type.
fn file_extension(meta: &DocumentMeta) -> &'static str {
    let from_name = Path::new(&meta.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match from_name.as_deref() {
        Some("pdf") => "pdf",
        Some("doc") => "doc",
        Some("docx") => "docx",
        Some("jpg") | Some("jpeg") => "jpg",
        Some("png") => "png",
        Some("gif") => "gif",
        _ => match meta.mime_type.to_ascii_lowercase().as_str() {
            "application/pdf" => "pdf",
            "application/msword" => "doc",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            _ => "bin",
        },
    }
}

impl UploadStore for LocalUploadStore {
    fn save(&self, kind: DocumentKind, file: &UploadedFile) -> Result<String, StorageError> {
        if !kind.accepts_mime(&file.meta.mime_type) {
            return Err(StorageError::UnsupportedType(file.meta.mime_type.clone()));
        }
        if file.meta.size > kind.max_bytes() {
            return Err(StorageError::TooLarge(kind.max_label()));
        }

        let directory = self.root.join(kind.directory());
        fs::create_dir_all(&directory)?;

        let name = format!("{}.{}", Uuid::new_v4(), file_extension(&file.meta));
        fs::copy(&file.path, directory.join(&name))?;

        log::info!("Stored {} upload `{}` as {name}", kind.field_name(), file.meta.file_name);

        Ok(format!("{}/{name}", kind.directory()))
    }

    fn discard(&self, stored_path: &str) {
        let path = self.root.join(stored_path);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => log::error!("Failed to remove upload {}: {err}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parked(dir: &Path, name: &str, mime: &str, bytes: &[u8]) -> UploadedFile {
        let path = dir.join(format!("incoming-{name}"));
        fs::write(&path, bytes).unwrap();
        UploadedFile {
            meta: DocumentMeta::new(name, bytes.len() as u64, mime),
            path,
        }
    }

    #[test]
    fn saves_under_kind_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"));
        let file = parked(dir.path(), "CV Final.PDF", "application/pdf", b"%PDF-1.4");

        let stored = store.save(DocumentKind::Cv, &file).unwrap();

        assert!(stored.starts_with("trainer-files/cv/"));
        assert!(stored.ends_with(".pdf"));
        assert_eq!(fs::read(store.root().join(&stored)).unwrap(), b"%PDF-1.4");

        store.discard(&stored);
        assert!(!store.root().join(&stored).exists());
        store.discard(&stored);
    }

    #[test]
    fn rejects_wrong_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path());
        let file = parked(dir.path(), "me.bmp", "image/bmp", b"BM");

        assert!(matches!(
            store.save(DocumentKind::Photo, &file),
            Err(StorageError::UnsupportedType(_))
        ));
    }

    #[test]
    fn extension_falls_back_to_mime() {
        let meta = DocumentMeta::new("photo", 10, "image/png");
        assert_eq!(file_extension(&meta), "png");
        let meta = DocumentMeta::new("script.sh", 10, "text/plain");
        assert_eq!(file_extension(&meta), "bin");
    }
}
