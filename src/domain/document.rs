//! Uploaded document descriptors and the limits applied to them.

use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

/// Kind of document attached to a registration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Cv,
    Photo,
}

impl DocumentKind {
    /// Largest accepted upload, in bytes.
    pub const fn max_bytes(self) -> u64 {
        match self {
            DocumentKind::Cv => 5 * MIB,
            DocumentKind::Photo => 2 * MIB,
        }
    }

    /// Size ceiling as shown to users.
    pub const fn max_label(self) -> &'static str {
        match self {
            DocumentKind::Cv => "5MB",
            DocumentKind::Photo => "2MB",
        }
    }

    /// MIME types accepted for this kind of document.
    pub const fn accepted_mime_types(self) -> &'static [&'static str] {
        match self {
            DocumentKind::Cv => &[
                "application/pdf",
                "application/msword",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ],
            DocumentKind::Photo => &["image/jpeg", "image/jpg", "image/png", "image/gif"],
        }
    }

    /// Form field carrying this document.
    pub const fn field_name(self) -> &'static str {
        match self {
            DocumentKind::Cv => "cv_file",
            DocumentKind::Photo => "photo_file",
        }
    }

    /// Sub-directory of the upload root where stored files land.
    pub const fn directory(self) -> &'static str {
        match self {
            DocumentKind::Cv => "trainer-files/cv",
            DocumentKind::Photo => "trainer-files/photos",
        }
    }

    pub fn accepts_mime(self, mime_type: &str) -> bool {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        self.accepted_mime_types().contains(&mime_type.as_str())
    }
}

/// Metadata describing a file selected by the user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMeta {
    pub file_name: String,
    pub size: u64,
    pub mime_type: String,
}

impl DocumentMeta {
    pub fn new(file_name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

/// Formats a byte count the way upload widgets do (`1.5 MB`).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}
