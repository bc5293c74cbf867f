//! User-selected input files.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input category of a selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// The assignment the videos should explain
    Assignment,
    /// Supporting learning materials (slides, notes, pages)
    Material,
}

impl FileCategory {
    /// Multipart form field the backend expects for this category.
    pub fn field_name(&self) -> &'static str {
        match self {
            FileCategory::Assignment => "assignment_files",
            FileCategory::Material => "material_files",
        }
    }
}

/// A file picked by the user, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct MaterialFile {
    /// File name including extension
    pub name: String,
    /// MIME type sent with the multipart part
    pub content_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl MaterialFile {
    /// Create a file from its name and contents; the MIME type is guessed
    /// from the extension.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).to_string();
        Self {
            name,
            content_type,
            bytes,
        }
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lower-cased extension with leading dot, e.g. `.pdf`.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    /// Size in megabytes with two decimals, e.g. `1.25 MB`.
    pub fn size_label(&self) -> String {
        format_megabytes(self.size_bytes())
    }
}

impl fmt::Debug for MaterialFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}

/// Format a byte count as megabytes with two decimals.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

fn content_type_for(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some(".pdf") => "application/pdf",
        Some(".doc") => "application/msword",
        Some(".docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some(".ppt") => "application/vnd.ms-powerpoint",
        Some(".pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some(".txt") => "text/plain",
        Some(".jpg") | Some(".jpeg") => "image/jpeg",
        Some(".png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        let file = MaterialFile::new("Lecture 3.PDF", vec![1, 2, 3]);
        assert_eq!(file.extension().as_deref(), Some(".pdf"));
        assert_eq!(file.content_type, "application/pdf");
    }

    #[test]
    fn test_missing_extension() {
        assert_eq!(MaterialFile::new("README", vec![]).extension(), None);
        assert_eq!(MaterialFile::new(".bashrc", vec![]).extension(), None);
        assert_eq!(
            MaterialFile::new("notes.unknown", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_size_label() {
        let file = MaterialFile::new("slides.pptx", vec![0; 1024 * 1024 + 512 * 1024]);
        assert_eq!(file.size_label(), "1.50 MB");
        assert_eq!(format_megabytes(0), "0.00 MB");
    }

    #[test]
    fn test_field_names() {
        assert_eq!(FileCategory::Material.field_name(), "material_files");
        assert_eq!(FileCategory::Assignment.field_name(), "assignment_files");
    }

    #[test]
    fn test_debug_omits_contents() {
        let file = MaterialFile::new("a.txt", b"secret".to_vec());
        let debug = format!("{:?}", file);
        assert!(debug.contains("size_bytes: 6"));
        assert!(!debug.contains("secret"));
    }
}
