//! Reading selected files from disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use brainrot_models::MaterialFile;

/// Read one file into an upload entry named after its file name.
pub async fn read_material(path: &Path) -> Result<MaterialFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file: {}", path.display()))?;
    Ok(MaterialFile::new(name, bytes))
}

/// Read files in the given order.
pub async fn read_materials(paths: &[PathBuf]) -> Result<Vec<MaterialFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_material(path).await?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let file = read_material(&path).await.unwrap();

        assert_eq!(file.name, "lecture.pdf");
        assert_eq!(file.bytes, b"%PDF-1.4");
        assert_eq!(file.content_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = read_materials(&[path]).await.unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
