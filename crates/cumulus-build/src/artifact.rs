//! Built artifact loading

use crate::error::{BuildError, Result};
use std::path::Path;

/// Read a built archive from disk for upload. A missing file is
/// reported with its path rather than the raw IO error.
pub async fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(BuildError::ArtifactNotFound(path.to_path_buf()));
    }
    tracing::debug!(path = %path.display(), "reading artifact");
    Ok(tokio::fs::read(path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_existing_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("artifact.zip");
        std::fs::write(&path, b"zip bytes").unwrap();

        let body = read_artifact(&path).await.unwrap();
        assert_eq!(body, b"zip bytes");
    }

    #[tokio::test]
    async fn missing_artifact_names_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.zip");

        let err = read_artifact(&path).await.unwrap_err();
        assert!(matches!(err, BuildError::ArtifactNotFound(p) if p == path));
    }
}
