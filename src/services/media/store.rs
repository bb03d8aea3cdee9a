/*
 * Responsibility
 * - asset 永続化の seam (MediaStore trait) と filesystem 実装
 * - 衝突しない storage name の生成 (uuid + sanitize)
 * - remove は末尾の file name だけを解決する (path traversal 防止)
 */
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Public path prefix under which stored assets are served. Storage paths
/// returned by [`MediaStore::put`] read `<prefix>/<name>`.
pub const PUBLIC_PREFIX: &str = "images";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid storage path: {0}")]
    InvalidPath(String),
}

/// Persistence seam for binary assets.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write `bytes` under `name` and return the public storage path.
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, StoreError>;

    /// Delete the asset behind a previously returned storage path.
    async fn remove(&self, storage_path: &str) -> Result<(), StoreError>;
}

/// Local-filesystem store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    // `storage_path` is client-supplied on the replace path; only its trailing
    // file name is resolved, so it can never reach outside `root`.
    fn resolve(&self, storage_path: &str) -> Result<PathBuf, StoreError> {
        let name = Path::new(storage_path)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::InvalidPath(storage_path.to_string()))?;

        Ok(self.root.join(name))
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, StoreError> {
        tokio::fs::write(self.root.join(name), bytes).await?;
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }

    async fn remove(&self, storage_path: &str) -> Result<(), StoreError> {
        let path = self.resolve(storage_path)?;
        tokio::fs::remove_file(path).await?;
        Ok(())
    }
}

/// Collision-free storage name: `<uuid-v4>-<sanitized original name>`.
///
/// Uniqueness comes from the random token alone; the original name is kept
/// only for operator readability and never contributes path structure.
pub fn unique_name(original_name: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), sanitize(original_name))
}

// Keep the trailing name component and a conservative character set.
fn sanitize(original_name: &str) -> String {
    let Some(base) = Path::new(original_name).file_name().and_then(|n| n.to_str()) else {
        return "file".to_string();
    };

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_under_root_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path().to_path_buf());

        let path = store.put("abc.png", b"payload").await.unwrap();

        assert_eq!(path, "images/abc.png");
        let on_disk = tokio::fs::read(dir.path().join("abc.png")).await.unwrap();
        assert_eq!(on_disk, b"payload");
    }

    #[tokio::test]
    async fn remove_deletes_a_stored_asset() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path().to_path_buf());

        let path = store.put("abc.png", b"payload").await.unwrap();
        store.remove(&path).await.unwrap();

        assert!(!dir.path().join("abc.png").exists());
    }

    #[tokio::test]
    async fn remove_only_resolves_the_trailing_file_name() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("media");
        tokio::fs::create_dir_all(&root).await.unwrap();
        tokio::fs::write(outer.path().join("secret.txt"), b"keep")
            .await
            .unwrap();

        let store = FsMediaStore::new(root);
        // Resolves to <root>/secret.txt, which does not exist.
        assert!(store.remove("../secret.txt").await.is_err());

        assert!(outer.path().join("secret.txt").exists());
    }

    #[tokio::test]
    async fn remove_refuses_an_empty_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path().to_path_buf());

        assert!(matches!(
            store.remove("").await,
            Err(StoreError::InvalidPath(_))
        ));
    }

    #[test]
    fn unique_name_differs_for_identical_originals() {
        assert_ne!(unique_name("cat.png"), unique_name("cat.png"));
    }

    #[test]
    fn unique_name_keeps_a_readable_suffix() {
        assert!(unique_name("cat.png").ends_with("-cat.png"));
    }

    #[test]
    fn unique_name_strips_client_path_structure() {
        let name = unique_name("../../evil name.png");

        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
        assert!(name.ends_with("-evil_name.png"));
    }
}
