use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use pictor_blob::error::BlobError;
use pictor_blob::store::BlobStore;
use pictor_blob::types::StoredBlob;

/// Pure naming function: client filename in, stored name out.
///
/// Injected so naming is unit-testable without touching the disk.
pub type Namer = dyn Fn(&str) -> String + Send + Sync;

/// Filesystem-backed [`BlobStore`].
///
/// Blobs live as flat files under a fixed root directory, addressed by their
/// stored name. Writes go to a dot-prefixed temp file first and are renamed
/// into place, so a crash or client disconnect mid-write never leaves a
/// partially-written file resolvable under its final name.
pub struct FsBlobStore {
    root: PathBuf,
    namer: Arc<Namer>,
}

impl FsBlobStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// Uses the default naming scheme from [`pictor_core::stored_name`].
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, BlobError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| BlobError::Storage(format!("creating {}: {e}", root.display())))?;

        Ok(Self {
            root,
            namer: Arc::new(|original: &str| pictor_core::stored_name(original)),
        })
    }

    /// Replace the naming function.
    #[must_use]
    pub fn with_namer(mut self, namer: Arc<Namer>) -> Self {
        self.namer = namer;
        self
    }

    /// The storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a stored name to its path, refusing names that could escape
    /// the root. Stored names are server-generated flat filenames; anything
    /// with separators or a leading dot is a caller bug.
    fn resolve(&self, stored_name: &str) -> Result<PathBuf, BlobError> {
        if stored_name.is_empty()
            || stored_name.starts_with('.')
            || stored_name.contains(['/', '\\'])
        {
            return Err(BlobError::InvalidName(stored_name.to_owned()));
        }
        Ok(self.root.join(stored_name))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, original_name: &str, data: Bytes) -> Result<StoredBlob, BlobError> {
        let stored_name = (self.namer)(original_name);
        let final_path = self.resolve(&stored_name)?;
        let tmp_path = self.root.join(format!(".{stored_name}.tmp"));

        let write_result = async {
            let mut file = fs::File::create(&tmp_path)
                .await
                .map_err(|e| BlobError::Storage(format!("creating temp file: {e}")))?;
            file.write_all(&data)
                .await
                .map_err(|e| BlobError::Storage(format!("writing blob: {e}")))?;
            file.sync_all()
                .await
                .map_err(|e| BlobError::Storage(format!("syncing blob: {e}")))?;
            fs::rename(&tmp_path, &final_path)
                .await
                .map_err(|e| BlobError::Storage(format!("renaming blob into place: {e}")))
        }
        .await;

        if let Err(e) = write_result {
            // The temp file is not addressable as valid content, but don't
            // leave it behind either.
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %tmp_path.display(),
                        error = %cleanup,
                        "failed to remove temp file after aborted blob write"
                    );
                }
            }
            return Err(e);
        }

        Ok(StoredBlob {
            stored_name,
            storage_path: final_path.display().to_string(),
            size_bytes: data.len() as u64,
        })
    }

    async fn get(&self, stored_name: &str) -> Result<Option<Bytes>, BlobError> {
        let path = self.resolve(stored_name)?;
        match fs::read(&path).await {
            Ok(contents) => Ok(Some(Bytes::from(contents))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlobError::Storage(format!(
                "reading {}: {e}",
                path.display()
            ))),
        }
    }

    async fn delete(&self, stored_name: &str) -> Result<bool, BlobError> {
        let path = self.resolve(stored_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BlobError::Storage(format!(
                "deleting {}: {e}",
                path.display()
            ))),
        }
    }
}
