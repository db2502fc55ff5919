//! File-based storage for native platforms.

use super::{AssetId, BlobStore, BoxFuture, DocumentStore, StorageError, StorageResult};
use crate::document::SceneDocument;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

fn ensure_dir(path: &Path) -> StorageResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            StorageError::Io(format!("Failed to create directory {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}

/// Make an id safe to use as a single path component.
fn sanitize(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if safe.is_empty() { "_".to_string() } else { safe }
}

/// Application data directory, e.g. `~/.local/share/pinboard` on Linux.
pub(crate) fn default_data_dir() -> StorageResult<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
    Ok(base.join("pinboard"))
}

/// Board storage as JSON files.
///
/// Layout: `<base>/users/<user>/whiteboards/<board>.json`.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        ensure_dir(&base_path)?;
        Ok(Self { base_path })
    }

    /// Storage under the platform data directory.
    pub fn default_location() -> StorageResult<Self> {
        Self::new(default_data_dir()?.join("boards"))
    }

    fn board_path(&self, user_id: &str, board_id: &str) -> PathBuf {
        self.base_path
            .join("users")
            .join(sanitize(user_id))
            .join("whiteboards")
            .join(format!("{}.json", sanitize(board_id)))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl DocumentStore for FileStorage {
    fn load_board(
        &self,
        user_id: &str,
        board_id: &str,
    ) -> BoxFuture<'_, StorageResult<Option<SceneDocument>>> {
        let path = self.board_path(user_id, board_id);
        Box::pin(async move {
            if !path.exists() {
                return Ok(None);
            }
            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;
            SceneDocument::from_json(&json).map(Some).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn save_board(
        &self,
        user_id: &str,
        board_id: &str,
        document: &SceneDocument,
    ) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.board_path(user_id, board_id);
        let json = document.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            if let Some(parent) = path.parent() {
                ensure_dir(parent)?;
            }
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }
}

/// Image hosting in a local directory.
pub struct FileBlobStore {
    base_path: PathBuf,
}

impl FileBlobStore {
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        ensure_dir(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn default_location() -> StorageResult<Self> {
        Self::new(default_data_dir()?.join("assets"))
    }

    fn asset_path(&self, asset_id: &str) -> PathBuf {
        self.base_path.join(sanitize(asset_id))
    }
}

impl BlobStore for FileBlobStore {
    fn upload_image(&self, bytes: Vec<u8>) -> BoxFuture<'_, StorageResult<AssetId>> {
        Box::pin(async move {
            if bytes.is_empty() {
                return Err(StorageError::Upload("empty image".to_string()));
            }
            let id = Uuid::new_v4().to_string();
            let path = self.asset_path(&id);
            fs::write(&path, bytes).map_err(|e| {
                StorageError::Upload(format!("Failed to write {}: {}", path.display(), e))
            })?;
            Ok(id)
        })
    }

    fn fetch(&self, asset_id: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
        let path = self.asset_path(asset_id);
        let asset_id = asset_id.to_string();
        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(asset_id));
            }
            fs::read(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })
        })
    }

    fn asset_url(&self, asset_id: &str) -> String {
        format!("file://{}", self.asset_path(asset_id).display())
    }
}
