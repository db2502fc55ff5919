//! In-memory storage implementations.

use super::{AssetId, BlobStore, BoxFuture, DocumentStore, StorageError, StorageResult, board_key};
use crate::document::SceneDocument;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory board storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, SceneDocument>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored boards.
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryStorage {
    fn load_board(
        &self,
        user_id: &str,
        board_id: &str,
    ) -> BoxFuture<'_, StorageResult<Option<SceneDocument>>> {
        let key = board_key(user_id, board_id);
        Box::pin(async move {
            let docs = self
                .documents
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(docs.get(&key).cloned())
        })
    }

    fn save_board(
        &self,
        user_id: &str,
        board_id: &str,
        document: &SceneDocument,
    ) -> BoxFuture<'_, StorageResult<()>> {
        let key = board_key(user_id, board_id);
        let document = document.clone();
        Box::pin(async move {
            let mut docs = self
                .documents
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            docs.insert(key, document);
            Ok(())
        })
    }
}

/// In-memory image hosting.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<AssetId, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn upload_image(&self, bytes: Vec<u8>) -> BoxFuture<'_, StorageResult<AssetId>> {
        Box::pin(async move {
            if bytes.is_empty() {
                return Err(StorageError::Upload("empty image".to_string()));
            }
            let id = Uuid::new_v4().to_string();
            let mut blobs = self
                .blobs
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            blobs.insert(id.clone(), bytes);
            Ok(id)
        })
    }

    fn fetch(&self, asset_id: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
        let asset_id = asset_id.to_string();
        Box::pin(async move {
            let blobs = self
                .blobs
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            blobs
                .get(&asset_id)
                .cloned()
                .ok_or(StorageError::NotFound(asset_id))
        })
    }

    fn asset_url(&self, asset_id: &str) -> String {
        format!("memory://assets/{}", asset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let doc = SceneDocument::from_json(r#"{"notes":[{"text":"n","x":0,"y":0}]}"#).unwrap();

        block_on(storage.save_board("alice", "default", &doc)).unwrap();
        let loaded = block_on(storage.load_board("alice", "default")).unwrap();

        assert_eq!(loaded, Some(doc));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_missing_board_is_none() {
        let storage = MemoryStorage::new();
        let loaded = block_on(storage.load_board("bob", "default")).unwrap();
        assert!(loaded.is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_boards_are_per_user() {
        let storage = MemoryStorage::new();
        let doc = SceneDocument::new();
        block_on(storage.save_board("alice", "default", &doc)).unwrap();
        assert!(block_on(storage.load_board("bob", "default")).unwrap().is_none());
    }

    #[test]
    fn test_blob_roundtrip() {
        let blobs = MemoryBlobStore::new();
        let id = block_on(blobs.upload_image(vec![1, 2, 3])).unwrap();
        assert_eq!(block_on(blobs.fetch(&id)).unwrap(), vec![1, 2, 3]);
        assert!(blobs.asset_url(&id).ends_with(&id));
    }

    #[test]
    fn test_blob_errors() {
        let blobs = MemoryBlobStore::new();
        assert!(matches!(
            block_on(blobs.upload_image(Vec::new())),
            Err(StorageError::Upload(_))
        ));
        assert!(matches!(
            block_on(blobs.fetch("nope")),
            Err(StorageError::NotFound(_))
        ));
    }
}
