//! Storage abstraction for persistence.
//!
//! Two collaborators sit behind traits: a document store holding one
//! [`SceneDocument`] per user board, and a blob store hosting pasted images.

mod file;
mod memory;

pub use file::{FileBlobStore, FileStorage};
pub use memory::{MemoryBlobStore, MemoryStorage};

use crate::document::SceneDocument;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Upload failed: {0}")]
    Upload(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Identifier of an uploaded asset.
pub type AssetId = String;

/// Remote board persistence, keyed by user and board.
pub trait DocumentStore: Send + Sync {
    /// Load a board. `Ok(None)` means the board has never been saved.
    fn load_board(
        &self,
        user_id: &str,
        board_id: &str,
    ) -> BoxFuture<'_, StorageResult<Option<SceneDocument>>>;

    /// Save a board, replacing whatever was stored before.
    fn save_board(
        &self,
        user_id: &str,
        board_id: &str,
        document: &SceneDocument,
    ) -> BoxFuture<'_, StorageResult<()>>;
}

/// Image hosting.
pub trait BlobStore: Send + Sync {
    /// Store encoded image bytes and return the new asset id.
    fn upload_image(&self, bytes: Vec<u8>) -> BoxFuture<'_, StorageResult<AssetId>>;

    /// Fetch the bytes of an asset.
    fn fetch(&self, asset_id: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>>;

    /// URL under which the asset can be retrieved.
    fn asset_url(&self, asset_id: &str) -> String;
}

/// Document key for a user's board.
pub fn board_key(user_id: &str, board_id: &str) -> String {
    format!("users/{}/whiteboards/{}", user_id, board_id)
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
