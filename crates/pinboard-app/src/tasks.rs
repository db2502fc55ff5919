//! Background work: save, load, upload and image fetch.
//!
//! Each job runs on its own thread, drives the storage future with
//! `pollster::block_on` and reports back over a channel that the UI thread
//! drains once per frame.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use kurbo::Size;
use pinboard_core::images::fetch_source;
use pinboard_core::storage::{
    AssetId, BlobStore, DocumentStore, FileBlobStore, FileStorage, StorageError, StorageResult,
};
use pinboard_core::{Bitmap, ElementId, ImageError, SceneDocument, Session};
use pinboard_render::decode_image;

/// Completion of a background job.
#[derive(Debug)]
pub enum TaskResult {
    Loaded(StorageResult<Option<SceneDocument>>),
    Saved(StorageResult<()>),
    /// An image was uploaded; `size` is its intrinsic pixel size.
    Uploaded(StorageResult<(AssetId, Size)>),
    ImageLoaded {
        id: ElementId,
        result: Result<Bitmap, ImageError>,
    },
}

/// Spawns storage jobs and collects their results.
pub struct Tasks {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    sender: Sender<TaskResult>,
    receiver: Receiver<TaskResult>,
    /// Woken when a job finishes so results are picked up promptly.
    repaint: Option<egui::Context>,
}

impl Tasks {
    pub fn new(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        let (sender, receiver) = channel();
        Self {
            documents,
            blobs,
            sender,
            receiver,
            repaint: None,
        }
    }

    /// File-backed stores under `data_dir`, or the platform data directory.
    pub fn with_file_stores(data_dir: Option<PathBuf>) -> StorageResult<Self> {
        let (documents, blobs) = match data_dir {
            Some(dir) => (
                FileStorage::new(dir.join("boards"))?,
                FileBlobStore::new(dir.join("assets"))?,
            ),
            None => (FileStorage::default_location()?, FileBlobStore::default_location()?),
        };
        log::info!("Boards stored under {}", documents.base_path().display());
        Ok(Self::new(Arc::new(documents), Arc::new(blobs)))
    }

    pub fn set_repaint(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    /// Results that arrived since the last call.
    pub fn drain(&self) -> Vec<TaskResult> {
        self.receiver.try_iter().collect()
    }

    fn spawn(&self, name: &str, job: impl FnOnce() -> TaskResult + Send + 'static) {
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("pinboard-{name}"))
            .spawn(move || {
                // The receiver only goes away when the app shuts down.
                let _ = sender.send(job());
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });
        if let Err(e) = spawned {
            log::error!("Failed to start {} task: {}", name, e);
        }
    }

    pub fn load(&self, session: &Session) {
        let documents = Arc::clone(&self.documents);
        let session = session.clone();
        self.spawn("load", move || {
            let result =
                pollster::block_on(documents.load_board(&session.user_id, &session.board_id));
            TaskResult::Loaded(result)
        });
    }

    pub fn save(&self, session: &Session, document: SceneDocument) {
        let documents = Arc::clone(&self.documents);
        let session = session.clone();
        self.spawn("save", move || {
            let result = pollster::block_on(documents.save_board(
                &session.user_id,
                &session.board_id,
                &document,
            ));
            TaskResult::Saved(result)
        });
    }

    /// Decode `bytes` for their size, then upload them to the blob store.
    pub fn upload_image(&self, bytes: Vec<u8>) {
        let blobs = Arc::clone(&self.blobs);
        self.spawn("upload", move || {
            let result = decode_image(&bytes)
                .map_err(|e| StorageError::Upload(e.to_string()))
                .and_then(|bitmap| {
                    let asset = pollster::block_on(blobs.upload_image(bytes))?;
                    Ok((asset, bitmap.size()))
                });
            TaskResult::Uploaded(result)
        });
    }

    /// Upload an image file picked by the user.
    pub fn upload_file(&self, path: PathBuf) {
        match std::fs::read(&path) {
            Ok(bytes) => self.upload_image(bytes),
            Err(e) => {
                let error = StorageError::Io(format!("{}: {}", path.display(), e));
                let _ = self.sender.send(TaskResult::Uploaded(Err(error)));
            }
        }
    }

    pub fn fetch_image(&self, id: ElementId, source_ref: String) {
        let blobs = Arc::clone(&self.blobs);
        self.spawn("image", move || {
            let result = pollster::block_on(fetch_source(&source_ref, blobs.as_ref()))
                .and_then(|bytes| decode_image(&bytes));
            TaskResult::ImageLoaded { id, result }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pinboard_core::shapes::{Element, Rectangle};
    use pinboard_core::storage::{MemoryBlobStore, MemoryStorage};
    use std::time::Duration;

    fn tasks() -> Tasks {
        Tasks::new(Arc::new(MemoryStorage::new()), Arc::new(MemoryBlobStore::new()))
    }

    fn wait(tasks: &Tasks) -> TaskResult {
        tasks
            .receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("task did not finish")
    }

    #[test]
    fn test_save_then_load() {
        let tasks = tasks();
        let session = Session::for_user("t");
        let document = SceneDocument::from_elements(
            [Element::Rectangle(Rectangle::new(Point::ZERO, 5.0, 5.0))].iter(),
        );

        tasks.save(&session, document.clone());
        assert!(matches!(wait(&tasks), TaskResult::Saved(Ok(()))));

        tasks.load(&session);
        match wait(&tasks) {
            TaskResult::Loaded(Ok(Some(loaded))) => assert_eq!(loaded, document),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_upload_rejects_non_image_bytes() {
        let tasks = tasks();
        tasks.upload_image(b"definitely not a png".to_vec());
        assert!(matches!(wait(&tasks), TaskResult::Uploaded(Err(StorageError::Upload(_)))));
    }

    #[test]
    fn test_fetch_unsupported_source() {
        let tasks = tasks();
        let id = ElementId::new_v4();
        tasks.fetch_image(id, "ftp://example.com/a.png".into());
        match wait(&tasks) {
            TaskResult::ImageLoaded { id: got, result } => {
                assert_eq!(got, id);
                assert!(matches!(result, Err(ImageError::UnsupportedSource(_))));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
