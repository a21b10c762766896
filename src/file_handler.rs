use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use log::{error, info};
use parking_lot::Mutex;

use crate::error::{EditorError, EditorResult};

/// Extensions offered by the open dialog
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Result of a host dialog. Dismissing the dialog is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> DialogOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            DialogOutcome::Completed(value) => Some(value),
            DialogOutcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DialogOutcome::Cancelled)
    }
}

/// An image file picked by the user
#[derive(Clone, PartialEq)]
pub struct OpenedFile {
    pub path: Option<PathBuf>,
    pub name: String,
    pub data: Vec<u8>,
    pub extension: String,
}

// Keep the file bytes out of logs
impl std::fmt::Debug for OpenedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedFile")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("data", &format!("<{} bytes>", self.data.len()))
            .field("extension", &self.extension)
            .finish()
    }
}

impl OpenedFile {
    /// Build from a path and the bytes read from it
    pub fn from_path(path: &Path, data: Vec<u8>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Self {
            path: Some(path.to_path_buf()),
            name,
            data,
            extension,
        }
    }
}

/// Encoded canvas waiting for a destination
#[derive(Clone, PartialEq)]
pub struct SaveRequest {
    pub default_path: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for SaveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveRequest")
            .field("default_path", &self.default_path)
            .field("data", &format!("<{} bytes>", self.data.len()))
            .finish()
    }
}

/// What the host reports after a save
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SaveOutcome {
    pub success: bool,
    pub path: Option<PathBuf>,
    pub error: Option<String>,
}

impl SaveOutcome {
    pub fn saved(path: PathBuf) -> Self {
        Self {
            success: true,
            path: Some(path),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            error: Some(error.into()),
        }
    }

    /// Only a reported success counts as saved
    pub fn into_result(self) -> EditorResult<PathBuf> {
        match (self.success, self.path) {
            (true, Some(path)) => Ok(path),
            (true, None) => Err(EditorError::FileWriteFailure("no destination reported".to_owned())),
            (false, _) => Err(EditorError::FileWriteFailure(
                self.error.unwrap_or_else(|| "unknown error".to_owned()),
            )),
        }
    }
}

pub type OpenFuture = BoxFuture<'static, EditorResult<DialogOutcome<OpenedFile>>>;
pub type SaveFuture = BoxFuture<'static, DialogOutcome<SaveOutcome>>;

/// Open/save round-trips to the host platform
pub trait FileHost {
    /// Ask the user for an image and read it
    fn open_image(&self) -> OpenFuture;

    /// Ask the user for a destination and write `request.data` there
    fn save_image(&self, request: SaveRequest) -> SaveFuture;
}

/// Native dialogs through `rfd`
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeFileHost;

impl FileHost for NativeFileHost {
    fn open_image(&self) -> OpenFuture {
        async move {
            let dialog = rfd::FileDialog::new()
                .set_title("Open Image")
                .add_filter("Images", &IMAGE_EXTENSIONS);

            let Some(path) = dialog.pick_file() else {
                info!("Open dialog cancelled");
                return Ok(DialogOutcome::Cancelled);
            };

            match std::fs::read(&path) {
                Ok(data) => {
                    info!("📂 Read {} ({} bytes)", path.display(), data.len());
                    Ok(DialogOutcome::Completed(OpenedFile::from_path(&path, data)))
                }
                Err(err) => {
                    error!("Failed to read {}: {}", path.display(), err);
                    Err(EditorError::FileReadFailure(format!("{}: {}", path.display(), err)))
                }
            }
        }
        .boxed()
    }

    fn save_image(&self, request: SaveRequest) -> SaveFuture {
        async move {
            let dialog = rfd::FileDialog::new()
                .set_title("Save Image")
                .set_file_name(&request.default_path)
                .add_filter("PNG Image", &["png"]);

            let Some(path) = dialog.save_file() else {
                info!("Save dialog cancelled");
                return DialogOutcome::Cancelled;
            };

            match std::fs::write(&path, &request.data) {
                Ok(()) => {
                    info!("💾 Saved {}", path.display());
                    DialogOutcome::Completed(SaveOutcome::saved(path))
                }
                Err(err) => {
                    error!("Failed to write {}: {}", path.display(), err);
                    DialogOutcome::Completed(SaveOutcome::failed(err.to_string()))
                }
            }
        }
        .boxed()
    }
}

/// A dialog running off the UI thread. The UI polls it once per frame.
#[derive(Debug)]
pub struct PendingDialog<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T: Send + 'static> PendingDialog<T> {
    /// Drive `future` to completion on a worker thread, then repaint `ctx`
    pub fn spawn(future: BoxFuture<'static, T>, ctx: egui::Context) -> Self {
        let slot = Arc::new(Mutex::new(None));
        let worker_slot = Arc::clone(&slot);
        std::thread::spawn(move || {
            let result = futures::executor::block_on(future);
            *worker_slot.lock() = Some(result);
            ctx.request_repaint();
        });
        Self { slot }
    }

    /// Take the result once it is ready
    pub fn poll(&self) -> Option<T> {
        self.slot.lock().take()
    }
}
