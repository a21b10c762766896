use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe_annotate::file_handler::{
    DialogOutcome, FileHost, OpenFuture, OpenedFile, SaveFuture, SaveOutcome, SaveRequest,
};
use eframe_annotate::{Command, EditorContext, EditorError};
use futures::FutureExt;
use futures::executor::block_on;
use image::{ImageFormat, Rgba, RgbaImage};
use parking_lot::Mutex;

/// How the scripted host answers the next dialog
#[derive(Clone)]
enum Script {
    Cancel,
    Open(OpenedFile),
    ReadFails,
    Save(PathBuf),
    WriteFails,
}

/// A host that answers dialogs from a script and remembers what it was asked to save
struct ScriptedHost {
    script: Script,
    saved: Arc<Mutex<Vec<SaveRequest>>>,
}

impl ScriptedHost {
    fn new(script: Script) -> Self {
        Self {
            script,
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FileHost for ScriptedHost {
    fn open_image(&self) -> OpenFuture {
        let script = self.script.clone();
        async move {
            match script {
                Script::Open(file) => Ok(DialogOutcome::Completed(file)),
                Script::ReadFails => Err(EditorError::FileReadFailure("permission denied".to_owned())),
                _ => Ok(DialogOutcome::Cancelled),
            }
        }
        .boxed()
    }

    fn save_image(&self, request: SaveRequest) -> SaveFuture {
        let script = self.script.clone();
        let saved = Arc::clone(&self.saved);
        async move {
            match script {
                Script::Save(path) => {
                    saved.lock().push(request);
                    DialogOutcome::Completed(SaveOutcome::saved(path))
                }
                Script::WriteFails => DialogOutcome::Completed(SaveOutcome::failed("disk full")),
                _ => DialogOutcome::Cancelled,
            }
        }
        .boxed()
    }
}

fn png_file(path: &str) -> OpenedFile {
    let image = RgbaImage::from_pixel(40, 30, Rgba([10, 20, 30, 255]));
    let mut data = Vec::new();
    image.write_to(&mut Cursor::new(&mut data), ImageFormat::Png).unwrap();
    OpenedFile::from_path(Path::new(path), data)
}

/// Run the open round-trip the way the app does
fn open_with(host: &dyn FileHost, editor: &mut EditorContext) -> Result<bool, EditorError> {
    match block_on(host.open_image())? {
        DialogOutcome::Completed(file) => Command::OpenImage(file).execute(editor).map(|_| true),
        DialogOutcome::Cancelled => Ok(false),
    }
}

#[test]
fn test_open_loads_picked_image() {
    let host = ScriptedHost::new(Script::Open(png_file("/home/user/pictures/beach.png")));
    let mut editor = EditorContext::default();

    assert_eq!(open_with(&host, &mut editor), Ok(true));
    assert!(editor.image_loaded());
    let file = editor.current_file().unwrap();
    assert_eq!(file.name, "beach.png");
    assert_eq!(file.path.as_deref(), Some(Path::new("/home/user/pictures/beach.png")));
}

#[test]
fn test_cancelled_open_is_a_noop() {
    let host = ScriptedHost::new(Script::Cancel);
    let mut editor = EditorContext::default();

    assert_eq!(open_with(&host, &mut editor), Ok(false));
    assert!(!editor.image_loaded());
    assert!(editor.current_file().is_none());
}

#[test]
fn test_read_failure_leaves_document_unchanged() {
    let mut editor = EditorContext::default();
    open_with(&ScriptedHost::new(Script::Open(png_file("first.png"))), &mut editor).unwrap();
    let document = editor.document().id();

    let err = open_with(&ScriptedHost::new(Script::ReadFails), &mut editor).unwrap_err();
    assert!(matches!(err, EditorError::FileReadFailure(_)));
    assert!(err.is_user_visible());
    assert_eq!(editor.document().id(), document);
    assert_eq!(editor.current_file().unwrap().name, "first.png");
}

#[test]
fn test_save_hands_png_to_host() {
    let mut editor = EditorContext::default();
    open_with(&ScriptedHost::new(Script::Open(png_file("beach.jpg"))), &mut editor).unwrap();
    editor.add_rectangle().unwrap();

    let host = ScriptedHost::new(Script::Save(PathBuf::from("/tmp/beach.png")));
    let request = editor.prepare_save().unwrap();
    let outcome = block_on(host.save_image(request)).completed().unwrap();

    assert_eq!(outcome.into_result(), Ok(PathBuf::from("/tmp/beach.png")));
    let saved = host.saved.lock();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].default_path, "beach.jpg");
    let decoded = image::load_from_memory_with_format(&saved[0].data, ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1000, 800));
}

#[test]
fn test_write_failure_is_reported() {
    let mut editor = EditorContext::default();
    open_with(&ScriptedHost::new(Script::Open(png_file("beach.png"))), &mut editor).unwrap();

    let host = ScriptedHost::new(Script::WriteFails);
    let outcome = block_on(host.save_image(editor.prepare_save().unwrap()));
    let err = outcome.completed().unwrap().into_result().unwrap_err();

    assert_eq!(err, EditorError::FileWriteFailure("disk full".to_owned()));
    assert!(err.is_user_visible());
}

#[test]
fn test_cancelled_save_writes_nothing() {
    let mut editor = EditorContext::default();
    open_with(&ScriptedHost::new(Script::Open(png_file("beach.png"))), &mut editor).unwrap();

    let host = ScriptedHost::new(Script::Cancel);
    let outcome = block_on(host.save_image(editor.prepare_save().unwrap()));

    assert!(outcome.is_cancelled());
    assert!(host.saved.lock().is_empty());
}
