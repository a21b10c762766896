#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod id_generator;
pub mod layer;
pub mod panels;
pub mod properties;
pub mod renderer;
pub mod selection;
pub mod state;

pub use app::AnnotateApp;
pub use command::Command;
pub use config::EditorConfig;
pub use document::Document;
pub use error::{EditorError, EditorResult};
pub use id_generator::{BACKGROUND_ID, DocumentId, ObjectId};
pub use selection::{Selection, SelectionController};
pub use state::{EditorContext, EditorState, Tool};
