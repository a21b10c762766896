use log::{error, info, warn};

use crate::command::Command;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::event::EventLogger;
use crate::file_handler::{DialogOutcome, FileHost, NativeFileHost, OpenedFile, PendingDialog, SaveOutcome};
use crate::panels::{self, LayersPanel, PanelAction};
use crate::renderer::CanvasRenderer;
use crate::state::EditorContext;

/// A message the user has to dismiss
#[derive(Debug, Clone, PartialEq)]
struct Notice {
    title: &'static str,
    message: String,
}

impl Notice {
    /// The notice for a failed command, if the user has to acknowledge it
    fn for_error(err: &EditorError, opening: bool) -> Option<Self> {
        match err {
            EditorError::NoBackgroundLoaded if opening => Some(Self {
                title: "Open Image",
                message: format!("Could not load the image: {}", err),
            }),
            err if err.is_user_visible() => Some(Self {
                title: "Error",
                message: err.to_string(),
            }),
            _ => None,
        }
    }
}

pub struct AnnotateApp {
    editor: EditorContext,
    renderer: CanvasRenderer,
    layers: LayersPanel,
    host: Box<dyn FileHost>,
    pending_open: Option<PendingDialog<EditorResult<DialogOutcome<OpenedFile>>>>,
    pending_save: Option<PendingDialog<DialogOutcome<SaveOutcome>>>,
    notice: Option<Notice>,
}

impl AnnotateApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_host(cc, Box::new(NativeFileHost))
    }

    pub fn with_host(cc: &eframe::CreationContext<'_>, host: Box<dyn FileHost>) -> Self {
        let config: EditorConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let editor = EditorContext::new(config);
        editor.event_bus().subscribe(Box::new(EventLogger));
        let layers = LayersPanel::new(&editor);

        Self {
            editor,
            renderer: CanvasRenderer::new(),
            layers,
            host,
            pending_open: None,
            pending_save: None,
            notice: None,
        }
    }

    /// Run a command, turning failures into log lines and notices
    pub fn execute_command(&mut self, command: Command) {
        let opening = matches!(command, Command::OpenImage(_));
        if let Err(err) = command.execute(&mut self.editor) {
            self.report(err, opening);
        }
    }

    fn report(&mut self, err: EditorError, opening: bool) {
        match Notice::for_error(&err, opening) {
            Some(notice) => {
                error!("{}", err);
                self.notice = Some(notice);
            }
            None => warn!("{}", err),
        }
    }

    fn show_notice(&mut self, title: &'static str, message: String) {
        self.notice = Some(Notice { title, message });
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: PanelAction) {
        match action {
            PanelAction::Command(command) => self.execute_command(command),
            PanelAction::OpenFile => {
                if self.pending_open.is_none() {
                    self.pending_open = Some(PendingDialog::spawn(self.host.open_image(), ctx.clone()));
                }
            }
            PanelAction::SaveFile => {
                if self.pending_save.is_some() {
                    return;
                }
                match self.editor.prepare_save() {
                    Ok(request) => {
                        self.pending_save = Some(PendingDialog::spawn(self.host.save_image(request), ctx.clone()));
                    }
                    Err(err) => self.report(err, false),
                }
            }
        }
    }

    /// Collect finished dialogs
    fn poll_dialogs(&mut self) {
        if let Some(result) = self.pending_open.as_ref().and_then(PendingDialog::poll) {
            self.pending_open = None;
            match result {
                Ok(DialogOutcome::Completed(file)) => self.execute_command(Command::OpenImage(file)),
                Ok(DialogOutcome::Cancelled) => info!("Open cancelled"),
                Err(err) => self.report(err, false),
            }
        }

        if let Some(outcome) = self.pending_save.as_ref().and_then(PendingDialog::poll) {
            self.pending_save = None;
            match outcome {
                DialogOutcome::Completed(outcome) => match outcome.into_result() {
                    Ok(path) => {
                        info!("💾 Saved to {}", path.display());
                        self.show_notice("Save Image", "File saved successfully".to_owned());
                    }
                    Err(err) => self.report(err, false),
                },
                DialogOutcome::Cancelled => info!("Save cancelled"),
            }
        }
    }

    fn handle_shortcuts(&self, ctx: &egui::Context, actions: &mut Vec<PanelAction>) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            actions.push(Command::DeleteSelected.into());
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            actions.push(Command::ClearSelection.into());
        }
    }

    fn notice_window(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(&notice.message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for AnnotateApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.editor.settings_snapshot());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_dialogs();

        let mut actions = Vec::new();
        panels::header_panel(ctx, &self.editor, &mut actions);
        panels::tools_panel(ctx, &self.editor, &mut self.layers, &mut actions);
        panels::central_panel(ctx, &self.editor, &mut self.renderer, &mut actions);
        self.handle_shortcuts(ctx, &mut actions);
        self.notice_window(ctx);

        for action in actions {
            self.handle_action(ctx, action);
        }

        if self.editor.take_render_request() {
            ctx.request_repaint();
        }
    }
}
