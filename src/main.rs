#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Image Annotator"),
        ..Default::default()
    };
    eframe::run_native(
        "eframe_annotate",
        native_options,
        Box::new(|cc| Ok(Box::new(eframe_annotate::AnnotateApp::new(cc)))),
    )
}
