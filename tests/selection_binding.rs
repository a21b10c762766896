use eframe_annotate::element::{Bitmap, ObjectKind, factory};
use eframe_annotate::properties::{self, PropertyEdit, PropertyField};
use eframe_annotate::{BACKGROUND_ID, Document, EditorError, Selection, SelectionController};
use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};

fn loaded_document() -> Document {
    let mut document = Document::new(Vec2::new(1000.0, 800.0), 40.0);
    document.load_background(Bitmap::new(RgbaImage::from_pixel(80, 60, Rgba([255, 255, 255, 255]))));
    document
}

fn text_kind() -> ObjectKind {
    factory::create_text("Note", "Arial", 20, Color32::RED, Pos2::new(500.0, 400.0))
}

#[test]
fn test_selecting_text_enters_text_editing() {
    let mut document = loaded_document();
    let text = document.add_object(text_kind()).unwrap();
    let rect = document
        .add_object(factory::create_rectangle(
            Pos2::new(200.0, 200.0),
            Vec2::new(100.0, 70.0),
            Color32::BLACK,
            2,
        ))
        .unwrap();

    let mut selection = SelectionController::new();
    selection.select(&document, rect).unwrap();
    assert!(!selection.is_text_editing());

    selection.select(&document, text).unwrap();
    assert_eq!(
        selection.state(),
        Selection::Selected {
            id: text,
            text_editing: true
        }
    );
}

#[test]
fn test_select_unknown_object_fails() {
    let mut document = loaded_document();
    let id = document.add_object(text_kind()).unwrap();
    document.remove_object(id).unwrap();

    let mut selection = SelectionController::new();
    assert_eq!(selection.select(&document, id), Err(EditorError::ObjectNotFound(id)));
    assert_eq!(selection.state(), Selection::None);
}

#[test]
fn test_removed_object_leaves_no_properties() {
    let mut document = loaded_document();
    let id = document.add_object(text_kind()).unwrap();
    let mut selection = SelectionController::new();
    selection.select(&document, id).unwrap();
    assert!(properties::selected_properties(&document, &selection).is_some());

    document.remove_object(id).unwrap();
    selection.object_removed(id);

    assert_eq!(selection.selected_id(), None);
    assert!(properties::selected_properties(&document, &selection).is_none());
}

#[test]
fn test_fields_exposed_per_kind() {
    let mut document = loaded_document();
    let text = document.add_object(text_kind()).unwrap();
    let circle = document
        .add_object(factory::create_circle(Pos2::new(300.0, 300.0), 50.0, Color32::BLACK, 2))
        .unwrap();
    let mut selection = SelectionController::new();

    selection.select(&document, text).unwrap();
    let view = properties::selected_properties(&document, &selection).unwrap();
    assert!(view.exposes(PropertyField::FontSize));
    assert!(view.exposes(PropertyField::FontFamily));
    assert!(!view.exposes(PropertyField::StrokeWidth));
    assert_eq!(view.font_family.as_deref(), Some("Arial"));
    assert_eq!(view.fill_color, Some(Color32::RED));

    selection.select(&document, circle).unwrap();
    let view = properties::selected_properties(&document, &selection).unwrap();
    assert_eq!(view.fields, &[PropertyField::Opacity, PropertyField::StrokeWidth]);
    assert_eq!(view.stroke_width, Some(2));
    assert_eq!(view.font_size, None);

    selection.select(&document, BACKGROUND_ID).unwrap();
    let view = properties::selected_properties(&document, &selection).unwrap();
    assert_eq!(view.fields, &[PropertyField::Opacity]);
}

#[test]
fn test_property_edit_writes_through() {
    let mut document = loaded_document();
    let circle = document
        .add_object(factory::create_circle(Pos2::new(300.0, 300.0), 50.0, Color32::BLACK, 2))
        .unwrap();
    let mut selection = SelectionController::new();
    selection.select(&document, circle).unwrap();

    let edited = properties::apply_edit(&mut document, &selection, PropertyEdit::StrokeWidth(8)).unwrap();
    assert_eq!(edited, Some(circle));

    // The next query reflects the document, nothing is cached in between
    let view = properties::selected_properties(&document, &selection).unwrap();
    assert_eq!(view.stroke_width, Some(8));
}

#[test]
fn test_property_edit_rejected_for_kind() {
    let mut document = loaded_document();
    let circle = document
        .add_object(factory::create_circle(Pos2::new(300.0, 300.0), 50.0, Color32::BLACK, 2))
        .unwrap();
    let mut selection = SelectionController::new();
    selection.select(&document, circle).unwrap();

    let result = properties::apply_edit(&mut document, &selection, PropertyEdit::FontSize(30));
    assert_eq!(
        result,
        Err(EditorError::InvalidAttributeForKind {
            attribute: "fontSize",
            kind: "circle"
        })
    );
}

#[test]
fn test_property_edit_without_selection_is_ignored() {
    let mut document = loaded_document();
    let before = document.clone();
    let selection = SelectionController::new();

    let result = properties::apply_edit(&mut document, &selection, PropertyEdit::Opacity(0.5));
    assert_eq!(result, Ok(None));
    assert_eq!(document.objects(), before.objects());
}
