use std::collections::HashSet;

use eframe_annotate::element::{AttrPatch, Bitmap, Element, ObjectKind, factory};
use eframe_annotate::layer;
use eframe_annotate::{BACKGROUND_ID, Document, EditorError};
use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};

fn bitmap(width: u32, height: u32) -> Bitmap {
    Bitmap::new(RgbaImage::from_pixel(width, height, Rgba([30, 60, 90, 255])))
}

fn loaded_document() -> Document {
    let mut document = Document::new(Vec2::new(1000.0, 800.0), 40.0);
    document.load_background(bitmap(800, 600));
    document
}

fn rectangle() -> ObjectKind {
    factory::create_rectangle(Pos2::new(100.0, 100.0), Vec2::new(100.0, 70.0), Color32::BLACK, 2)
}

fn circle() -> ObjectKind {
    factory::create_circle(Pos2::new(300.0, 200.0), 50.0, Color32::RED, 2)
}

#[test]
fn test_background_is_fitted_and_centered() {
    let document = loaded_document();
    assert_eq!(document.len(), 1);

    let background = document.background().unwrap();
    assert_eq!(background.id(), BACKGROUND_ID);

    let image = background.kind().as_background().unwrap();
    assert!((image.scale() - 1.2).abs() < 1e-6);
    assert_eq!(image.center(), Pos2::new(500.0, 400.0));
    let size = background.rect().size();
    assert!((size.x - 960.0).abs() < 1e-3);
    assert!((size.y - 720.0).abs() < 1e-3);
}

#[test]
fn test_add_requires_background() {
    let mut document = Document::new(Vec2::new(1000.0, 800.0), 40.0);
    assert_eq!(document.add_object(rectangle()), Err(EditorError::NoBackgroundLoaded));
    assert!(document.is_empty());
}

#[test]
fn test_adds_produce_unique_ids() {
    let mut document = loaded_document();
    let mut ids = HashSet::new();
    for i in 0..25 {
        let kind = if i % 2 == 0 { rectangle() } else { circle() };
        ids.insert(document.add_object(kind).unwrap());
    }

    // Background plus every add
    assert_eq!(document.len(), 26);
    assert_eq!(ids.len(), 25);
    assert!(!ids.contains(&BACKGROUND_ID));
}

#[test]
fn test_new_objects_go_on_top() {
    let mut document = loaded_document();
    let rect = document.add_object(rectangle()).unwrap();
    let circle = document.add_object(circle()).unwrap();

    assert_eq!(document.index_of(rect), Some(1));
    assert_eq!(document.index_of(circle), Some(2));
}

#[test]
fn test_background_cannot_be_removed() {
    let mut document = loaded_document();
    document.add_object(rectangle()).unwrap();

    assert_eq!(
        document.remove_object(BACKGROUND_ID),
        Err(EditorError::ProtectedObject(BACKGROUND_ID))
    );
    assert_eq!(document.len(), 2);
}

#[test]
fn test_background_cannot_be_converted() {
    let mut document = loaded_document();
    let result = document.convert_to_text(BACKGROUND_ID, "Edit this text", "Arial", Color32::BLACK);
    assert_eq!(result, Err(EditorError::ProtectedObject(BACKGROUND_ID)));
    assert!(document.get(BACKGROUND_ID).unwrap().kind().is_background());
}

#[test]
fn test_remove_object() {
    let mut document = loaded_document();
    let id = document.add_object(rectangle()).unwrap();

    let removed = document.remove_object(id).unwrap();
    assert_eq!(removed.id(), id);
    assert!(!document.contains(id));
    assert_eq!(document.remove_object(id), Err(EditorError::ObjectNotFound(id)));
}

#[test]
fn test_convert_to_text_keeps_bounds_and_order() {
    let mut document = loaded_document();
    let rect = document.add_object(rectangle()).unwrap();
    let top = document.add_object(circle()).unwrap();
    let bounds = document.get(rect).unwrap().rect();

    let text = document
        .convert_to_text(rect, "Edit this text", "Arial", Color32::BLUE)
        .unwrap();

    assert_ne!(text, rect);
    assert!(!document.contains(rect));
    assert_eq!(document.len(), 3);
    assert_eq!(document.index_of(text), Some(1));
    assert_eq!(document.index_of(top), Some(2));

    let converted = document.get(text).unwrap();
    assert_eq!(converted.rect(), bounds);
    let content = converted.kind().as_text().unwrap();
    // 70px rectangle plus a 2px stroke is 72px tall
    assert_eq!(content.font_size(), (72.0_f32 * 0.8).round() as u32);
    assert_eq!(content.fill_color(), Color32::BLUE);
}

#[test]
fn test_mutate_rejects_wrong_kind() {
    let mut document = loaded_document();
    let rect = document.add_object(rectangle()).unwrap();

    let result = document.mutate_object(rect, &AttrPatch::font_size(24));
    assert!(matches!(
        result,
        Err(EditorError::InvalidAttributeForKind {
            attribute: "fontSize",
            ..
        })
    ));

    let result = document.mutate_object(BACKGROUND_ID, &AttrPatch::stroke_width(4));
    assert!(matches!(result, Err(EditorError::InvalidAttributeForKind { .. })));
}

#[test]
fn test_mutate_is_all_or_nothing() {
    let mut document = loaded_document();
    let rect = document.add_object(rectangle()).unwrap();

    let patch = AttrPatch {
        opacity: Some(0.5),
        stroke_width: Some(0),
        ..Default::default()
    };
    assert!(matches!(
        document.mutate_object(rect, &patch),
        Err(EditorError::InvalidAttributeValue { .. })
    ));

    let object = document.get(rect).unwrap();
    assert_eq!(object.opacity(), 1.0);
    assert_eq!(object.kind().stroke_width(), Some(2));
}

#[test]
fn test_mutate_text_attributes() {
    let mut document = loaded_document();
    let text = factory::create_text("Hello", "Arial", 20, Color32::BLACK, Pos2::new(500.0, 400.0));
    let id = document.add_object(text).unwrap();

    let patch = AttrPatch {
        font_size: Some(32),
        font_family: Some("Georgia".to_owned()),
        fill_color: Some(Color32::RED),
        ..Default::default()
    };
    document.mutate_object(id, &patch).unwrap();

    let text = document.get(id).unwrap().kind().as_text().unwrap();
    assert_eq!(text.font_size(), 32);
    assert_eq!(text.font_family(), "Georgia");
    assert_eq!(text.fill_color(), Color32::RED);
}

#[test]
fn test_loading_replaces_document() {
    let mut document = loaded_document();
    let first_id = document.id();
    document.add_object(rectangle()).unwrap();

    let second_id = document.load_background(bitmap(100, 100));
    assert_ne!(first_id, second_id);
    assert_eq!(document.len(), 1);
    assert!(document.has_background());
}

#[test]
fn test_undecodable_bytes_leave_document_untouched() {
    let mut document = loaded_document();
    let id = document.id();
    document.add_object(rectangle()).unwrap();

    assert_eq!(
        document.load_background_bytes(b"not an image"),
        Err(EditorError::NoBackgroundLoaded)
    );
    assert_eq!(document.id(), id);
    assert_eq!(document.len(), 2);
}

#[test]
fn test_pick_returns_topmost_visible() {
    let mut document = loaded_document();
    let bottom = document
        .add_object(factory::create_rectangle(
            Pos2::new(200.0, 200.0),
            Vec2::new(100.0, 100.0),
            Color32::BLACK,
            2,
        ))
        .unwrap();
    let top = document
        .add_object(factory::create_rectangle(
            Pos2::new(220.0, 220.0),
            Vec2::new(100.0, 100.0),
            Color32::BLACK,
            2,
        ))
        .unwrap();

    let overlap = Pos2::new(210.0, 210.0);
    assert_eq!(document.pick(overlap), Some(top));

    layer::toggle_visibility(&mut document, top).unwrap();
    assert_eq!(document.pick(overlap), Some(bottom));

    // Outside everything, including the background
    assert_eq!(document.pick(Pos2::new(5.0, 5.0)), None);
}

#[test]
fn test_opacity_patch_leaves_visibility_alone() {
    let mut document = loaded_document();
    let id = document.add_object(rectangle()).unwrap();

    document.mutate_object(id, &AttrPatch::opacity(0.0)).unwrap();
    let object = document.get(id).unwrap();
    assert!(object.visible());
    assert_eq!(object.opacity(), 0.0);
    assert_eq!(document.pick(object.rect().center()), Some(id));

    // Only the layer toggle hides, and it resets opacity when showing again
    layer::toggle_visibility(&mut document, id).unwrap();
    assert!(!document.get(id).unwrap().visible());
    layer::toggle_visibility(&mut document, id).unwrap();
    assert_eq!(document.get(id).unwrap().opacity(), 1.0);
}

#[test]
fn test_translate_object() {
    let mut document = loaded_document();
    let id = document.add_object(rectangle()).unwrap();
    let before = document.get(id).unwrap().rect();

    document.translate_object(id, Vec2::new(10.0, -5.0)).unwrap();
    let after = document.get(id).unwrap().rect();
    assert_eq!(after, before.translate(Vec2::new(10.0, -5.0)));
}
