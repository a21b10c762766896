use egui::Color32;

use crate::document::Document;
use crate::element::{AttrPatch, DrawableObject, Element, ObjectKind};
use crate::error::{EditorError, EditorResult};
use crate::id_generator::ObjectId;
use crate::selection::SelectionController;

/// An attribute the property panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyField {
    Opacity,
    StrokeWidth,
    FontSize,
    FontFamily,
    FillColor,
}

impl PropertyField {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyField::Opacity => "opacity",
            PropertyField::StrokeWidth => "strokeWidth",
            PropertyField::FontSize => "fontSize",
            PropertyField::FontFamily => "fontFamily",
            PropertyField::FillColor => "fillColor",
        }
    }
}

const TEXT_FIELDS: &[PropertyField] = &[
    PropertyField::Opacity,
    PropertyField::FontSize,
    PropertyField::FontFamily,
    PropertyField::FillColor,
];
const STROKED_FIELDS: &[PropertyField] = &[PropertyField::Opacity, PropertyField::StrokeWidth];
const BACKGROUND_FIELDS: &[PropertyField] = &[PropertyField::Opacity];

/// Fields exposed for a kind of object
pub fn fields_for(kind: &ObjectKind) -> &'static [PropertyField] {
    match kind {
        ObjectKind::Text(_) => TEXT_FIELDS,
        ObjectKind::Rectangle(_) | ObjectKind::Circle(_) | ObjectKind::FreehandPath(_) => STROKED_FIELDS,
        ObjectKind::BackgroundImage(_) => BACKGROUND_FIELDS,
    }
}

/// Snapshot of the selected object's editable attributes.
///
/// Derived from the document on every query; holds no state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyView {
    pub id: ObjectId,
    pub kind: &'static str,
    pub fields: &'static [PropertyField],
    pub opacity: f32,
    pub stroke_width: Option<u32>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub fill_color: Option<Color32>,
}

impl PropertyView {
    fn of(object: &DrawableObject) -> Self {
        let text = object.kind().as_text();
        Self {
            id: object.id(),
            kind: object.element_type(),
            fields: fields_for(object.kind()),
            opacity: object.opacity(),
            stroke_width: object.kind().stroke_width(),
            font_size: text.map(|t| t.font_size()),
            font_family: text.map(|t| t.font_family().to_owned()),
            fill_color: text.map(|t| t.fill_color()),
        }
    }

    pub fn exposes(&self, field: PropertyField) -> bool {
        self.fields.contains(&field)
    }
}

/// Properties of the current selection, `None` when nothing is selected
pub fn selected_properties(document: &Document, selection: &SelectionController) -> Option<PropertyView> {
    let id = selection.selected_id()?;
    document.get(id).map(PropertyView::of)
}

/// A single edit coming from the property panel
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Opacity(f32),
    StrokeWidth(u32),
    FontSize(u32),
    FontFamily(String),
    FillColor(Color32),
}

impl PropertyEdit {
    pub fn field(&self) -> PropertyField {
        match self {
            PropertyEdit::Opacity(_) => PropertyField::Opacity,
            PropertyEdit::StrokeWidth(_) => PropertyField::StrokeWidth,
            PropertyEdit::FontSize(_) => PropertyField::FontSize,
            PropertyEdit::FontFamily(_) => PropertyField::FontFamily,
            PropertyEdit::FillColor(_) => PropertyField::FillColor,
        }
    }

    pub fn into_patch(self) -> AttrPatch {
        match self {
            PropertyEdit::Opacity(opacity) => AttrPatch::opacity(opacity),
            PropertyEdit::StrokeWidth(width) => AttrPatch::stroke_width(width),
            PropertyEdit::FontSize(size) => AttrPatch::font_size(size),
            PropertyEdit::FontFamily(family) => AttrPatch::font_family(family),
            PropertyEdit::FillColor(color) => AttrPatch::fill_color(color),
        }
    }
}

/// Route an edit straight into the document for the selected object.
///
/// Returns the edited id, or `None` when nothing is selected.
pub fn apply_edit(
    document: &mut Document,
    selection: &SelectionController,
    edit: PropertyEdit,
) -> EditorResult<Option<ObjectId>> {
    let Some(id) = selection.selected_id() else {
        return Ok(None);
    };
    let object = document.get(id).ok_or(EditorError::ObjectNotFound(id))?;

    let field = edit.field();
    if !fields_for(object.kind()).contains(&field) {
        return Err(EditorError::InvalidAttributeForKind {
            attribute: field.name(),
            kind: object.element_type(),
        });
    }

    document.mutate_object(id, &edit.into_patch())?;
    Ok(Some(id))
}
