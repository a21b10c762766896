use egui::{Color32, Pos2, Vec2};
use log::{info, warn};

use crate::config::EditorConfig;
use crate::element::{
    AttrPatch, BackgroundImage, Bitmap, CONVERTED_FONT_SCALE, DrawableObject, Element, ObjectKind, Text,
};
use crate::error::{EditorError, EditorResult};
use crate::id_generator::{BACKGROUND_ID, DocumentId, IdGenerator, ObjectId};

/// Ordered collection of drawable objects, back to front.
///
/// Single source of truth for what exists on the canvas. Holds at most one
/// background image, which can be neither deleted nor converted.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    objects: Vec<DrawableObject>,
    ids: IdGenerator,
    canvas_size: Vec2,
    margin: f32,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Document {
    pub fn new(canvas_size: Vec2, margin: f32) -> Self {
        Self {
            id: DocumentId::new(),
            objects: Vec::new(),
            ids: IdGenerator::new(),
            canvas_size,
            margin,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.initial_canvas_size, config.canvas_margin)
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Track the size of the drawing area. Existing objects keep their place.
    pub fn set_canvas_size(&mut self, size: Vec2) {
        self.canvas_size = size;
    }

    pub fn canvas_center(&self) -> Pos2 {
        Pos2::new(self.canvas_size.x / 2.0, self.canvas_size.y / 2.0)
    }

    /// Replace the whole document with a single background image fitted to the canvas
    pub fn load_background(&mut self, bitmap: Bitmap) -> DocumentId {
        let background = BackgroundImage::fit_to_canvas(bitmap, self.canvas_size, self.margin);

        self.objects.clear();
        self.objects
            .push(DrawableObject::new(BACKGROUND_ID, ObjectKind::BackgroundImage(background)));
        self.id = DocumentId::new();

        info!("📄 Loaded new document {}", self.id);
        self.id
    }

    /// Decode `bytes` and load them as the background.
    ///
    /// A decode failure leaves the document untouched.
    pub fn load_background_bytes(&mut self, bytes: &[u8]) -> EditorResult<DocumentId> {
        let bitmap = Bitmap::decode(bytes).map_err(|err| {
            warn!("Could not load background: {}", err);
            EditorError::NoBackgroundLoaded
        })?;
        Ok(self.load_background(bitmap))
    }

    pub fn has_background(&self) -> bool {
        self.background().is_some()
    }

    pub fn background(&self) -> Option<&DrawableObject> {
        self.objects.iter().find(|obj| obj.kind().is_background())
    }

    /// Append a new object on top of all others
    pub fn add_object(&mut self, kind: ObjectKind) -> EditorResult<ObjectId> {
        if !self.has_background() {
            return Err(EditorError::NoBackgroundLoaded);
        }
        if kind.is_background() {
            return Err(EditorError::ProtectedObject(BACKGROUND_ID));
        }

        let id = self.ids.generate_id();
        info!("➕ Adding {} {}", kind.element_type(), id);
        self.objects.push(DrawableObject::new(id, kind));
        Ok(id)
    }

    /// Remove an object and hand it back
    pub fn remove_object(&mut self, id: ObjectId) -> EditorResult<DrawableObject> {
        if id.is_background() {
            return Err(EditorError::ProtectedObject(id));
        }

        let index = self.index_of(id).ok_or(EditorError::ObjectNotFound(id))?;
        info!("➖ Removing object {}", id);
        Ok(self.objects.remove(index))
    }

    /// Apply a partial update appropriate to the object's kind
    pub fn mutate_object(&mut self, id: ObjectId, patch: &AttrPatch) -> EditorResult<()> {
        let object = self.get_mut(id).ok_or(EditorError::ObjectNotFound(id))?;
        object.apply_patch(patch)
    }

    /// Move an object across the canvas
    pub fn translate_object(&mut self, id: ObjectId, delta: Vec2) -> EditorResult<()> {
        let object = self.get_mut(id).ok_or(EditorError::ObjectNotFound(id))?;
        object.kind_mut().translate(delta);
        Ok(())
    }

    /// Replace an object by a text occupying the same bounding rectangle.
    ///
    /// The text takes the replaced object's place in the draw order and gets
    /// a fresh id; the font size is derived from the rectangle's height.
    pub fn convert_to_text(
        &mut self,
        id: ObjectId,
        content: &str,
        font_family: &str,
        fill: Color32,
    ) -> EditorResult<ObjectId> {
        if id.is_background() {
            return Err(EditorError::ProtectedObject(id));
        }

        let index = self.index_of(id).ok_or(EditorError::ObjectNotFound(id))?;
        let bounds = self.objects[index].rect();
        let font_size = ((bounds.height() * CONVERTED_FONT_SCALE).round() as u32).max(1);

        let text = Text::in_rect(content.to_owned(), font_family.to_owned(), font_size, fill, bounds);
        let new_id = self.ids.generate_id();
        self.objects[index] = DrawableObject::new(new_id, ObjectKind::Text(text));

        info!("🔤 Converted object {} to text {} at layer {}", id, new_id, index);
        Ok(new_id)
    }

    /// Objects in draw order, back to front
    pub fn objects(&self) -> &[DrawableObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&DrawableObject> {
        self.objects.iter().find(|obj| obj.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut DrawableObject> {
        self.objects.iter_mut().find(|obj| obj.id() == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Position of an object in the draw order
    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|obj| obj.id() == id)
    }

    /// The topmost visible object under `pos`
    pub fn pick(&self, pos: Pos2) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|obj| obj.hit_test(pos))
            .map(DrawableObject::id)
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.objects.swap(a, b);
    }
}
