use crate::carousel::{ImageCarousel, LoadedImage};
use crate::editor::{
    AnnotationStore, DrawingGesture, Handle, StoreError, TransformSession, DEFAULT_RESIZE_STEP,
};
use crate::error::AppResult;
use crate::export::{self, AnnotationExport, ExportError};
use crate::geometry::{Point, Rect};
use crate::input::{resolve_shortcut, Command, InputContext, ShortcutKey, ShortcutModifiers};

/// What the surface should do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    Exported(AnnotationExport),
}

/// All mutable annotation state, owned in one place and driven by discrete
/// input events from a single thread.
#[derive(Debug)]
pub struct AnnotationSession {
    store: AnnotationStore,
    gesture: DrawingGesture,
    carousel: ImageCarousel,
    transform: Option<TransformSession>,
    resize_step: i32,
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_STEP)
    }
}

impl AnnotationSession {
    pub fn new(resize_step: i32) -> Self {
        Self {
            store: AnnotationStore::new(),
            gesture: DrawingGesture::new(),
            carousel: ImageCarousel::new(),
            transform: None,
            resize_step,
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn carousel(&self) -> &ImageCarousel {
        &self.carousel
    }

    pub fn gesture(&self) -> &DrawingGesture {
        &self.gesture
    }

    pub fn transform(&self) -> Option<TransformSession> {
        self.transform
    }

    pub fn resize_step(&self) -> i32 {
        self.resize_step
    }

    /// Rectangles to paint: committed ones plus the in-progress candidate.
    pub fn visible_rectangles(&self) -> (&[Rect], Option<Rect>) {
        (self.store.rectangles(), self.gesture.candidate())
    }

    pub fn image_loaded(&mut self, image: LoadedImage) {
        self.carousel.on_loaded(image);
        self.sync_transform();
    }

    pub fn pointer_press(&mut self, point: Point) -> AppResult<Effect> {
        self.gesture.press(point)?;
        Ok(Effect::Redraw)
    }

    pub fn pointer_move(&mut self, point: Point) -> Effect {
        match self.gesture.move_to(point) {
            Some(_) => Effect::Redraw,
            None => Effect::None,
        }
    }

    pub fn pointer_release(&mut self) -> Effect {
        let was_drawing = self.gesture.is_drawing();
        let committed = self
            .gesture
            .release()
            .and_then(|rect| self.store.append(rect));
        if was_drawing || committed.is_some() {
            Effect::Redraw
        } else {
            Effect::None
        }
    }

    /// Selects the topmost rectangle under `point`, or clears the selection
    /// when the click lands on bare image.
    pub fn click(&mut self, point: Point) -> AppResult<Effect> {
        let hit = self.store.hit_test(point);
        self.select(hit)
    }

    pub fn select(&mut self, index: Option<usize>) -> AppResult<Effect> {
        self.store.select(index)?;
        tracing::debug!(?index, "selection changed");
        self.sync_transform();
        Ok(Effect::Redraw)
    }

    pub fn apply(&mut self, command: Command) -> AppResult<Effect> {
        tracing::debug!(?command, "apply command");
        if command.needs_selection() && self.store.selected().is_none() {
            return Err(StoreError::NoSelection.into());
        }
        if let Some((delta_width, delta_height)) = command.resize_delta(self.resize_step) {
            let resized = self.store.resize_selected(delta_width, delta_height)?;
            return Ok(redraw_if(resized));
        }

        match command {
            Command::PreviousImage => {
                self.carousel.prev();
                self.clear_selection();
                Ok(Effect::Redraw)
            }
            Command::NextImage => {
                self.carousel.next();
                self.clear_selection();
                Ok(Effect::Redraw)
            }
            Command::Submit => {
                let export = self.export()?;
                tracing::debug!(
                    unsaved = self.store.has_unsaved_changes(),
                    "exporting current annotations"
                );
                Ok(Effect::Exported(export))
            }
            Command::DeleteSelected => {
                let removed = self.store.remove_selected();
                self.transform = None;
                removed?;
                Ok(Effect::Redraw)
            }
            Command::Save => {
                self.store.save();
                self.transform = None;
                Ok(Effect::Redraw)
            }
            Command::Undo => {
                self.store.undo();
                self.transform = None;
                Ok(Effect::Redraw)
            }
            Command::Deselect => self.select(None),
            Command::ResizeUp | Command::ResizeDown | Command::ResizeLeft | Command::ResizeRight => {
                Ok(Effect::None)
            }
        }
    }

    pub fn key(&mut self, key: ShortcutKey, modifiers: ShortcutModifiers) -> AppResult<Effect> {
        let context = InputContext {
            drawing: self.gesture.is_drawing(),
            has_selection: self.store.selected().is_some(),
        };
        match resolve_shortcut(key, modifiers, context) {
            Some(command) => self.apply(command),
            None => Ok(Effect::None),
        }
    }

    /// Interactive transform proposal for the selected rectangle.
    pub fn transform_to(&mut self, new_box: Rect) -> AppResult<Effect> {
        let Some(session) = self.active_transform()? else {
            return Ok(Effect::None);
        };
        Ok(redraw_if(session.propose(&mut self.store, new_box)?))
    }

    pub fn drag_selected(&mut self, delta_x: i32, delta_y: i32) -> AppResult<Effect> {
        let Some(session) = self.active_transform()? else {
            return Ok(Effect::None);
        };
        Ok(redraw_if(session.move_by(&mut self.store, delta_x, delta_y)?))
    }

    pub fn drag_handle(&mut self, handle: Handle, delta_x: i32, delta_y: i32) -> AppResult<Effect> {
        let Some(session) = self.active_transform()? else {
            return Ok(Effect::None);
        };
        Ok(redraw_if(
            session.drag_handle(&mut self.store, handle, delta_x, delta_y)?,
        ))
    }

    /// Annotations of the active image keyed by its URL.
    pub fn export(&self) -> AppResult<AnnotationExport> {
        let key = self
            .carousel
            .active_key()
            .ok_or(ExportError::NoActiveImage)?;
        Ok(export::export(key, self.store.rectangles()))
    }

    fn active_transform(&self) -> AppResult<Option<TransformSession>> {
        if self.store.selected().is_none() {
            return Err(StoreError::NoSelection.into());
        }
        if self.transform.is_none() {
            tracing::debug!("transform ignored: no loaded image to bound against");
        }
        Ok(self.transform)
    }

    fn clear_selection(&mut self) {
        self.store.clear_selection();
        self.transform = None;
    }

    fn sync_transform(&mut self) {
        self.transform = self
            .carousel
            .active_bounds()
            .and_then(|bounds| TransformSession::begin(&self.store, bounds));
    }
}

const fn redraw_if(changed: bool) -> Effect {
    if changed {
        Effect::Redraw
    } else {
        Effect::None
    }
}
