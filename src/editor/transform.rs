use super::store::{AnnotationStore, StoreError, StoreResult};
use crate::geometry::{ImageBounds, Rect, RectPatch};

/// Keeps `old_box` when `new_box` starts left of or above the image, or is
/// wider or taller than it. The right and bottom edges are not checked: a box
/// may extend past them as long as its own size fits.
pub fn constrain_box(old_box: Rect, new_box: Rect, bounds: ImageBounds) -> Rect {
    if new_box.x < 0
        || new_box.y < 0
        || new_box.width > bounds.width
        || new_box.height > bounds.height
    {
        return old_box;
    }
    new_box
}

/// Corner anchors offered while transforming. Edge midpoints and rotation are
/// never exposed, and the aspect ratio is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Box produced by dragging this corner by `(delta_x, delta_y)`; the
    /// opposite corner stays put.
    pub const fn drag(self, rect: Rect, delta_x: i32, delta_y: i32) -> Rect {
        let (x, width) = match self {
            Self::TopLeft | Self::BottomLeft => (
                rect.x.saturating_add(delta_x),
                rect.width.saturating_sub(delta_x),
            ),
            Self::TopRight | Self::BottomRight => (rect.x, rect.width.saturating_add(delta_x)),
        };
        let (y, height) = match self {
            Self::TopLeft | Self::TopRight => (
                rect.y.saturating_add(delta_y),
                rect.height.saturating_sub(delta_y),
            ),
            Self::BottomLeft | Self::BottomRight => (rect.y, rect.height.saturating_add(delta_y)),
        };
        Rect::new(x, y, width, height)
    }
}

/// Live edit binding between the selected annotation and the active image's
/// bounds. Dropped whenever the selection or the image changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformSession {
    index: usize,
    bounds: ImageBounds,
}

impl TransformSession {
    pub fn begin(store: &AnnotationStore, bounds: ImageBounds) -> Option<Self> {
        store.selected().map(|index| Self { index, bounds })
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn bounds(&self) -> ImageBounds {
        self.bounds
    }

    /// Runs `new_box` through [`constrain_box`] and commits it. Returns
    /// `false` when the proposal was rejected or collapses the box.
    pub fn propose(&self, store: &mut AnnotationStore, new_box: Rect) -> StoreResult<bool> {
        if store.selected() != Some(self.index) {
            return Err(StoreError::StaleTransform { index: self.index });
        }
        let old_box = store
            .selected_rect()
            .ok_or(StoreError::StaleTransform { index: self.index })?;
        let accepted = constrain_box(old_box, new_box, self.bounds);
        if accepted == old_box {
            tracing::debug!(index = self.index, ?new_box, "transform proposal rejected");
            return Ok(false);
        }
        if !accepted.has_positive_size() {
            tracing::debug!(index = self.index, ?accepted, "transform would collapse box");
            return Ok(false);
        }
        store.update_selected(RectPatch::full(accepted))
    }

    pub fn move_by(
        &self,
        store: &mut AnnotationStore,
        delta_x: i32,
        delta_y: i32,
    ) -> StoreResult<bool> {
        let current = self.current(store)?;
        self.propose(store, current.translated(delta_x, delta_y))
    }

    pub fn drag_handle(
        &self,
        store: &mut AnnotationStore,
        handle: Handle,
        delta_x: i32,
        delta_y: i32,
    ) -> StoreResult<bool> {
        let current = self.current(store)?;
        self.propose(store, handle.drag(current, delta_x, delta_y))
    }

    fn current(&self, store: &AnnotationStore) -> StoreResult<Rect> {
        match store.selected() {
            Some(index) if index == self.index => store
                .selected_rect()
                .ok_or(StoreError::StaleTransform { index: self.index }),
            _ => Err(StoreError::StaleTransform { index: self.index }),
        }
    }
}
