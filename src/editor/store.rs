use crate::geometry::{Point, Rect, RectPatch};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("selection index {index} is out of range for {len} annotation(s)")]
    InvalidSelection { index: usize, len: usize },
    #[error("no annotation is selected")]
    NoSelection,
    #[error("transform session for annotation {index} no longer matches the selection")]
    StaleTransform { index: usize },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Owns the committed rectangles, the single selection and the one-slot
/// checkpoint. Indices are the only identity a rectangle has.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    rectangles: Vec<Rect>,
    selected: Option<usize>,
    checkpoint: Vec<Rect>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rectangles(&self) -> &[Rect] {
        &self.rectangles
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    pub fn checkpoint(&self) -> &[Rect] {
        &self.checkpoint
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_rect(&self) -> Option<Rect> {
        self.selected
            .and_then(|index| self.rectangles.get(index).copied())
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.rectangles != self.checkpoint
    }

    /// Appends a normalized copy of `rect`; degenerate rectangles are dropped.
    pub fn append(&mut self, rect: Rect) -> Option<usize> {
        let rect = rect.normalized();
        if rect.is_degenerate() {
            tracing::debug!(?rect, "ignoring degenerate rectangle");
            return None;
        }
        let index = self.rectangles.len();
        self.rectangles.push(rect);
        tracing::debug!(index, ?rect, "annotation appended");
        Some(index)
    }

    pub fn select(&mut self, index: Option<usize>) -> StoreResult<()> {
        if let Some(index) = index {
            let len = self.rectangles.len();
            if index >= len {
                return Err(StoreError::InvalidSelection { index, len });
            }
        }
        self.selected = index;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn selected_index(&self) -> StoreResult<usize> {
        self.selected.ok_or(StoreError::NoSelection)
    }

    /// Merges `patch` into the selected rectangle. Returns `false` without
    /// touching it when the merge would leave a non-positive dimension.
    pub fn update_selected(&mut self, patch: RectPatch) -> StoreResult<bool> {
        let index = self.selected_index()?;
        let current = self.rectangles[index];
        let merged = patch.apply_to(current);
        if !merged.has_positive_size() {
            tracing::debug!(index, ?merged, "rejected update with non-positive size");
            return Ok(false);
        }
        self.rectangles[index] = merged;
        Ok(true)
    }

    pub fn resize_selected(&mut self, delta_width: i32, delta_height: i32) -> StoreResult<bool> {
        let index = self.selected_index()?;
        let resized = self.rectangles[index].resized_by(delta_width, delta_height);
        if !resized.has_positive_size() {
            tracing::debug!(index, delta_width, delta_height, "rejected resize");
            return Ok(false);
        }
        self.rectangles[index] = resized;
        Ok(true)
    }

    /// Removes the selected rectangle. Selection is cleared in every case.
    pub fn remove_selected(&mut self) -> StoreResult<Rect> {
        let index = self.selected.take().ok_or(StoreError::NoSelection)?;
        let removed = self.rectangles.remove(index);
        tracing::debug!(index, ?removed, "annotation removed");
        Ok(removed)
    }

    pub fn save(&mut self) {
        self.checkpoint = self.rectangles.clone();
        self.selected = None;
        tracing::debug!(count = self.checkpoint.len(), "checkpoint saved");
    }

    /// Restores the last checkpoint, or an empty set if none was saved.
    pub fn undo(&mut self) {
        self.rectangles = self.checkpoint.clone();
        self.selected = None;
        tracing::debug!(count = self.rectangles.len(), "checkpoint restored");
    }

    /// Topmost rectangle under `point`; later insertions sit above earlier ones.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.rectangles
            .iter()
            .rposition(|rect| rect.contains(point))
    }
}
