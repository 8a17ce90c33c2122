//! Annotation editing core: drawing gestures, the annotation store and the
//! transform constraint engine.

pub mod gesture;
pub mod store;
pub mod transform;

pub use gesture::DrawingGesture;
pub use store::{AnnotationStore, StoreError, StoreResult};
pub use transform::{constrain_box, Handle, TransformSession};

/// Fixed step applied by the resize commands.
pub const DEFAULT_RESIZE_STEP: i32 = 10;
