/// Pointer phases that drive the drawing gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    Press,
    Move,
    Release,
}
