use crate::geometry::{Point, Rect};
use crate::state::{GestureEvent, GestureState, StateMachine, StateResult};

/// Press-drag-release controller producing at most one rectangle per gesture.
#[derive(Debug, Default)]
pub struct DrawingGesture {
    machine: StateMachine,
    anchor: Point,
    candidate: Option<Rect>,
}

impl DrawingGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    pub fn is_drawing(&self) -> bool {
        self.machine.state() == GestureState::Drawing
    }

    /// Transient, still-signed rectangle shown while dragging.
    pub fn candidate(&self) -> Option<Rect> {
        self.candidate
    }

    pub fn press(&mut self, point: Point) -> StateResult<()> {
        self.machine.transition(GestureEvent::Press)?;
        self.anchor = point;
        self.candidate = Some(Rect::new(point.x, point.y, 0, 0));
        Ok(())
    }

    /// Returns the updated candidate for redraw; `None` while idle.
    pub fn move_to(&mut self, point: Point) -> Option<Rect> {
        if !self.is_drawing() {
            return None;
        }
        let moved = self.machine.transition(GestureEvent::Move);
        debug_assert!(moved.is_ok(), "move is valid while drawing");
        let candidate = Rect::from_anchor(self.anchor, point);
        self.candidate = Some(candidate);
        Some(candidate)
    }

    /// Ends the gesture. Yields the normalized rectangle to commit, or `None`
    /// when idle or when the drag had zero width or height.
    pub fn release(&mut self) -> Option<Rect> {
        if !self.is_drawing() {
            return None;
        }
        let released = self.machine.transition(GestureEvent::Release);
        debug_assert!(released.is_ok(), "release is valid while drawing");
        let candidate = self.candidate.take()?;
        if candidate.is_degenerate() {
            tracing::debug!(?candidate, "discarding zero-area gesture");
            return None;
        }
        Some(candidate.normalized())
    }
}
