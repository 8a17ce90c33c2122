use super::error::{StateError, StateResult};
use super::{GestureEvent, GestureState};

#[derive(Debug, Default)]
pub struct StateMachine {
    state: GestureState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: GestureState::default(),
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn can_transition(&self, event: GestureEvent) -> bool {
        self.next_state(event).is_some()
    }

    /// Move and release while idle are accepted as no-ops; a second press
    /// while drawing has no target state.
    pub fn next_state(&self, event: GestureEvent) -> Option<GestureState> {
        use GestureEvent::*;
        match (self.state, event) {
            (GestureState::Idle, Press) => Some(GestureState::Drawing),
            (GestureState::Idle, Move) => Some(GestureState::Idle),
            (GestureState::Idle, Release) => Some(GestureState::Idle),
            (GestureState::Drawing, Move) => Some(GestureState::Drawing),
            (GestureState::Drawing, Release) => Some(GestureState::Idle),
            (GestureState::Drawing, Press) => None,
        }
    }

    pub fn transition(&mut self, event: GestureEvent) -> StateResult<GestureState> {
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::debug!(from = ?from, event = ?event, "invalid gesture transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, event = ?event, "gesture transition");
        }
        self.state = next;
        Ok(self.state)
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GestureState::{:?}", self.state)
    }
}
