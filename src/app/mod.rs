//! Event dispatch over the owned annotation state, plus replay of recorded
//! input sessions.

mod script;
mod session;

pub use script::{load_script, parse_script, replay, ReplaySummary, ScriptError, SessionEvent};
pub use session::{AnnotationSession, Effect};
