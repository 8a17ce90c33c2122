use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::session::{AnnotationSession, Effect};
use crate::editor::Handle;
use crate::error::AppResult;
use crate::export::ExportSink;
use crate::geometry::{Point, Rect};
use crate::input::{Command, ShortcutKey, ShortcutModifiers};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read session script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown key name: {key}")]
    UnknownKey { key: String },
}

/// One recorded input event, stored as a JSON object per line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Press {
        x: i32,
        y: i32,
    },
    Move {
        x: i32,
        y: i32,
    },
    Release,
    Click {
        x: i32,
        y: i32,
    },
    Transform {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    Drag {
        dx: i32,
        dy: i32,
    },
    Handle {
        handle: Handle,
        dx: i32,
        dy: i32,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    Command {
        name: Command,
    },
}

impl SessionEvent {
    pub fn apply(&self, session: &mut AnnotationSession) -> AppResult<Effect> {
        match self {
            Self::Press { x, y } => session.pointer_press(Point::new(*x, *y)),
            Self::Move { x, y } => Ok(session.pointer_move(Point::new(*x, *y))),
            Self::Release => Ok(session.pointer_release()),
            Self::Click { x, y } => session.click(Point::new(*x, *y)),
            Self::Transform {
                x,
                y,
                width,
                height,
            } => session.transform_to(Rect::new(*x, *y, *width, *height)),
            Self::Drag { dx, dy } => session.drag_selected(*dx, *dy),
            Self::Handle { handle, dx, dy } => session.drag_handle(*handle, *dx, *dy),
            Self::Key { key, ctrl, shift } => {
                let parsed = ShortcutKey::parse(key)
                    .ok_or_else(|| ScriptError::UnknownKey { key: key.clone() })?;
                session.key(parsed, ShortcutModifiers::new(*ctrl, *shift))
            }
            Self::Command { name } => session.apply(*name),
        }
    }
}

pub fn parse_script(source: &str) -> Result<Vec<SessionEvent>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ScriptError::Parse {
                line: index + 1,
                source,
            })
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<Vec<SessionEvent>, ScriptError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&source)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub rejected: usize,
    pub exports: Vec<PathBuf>,
}

/// Feeds `events` through `session` in order. Contract violations are logged
/// and counted; anything else stops the replay.
pub fn replay(
    session: &mut AnnotationSession,
    events: &[SessionEvent],
    sink: &impl ExportSink,
) -> AppResult<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    for (position, event) in events.iter().enumerate() {
        summary.events += 1;
        match event.apply(session) {
            Ok(Effect::Exported(export)) => summary.exports.push(sink.deliver(&export)?),
            Ok(_) => {}
            Err(err) if err.is_recoverable() => {
                summary.rejected += 1;
                tracing::warn!(event = position + 1, ?event, %err, "event rejected");
            }
            Err(err) => return Err(err),
        }
    }
    tracing::debug!(
        events = summary.events,
        rejected = summary.rejected,
        exports = summary.exports.len(),
        "replay finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::carousel::LoadedImage;
    use crate::error::AppError;
    use crate::export::{AnnotationExport, ExportResult};
    use crate::geometry::ImageBounds;

    #[derive(Default)]
    struct RecordingSink {
        delivered: RefCell<Vec<AnnotationExport>>,
    }

    impl ExportSink for RecordingSink {
        fn deliver(&self, export: &AnnotationExport) -> ExportResult<PathBuf> {
            self.delivered.borrow_mut().push(export.clone());
            Ok(PathBuf::from("recorded.json"))
        }
    }

    fn loaded_session() -> AnnotationSession {
        let mut session = AnnotationSession::default();
        session.image_loaded(LoadedImage::new("img1.png", ImageBounds::new(200, 200)));
        session
    }

    #[test]
    fn parse_script_skips_blank_and_comment_lines() {
        let events = parse_script(
            "# draw one box\n\n{\"event\":\"press\",\"x\":1,\"y\":2}\n  \n{\"event\":\"release\"}\n",
        )
        .expect("script parses");
        assert_eq!(
            events,
            vec![SessionEvent::Press { x: 1, y: 2 }, SessionEvent::Release]
        );
    }

    #[test]
    fn parse_script_reads_every_event_kind() {
        let events = parse_script(
            r#"{"event":"move","x":3,"y":4}
{"event":"click","x":5,"y":6}
{"event":"transform","x":0,"y":0,"width":10,"height":12}
{"event":"drag","dx":-1,"dy":2}
{"event":"handle","handle":"bottom_right","dx":4,"dy":4}
{"event":"key","key":"s","ctrl":true}
{"event":"command","name":"resize_left"}"#,
        )
        .expect("script parses");
        assert_eq!(events.len(), 7);
        assert_eq!(
            events[4],
            SessionEvent::Handle {
                handle: Handle::BottomRight,
                dx: 4,
                dy: 4
            }
        );
        assert_eq!(
            events[5],
            SessionEvent::Key {
                key: "s".to_string(),
                ctrl: true,
                shift: false
            }
        );
        assert_eq!(
            events[6],
            SessionEvent::Command {
                name: Command::ResizeLeft
            }
        );
    }

    #[test]
    fn parse_error_names_line_number() {
        let err = parse_script("{\"event\":\"release\"}\n\n{\"event\":\"hover\"}")
            .expect_err("unknown event");
        match err {
            ScriptError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn load_script_reports_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_script(&dir.path().join("missing.jsonl")).expect_err("missing file");
        assert!(matches!(err, ScriptError::Read { .. }));
    }

    #[test]
    fn replay_draws_and_exports_through_sink() {
        let events = parse_script(
            r#"{"event":"press","x":10,"y":20}
{"event":"move","x":40,"y":60}
{"event":"release"}
{"event":"key","key":"enter","ctrl":true}"#,
        )
        .expect("script parses");
        let sink = RecordingSink::default();
        let mut session = loaded_session();

        let summary = replay(&mut session, &events, &sink).expect("replay");
        assert_eq!(summary.events, 4);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.exports, vec![PathBuf::from("recorded.json")]);

        let delivered = sink.delivered.borrow();
        let boxes = delivered[0].get("img1.png").expect("active image key");
        assert_eq!((boxes[0].x1, boxes[0].y1, boxes[0].x2, boxes[0].y2), (10, 20, 40, 60));
    }

    #[test]
    fn replay_counts_contract_violations_and_continues() {
        let events = parse_script(
            r#"{"event":"command","name":"resize_up"}
{"event":"press","x":0,"y":0}
{"event":"press","x":5,"y":5}
{"event":"move","x":20,"y":20}
{"event":"release"}"#,
        )
        .expect("script parses");
        let mut session = loaded_session();

        let summary = replay(&mut session, &events, &RecordingSink::default()).expect("replay");
        assert_eq!(summary.rejected, 2);
        assert_eq!(session.store().rectangles(), &[Rect::new(0, 0, 20, 20)]);
    }

    #[test]
    fn replay_commits_gesture_spanning_full_i32_range() {
        let events = parse_script(
            r#"{"event":"press","x":0,"y":0}
{"event":"move","x":-2147483648,"y":5}
{"event":"release"}"#,
        )
        .expect("script parses");
        let mut session = loaded_session();

        let summary = replay(&mut session, &events, &RecordingSink::default()).expect("replay");
        assert_eq!(summary.rejected, 0);
        assert_eq!(
            session.store().rectangles(),
            &[Rect::new(i32::MIN, 0, i32::MAX, 5)]
        );
    }

    #[test]
    fn replay_aborts_on_unknown_key() {
        let events = vec![SessionEvent::Key {
            key: "hyper".to_string(),
            ctrl: false,
            shift: false,
        }];
        let err = replay(
            &mut loaded_session(),
            &events,
            &RecordingSink::default(),
        )
        .expect_err("unknown key");
        assert!(matches!(
            err,
            AppError::Script(ScriptError::UnknownKey { .. })
        ));
    }

    #[test]
    fn replay_aborts_when_submitting_without_images() {
        let events = vec![SessionEvent::Command {
            name: Command::Submit,
        }];
        let err = replay(
            &mut AnnotationSession::default(),
            &events,
            &RecordingSink::default(),
        )
        .expect_err("nothing to export");
        assert!(!err.is_recoverable());
    }
}
