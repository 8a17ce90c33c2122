use serde::Deserialize;

/// Zero-argument triggers of the annotation UI, one per button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    PreviousImage,
    NextImage,
    Submit,
    ResizeUp,
    ResizeDown,
    ResizeLeft,
    ResizeRight,
    DeleteSelected,
    Save,
    Undo,
    Deselect,
}

impl Command {
    /// Width/height delta for the resize commands, scaled by `step`.
    pub const fn resize_delta(self, step: i32) -> Option<(i32, i32)> {
        match self {
            Self::ResizeUp => Some((0, -step)),
            Self::ResizeDown => Some((0, step)),
            Self::ResizeLeft => Some((-step, 0)),
            Self::ResizeRight => Some((step, 0)),
            _ => None,
        }
    }

    pub const fn needs_selection(self) -> bool {
        matches!(
            self,
            Self::ResizeUp
                | Self::ResizeDown
                | Self::ResizeLeft
                | Self::ResizeRight
                | Self::DeleteSelected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_commands_map_to_signed_deltas() {
        assert_eq!(Command::ResizeUp.resize_delta(10), Some((0, -10)));
        assert_eq!(Command::ResizeDown.resize_delta(10), Some((0, 10)));
        assert_eq!(Command::ResizeLeft.resize_delta(10), Some((-10, 0)));
        assert_eq!(Command::ResizeRight.resize_delta(10), Some((10, 0)));
        assert_eq!(Command::Save.resize_delta(10), None);
    }

    #[test]
    fn command_names_deserialize_in_snake_case() {
        let command: Command =
            serde_json::from_str("\"delete_selected\"").expect("command should parse");
        assert_eq!(command, Command::DeleteSelected);
        assert!(command.needs_selection());
        assert!(!Command::Undo.needs_selection());
    }
}
