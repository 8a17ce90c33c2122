use super::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Escape,
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl ShortcutKey {
    /// Parses key names such as `"s"`, `"enter"` or `"arrow_up"`.
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Self::Character(c.to_ascii_lowercase()));
        }
        match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(Self::Enter),
            "escape" | "esc" => Some(Self::Escape),
            "delete" | "del" => Some(Self::Delete),
            "backspace" => Some(Self::Backspace),
            "arrow_up" | "up" => Some(Self::ArrowUp),
            "arrow_down" | "down" => Some(Self::ArrowDown),
            "arrow_left" | "left" => Some(Self::ArrowLeft),
            "arrow_right" | "right" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub drawing: bool,
    pub has_selection: bool,
}

fn resolve_selection_shortcut(key: ShortcutKey) -> Option<Command> {
    match key {
        ShortcutKey::Delete | ShortcutKey::Backspace => Some(Command::DeleteSelected),
        ShortcutKey::ArrowUp => Some(Command::ResizeUp),
        ShortcutKey::ArrowDown => Some(Command::ResizeDown),
        ShortcutKey::ArrowLeft => Some(Command::ResizeLeft),
        ShortcutKey::ArrowRight => Some(Command::ResizeRight),
        _ => None,
    }
}

fn resolve_session_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<Command> {
    match (key, modifiers.ctrl, modifiers.shift) {
        (ShortcutKey::Character('s'), true, false) => Some(Command::Save),
        (ShortcutKey::Character('z'), true, false) => Some(Command::Undo),
        (ShortcutKey::Enter, true, _) => Some(Command::Submit),
        (ShortcutKey::Character('n'), false, false) | (ShortcutKey::Character(']'), false, _) => {
            Some(Command::NextImage)
        }
        (ShortcutKey::Character('p'), false, false) | (ShortcutKey::Character('['), false, _) => {
            Some(Command::PreviousImage)
        }
        (ShortcutKey::Escape, false, false) => Some(Command::Deselect),
        _ => None,
    }
}

pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<Command> {
    if context.drawing {
        return None;
    }

    if context.has_selection && !modifiers.ctrl {
        if let Some(command) = resolve_selection_shortcut(key) {
            return Some(command);
        }
    }

    resolve_session_shortcut(key, modifiers)
}
