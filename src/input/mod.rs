mod command;
mod shortcut;

pub use command::Command;
pub use shortcut::{resolve_shortcut, InputContext, ShortcutKey, ShortcutModifiers};
