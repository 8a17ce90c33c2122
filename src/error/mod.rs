use crate::app::ScriptError;
use crate::editor::StoreError;
use crate::export::ExportError;
use crate::state::StateError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

impl AppError {
    /// Contract violations a caller can log and move past; everything else
    /// is an I/O or input failure.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::State(_) | Self::Store(_))
    }
}
