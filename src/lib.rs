pub mod app;
pub mod carousel;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

pub use app::{AnnotationSession, ReplaySummary};
pub use error::{AppError, AppResult};

use carousel::{FsImageLoader, LoadBatch};
use export::FileExportSink;

/// Inputs for one headless annotation run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub images: Vec<String>,
    pub events: PathBuf,
    pub out_dir: PathBuf,
    pub config: Option<PathBuf>,
}

/// Loads the images, replays the recorded session against them and writes an
/// export for every submit.
pub fn run(options: RunOptions) -> AppResult<ReplaySummary> {
    logging::init();
    tracing::info!("starting boxmark");

    let config = config::load_app_config(options.config.as_deref());
    let images = if options.images.is_empty() {
        config.images().to_vec()
    } else {
        options.images
    };
    let events = app::load_script(&options.events)?;

    let mut session = AnnotationSession::new(config.resize_step());
    let mut batch = LoadBatch::spawn(images, Arc::new(FsImageLoader));
    for image in batch.wait_all() {
        session.image_loaded(image);
    }
    tracing::info!(
        requested = batch.requests().len(),
        loaded = session.carousel().len(),
        "images settled"
    );

    let sink = FileExportSink::new(options.out_dir, config.export_file_name());
    let summary = app::replay(&mut session, &events, &sink)?;
    tracing::info!(
        events = summary.events,
        rejected = summary.rejected,
        exports = summary.exports.len(),
        "session replayed"
    );
    Ok(summary)
}
