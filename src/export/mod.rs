use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::geometry::{CornerBox, Rect};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "annotations.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no active image to export annotations for")]
    NoActiveImage,
    #[error("export file name is empty")]
    MissingFileName,
    #[error("failed to serialize annotations: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Image URL mapped to its corner-pair boxes, in annotation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnnotationExport(BTreeMap<String, Vec<CornerBox>>);

impl AnnotationExport {
    pub fn get(&self, image_key: &str) -> Option<&[CornerBox]> {
        self.0.get(image_key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Two-space indented JSON, the format of the downloadable file.
    pub fn to_pretty_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Only `active_image_key` is represented; other images are not.
pub fn export(active_image_key: &str, rectangles: &[Rect]) -> AnnotationExport {
    let boxes = rectangles.iter().map(Rect::corners).collect::<Vec<_>>();
    let mut entries = BTreeMap::new();
    entries.insert(active_image_key.to_string(), boxes);
    AnnotationExport(entries)
}

/// Destination for a finished export, standing in for the browser download.
pub trait ExportSink {
    fn deliver(&self, export: &AnnotationExport) -> ExportResult<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct FileExportSink {
    output_dir: PathBuf,
    file_name: String,
}

impl FileExportSink {
    pub fn new(output_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn target_path(&self) -> ExportResult<PathBuf> {
        if self.file_name.is_empty() {
            return Err(ExportError::MissingFileName);
        }
        Ok(self.output_dir.join(&self.file_name))
    }
}

impl ExportSink for FileExportSink {
    fn deliver(&self, export: &AnnotationExport) -> ExportResult<PathBuf> {
        let target = self.target_path()?;
        let json = export.to_pretty_json()?;
        write_overwrite(&target, json.as_bytes()).map_err(|source| ExportError::Write {
            path: target.clone(),
            source,
        })?;
        tracing::info!(path = %target.display(), images = export.len(), "annotations exported");
        Ok(target)
    }
}

fn write_overwrite(destination: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, contents)
}
