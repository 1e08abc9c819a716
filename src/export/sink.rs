//! Download boundary for exported artifacts.
//!
//! The coordinator produces artifacts; a [`DownloadSink`] gets them out of
//! the process. Structured exports go through a staged temporary resource
//! that must be released after exactly one delivery; [`StagedResource`]
//! guarantees the release on every path.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;

/// Filename prefix for all exported artifacts.
const ARTIFACT_PREFIX: &str = "chainscope-graph";

/// Which artifact the user asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Rendered view as a PNG image.
    Image,
    /// Graph dataset as pretty-printed JSON.
    Structured,
}

impl ExportFormat {
    /// File extension of the produced artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Image => "png",
            ExportFormat::Structured => "json",
        }
    }
}

/// Build the artifact filename for an export happening now.
///
/// The millisecond timestamp keeps successive exports from colliding; the
/// coordinator's single-export guard keeps two exports from sharing one.
pub fn artifact_filename(format: ExportFormat) -> String {
    artifact_filename_at(Utc::now().timestamp_millis(), format)
}

/// Build the artifact filename for an export requested at `unix_ms`.
pub fn artifact_filename_at(unix_ms: i64, format: ExportFormat) -> String {
    format!("{}-{}.{}", ARTIFACT_PREFIX, unix_ms, format.extension())
}

/// A payload ready to hand to the download boundary.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Handle to a staged temporary resource inside a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u64);

/// Error raised inside the export pipeline.
///
/// Never escapes the coordinator; it is logged and optionally handed to the
/// failure observer.
#[derive(Debug)]
pub enum ExportError {
    /// The rendering engine or external callback failed to encode.
    Encoder(String),
    /// Structured payload could not be serialized.
    Serialization(serde_json::Error),
    /// Writing the artifact failed.
    Io(std::io::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encoder(msg) => write!(f, "Encoder error: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Io(e) => write!(f, "Write error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Encoder(_) => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Boundary through which artifacts leave the application.
pub trait DownloadSink {
    /// Deliver an artifact that already carries its payload.
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError>;

    /// Stage a temporary payload, returning its handle.
    fn stage(&self, bytes: &[u8]) -> ResourceId;

    /// Deliver a previously staged payload under the given filename.
    fn deliver_staged(&self, id: ResourceId, filename: &str) -> Result<(), ExportError>;

    /// Release a staged payload. Must be idempotent for unknown ids.
    fn release(&self, id: ResourceId);
}

/// Scoped handle to a staged sink resource.
///
/// Stages on construction, releases on drop, so an early return between
/// staging and delivery cannot leak the resource.
pub struct StagedResource<'a> {
    sink: &'a dyn DownloadSink,
    id: ResourceId,
}

impl<'a> StagedResource<'a> {
    pub fn new(sink: &'a dyn DownloadSink, bytes: &[u8]) -> Self {
        let id = sink.stage(bytes);
        Self { sink, id }
    }

    pub fn deliver(&self, filename: &str) -> Result<(), ExportError> {
        self.sink.deliver_staged(self.id, filename)
    }
}

impl Drop for StagedResource<'_> {
    fn drop(&mut self) {
        self.sink.release(self.id);
    }
}

/// Staged payload storage shared by the concrete sinks.
#[derive(Default)]
struct Staging {
    next_id: Cell<u64>,
    payloads: RefCell<HashMap<ResourceId, Vec<u8>>>,
}

impl Staging {
    fn stage(&self, bytes: &[u8]) -> ResourceId {
        let id = ResourceId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.payloads.borrow_mut().insert(id, bytes.to_vec());
        id
    }

    fn take(&self, id: ResourceId) -> Option<Vec<u8>> {
        // Payload stays staged until released; deliver reads a copy.
        self.payloads.borrow().get(&id).cloned()
    }

    fn release(&self, id: ResourceId) {
        self.payloads.borrow_mut().remove(&id);
    }
}

/// Native sink that asks the user where to save via an rfd dialog.
///
/// The dialog is preseeded with the generated filename. Cancelling the
/// dialog is a quiet non-delivery, not an error.
#[derive(Default)]
pub struct SaveDialogSink {
    staging: Staging,
}

impl SaveDialogSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), ExportError> {
        let extension = filename.rsplit('.').next().unwrap_or("dat");
        let picked = rfd::FileDialog::new()
            .add_filter(extension.to_uppercase(), &[extension])
            .set_file_name(filename)
            .save_file();

        match picked {
            Some(path) => {
                std::fs::write(path, bytes)?;
                Ok(())
            }
            None => {
                tracing::debug!(filename, "save dialog cancelled");
                Ok(())
            }
        }
    }
}

impl DownloadSink for SaveDialogSink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        self.save(&artifact.filename, &artifact.data)
    }

    fn stage(&self, bytes: &[u8]) -> ResourceId {
        self.staging.stage(bytes)
    }

    fn deliver_staged(&self, id: ResourceId, filename: &str) -> Result<(), ExportError> {
        match self.staging.take(id) {
            Some(bytes) => self.save(filename, &bytes),
            None => Err(ExportError::Encoder(format!(
                "staged resource {:?} not found",
                id
            ))),
        }
    }

    fn release(&self, id: ResourceId) {
        self.staging.release(id);
    }
}

/// Sink that writes artifacts straight into a directory, no dialog.
///
/// Used headless and in tests.
pub struct DirectorySink {
    dir: PathBuf,
    staging: Staging,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            staging: Staging::default(),
        }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        std::fs::write(self.dir.join(&artifact.filename), &artifact.data)?;
        Ok(())
    }

    fn stage(&self, bytes: &[u8]) -> ResourceId {
        self.staging.stage(bytes)
    }

    fn deliver_staged(&self, id: ResourceId, filename: &str) -> Result<(), ExportError> {
        match self.staging.take(id) {
            Some(bytes) => {
                std::fs::write(self.dir.join(filename), bytes)?;
                Ok(())
            }
            None => Err(ExportError::Encoder(format!(
                "staged resource {:?} not found",
                id
            ))),
        }
    }

    fn release(&self, id: ResourceId) {
        self.staging.release(id);
    }
}
