//! Export module
//!
//! The export coordinator and the download boundary artifacts pass through.

mod coordinator;
mod sink;

pub use coordinator::{ExportCoordinator, ExportFn, ExportFuture};
pub use sink::{
    artifact_filename, artifact_filename_at, DirectorySink, DownloadSink, ExportArtifact,
    ExportError, ExportFormat, ResourceId, SaveDialogSink, StagedResource,
};
