//! The rendering-engine capability consumed by the control panel.
//!
//! Layout computation, view transforms, and raw PNG/JSON serialization all
//! happen behind [`GraphService`]. The control panel never owns the engine;
//! it holds a shared handle and calls through this trait.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use serde_json::Value;

use crate::export::ExportError;

/// Boxed single-threaded future returning optional PNG bytes.
pub type ImageFuture = Pin<Box<dyn Future<Output = Result<Option<Vec<u8>>, ExportError>>>>;

/// Boxed single-threaded future returning an optional serializable value.
pub type StructuredFuture = Pin<Box<dyn Future<Output = Result<Option<Value>, ExportError>>>>;

/// Capability surface of the graph rendering engine.
///
/// Export methods may resolve to `Ok(None)`, meaning "nothing to export";
/// callers treat that as a no-op rather than an error.
#[async_trait(?Send)]
pub trait GraphService {
    /// Fit the whole graph into the viewport.
    fn fit(&self);

    /// Center the viewport on the graph without changing zoom.
    fn center(&self);

    /// Render the current view to PNG bytes, ready for download.
    async fn export_image(&self) -> Result<Option<Vec<u8>>, ExportError>;

    /// Produce the current graph as a serializable value.
    async fn export_structured(&self) -> Result<Option<Value>, ExportError>;
}

/// Adapter that builds a [`GraphService`] out of plain callbacks.
///
/// Callers that have no engine object, only a handful of functions, wrap
/// them here and hand the result to the coordinator like any other service.
/// Unset callbacks behave as no-ops (exports resolve to `Ok(None)`).
#[derive(Default)]
pub struct CallbackGraphService {
    fit: Option<Box<dyn Fn()>>,
    center: Option<Box<dyn Fn()>>,
    export_image: Option<Box<dyn Fn() -> ImageFuture>>,
    export_structured: Option<Box<dyn Fn() -> StructuredFuture>>,
}

impl CallbackGraphService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fit(mut self, fit: impl Fn() + 'static) -> Self {
        self.fit = Some(Box::new(fit));
        self
    }

    pub fn with_center(mut self, center: impl Fn() + 'static) -> Self {
        self.center = Some(Box::new(center));
        self
    }

    pub fn with_export_image(mut self, export: impl Fn() -> ImageFuture + 'static) -> Self {
        self.export_image = Some(Box::new(export));
        self
    }

    pub fn with_export_structured(
        mut self,
        export: impl Fn() -> StructuredFuture + 'static,
    ) -> Self {
        self.export_structured = Some(Box::new(export));
        self
    }
}

#[async_trait(?Send)]
impl GraphService for CallbackGraphService {
    fn fit(&self) {
        if let Some(fit) = &self.fit {
            fit();
        }
    }

    fn center(&self) {
        if let Some(center) = &self.center {
            center();
        }
    }

    async fn export_image(&self) -> Result<Option<Vec<u8>>, ExportError> {
        match &self.export_image {
            Some(export) => export().await,
            None => Ok(None),
        }
    }

    async fn export_structured(&self) -> Result<Option<Value>, ExportError> {
        match &self.export_structured {
            Some(export) => export().await,
            None => Ok(None),
        }
    }
}
