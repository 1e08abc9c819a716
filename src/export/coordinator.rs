//! Export and view-command orchestration.
//!
//! The coordinator owns the control panel's only mutable shared state: the
//! export in-flight flag and the export menu flag. Everything else it
//! touches is externally owned and reached through the [`GraphService`]
//! capability, fallback callbacks, or the [`DownloadSink`] boundary.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use tracing::{debug, warn};

use super::sink::{
    artifact_filename_at, DownloadSink, ExportArtifact, ExportError, ExportFormat, StagedResource,
};
use crate::graph::{ExportRequest, GraphService};

/// Boxed single-threaded future produced by an external export callback.
pub type ExportFuture = Pin<Box<dyn Future<Output = Result<(), ExportError>>>>;

/// External export callback, used only when no [`GraphService`] is supplied.
/// The callback performs its own artifact delivery.
pub type ExportFn = Box<dyn Fn(ExportFormat) -> ExportFuture>;

/// Orchestrates layout selection, view commands, and the export pipeline.
///
/// At most one export is in flight per coordinator. A request arriving while
/// another export is suspended at its encoder is dropped, not queued;
/// artifact names carry a millisecond timestamp and overlapping exports
/// could collide on it or double-trigger downloads.
pub struct ExportCoordinator {
    service: Option<Rc<dyn GraphService>>,
    export_fallback: Option<ExportFn>,
    fit_fallback: Option<Box<dyn Fn()>>,
    center_fallback: Option<Box<dyn Fn()>>,
    on_layout_change: Option<Box<dyn Fn(&str)>>,
    on_export_failure: Option<Box<dyn Fn(&ExportError)>>,
    sink: Rc<dyn DownloadSink>,
    exporting: Cell<bool>,
    menu_open: Cell<bool>,
}

impl ExportCoordinator {
    pub fn new(sink: Rc<dyn DownloadSink>) -> Self {
        Self {
            service: None,
            export_fallback: None,
            fit_fallback: None,
            center_fallback: None,
            on_layout_change: None,
            on_export_failure: None,
            sink,
            exporting: Cell::new(false),
            menu_open: Cell::new(false),
        }
    }

    /// Use a rendering engine as the authoritative encoder.
    pub fn with_service(mut self, service: Rc<dyn GraphService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Async export callback used only when no service is supplied.
    pub fn with_export_fallback(
        mut self,
        export: impl Fn(ExportFormat) -> ExportFuture + 'static,
    ) -> Self {
        self.export_fallback = Some(Box::new(export));
        self
    }

    /// Fit/center callbacks used only when no service is supplied.
    pub fn with_view_fallbacks(
        mut self,
        fit: impl Fn() + 'static,
        center: impl Fn() + 'static,
    ) -> Self {
        self.fit_fallback = Some(Box::new(fit));
        self.center_fallback = Some(Box::new(center));
        self
    }

    /// Collaborator notified when the user picks a layout.
    pub fn on_layout_change(mut self, notify: impl Fn(&str) + 'static) -> Self {
        self.on_layout_change = Some(Box::new(notify));
        self
    }

    /// Observer for export failures. Failures are always logged and
    /// swallowed; this hook exists for callers that want a visible error
    /// state on top of that.
    pub fn on_export_failure(mut self, observe: impl Fn(&ExportError) + 'static) -> Self {
        self.on_export_failure = Some(Box::new(observe));
        self
    }

    /// True while an export is between request and completion.
    pub fn is_exporting(&self) -> bool {
        self.exporting.get()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open.get()
    }

    pub fn open_menu(&self) {
        self.menu_open.set(true);
    }

    pub fn close_menu(&self) {
        self.menu_open.set(false);
    }

    pub fn toggle_menu(&self) {
        self.menu_open.set(!self.menu_open.get());
    }

    /// Run one export to completion.
    ///
    /// Dropped if an export is already in flight. Failures are absorbed
    /// here: logged, optionally observed, never propagated. On every exit
    /// path the in-flight flag clears and the export menu closes.
    pub async fn request_export(&self, format: ExportFormat) {
        if self.exporting.get() {
            debug!(format = format.extension(), "export in flight, request dropped");
            return;
        }
        self.exporting.set(true);

        let request = ExportRequest::new(format);
        if let Err(err) = self.run_export(&request).await {
            warn!(error = %err, "export failed");
            if let Some(observe) = &self.on_export_failure {
                observe(&err);
            }
        }

        self.exporting.set(false);
        self.menu_open.set(false);
    }

    async fn run_export(&self, request: &ExportRequest) -> Result<(), ExportError> {
        let filename =
            artifact_filename_at(request.requested_at.timestamp_millis(), request.format);

        if let Some(service) = &self.service {
            match request.format {
                ExportFormat::Image => {
                    // PNG arrives download-ready; deliver it as-is.
                    match service.export_image().await? {
                        Some(data) => self.sink.deliver(&ExportArtifact { filename, data }),
                        None => {
                            debug!("image export produced nothing");
                            Ok(())
                        }
                    }
                }
                ExportFormat::Structured => match service.export_structured().await? {
                    Some(value) => {
                        let text = serde_json::to_string_pretty(&value)?;
                        // Staged resource is scoped to this block; it is
                        // released as soon as the delivery is triggered.
                        let staged = StagedResource::new(self.sink.as_ref(), text.as_bytes());
                        staged.deliver(&filename)
                    }
                    None => {
                        debug!("structured export produced nothing");
                        Ok(())
                    }
                },
            }
        } else if let Some(export) = &self.export_fallback {
            export(request.format).await
        } else {
            debug!("no graph service or export callback, nothing to do");
            Ok(())
        }
    }

    /// Forward a layout change to the collaborator. Identifiers are passed
    /// through untouched; the rendering engine validates them.
    pub fn set_layout(&self, id: &str) {
        if let Some(notify) = &self.on_layout_change {
            notify(id);
        }
    }

    /// Fit the graph into the viewport.
    pub fn fit(&self) {
        match (&self.service, &self.fit_fallback) {
            (Some(service), _) => service.fit(),
            (None, Some(fit)) => fit(),
            (None, None) => {}
        }
    }

    /// Center the viewport on the graph.
    pub fn center(&self) {
        match (&self.service, &self.center_fallback) {
            (Some(service), _) => service.center(),
            (None, Some(center)) => center(),
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    use crate::export::sink::ResourceId;

    /// Sink that records every boundary interaction in order.
    #[derive(Default)]
    struct RecordingSink {
        events: RefCell<Vec<String>>,
        delivered: RefCell<Vec<ExportArtifact>>,
        staged: RefCell<HashMap<ResourceId, Vec<u8>>>,
        next_id: Cell<u64>,
        fail_staged_delivery: Cell<bool>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }

        fn live_staged(&self) -> usize {
            self.staged.borrow().len()
        }
    }

    impl DownloadSink for RecordingSink {
        fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError> {
            self.events.borrow_mut().push("deliver".into());
            self.delivered.borrow_mut().push(artifact.clone());
            Ok(())
        }

        fn stage(&self, bytes: &[u8]) -> ResourceId {
            self.events.borrow_mut().push("stage".into());
            let id = ResourceId(self.next_id.get());
            self.next_id.set(id.0 + 1);
            self.staged.borrow_mut().insert(id, bytes.to_vec());
            id
        }

        fn deliver_staged(&self, id: ResourceId, filename: &str) -> Result<(), ExportError> {
            self.events
                .borrow_mut()
                .push(format!("deliver_staged:{filename}"));
            if self.fail_staged_delivery.get() {
                return Err(ExportError::Encoder("disk full".into()));
            }
            assert!(self.staged.borrow().contains_key(&id), "unknown resource");
            Ok(())
        }

        fn release(&self, id: ResourceId) {
            self.events.borrow_mut().push("release".into());
            self.staged.borrow_mut().remove(&id);
        }
    }

    /// Service whose structured export can be held open with a oneshot gate.
    struct GatedService {
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        image: RefCell<Result<Option<Vec<u8>>, String>>,
        structured_calls: Cell<usize>,
        image_calls: Cell<usize>,
        fit_calls: Cell<usize>,
        center_calls: Cell<usize>,
    }

    impl GatedService {
        fn new() -> Self {
            Self {
                gate: RefCell::new(None),
                image: RefCell::new(Ok(None)),
                structured_calls: Cell::new(0),
                image_calls: Cell::new(0),
                fit_calls: Cell::new(0),
                center_calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl GraphService for GatedService {
        fn fit(&self) {
            self.fit_calls.set(self.fit_calls.get() + 1);
        }

        fn center(&self) {
            self.center_calls.set(self.center_calls.get() + 1);
        }

        async fn export_image(&self) -> Result<Option<Vec<u8>>, ExportError> {
            self.image_calls.set(self.image_calls.get() + 1);
            self.image
                .borrow_mut()
                .clone()
                .map_err(ExportError::Encoder)
        }

        async fn export_structured(&self) -> Result<Option<Value>, ExportError> {
            self.structured_calls.set(self.structured_calls.get() + 1);
            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            Ok(Some(json!({"nodes": [], "edges": []})))
        }
    }

    fn coordinator_with(
        sink: Rc<RecordingSink>,
        service: Rc<GatedService>,
    ) -> Rc<ExportCoordinator> {
        Rc::new(ExportCoordinator::new(sink).with_service(service))
    }

    #[tokio::test]
    async fn overlapping_requests_run_one_encoder() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let sink = Rc::new(RecordingSink::default());
                let service = Rc::new(GatedService::new());
                let (tx, rx) = oneshot::channel();
                *service.gate.borrow_mut() = Some(rx);

                let coordinator = coordinator_with(sink.clone(), service.clone());
                coordinator.open_menu();

                let first = {
                    let coordinator = coordinator.clone();
                    tokio::task::spawn_local(async move {
                        coordinator.request_export(ExportFormat::Structured).await;
                    })
                };
                tokio::task::yield_now().await;
                assert!(coordinator.is_exporting());

                // Second request while the first is suspended: dropped.
                coordinator.request_export(ExportFormat::Structured).await;
                assert_eq!(service.structured_calls.get(), 1);
                assert!(coordinator.is_exporting());

                tx.send(()).unwrap();
                first.await.unwrap();

                assert_eq!(service.structured_calls.get(), 1);
                // Exactly one download was triggered.
                let staged_deliveries = sink
                    .events()
                    .iter()
                    .filter(|e| e.starts_with("deliver_staged"))
                    .count();
                assert_eq!(staged_deliveries, 1);
                assert!(!coordinator.is_exporting());
                assert!(!coordinator.is_menu_open());
            })
            .await;
    }

    #[tokio::test]
    async fn structured_export_stages_delivers_then_releases() {
        let sink = Rc::new(RecordingSink::default());
        let service = Rc::new(GatedService::new());
        let coordinator = coordinator_with(sink.clone(), service);

        coordinator.request_export(ExportFormat::Structured).await;

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], "stage");
        assert!(events[1].starts_with("deliver_staged:chainscope-graph-"));
        assert!(events[1].ends_with(".json"));
        assert_eq!(events[2], "release");
        assert_eq!(sink.live_staged(), 0);
    }

    #[tokio::test]
    async fn staged_resource_released_even_when_delivery_fails() {
        let sink = Rc::new(RecordingSink::default());
        sink.fail_staged_delivery.set(true);
        let service = Rc::new(GatedService::new());

        let failures = Rc::new(Cell::new(0));
        let seen = failures.clone();
        let coordinator = Rc::new(
            ExportCoordinator::new(sink.clone())
                .with_service(service)
                .on_export_failure(move |_| seen.set(seen.get() + 1)),
        );

        coordinator.request_export(ExportFormat::Structured).await;

        assert_eq!(failures.get(), 1);
        assert_eq!(sink.events().last().map(String::as_str), Some("release"));
        assert_eq!(sink.live_staged(), 0);
        assert!(!coordinator.is_exporting());
    }

    #[tokio::test]
    async fn image_export_delivers_ready_artifact() {
        let sink = Rc::new(RecordingSink::default());
        let service = Rc::new(GatedService::new());
        *service.image.borrow_mut() = Ok(Some(vec![0x89, 0x50, 0x4e, 0x47]));
        let coordinator = coordinator_with(sink.clone(), service);

        coordinator.request_export(ExportFormat::Image).await;

        let delivered = sink.delivered.borrow();
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].filename.starts_with("chainscope-graph-"));
        assert!(delivered[0].filename.ends_with(".png"));
        assert_eq!(delivered[0].data, vec![0x89, 0x50, 0x4e, 0x47]);
        // Direct path never stages.
        assert_eq!(sink.events()[0], "deliver");
    }

    #[tokio::test]
    async fn null_image_result_is_a_quiet_noop() {
        let sink = Rc::new(RecordingSink::default());
        let service = Rc::new(GatedService::new());

        let failures = Rc::new(Cell::new(0));
        let seen = failures.clone();
        let coordinator = Rc::new(
            ExportCoordinator::new(sink.clone())
                .with_service(service)
                .on_export_failure(move |_| seen.set(seen.get() + 1)),
        );
        coordinator.open_menu();

        coordinator.request_export(ExportFormat::Image).await;

        assert!(sink.events().is_empty());
        assert_eq!(failures.get(), 0);
        assert!(!coordinator.is_exporting());
        assert!(!coordinator.is_menu_open());
    }

    #[tokio::test]
    async fn encoder_failure_is_logged_observed_and_swallowed() {
        let sink = Rc::new(RecordingSink::default());
        let service = Rc::new(GatedService::new());
        *service.image.borrow_mut() = Err("render failed".into());

        let observed = Rc::new(RefCell::new(Vec::new()));
        let seen = observed.clone();
        let coordinator = Rc::new(
            ExportCoordinator::new(sink.clone())
                .with_service(service)
                .on_export_failure(move |err| seen.borrow_mut().push(err.to_string())),
        );
        coordinator.open_menu();

        coordinator.request_export(ExportFormat::Image).await;

        assert!(sink.events().is_empty());
        assert_eq!(observed.borrow().len(), 1);
        assert!(observed.borrow()[0].contains("render failed"));
        assert!(!coordinator.is_exporting());
        assert!(!coordinator.is_menu_open());
    }

    #[tokio::test]
    async fn fallback_callback_used_without_service() {
        let sink = Rc::new(RecordingSink::default());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();

        let coordinator =
            Rc::new(
                ExportCoordinator::new(sink.clone()).with_export_fallback(move |format| {
                    let seen = seen.clone();
                    Box::pin(async move {
                        seen.borrow_mut().push(format);
                        Ok(())
                    })
                }),
            );

        coordinator.request_export(ExportFormat::Image).await;
        coordinator.request_export(ExportFormat::Structured).await;

        assert_eq!(
            *calls.borrow(),
            vec![ExportFormat::Image, ExportFormat::Structured]
        );
        // The callback owns delivery; the sink stays untouched.
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn no_service_no_callback_is_a_noop() {
        let sink = Rc::new(RecordingSink::default());
        let coordinator = Rc::new(ExportCoordinator::new(sink.clone()));
        coordinator.open_menu();

        coordinator.request_export(ExportFormat::Structured).await;

        assert!(sink.events().is_empty());
        assert!(!coordinator.is_exporting());
        assert!(!coordinator.is_menu_open());
    }

    #[tokio::test]
    async fn set_layout_passes_unknown_ids_through() {
        let sink = Rc::new(RecordingSink::default());
        let ids = Rc::new(RefCell::new(Vec::new()));
        let seen = ids.clone();
        let coordinator = ExportCoordinator::new(sink)
            .on_layout_change(move |id| seen.borrow_mut().push(id.to_string()));

        coordinator.set_layout("hierarchical");
        coordinator.set_layout("definitely-not-a-layout");

        assert_eq!(
            *ids.borrow(),
            vec!["hierarchical".to_string(), "definitely-not-a-layout".to_string()]
        );
    }

    #[tokio::test]
    async fn fit_and_center_prefer_the_service() {
        let sink = Rc::new(RecordingSink::default());
        let service = Rc::new(GatedService::new());
        let coordinator = coordinator_with(sink, service.clone());

        coordinator.fit();
        coordinator.center();
        coordinator.center();

        assert_eq!(service.fit_calls.get(), 1);
        assert_eq!(service.center_calls.get(), 2);
    }

    #[tokio::test]
    async fn fit_and_center_fall_back_to_callbacks() {
        let sink = Rc::new(RecordingSink::default());
        let fits = Rc::new(Cell::new(0));
        let centers = Rc::new(Cell::new(0));
        let (f, c) = (fits.clone(), centers.clone());

        let coordinator = ExportCoordinator::new(sink).with_view_fallbacks(
            move || f.set(f.get() + 1),
            move || c.set(c.get() + 1),
        );

        coordinator.fit();
        coordinator.center();

        assert_eq!(fits.get(), 1);
        assert_eq!(centers.get(), 1);

        // No service, no callbacks: nothing happens, nothing panics.
        let bare = ExportCoordinator::new(Rc::new(RecordingSink::default()));
        bare.fit();
        bare.center();
    }

    #[test]
    fn menu_flag_toggles() {
        let coordinator = ExportCoordinator::new(Rc::new(RecordingSink::default()));
        assert!(!coordinator.is_menu_open());
        coordinator.toggle_menu();
        assert!(coordinator.is_menu_open());
        coordinator.toggle_menu();
        assert!(!coordinator.is_menu_open());
        coordinator.open_menu();
        coordinator.open_menu();
        assert!(coordinator.is_menu_open());
        coordinator.close_menu();
        assert!(!coordinator.is_menu_open());
    }
}
