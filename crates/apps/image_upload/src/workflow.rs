//! Upload workflow: validate, preview, persist, then publish the batch.

use std::cell::Cell;

use leptos::logging;
use platform_host::{CandidateFile, HostServices};

use crate::{
    config::{PersistenceMode, UploadConfig},
    error::{UploadError, UploadNotice},
    persistence::{PersistenceBackend, PersistenceRouter},
    preview::generate_previews,
    state::UploadState,
    validator::validate_batch,
};

/// Outcome of an upload attempt that did not fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Files appended to the accepted set.
    pub accepted: usize,
    /// Records appended to the staged image data.
    pub stored: usize,
    /// Messages to show alongside the updated state.
    pub notices: Vec<UploadNotice>,
}

impl UploadReport {
    /// Joins the notices into one status line.
    pub fn message(&self) -> Option<String> {
        if self.notices.is_empty() {
            return None;
        }
        Some(
            self.notices
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

/// Screen generation an upload was started in.
///
/// Leaving the screen or launching test mode starts a new generation, and uploads begun in an
/// older one are never published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// Result of [`UploadWorkflow::commit_upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadCommit {
    /// The upload finished in the generation it started in; `state` should be shown.
    Publish {
        /// Updated screen state.
        state: UploadState,
        /// Report for the status line.
        report: UploadReport,
    },
    /// The screen moved on while the upload was in flight; nothing should be shown.
    Superseded,
}

/// Upload screen workflow over injected host services.
pub struct UploadWorkflow {
    pub(crate) config: UploadConfig,
    pub(crate) services: HostServices,
    backend: PersistenceRouter,
    generation: Cell<u64>,
}

impl UploadWorkflow {
    /// Creates a workflow, selecting the persistence backend from `config`.
    pub fn new(config: UploadConfig, services: HostServices) -> Self {
        let backend = PersistenceRouter::select(config.persistence_mode(), &services);
        logging::log!(
            "image upload using {:?} persistence on {} host",
            backend.mode(),
            services.host_strategy.as_str()
        );
        Self {
            config,
            services,
            backend,
            generation: Cell::new(0),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Returns the selected persistence backend.
    pub fn backend(&self) -> &PersistenceRouter {
        &self.backend
    }

    /// Captures the current screen generation before any work for an upload starts.
    pub fn begin_upload(&self) -> UploadTicket {
        UploadTicket(self.generation.get())
    }

    pub(crate) fn start_new_generation(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.generation.get()
    }

    /// Runs [`Self::upload_batch`] on a snapshot of the screen state, unless the screen has
    /// moved on since `ticket` was taken.
    ///
    /// A superseded upload is dropped whatever its outcome, so a late result never overwrites
    /// state that was reset in the meantime.
    ///
    /// # Errors
    ///
    /// Returns the [`UploadError`] of an attempt that failed in the current generation.
    pub async fn commit_upload(
        &self,
        ticket: UploadTicket,
        mut state: UploadState,
        session_id: &str,
        batch: Vec<CandidateFile>,
    ) -> Result<UploadCommit, UploadError> {
        if !self.is_current(ticket) {
            logging::log!("dropping upload of {} file(s) started before leaving", batch.len());
            return Ok(UploadCommit::Superseded);
        }
        let result = self.upload_batch(&mut state, session_id, batch).await;
        if !self.is_current(ticket) {
            logging::log!("discarding upload result that finished after leaving");
            return Ok(UploadCommit::Superseded);
        }
        let report = result?;
        Ok(UploadCommit::Publish { state, report })
    }

    /// Runs one upload attempt for `batch` and applies it to `state`.
    ///
    /// `state` is only changed when the attempt succeeds, and then all three collections are
    /// extended together. A batch whose files all have disallowed types succeeds with nothing
    /// accepted and an [`UploadNotice::UnsupportedTypes`] notice.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] when the batch exceeds capacity, a preview cannot be
    /// produced, or persistence fails. `state` is left untouched.
    pub async fn upload_batch(
        &self,
        state: &mut UploadState,
        session_id: &str,
        batch: Vec<CandidateFile>,
    ) -> Result<UploadReport, UploadError> {
        let validated = validate_batch(state.accepted.len(), batch, self.config.max_images)?;
        let mut report = UploadReport::default();
        report.notices.extend(validated.rejection_notice());

        let files = validated.accepted;
        if files.is_empty() {
            return Ok(report);
        }

        let previews = generate_previews(self.services.decoder.as_ref(), &files)
            .await
            .map_err(|message| {
                logging::warn!("preview generation failed: {message}");
                UploadError::ReadFailed { message }
            })?;

        let persisted = self.backend.persist(session_id, &files, &previews).await?;
        if let Some(first) = persisted.records.first() {
            self.services.preloader.preload(&first.original);
            self.services.preloader.preload(&first.modified);
        }
        if self.backend.mode() == PersistenceMode::Local {
            report.notices.push(UploadNotice::StoredLocally {
                stored: persisted.records.len(),
                failed: persisted.failed,
            });
        }

        report.accepted = files.len();
        report.stored = persisted.records.len();
        state.apply_batch(files, previews, persisted.records);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::{
        channel::oneshot,
        executor::{block_on, LocalPool},
        task::LocalSpawnExt,
    };
    use game_app_contract::{Destination, Navigator};
    use platform_host::{
        encode_data_url, GameApi, GameApiError, GameApiFuture, GameStartRequest,
        ImageDecodeFuture, ImageDecoder, ImageRecord, ImageStore, ImageStoreFuture,
        MemoryGameApi, MemoryImagePreloader, MemoryImageStore, StoredImageRecord,
        UploadImagesResponse,
    };
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;

    struct IgnoreNavigation;

    impl Navigator for IgnoreNavigation {
        fn navigate(&self, _destination: Destination) {}
    }

    /// Backend whose single upload response is released by the test.
    struct GatedGameApi {
        gate: RefCell<Option<oneshot::Receiver<UploadImagesResponse>>>,
    }

    impl GameApi for GatedGameApi {
        fn upload_images<'a>(
            &'a self,
            _session_id: &'a str,
            _files: &'a [CandidateFile],
        ) -> GameApiFuture<'a, Result<UploadImagesResponse, GameApiError>> {
            let gate = self.gate.borrow_mut().take();
            Box::pin(async move {
                match gate {
                    Some(rx) => rx.await.map_err(|_| GameApiError::network("gate dropped")),
                    None => Err(GameApiError::network("no gate")),
                }
            })
        }

        fn start_game<'a>(
            &'a self,
            _request: &'a GameStartRequest,
        ) -> GameApiFuture<'a, Result<Value, GameApiError>> {
            Box::pin(async { Ok(Value::Null) })
        }
    }

    /// Store whose first write fails.
    #[derive(Default)]
    struct FirstWriteFails {
        inner: MemoryImageStore,
        failed_once: Cell<bool>,
    }

    impl ImageStore for FirstWriteFails {
        fn add_image<'a>(
            &'a self,
            record: &'a StoredImageRecord,
        ) -> ImageStoreFuture<'a, Result<(), String>> {
            if !self.failed_once.replace(true) {
                return Box::pin(async { Err("quota exceeded".to_string()) });
            }
            self.inner.add_image(record)
        }
    }

    #[derive(Default)]
    struct CountingDecoder {
        calls: Cell<usize>,
    }

    impl ImageDecoder for CountingDecoder {
        fn decode<'a>(
            &'a self,
            file: &'a CandidateFile,
        ) -> ImageDecodeFuture<'a, Result<String, String>> {
            self.calls.set(self.calls.get() + 1);
            Box::pin(async move { Ok(encode_data_url(&file.mime_type, &file.bytes)) })
        }
    }

    fn png(name: &str) -> CandidateFile {
        CandidateFile::new(name, "image/png", name.as_bytes().to_vec())
    }

    fn remote_workflow(api: &MemoryGameApi, preloader: &MemoryImagePreloader) -> UploadWorkflow {
        let mut services = HostServices::in_memory();
        services.game_api = Rc::new(api.clone());
        services.preloader = Rc::new(preloader.clone());
        UploadWorkflow::new(UploadConfig::with_test_mode(false), services)
    }

    #[test]
    fn remote_batch_appends_server_records_and_preloads_first() {
        let api = MemoryGameApi::default();
        let preloader = MemoryImagePreloader::default();
        api.push_upload_response(Ok(UploadImagesResponse {
            images: vec![ImageRecord {
                original: "https://cdn/o1.png".to_string(),
                modified: "https://cdn/m1.png".to_string(),
            }],
        }));
        let workflow = remote_workflow(&api, &preloader);
        let mut state = UploadState::default();

        let report = block_on(workflow.upload_batch(&mut state, "s", vec![png("a.png")]))
            .expect("upload");

        assert_eq!(report.accepted, 1);
        assert_eq!(report.stored, 1);
        assert_eq!(report.message(), None);
        assert_eq!(state.accepted.len(), 1);
        assert_eq!(state.previews.len(), 1);
        assert_eq!(state.record_count(), 1);
        assert_eq!(
            preloader.requested(),
            vec!["https://cdn/o1.png".to_string(), "https://cdn/m1.png".to_string()]
        );
    }

    #[test]
    fn failed_remote_batch_leaves_state_untouched() {
        let api = MemoryGameApi::default();
        api.push_upload_response(Err(GameApiError::Status { status: 413 }));
        let workflow = remote_workflow(&api, &MemoryImagePreloader::default());
        let mut state = UploadState::default();

        let err = block_on(workflow.upload_batch(&mut state, "s", vec![png("a.png")]))
            .expect_err("rejected");

        assert_eq!(err, UploadError::Rejected { status: 413 });
        assert_eq!(state, UploadState::default());
    }

    #[test]
    fn over_capacity_batch_never_reaches_the_backend() {
        let api = MemoryGameApi::default();
        let workflow = remote_workflow(&api, &MemoryImagePreloader::default());
        let mut state = UploadState::default();
        let batch = (0..6).map(|i| png(&format!("{i}.png"))).collect();

        let err = block_on(workflow.upload_batch(&mut state, "s", batch)).expect_err("capacity");

        assert!(matches!(err, UploadError::CapacityExceeded { .. }));
        assert!(api.uploads().is_empty());
        assert_eq!(state, UploadState::default());
    }

    #[test]
    fn all_rejected_types_report_a_notice_without_persisting() {
        let api = MemoryGameApi::default();
        let workflow = remote_workflow(&api, &MemoryImagePreloader::default());
        let mut state = UploadState::default();

        let report = block_on(workflow.upload_batch(
            &mut state,
            "s",
            vec![CandidateFile::new("a.gif", "image/gif", vec![1])],
        ))
        .expect("notice only");

        assert_eq!(report.accepted, 0);
        assert!(report.message().is_some());
        assert!(api.uploads().is_empty());
        assert_eq!(state.image_data, None);
    }

    #[test]
    fn local_batch_reports_browser_storage() {
        let store = MemoryImageStore::default();
        let mut services = HostServices::in_memory();
        services.images = Rc::new(store.clone());
        let workflow = UploadWorkflow::new(UploadConfig::with_test_mode(true), services);
        let mut state = UploadState::default();

        let report = block_on(workflow.upload_batch(
            &mut state,
            "s",
            vec![png("a.png"), png("b.png")],
        ))
        .expect("stored");

        assert_eq!(
            report.notices,
            vec![UploadNotice::StoredLocally {
                stored: 2,
                failed: 0,
            }]
        );
        assert_eq!(store.len(), 2);
        assert_eq!(state.previews, {
            let records = state.image_data.clone().unwrap_or_default();
            records.into_iter().map(|r| r.original).collect::<Vec<_>>()
        });
    }

    #[test]
    fn partially_stored_local_batch_keeps_every_preview() {
        let store = Rc::new(FirstWriteFails::default());
        let mut services = HostServices::in_memory();
        services.images = store.clone();
        let workflow = UploadWorkflow::new(UploadConfig::with_test_mode(true), services);
        let mut state = UploadState::default();

        let report = block_on(workflow.upload_batch(
            &mut state,
            "s",
            vec![png("a.png"), png("b.png")],
        ))
        .expect("one record stored");

        assert_eq!(report.accepted, 2);
        assert_eq!(report.stored, 1);
        assert_eq!(
            report.notices,
            vec![UploadNotice::StoredLocally {
                stored: 1,
                failed: 1,
            }]
        );
        assert_eq!(state.accepted.len(), 2);
        assert_eq!(state.previews.len(), 2);
        assert_eq!(state.record_count(), 1);
        assert_eq!(store.inner.len(), 1);
    }

    #[test]
    fn local_batch_decodes_each_file_once() {
        let decoder = Rc::new(CountingDecoder::default());
        let store = MemoryImageStore::default();
        let mut services = HostServices::in_memory();
        services.images = Rc::new(store.clone());
        services.decoder = decoder.clone();
        let workflow = UploadWorkflow::new(UploadConfig::with_test_mode(true), services);
        let mut state = UploadState::default();

        block_on(workflow.upload_batch(&mut state, "s", vec![png("a.png"), png("b.png")]))
            .expect("stored");

        assert_eq!(decoder.calls.get(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn current_upload_is_published() {
        let api = MemoryGameApi::default();
        let workflow = remote_workflow(&api, &MemoryImagePreloader::default());
        let ticket = workflow.begin_upload();

        let commit = block_on(workflow.commit_upload(
            ticket,
            UploadState::default(),
            "s",
            vec![png("a.png")],
        ))
        .expect("upload");

        let UploadCommit::Publish { state, report } = commit else {
            panic!("expected the upload to be published");
        };
        assert_eq!(report.accepted, 1);
        assert_eq!(state.accepted.len(), 1);
        assert_eq!(state.record_count(), 1);
    }

    #[test]
    fn upload_finishing_after_go_back_is_superseded() {
        let (release, gate) = oneshot::channel();
        let mut services = HostServices::in_memory();
        services.game_api = Rc::new(GatedGameApi {
            gate: RefCell::new(Some(gate)),
        });
        let workflow = Rc::new(UploadWorkflow::new(
            UploadConfig::with_test_mode(false),
            services,
        ));

        let outcome = Rc::new(RefCell::new(None));
        let mut pool = LocalPool::new();
        {
            let workflow = workflow.clone();
            let outcome = outcome.clone();
            let ticket = workflow.begin_upload();
            pool.spawner()
                .spawn_local(async move {
                    let commit = workflow
                        .commit_upload(ticket, UploadState::default(), "s", vec![png("a.png")])
                        .await;
                    *outcome.borrow_mut() = Some(commit);
                })
                .expect("spawn");
        }

        pool.run_until_stalled();
        assert!(outcome.borrow().is_none(), "upload finished before release");

        let mut shown = UploadState::default();
        workflow.go_back(&mut shown, &IgnoreNavigation);
        release
            .send(UploadImagesResponse {
                images: vec![ImageRecord::unmodified("https://cdn/late.png")],
            })
            .expect("release");
        pool.run_until_stalled();

        assert_eq!(
            outcome.borrow_mut().take().expect("finished"),
            Ok(UploadCommit::Superseded)
        );
        assert_eq!(shown, UploadState::default());
    }

    #[test]
    fn stale_ticket_never_reaches_the_backend() {
        let api = MemoryGameApi::default();
        let workflow = remote_workflow(&api, &MemoryImagePreloader::default());
        let ticket = workflow.begin_upload();
        workflow.go_back(&mut UploadState::default(), &IgnoreNavigation);

        let commit = block_on(workflow.commit_upload(
            ticket,
            UploadState::default(),
            "s",
            vec![png("a.png")],
        ));

        assert_eq!(commit, Ok(UploadCommit::Superseded));
        assert!(api.uploads().is_empty());
    }

    #[test]
    fn test_mode_launch_supersedes_pending_uploads() {
        let workflow = UploadWorkflow::new(
            UploadConfig::with_test_mode(true),
            HostServices::in_memory(),
        );
        let ticket = workflow.begin_upload();
        block_on(workflow.launch_test_mode(&mut UploadState::default())).expect("launch");

        let commit = block_on(workflow.commit_upload(
            ticket,
            UploadState::default(),
            "s",
            vec![png("a.png")],
        ));

        assert_eq!(commit, Ok(UploadCommit::Superseded));
    }
}
