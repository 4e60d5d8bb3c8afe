//! # Page Runtime
//!
//! Owns the page surface, the runtime clock and every controller. Hosts forward
//! page events through [`PageRuntime::dispatch`] and report elapsed time through
//! [`PageRuntime::advance`]. Scroll-driven controllers are reached only through
//! the throttled scroll bus.
//!
//! Form submissions run as Tokio tasks. Their results are applied on the next
//! `dispatch` or `advance`, or when the host calls
//! [`PageRuntime::settle_submissions`].

use crate::config::RuntimeConfig;
use crate::page::controllers::{
    FormController, ModalController, NavigationController, ParallaxController, RevealController,
    SubmissionOutcome,
};
use crate::page::events::{EventOutcome, PageEvent, ScrollBus, ScrollSample, ThrottledScrollPublisher};
use crate::page::models::{
    FormState, FormSubmission, ModalCatalog, ModalRecord, ModalState, NavState,
};
use crate::page::scroll_lock::ScrollLock;
use crate::page::services::{SubmissionReceipt, SubmissionTransport, TransportError};
use crate::page::surface::{NodeId, PageSurface};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::{Id as TaskId, JoinError, JoinSet};

type TransportResult = Result<SubmissionReceipt, TransportError>;

/// Lock a shared controller, recovering from a panic in an earlier handler
fn lock<T>(shared: &Mutex<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Wire every controller to the page and run the initial pass
///
/// The single entry point called once at page load.
pub fn init<P: PageSurface>(
    page: P,
    config: RuntimeConfig,
    transport: Arc<dyn SubmissionTransport>,
) -> Result<PageRuntime<P>> {
    PageRuntime::new(page, config, transport)
}

pub struct PageRuntime<P: PageSurface> {
    page: P,
    config: RuntimeConfig,
    now: Duration,
    scroll_lock: ScrollLock,
    scroll: ThrottledScrollPublisher,
    /// Samples published since initialization, cold starts excluded
    published_samples: usize,
    last_sample: Option<ScrollSample>,
    navigation: Arc<Mutex<NavigationController>>,
    reveal: Arc<Mutex<RevealController>>,
    parallax: Arc<Mutex<ParallaxController>>,
    modal: ModalController,
    form: FormController,
    /// Transport calls in flight, one task per submitting form
    submissions: JoinSet<TransportResult>,
    submission_forms: HashMap<TaskId, NodeId>,
}

impl<P: PageSurface> PageRuntime<P> {
    pub fn new(
        mut page: P,
        config: RuntimeConfig,
        transport: Arc<dyn SubmissionTransport>,
    ) -> Result<Self> {
        tracing::debug!("Initializing page runtime");
        let scroll_lock = ScrollLock::new();

        let navigation = Arc::new(Mutex::new(NavigationController::new(
            config.navigation.clone(),
            &scroll_lock,
        )));
        let reveal = Arc::new(Mutex::new(RevealController::new(
            config.reveal.clone(),
            config.intro.clone(),
        )));
        let parallax = Arc::new(Mutex::new(ParallaxController::new(config.parallax.clone())));
        let modal = ModalController::new(config.modal.clone(), ModalCatalog::new(), &scroll_lock);
        let mut form =
            FormController::new(config.form.clone(), config.notice.clone(), transport)?;

        // Observers are registered before the cold-start samples arrive
        {
            let mut reveal = lock(&reveal);
            reveal.register(&mut page);
            reveal.start_intro(&mut page);
        }
        lock(&navigation).install_skip_link(&mut page);
        modal.prepare_triggers(&mut page);
        form.register(&mut page);

        let mut scroll = ThrottledScrollPublisher::new(config.throttle_interval());
        let subscriber = Arc::clone(&navigation);
        scroll.subscribe(
            Box::new(move |sample: &ScrollSample, page: &mut dyn PageSurface| {
                lock(&subscriber).on_scroll(sample, page);
            }),
            &mut page,
        );
        let subscriber = Arc::clone(&reveal);
        scroll.subscribe(
            Box::new(move |sample: &ScrollSample, page: &mut dyn PageSurface| {
                lock(&subscriber).on_scroll(sample, page);
            }),
            &mut page,
        );
        let subscriber = Arc::clone(&parallax);
        scroll.subscribe(
            Box::new(move |sample: &ScrollSample, page: &mut dyn PageSurface| {
                lock(&subscriber).on_scroll(sample, page);
            }),
            &mut page,
        );

        tracing::info!(
            "Page runtime ready: {} scroll subscribers, {} forms",
            scroll.subscriber_count(),
            form.forms().len()
        );

        Ok(Self {
            page,
            config,
            now: Duration::ZERO,
            scroll_lock,
            scroll,
            published_samples: 0,
            last_sample: None,
            navigation,
            reveal,
            parallax,
            modal,
            form,
            submissions: JoinSet::new(),
            submission_forms: HashMap::new(),
        })
    }

    /// Use `catalog` for trigger records
    pub fn with_modal_catalog(mut self, catalog: ModalCatalog) -> Self {
        self.modal.set_catalog(catalog);
        self
    }

    // === Accessors ===

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Mutable page access for the host (scroll position, values, markup)
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub fn published_samples(&self) -> usize {
        self.published_samples
    }

    pub fn last_sample(&self) -> Option<ScrollSample> {
        self.last_sample
    }

    pub fn nav_state(&self) -> NavState {
        lock(&self.navigation).state().clone()
    }

    pub fn modal_state(&self) -> &ModalState {
        self.modal.state()
    }

    pub fn form_state(&self, form: NodeId) -> Option<&FormState> {
        self.form.state(form)
    }

    pub fn forms(&self) -> Vec<NodeId> {
        self.form.forms()
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        lock(&self.reveal).is_revealed(node)
    }

    /// Speed factor the parallax layer `node` moves with
    pub fn parallax_speed(&self, node: NodeId) -> f32 {
        lock(&self.parallax).speed(&self.page, node)
    }

    // === Operations ===

    /// Observe reveal targets added since initialization
    pub fn register_reveal_targets(&mut self) -> usize {
        lock(&self.reveal).register(&mut self.page)
    }

    pub fn open_modal(&mut self, record: ModalRecord) -> bool {
        self.modal.open(&mut self.page, record)
    }

    pub fn close_modal(&mut self) -> bool {
        self.modal.close(&mut self.page)
    }

    pub fn close_menu(&mut self) -> bool {
        lock(&self.navigation).close_menu(&mut self.page)
    }

    /// Run a submission for `form` and wait for its result
    ///
    /// Hosts forwarding [`PageEvent::Submit`] through `dispatch` do not wait; this
    /// is the blocking form of the same operation.
    pub async fn submit(&mut self, form: NodeId) -> SubmissionOutcome {
        self.form.submit(&mut self.page, form).await
    }

    /// Route one host event to the controllers that care about it
    pub async fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        tracing::trace!("Dispatching {:?} at {:?}", event, self.now);
        self.collect_finished_submissions();
        match &event {
            PageEvent::Scroll => {
                if let Some(sample) = self.scroll.publish(self.now, &mut self.page) {
                    self.published_samples += 1;
                    self.last_sample = Some(sample);
                }
                EventOutcome::default()
            }
            PageEvent::Click { target } => self.handle_click(*target),
            PageEvent::KeyDown { key, target } => {
                let modal = self.modal.handle_key(&mut self.page, key, *target);
                lock(&self.navigation).handle_key(&mut self.page, key);
                modal
            }
            PageEvent::Focus { target } | PageEvent::Blur { target } => {
                let focused = matches!(event, PageEvent::Focus { .. });
                lock(&self.navigation).handle_focus_change(&mut self.page, *target, focused);
                self.form.handle_event(&event, &mut self.page)
            }
            PageEvent::Input { .. }
            | PageEvent::Change { .. } => self.form.handle_event(&event, &mut self.page),
            PageEvent::Submit { form } => {
                if !self.form.manages(*form) {
                    return EventOutcome::default();
                }
                match self.form.begin_submit(&mut self.page, *form) {
                    SubmissionOutcome::Pending(submission) => {
                        self.start_submission(*form, submission).await;
                    }
                    outcome => tracing::debug!("Submit on {}: {:?}", form, outcome),
                }
                EventOutcome::prevented()
            }
            PageEvent::MediaLoaded { .. } | PageEvent::MediaError { .. } => {
                lock(&self.reveal).handle_event(&event, &mut self.page)
            }
        }
    }

    fn handle_click(&mut self, target: NodeId) -> EventOutcome {
        if !self.page.exists(target) {
            tracing::debug!("Click on detached element {}", target);
            return EventOutcome::default();
        }
        if self.form.handle_click(&mut self.page, target) {
            return EventOutcome::default();
        }
        let modal = self.modal.handle_click(&mut self.page, target);
        let navigation = lock(&self.navigation).handle_click(&mut self.page, target);
        modal.merge(navigation)
    }

    // === Submissions ===

    /// Hand `submission` to the transport without holding up other events
    ///
    /// Outside a Tokio runtime the call is awaited in place.
    async fn start_submission(&mut self, form: NodeId, submission: FormSubmission) {
        let transport = self.form.transport();
        if Handle::try_current().is_err() {
            tracing::debug!("No async runtime; submitting {} in place", form);
            let result = transport.submit(&submission).await;
            self.form.complete_submit(&mut self.page, form, result);
            return;
        }
        let task = self
            .submissions
            .spawn(async move { transport.submit(&submission).await });
        self.submission_forms.insert(task.id(), form);
        tracing::debug!("Submission of {} in flight", form);
    }

    fn finish_submission(
        &mut self,
        joined: std::result::Result<(TaskId, TransportResult), JoinError>,
    ) -> SubmissionOutcome {
        let (task, result) = match joined {
            Ok((task, result)) => (task, result),
            Err(e) => (
                e.id(),
                Err(TransportError::Unavailable(format!("submission task ended: {e}"))),
            ),
        };
        match self.submission_forms.remove(&task) {
            Some(form) => self.form.complete_submit(&mut self.page, form, result),
            None => SubmissionOutcome::Ignored,
        }
    }

    /// Apply transport answers that have already arrived
    fn collect_finished_submissions(&mut self) {
        while let Some(joined) = self.submissions.try_join_next_with_id() {
            let outcome = self.finish_submission(joined);
            tracing::debug!("Submission finished: {:?}", outcome);
        }
    }

    /// Submissions waiting on the transport
    pub fn pending_submissions(&self) -> usize {
        self.submissions.len()
    }

    /// Wait for every in-flight submission and apply the results
    pub async fn settle_submissions(&mut self) -> Vec<SubmissionOutcome> {
        let mut outcomes = Vec::new();
        while let Some(joined) = self.submissions.join_next_with_id().await {
            outcomes.push(self.finish_submission(joined));
        }
        outcomes
    }

    /// Move the clock forward by `elapsed` and fire every due transition
    pub fn advance(&mut self, elapsed: Duration) {
        self.advance_to(self.now + elapsed);
    }

    pub fn advance_to(&mut self, now: Duration) {
        if now < self.now {
            tracing::warn!("Ignoring clock moving backwards to {:?}", now);
            return;
        }
        self.now = now;
        self.collect_finished_submissions();
        lock(&self.reveal).advance(&mut self.page, now);
        self.modal.advance(&mut self.page, now);
        self.form.advance(&mut self.page, now);
    }
}
