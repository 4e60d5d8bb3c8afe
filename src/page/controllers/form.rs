//! # Form Submission Controller
//!
//! Drives each managed form through `idle → validating → submitting →
//! succeeded | failed → idle`, keeps floating labels in sync with field focus
//! and content, and reports results through the notice center.
//!
//! The transport call sits between [`FormController::begin_submit`] and
//! [`FormController::complete_submit`], so the page keeps handling events while a
//! submission is in flight.

use crate::config::{FormConfig, NoticeConfig};
use crate::page::events::{EventOutcome, PageEvent};
use crate::page::models::{FieldLabelState, FormPhase, FormState, FormSubmission};
use crate::page::services::{
    NoticeCenter, NoticeKind, SubmissionReceipt, SubmissionTransport, TransportError,
};
use crate::page::surface::{NodeId, PageSurface, Selector};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Basic `local@domain.tld` shape
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Input types that never carry user data
const SKIPPED_INPUT_TYPES: [&str; 4] = ["submit", "button", "hidden", "reset"];

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Not a managed form, or a submission is already running
    Ignored,
    /// Validation failed; nothing was sent
    Rejected { fields: BTreeSet<String> },
    /// Valid; the payload is waiting on the transport
    Pending(FormSubmission),
    Sent(SubmissionReceipt),
    Failed { reason: String },
}

/// Submit control state to restore once the transport answers
struct InFlight {
    button: Option<NodeId>,
    idle_label: Option<String>,
}

struct ManagedForm {
    node: NodeId,
    state: FormState,
    in_flight: Option<InFlight>,
}

pub struct FormController {
    config: FormConfig,
    email: Regex,
    transport: Arc<dyn SubmissionTransport>,
    forms: Vec<ManagedForm>,
    notices: NoticeCenter,
    focused: Option<NodeId>,
    now: Duration,
}

impl FormController {
    pub fn new(
        config: FormConfig,
        notice: NoticeConfig,
        transport: Arc<dyn SubmissionTransport>,
    ) -> Result<Self> {
        let email = Regex::new(EMAIL_PATTERN).context("Failed to compile email pattern")?;
        Ok(Self {
            config,
            email,
            transport,
            forms: Vec::new(),
            notices: NoticeCenter::new(notice),
            focused: None,
            now: Duration::ZERO,
        })
    }

    /// Manage every form on the page and settle the initial label state
    pub fn register(&mut self, page: &mut dyn PageSurface) -> usize {
        for node in page.query(&Selector::class(&self.config.form_class)) {
            if self.forms.iter().any(|form| form.node == node) {
                continue;
            }
            self.forms.push(ManagedForm {
                node,
                state: FormState::new(),
                in_flight: None,
            });
            for field in Self::fields(page, node) {
                self.update_label(page, field);
            }
        }
        tracing::debug!("Managing {} forms", self.forms.len());
        self.forms.len()
    }

    pub fn state(&self, form: NodeId) -> Option<&FormState> {
        self.forms
            .iter()
            .find(|managed| managed.node == form)
            .map(|managed| &managed.state)
    }

    pub fn forms(&self) -> Vec<NodeId> {
        self.forms.iter().map(|managed| managed.node).collect()
    }

    // === Fields ===

    fn fields(page: &dyn PageSurface, form: NodeId) -> Vec<NodeId> {
        let selector = Selector::tag("input")
            .or(Selector::tag("textarea"))
            .or(Selector::tag("select"));
        page.query_within(form, &selector)
            .into_iter()
            .filter(|field| {
                page.attribute(*field, "type")
                    .map_or(true, |kind| !SKIPPED_INPUT_TYPES.contains(&kind.as_str()))
            })
            .collect()
    }

    fn field_name(page: &dyn PageSurface, field: NodeId) -> Option<String> {
        page.attribute(field, "name")
            .or_else(|| page.attribute(field, "id"))
    }

    fn is_email(page: &dyn PageSurface, field: NodeId) -> bool {
        page.attribute(field, "type").as_deref() == Some("email")
    }

    /// Label immediately following the field
    fn label_for(page: &dyn PageSurface, field: NodeId) -> Option<NodeId> {
        page.next_sibling(field)
            .filter(|sibling| page.tag_name(*sibling).as_deref() == Some("label"))
    }

    fn managed_field(&self, page: &dyn PageSurface, node: NodeId) -> bool {
        page.closest(node, &Selector::class(&self.config.form_class))
            .is_some_and(|form| self.forms.iter().any(|managed| managed.node == form))
    }

    fn update_label(&self, page: &mut dyn PageSurface, field: NodeId) {
        let Some(label) = Self::label_for(page, field) else {
            return;
        };
        let value = page.value(field).unwrap_or_default();
        let state = FieldLabelState::derive(&value, self.focused == Some(field));
        if state.floated {
            page.add_class(label, &self.config.floated_class);
        } else {
            page.remove_class(label, &self.config.floated_class);
        }
    }

    fn submit_button(&self, page: &dyn PageSurface, form: NodeId) -> Option<NodeId> {
        let selector = Selector::class(&self.config.submit_class).or(
            Selector::tag("button").and(Selector::attribute_value("type", "submit")),
        );
        page.query_within(form, &selector).into_iter().next()
    }

    // === Input ===

    /// Focus, blur and value changes on managed fields
    pub fn handle_event(&mut self, event: &PageEvent, page: &mut dyn PageSurface) -> EventOutcome {
        match event {
            PageEvent::Focus { target } if self.managed_field(page, *target) => {
                self.focused = Some(*target);
                if let Some(group) = page.parent(*target) {
                    page.add_class(group, &self.config.focused_class);
                }
                self.update_label(page, *target);
            }
            PageEvent::Blur { target } if self.managed_field(page, *target) => {
                if self.focused == Some(*target) {
                    self.focused = None;
                }
                if let Some(group) = page.parent(*target) {
                    page.remove_class(group, &self.config.focused_class);
                }
                self.update_label(page, *target);
            }
            PageEvent::Input { target } | PageEvent::Change { target }
                if self.managed_field(page, *target) =>
            {
                self.update_label(page, *target);
            }
            _ => {}
        }
        EventOutcome::default()
    }

    /// Clicks on notice close controls
    pub fn handle_click(&mut self, page: &mut dyn PageSurface, target: NodeId) -> bool {
        self.notices.handle_click(page, target, self.now)
    }

    /// Key recorded in `field_errors`: the field's name, or its handle when unnamed
    fn field_key(page: &dyn PageSurface, field: NodeId) -> String {
        Self::field_name(page, field).unwrap_or_else(|| field.to_string())
    }

    /// Fields that fail validation, named or not
    fn validate(&self, page: &dyn PageSurface, fields: &[NodeId]) -> Vec<NodeId> {
        fields
            .iter()
            .copied()
            .filter(|&field| {
                let value = page.value(field).unwrap_or_default();
                let value = value.trim();
                let missing = page.attribute(field, "required").is_some() && value.is_empty();
                let malformed = Self::is_email(page, field)
                    && !value.is_empty()
                    && !self.email.is_match(value);
                missing || malformed
            })
            .collect()
    }

    // === Submission ===

    fn index_of(&self, form: NodeId) -> Option<usize> {
        self.forms.iter().position(|managed| managed.node == form)
    }

    pub fn manages(&self, form: NodeId) -> bool {
        self.index_of(form).is_some()
    }

    pub fn transport(&self) -> Arc<dyn SubmissionTransport> {
        Arc::clone(&self.transport)
    }

    /// Validate `form` and, when valid, move it into `submitting`
    ///
    /// A valid form yields [`SubmissionOutcome::Pending`] with the payload for the
    /// transport. The form stays busy until [`FormController::complete_submit`]
    /// receives the transport's answer; submits in the meantime are ignored.
    pub fn begin_submit(&mut self, page: &mut dyn PageSurface, form: NodeId) -> SubmissionOutcome {
        let Some(index) = self.index_of(form) else {
            return SubmissionOutcome::Ignored;
        };
        if self.forms[index].state.is_busy() {
            tracing::debug!("Form {} already submitting", form);
            return SubmissionOutcome::Ignored;
        }

        self.forms[index].state.enter(FormPhase::Validating);
        let fields = Self::fields(page, form);
        let invalid = self.validate(page, &fields);
        for &field in &fields {
            if invalid.contains(&field) {
                page.add_class(field, &self.config.error_class);
            } else {
                page.remove_class(field, &self.config.error_class);
            }
        }
        let errors: BTreeSet<String> = invalid
            .iter()
            .map(|&field| Self::field_key(page, field))
            .collect();
        self.forms[index].state.set_field_errors(errors.clone());

        if !errors.is_empty() {
            tracing::debug!("Form {} rejected: {:?}", form, errors);
            self.forms[index].state.enter(FormPhase::Idle);
            self.notices.show(
                page,
                NoticeKind::Error,
                &self.config.validation_message,
                self.now,
            );
            return SubmissionOutcome::Rejected { fields: errors };
        }

        let mut submission = FormSubmission::new();
        for &field in &fields {
            if let Some(name) = Self::field_name(page, field) {
                submission.insert(name, page.value(field).unwrap_or_default());
            }
        }

        let button = self.submit_button(page, form);
        let idle_label = button.and_then(|b| page.text(b));
        if let Some(button) = button {
            page.set_disabled(button, true);
            page.set_text(button, &self.config.sending_label);
        }
        self.forms[index].in_flight = Some(InFlight { button, idle_label });
        self.forms[index].state.enter(FormPhase::Submitting);
        SubmissionOutcome::Pending(submission)
    }

    /// Apply the transport's answer to a submission started by `begin_submit`
    pub fn complete_submit(
        &mut self,
        page: &mut dyn PageSurface,
        form: NodeId,
        result: Result<SubmissionReceipt, TransportError>,
    ) -> SubmissionOutcome {
        let Some(index) = self.index_of(form) else {
            return SubmissionOutcome::Ignored;
        };
        let Some(in_flight) = self.forms[index].in_flight.take() else {
            tracing::debug!("No submission in flight for form {}", form);
            return SubmissionOutcome::Ignored;
        };

        let outcome = match result {
            Ok(receipt) => {
                tracing::info!("Form {} submitted ({} fields)", form, receipt.accepted_fields);
                self.forms[index].state.enter(FormPhase::Succeeded);
                for field in Self::fields(page, form) {
                    page.set_value(field, "");
                    page.remove_class(field, &self.config.error_class);
                    self.update_label(page, field);
                }
                self.notices.show(
                    page,
                    NoticeKind::Success,
                    &self.config.success_message,
                    self.now,
                );
                SubmissionOutcome::Sent(receipt)
            }
            Err(e) => {
                tracing::warn!("Form {} submission failed: {}", form, e);
                self.forms[index].state.enter(FormPhase::Failed);
                self.notices.show(
                    page,
                    NoticeKind::Error,
                    &self.config.failure_message,
                    self.now,
                );
                SubmissionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        if let Some(button) = in_flight.button {
            page.set_disabled(button, false);
            if let Some(label) = &in_flight.idle_label {
                page.set_text(button, label);
            }
        }
        self.forms[index].state.enter(FormPhase::Idle);
        outcome
    }

    /// Run one submission attempt for `form` and wait for the transport
    pub async fn submit(&mut self, page: &mut dyn PageSurface, form: NodeId) -> SubmissionOutcome {
        match self.begin_submit(page, form) {
            SubmissionOutcome::Pending(submission) => {
                let result = self.transport.submit(&submission).await;
                self.complete_submit(page, form, result)
            }
            outcome => outcome,
        }
    }

    /// Fire notice timers due by `now`
    pub fn advance(&mut self, page: &mut dyn PageSurface, now: Duration) {
        self.now = now;
        self.notices.advance(page, now);
    }
}
