//! # Form State Model
//!
//! Submission phase machine, validation errors and the payload handed to the
//! transport.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Phases kept in [`FormState::history`]; older entries are dropped
pub const HISTORY_LIMIT: usize = 32;

/// Submission lifecycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Per-form submission state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    phase: FormPhase,
    field_errors: BTreeSet<String>,
    /// The most recent phases entered, oldest first
    history: VecDeque<FormPhase>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn field_errors(&self) -> &BTreeSet<String> {
        &self.field_errors
    }

    /// Up to [`HISTORY_LIMIT`] most recent phases, oldest first
    pub fn history(&self) -> Vec<FormPhase> {
        self.history.iter().copied().collect()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, FormPhase::Validating | FormPhase::Submitting)
    }

    pub fn enter(&mut self, phase: FormPhase) {
        tracing::debug!("Form phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(phase);
    }

    /// Replace the error set with the result of the latest validation pass
    pub fn set_field_errors(&mut self, errors: BTreeSet<String>) {
        self.field_errors = errors;
    }
}

/// Floating label presentation of one field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldLabelState {
    pub floated: bool,
}

impl FieldLabelState {
    pub fn derive(value: &str, focused: bool) -> Self {
        Self {
            floated: focused || !value.trim().is_empty(),
        }
    }
}

/// Field values sent to the transport, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSubmission {
    pub fields: BTreeMap<String, String>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
