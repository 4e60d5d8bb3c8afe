//! # Modal Record Model
//!
//! The data record shown by the project overlay, the overlay's open/closed
//! state, and the catalog records are looked up from.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content displayed by the overlay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalRecord {
    pub title: String,
    pub description: String,
    #[serde(alias = "image")]
    pub image_ref: String,
    /// Free-form facts such as type, duration or status
    pub metadata: BTreeMap<String, String>,
}

impl ModalRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Value for an overlay field name; unknown names fall through to metadata
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "image" => Some(&self.image_ref),
            key => self.metadata.get(key).map(String::as_str),
        }
    }
}

/// Overlay state: at most one record is active
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub open: bool,
    pub record: Option<ModalRecord>,
}

impl ModalState {
    /// Show `record`; returns true when the overlay was already open
    pub fn open(&mut self, record: ModalRecord) -> bool {
        let was_open = self.open;
        self.open = true;
        self.record = Some(record);
        was_open
    }

    /// Returns false when the overlay was already closed
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.record = None;
        true
    }
}

/// Records keyed by the trigger's record key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModalCatalog {
    records: BTreeMap<String, ModalRecord>,
}

impl ModalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse modal catalog")
    }

    pub fn insert(&mut self, key: impl Into<String>, record: ModalRecord) {
        self.records.insert(key.into(), record);
    }

    pub fn get(&self, key: &str) -> Option<&ModalRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
