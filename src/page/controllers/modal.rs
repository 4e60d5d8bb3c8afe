//! # Modal Lifecycle Controller
//!
//! A single project-detail overlay. Records come from the catalog or from inline
//! metadata on the trigger element. Opening holds the shared scroll lock; the
//! overlay fades out on close and is hidden once the fade completes, unless it
//! was reopened in the meantime.

use crate::config::ModalConfig;
use crate::page::events::{EventOutcome, Key};
use crate::page::models::{ModalCatalog, ModalRecord, ModalState};
use crate::page::scroll_lock::{ScrollLock, ScrollLockHandle};
use crate::page::surface::{NodeId, PageSurface, Selector};
use crate::page::timers::TimerQueue;
use std::time::Duration;

const META_PREFIX: &str = "data-meta-";

pub struct ModalController {
    config: ModalConfig,
    catalog: ModalCatalog,
    state: ModalState,
    lock: ScrollLockHandle,
    /// Pending hide steps, tagged with the open generation they belong to
    timers: TimerQueue<u64>,
    generation: u64,
    now: Duration,
}

impl ModalController {
    pub fn new(config: ModalConfig, catalog: ModalCatalog, lock: &ScrollLock) -> Self {
        Self {
            config,
            catalog,
            state: ModalState::default(),
            lock: lock.handle(),
            timers: TimerQueue::new(),
            generation: 0,
            now: Duration::ZERO,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn set_catalog(&mut self, catalog: ModalCatalog) {
        self.catalog = catalog;
    }

    fn overlay(&self, page: &dyn PageSurface) -> Option<NodeId> {
        page.element_by_id(&self.config.overlay_id)
    }

    fn trigger_selector(&self) -> Selector {
        Selector::attribute(&self.config.trigger_attribute)
    }

    /// Make every trigger keyboard-focusable and announce it as a button
    pub fn prepare_triggers(&self, page: &mut dyn PageSurface) {
        for trigger in page.query(&self.trigger_selector()) {
            if page.attribute(trigger, "tabindex").is_none() {
                page.set_attribute(trigger, "tabindex", "0");
            }
            page.set_attribute(trigger, "role", "button");
        }
    }

    /// Record for a trigger: catalog entry first, then inline metadata
    pub fn record_for(&self, page: &dyn PageSurface, trigger: NodeId) -> Option<ModalRecord> {
        if let Some(record) = page
            .attribute(trigger, &self.config.trigger_attribute)
            .and_then(|key| self.catalog.get(&key).cloned())
        {
            return Some(record);
        }

        let title = page.attribute(trigger, "data-title")?;
        let mut record = ModalRecord::new(title)
            .with_description(page.attribute(trigger, "data-description").unwrap_or_default())
            .with_image(page.attribute(trigger, "data-image").unwrap_or_default());
        for name in page.attribute_names(trigger) {
            if let Some(key) = name.strip_prefix(META_PREFIX) {
                if let Some(value) = page.attribute(trigger, &name) {
                    record = record.with_meta(key, value);
                }
            }
        }
        Some(record)
    }

    /// Show `record`; replaces the displayed record when already open
    ///
    /// Returns false when the page has no overlay.
    pub fn open(&mut self, page: &mut dyn PageSurface, record: ModalRecord) -> bool {
        let Some(overlay) = self.overlay(page) else {
            tracing::debug!("No overlay '{}' on page", self.config.overlay_id);
            return false;
        };

        self.populate(page, overlay, &record);
        page.set_style(overlay, "display", "block");
        page.set_style(overlay, "opacity", "");
        page.add_class(overlay, &self.config.open_class);

        // Invalidate any hide step from an earlier close
        self.generation += 1;
        let title = record.title.clone();
        let replaced = self.state.open(record);
        self.lock.acquire(page);
        tracing::debug!(
            "Modal {} '{}'",
            if replaced { "replaced with" } else { "opened for" },
            title
        );
        true
    }

    fn populate(&self, page: &mut dyn PageSurface, overlay: NodeId, record: &ModalRecord) {
        let fields = page.query_within(overlay, &Selector::attribute(&self.config.field_attribute));
        for field in fields {
            let Some(name) = page.attribute(field, &self.config.field_attribute) else {
                continue;
            };
            let value = record.field(&name).unwrap_or_default();
            if name == "image" {
                page.set_attribute(field, "src", value);
                page.set_attribute(field, "alt", &record.title);
            } else {
                page.set_text(field, value);
            }
        }
    }

    /// Close the overlay and release the scroll lock; a no-op when already closed
    pub fn close(&mut self, page: &mut dyn PageSurface) -> bool {
        if !self.state.close() {
            return false;
        }
        if let Some(overlay) = self.overlay(page) {
            page.remove_class(overlay, &self.config.open_class);
            page.set_style(overlay, "opacity", "0");
            if self.config.fade_ms == 0 {
                page.set_style(overlay, "display", "none");
            } else {
                self.timers.schedule(
                    self.now + Duration::from_millis(self.config.fade_ms),
                    self.generation,
                );
            }
        }
        self.lock.release(page);
        tracing::debug!("Modal closed");
        true
    }

    /// Open from a trigger element; false when it supplies no record
    pub fn activate(&mut self, page: &mut dyn PageSurface, trigger: NodeId) -> bool {
        match self.record_for(page, trigger) {
            Some(record) => self.open(page, record),
            None => {
                tracing::debug!("Trigger {} has no record", trigger);
                false
            }
        }
    }

    pub fn handle_click(&mut self, page: &mut dyn PageSurface, target: NodeId) -> EventOutcome {
        if self.state.open {
            if let Some(overlay) = self.overlay(page) {
                // Backdrop only: clicks inside the content panel never reach it
                let on_backdrop = target == overlay;
                let on_close_control = page
                    .closest(target, &Selector::class(&self.config.close_class))
                    .is_some_and(|close| page.contains(overlay, close));
                if on_backdrop || on_close_control {
                    self.close(page);
                    return EventOutcome::default();
                }
            }
        }

        if let Some(trigger) = page.closest(target, &self.trigger_selector()) {
            if self.activate(page, trigger) {
                return EventOutcome::prevented();
            }
        }
        EventOutcome::default()
    }

    pub fn handle_key(
        &mut self,
        page: &mut dyn PageSurface,
        key: &Key,
        target: Option<NodeId>,
    ) -> EventOutcome {
        if *key == Key::Escape {
            self.close(page);
            return EventOutcome::default();
        }
        if !key.is_activation() {
            return EventOutcome::default();
        }
        let Some(trigger) = target.and_then(|t| page.closest(t, &self.trigger_selector())) else {
            return EventOutcome::default();
        };
        if self.activate(page, trigger) {
            EventOutcome::prevented()
        } else {
            EventOutcome::default()
        }
    }

    /// Finish fades that are due by `now`
    pub fn advance(&mut self, page: &mut dyn PageSurface, now: Duration) {
        self.now = now;
        for generation in self.timers.drain_due(now) {
            if generation != self.generation || self.state.open {
                continue;
            }
            if let Some(overlay) = self.overlay(page) {
                page.set_style(overlay, "display", "none");
            }
        }
    }
}
