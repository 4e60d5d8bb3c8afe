//! Testing infrastructure for page controllers
//!
//! Ready-made headless pages and a scripted transport, so controllers can be
//! exercised without a browser or a network. Shared by the unit tests and the
//! cucumber suite.

use crate::page::models::{FormSubmission, ModalRecord};
use crate::page::services::{SubmissionReceipt, SubmissionTransport, TransportError};
use crate::page::surface::{InMemoryPage, NodeId, PageSurface, Rect};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Append `tag` under `parent` with classes and attributes
pub fn element(
    page: &mut InMemoryPage,
    parent: NodeId,
    tag: &str,
    classes: &[&str],
    attributes: &[(&str, &str)],
) -> NodeId {
    let node = page.append(parent, tag);
    for class in classes {
        page.add_class(node, class);
    }
    for (name, value) in attributes {
        page.set_attribute(node, name, value);
    }
    node
}

/// Append `tag` with a document box
pub fn placed(
    page: &mut InMemoryPage,
    parent: NodeId,
    tag: &str,
    attributes: &[(&str, &str)],
    top: i64,
    height: u32,
) -> NodeId {
    let node = element(page, parent, tag, &[], attributes);
    page.set_rect(node, Rect::new(top, height));
    node
}

/// Navbar with hamburger, two links and a back-to-top control, over an
/// `about` section `[800, 1600)` and a `contact` section `[1600, 2200)`
pub fn navigation_page() -> InMemoryPage {
    let mut page = InMemoryPage::new(800);
    let body = page.body();

    let nav = element(&mut page, body, "nav", &["navbar"], &[("id", "navbar")]);
    page.set_rect(nav, Rect::new(0, 80));
    element(&mut page, nav, "div", &["hamburger"], &[]);
    let menu = element(&mut page, nav, "ul", &["nav-menu"], &[]);
    for href in ["#about", "#contact"] {
        let item = element(&mut page, menu, "li", &[], &[]);
        element(&mut page, item, "a", &["nav-link"], &[("href", href)]);
    }

    let hero = placed(&mut page, body, "div", &[], 0, 800);
    page.add_class(hero, "hero");
    placed(&mut page, body, "section", &[("id", "about")], 800, 800);
    placed(&mut page, body, "section", &[("id", "contact")], 1600, 600);
    element(&mut page, body, "button", &["scroll-to-top"], &[]);
    page
}

/// Hero with background video, fallback image and intro content, followed by
/// three reveal cards at 100, 1000 and 2000 and a deferred image at 1800
pub fn reveal_page() -> InMemoryPage {
    let mut page = InMemoryPage::new(800);
    let body = page.body();

    let hero = placed(&mut page, body, "section", &[("id", "home")], 0, 600);
    let video = placed(&mut page, hero, "video", &[], 0, 600);
    page.add_class(video, "hero-video");
    element(&mut page, hero, "img", &["hero-image-fallback"], &[]);
    let content = element(&mut page, hero, "div", &["hero-content"], &[]);
    element(&mut page, content, "h1", &[], &[]);
    element(&mut page, content, "p", &[], &[]);

    for top in [100, 1000, 2000] {
        placed(&mut page, body, "div", &[("data-reveal", "")], top, 200);
    }
    let image = placed(
        &mut page,
        body,
        "img",
        &[("data-src", "images/site.jpg")],
        1800,
        300,
    );
    page.add_class(image, "lazy");
    page
}

/// The record used throughout the modal tests
pub fn metropolitan_tower() -> ModalRecord {
    ModalRecord::new("Metropolitan Tower Complex")
        .with_description("A 45-story mixed-use development in the heart of downtown")
        .with_image("images/metro.jpg")
        .with_meta("type", "Commercial")
        .with_meta("status", "Completed")
}

/// Overlay `#projectModal` and three triggers: `metro` (catalog), `harbor`
/// (inline metadata) and `unknown` (no record)
pub fn modal_page() -> InMemoryPage {
    let mut page = InMemoryPage::new(800);
    let body = page.body();

    let overlay = element(&mut page, body, "div", &["modal"], &[("id", "projectModal")]);
    let panel = element(&mut page, overlay, "div", &["modal-content"], &[]);
    element(&mut page, panel, "span", &["close"], &[]);
    for (tag, field) in [
        ("h2", "title"),
        ("p", "description"),
        ("img", "image"),
        ("span", "type"),
        ("span", "status"),
    ] {
        element(&mut page, panel, tag, &[], &[("data-modal-field", field)]);
    }

    element(&mut page, body, "div", &["project-card"], &[("data-project", "metro")]);
    element(
        &mut page,
        body,
        "div",
        &["project-card"],
        &[
            ("data-project", "harbor"),
            ("data-title", "Harbor Residences"),
            ("data-description", "Waterfront apartments"),
            ("data-meta-duration", "18 months"),
        ],
    );
    element(&mut page, body, "div", &["project-card"], &[("data-project", "unknown")]);
    page
}

/// Consultation form: required `name` and `email`, optional `message`, each
/// followed by its label inside a group, plus the submit button
pub fn form_page() -> InMemoryPage {
    let mut page = InMemoryPage::new(800);
    let body = page.body();

    let form = element(&mut page, body, "form", &["consultation-form"], &[]);
    let fields: [(&str, &[(&str, &str)]); 3] = [
        ("input", &[("name", "name"), ("type", "text"), ("required", "")]),
        ("input", &[("name", "email"), ("type", "email"), ("required", "")]),
        ("textarea", &[("name", "message")]),
    ];
    for (tag, attributes) in fields {
        let group = element(&mut page, form, "div", &["form-group"], &[]);
        element(&mut page, group, tag, &[], attributes);
        element(&mut page, group, "label", &[], &[]);
    }
    let button = element(
        &mut page,
        form,
        "button",
        &["btn-submit"],
        &[("type", "submit")],
    );
    page.set_text(button, "Request Consultation");
    page
}

/// Transport that replays scripted results and records every submission
pub struct RecordingTransport {
    script: Mutex<VecDeque<bool>>,
    /// Result once the script runs out
    fallback: bool,
    /// Time each submission takes before answering
    latency: Duration,
    calls: Mutex<Vec<FormSubmission>>,
}

impl RecordingTransport {
    pub fn new(fallback: bool) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Succeeding transport that answers only after `latency`
    pub fn slow(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            fallback: true,
            latency,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::new(true)
    }

    pub fn failing() -> Arc<Self> {
        Self::new(false)
    }

    /// Queue the result of the next submission
    pub fn push_result(&self, success: bool) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(success);
    }

    pub fn calls(&self) -> Vec<FormSubmission> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SubmissionTransport for RecordingTransport {
    async fn submit(&self, submission: &FormSubmission) -> Result<SubmissionReceipt, TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(submission.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let success = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(self.fallback);
        if success {
            Ok(SubmissionReceipt {
                accepted_fields: submission.fields.len(),
            })
        } else {
            Err(TransportError::Unavailable("scripted failure".to_string()))
        }
    }
}
