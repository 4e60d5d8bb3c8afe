//! # Viewport Reveal Controller
//!
//! One-shot reveal of marked elements as they scroll into view, deferred image
//! loading, background video play/pause with a static fallback, and the hero
//! intro sequence.
//!
//! Intersection is computed from element geometry on every published scroll
//! sample. The observed viewport is `[position, position + height - margin)`.

use crate::config::{IntroConfig, RevealConfig};
use crate::page::events::{EventOutcome, PageEvent, ScrollSample};
use crate::page::surface::{NodeId, PageSurface, Rect, Selector};
use crate::page::timers::TimerQueue;
use std::collections::BTreeSet;
use std::time::Duration;

/// An element waiting for its first intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealEntry {
    pub node: NodeId,
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealTask {
    Reveal(NodeId),
    Intro(NodeId),
}

pub struct RevealController {
    config: RevealConfig,
    intro: IntroConfig,
    /// Observed, not yet revealed
    entries: Vec<RevealEntry>,
    revealed: BTreeSet<NodeId>,
    lazy_media: Vec<NodeId>,
    videos: Vec<NodeId>,
    /// Videos that failed to play; they stay on the fallback
    failed_videos: BTreeSet<NodeId>,
    timers: TimerQueue<RevealTask>,
    now: Duration,
}

/// Fraction of `rect` inside `[top, bottom)`; zero-height boxes count as fully
/// visible when their top lies inside
fn visible_fraction(rect: Rect, top: i64, bottom: i64) -> f32 {
    if rect.height == 0 {
        return if rect.top >= top && rect.top < bottom { 1.0 } else { 0.0 };
    }
    let overlap = rect.bottom().min(bottom) - rect.top.max(top);
    if overlap <= 0 {
        return 0.0;
    }
    overlap as f32 / rect.height as f32
}

impl RevealController {
    pub fn new(config: RevealConfig, intro: IntroConfig) -> Self {
        Self {
            config,
            intro,
            entries: Vec::new(),
            revealed: BTreeSet::new(),
            lazy_media: Vec::new(),
            videos: Vec::new(),
            failed_videos: BTreeSet::new(),
            timers: TimerQueue::new(),
            now: Duration::ZERO,
        }
    }

    fn target_selector(&self) -> Selector {
        self.config
            .target_classes
            .iter()
            .fold(Selector::attribute(&self.config.attribute), |selector, class| {
                selector.or(Selector::class(class))
            })
    }

    /// Observe every reveal target, deferred image and background video on the page
    ///
    /// Elements added later are picked up only when this runs again. Returns the
    /// number of newly observed reveal targets.
    pub fn register(&mut self, page: &mut dyn PageSurface) -> usize {
        let mut added = 0;
        for node in page.query(&self.target_selector()) {
            if self.revealed.contains(&node) || self.entries.iter().any(|e| e.node == node) {
                continue;
            }
            page.add_class(node, &self.config.pending_class);
            self.entries.push(RevealEntry {
                node,
                revealed: false,
            });
            added += 1;
        }

        for node in page.query(&Selector::attribute(&self.config.lazy_attribute)) {
            if !self.lazy_media.contains(&node) {
                self.lazy_media.push(node);
            }
        }

        for video in page.query(&Selector::class(&self.config.video_class)) {
            if !self.videos.contains(&video) {
                self.videos.push(video);
            }
        }
        if !self.videos.is_empty() {
            for fallback in page.query(&Selector::class(&self.config.fallback_class)) {
                page.set_style(fallback, "display", "block");
            }
        }

        tracing::debug!(
            "Observing {} reveal targets, {} deferred images, {} videos",
            self.entries.len(),
            self.lazy_media.len(),
            self.videos.len()
        );
        added
    }

    /// Put the hero content children into their pending state and schedule
    /// their staggered entrance
    pub fn start_intro(&mut self, page: &mut dyn PageSurface) {
        let Some(container) = page.query_first(&Selector::class(&self.intro.container_class))
        else {
            return;
        };
        for (index, child) in page.children(container).into_iter().enumerate() {
            page.add_class(child, &self.intro.pending_class);
            let delay = self.intro.base_ms + index as u64 * self.intro.step_ms;
            self.timers
                .schedule(self.now + Duration::from_millis(delay), RevealTask::Intro(child));
        }
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    pub fn observed(&self) -> &[RevealEntry] {
        &self.entries
    }

    fn viewport(&self, sample: &ScrollSample, page: &dyn PageSurface) -> (i64, i64) {
        let top = i64::from(sample.position);
        let bottom =
            top + i64::from(page.viewport_height()) - i64::from(self.config.bottom_margin);
        (top, bottom)
    }

    fn intersects(&self, page: &dyn PageSurface, node: NodeId, top: i64, bottom: i64) -> bool {
        page.rect(node).is_some_and(|rect| {
            let fraction = visible_fraction(rect, top, bottom);
            fraction > 0.0 && fraction >= self.config.threshold
        })
    }

    pub fn on_scroll(&mut self, sample: &ScrollSample, page: &mut dyn PageSurface) {
        let (top, bottom) = self.viewport(sample, page);
        self.reveal_entries(page, top, bottom);
        self.load_lazy_media(page, top, bottom);
        self.update_videos(page, top, bottom);
    }

    fn reveal_entries(&mut self, page: &mut dyn PageSurface, top: i64, bottom: i64) {
        let mut batch = 0u32;
        let mut still_observed = Vec::with_capacity(self.entries.len());
        for mut entry in std::mem::take(&mut self.entries) {
            if !page.exists(entry.node) {
                continue;
            }
            if !self.intersects(page, entry.node, top, bottom) {
                still_observed.push(entry);
                continue;
            }

            entry.revealed = true;
            self.revealed.insert(entry.node);
            let delay = Duration::from_millis(self.config.stagger_ms) * batch;
            if delay.is_zero() {
                self.show(page, entry.node);
            } else {
                self.timers
                    .schedule(self.now + delay, RevealTask::Reveal(entry.node));
            }
            batch += 1;
        }
        self.entries = still_observed;
    }

    fn show(&self, page: &mut dyn PageSurface, node: NodeId) {
        page.add_class(node, &self.config.visible_class);
        tracing::debug!("Revealed element {}", node);
    }

    fn load_lazy_media(&mut self, page: &mut dyn PageSurface, top: i64, bottom: i64) {
        let mut waiting = Vec::with_capacity(self.lazy_media.len());
        for node in std::mem::take(&mut self.lazy_media) {
            if !page.exists(node) {
                continue;
            }
            if !self.intersects(page, node, top, bottom) {
                waiting.push(node);
                continue;
            }
            if let Some(source) = page.attribute(node, &self.config.lazy_attribute) {
                page.set_attribute(node, "src", &source);
                page.remove_attribute(node, &self.config.lazy_attribute);
                page.remove_class(node, &self.config.lazy_class);
                tracing::debug!("Loaded deferred image {} from {}", node, source);
            }
        }
        self.lazy_media = waiting;
    }

    fn update_videos(&mut self, page: &mut dyn PageSurface, top: i64, bottom: i64) {
        for video in self.videos.clone() {
            if self.failed_videos.contains(&video) || !page.exists(video) {
                continue;
            }
            let fraction = page
                .rect(video)
                .map(|rect| visible_fraction(rect, top, bottom))
                .unwrap_or(0.0);
            if fraction >= self.config.video_threshold {
                if let Err(e) = page.play_media(video) {
                    tracing::warn!("Background video {} failed to play: {}", video, e);
                    self.fall_back(page, video);
                }
            } else {
                page.pause_media(video);
            }
        }
    }

    /// Hide a broken video and keep the static fallback
    fn fall_back(&mut self, page: &mut dyn PageSurface, video: NodeId) {
        self.failed_videos.insert(video);
        page.pause_media(video);
        page.set_style(video, "display", "none");
        for fallback in page.query(&Selector::class(&self.config.fallback_class)) {
            page.set_style(fallback, "display", "block");
        }
    }

    pub fn handle_event(&mut self, event: &PageEvent, page: &mut dyn PageSurface) -> EventOutcome {
        match event {
            PageEvent::MediaLoaded { target } if self.videos.contains(target) => {
                if !self.failed_videos.contains(target) {
                    for fallback in page.query(&Selector::class(&self.config.fallback_class)) {
                        page.set_style(fallback, "display", "none");
                    }
                }
            }
            PageEvent::MediaError { target } if self.videos.contains(target) => {
                self.fall_back(page, *target);
            }
            _ => {}
        }
        EventOutcome::default()
    }

    /// Fire staggered reveals and intro steps due by `now`
    pub fn advance(&mut self, page: &mut dyn PageSurface, now: Duration) {
        self.now = now;
        for task in self.timers.drain_due(now) {
            match task {
                RevealTask::Reveal(node) => {
                    if page.exists(node) {
                        self.show(page, node);
                    }
                }
                RevealTask::Intro(node) => {
                    if page.exists(node) {
                        page.remove_class(node, &self.intro.pending_class);
                        page.add_class(node, &self.intro.visible_class);
                    }
                }
            }
        }
    }
}
