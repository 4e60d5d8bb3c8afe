//! # Notice Center
//!
//! Transient notifications appended to the page body. A new notice replaces any
//! visible one; each notice dismisses itself after a delay, plays its exit
//! transition, and is then removed.

use crate::config::NoticeConfig;
use crate::page::surface::{NodeId, PageSurface, Selector};
use crate::page::timers::TimerQueue;
use std::time::Duration;

/// Visual flavour of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeTask {
    Dismiss(NodeId),
    Remove(NodeId),
}

pub struct NoticeCenter {
    config: NoticeConfig,
    timers: TimerQueue<NoticeTask>,
}

impl NoticeCenter {
    pub fn new(config: NoticeConfig) -> Self {
        Self {
            config,
            timers: TimerQueue::new(),
        }
    }

    /// Replace any visible notice with a new one
    pub fn show(
        &mut self,
        page: &mut dyn PageSurface,
        kind: NoticeKind,
        message: &str,
        now: Duration,
    ) -> NodeId {
        for existing in page.query(&Selector::class(&self.config.class)) {
            page.remove_element(existing);
        }

        let body = page.body();
        let notice = page.create_element("div", body);
        page.add_class(notice, &self.config.class);
        page.add_class(notice, &format!("{}-{}", self.config.class, kind.as_str()));
        page.set_attribute(notice, "role", "status");

        let text = page.create_element("span", notice);
        page.set_text(text, message);

        let close = page.create_element("button", notice);
        page.add_class(close, &self.config.close_class);
        page.set_attribute(close, "aria-label", "Close notification");
        page.set_text(close, "\u{00d7}");

        self.timers.schedule(
            now + Duration::from_millis(self.config.display_ms),
            NoticeTask::Dismiss(notice),
        );
        tracing::debug!("Showing {} notice {}: {}", kind.as_str(), notice, message);
        notice
    }

    /// Start the exit transition; false when the notice is gone or already leaving
    pub fn dismiss(&mut self, page: &mut dyn PageSurface, notice: NodeId, now: Duration) -> bool {
        if !page.exists(notice) || page.has_class(notice, &self.config.leaving_class) {
            return false;
        }
        page.add_class(notice, &self.config.leaving_class);
        self.timers.schedule(
            now + Duration::from_millis(self.config.exit_ms),
            NoticeTask::Remove(notice),
        );
        true
    }

    /// Handle a click; true when it hit a notice's close control
    pub fn handle_click(&mut self, page: &mut dyn PageSurface, target: NodeId, now: Duration) -> bool {
        let Some(close) = page.closest(target, &Selector::class(&self.config.close_class)) else {
            return false;
        };
        let Some(notice) = page.closest(close, &Selector::class(&self.config.class)) else {
            return false;
        };
        self.dismiss(page, notice, now);
        true
    }

    /// Fire every timer due by `now`
    pub fn advance(&mut self, page: &mut dyn PageSurface, now: Duration) {
        while let Some((due, task)) = self.timers.pop_due(now) {
            match task {
                NoticeTask::Dismiss(notice) => {
                    self.dismiss(page, notice, due);
                }
                NoticeTask::Remove(notice) => {
                    if page.remove_element(notice) {
                        tracing::debug!("Removed notice {}", notice);
                    }
                }
            }
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
