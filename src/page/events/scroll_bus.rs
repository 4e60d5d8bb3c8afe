//! # Scroll Bus
//!
//! Throttled distribution of scroll samples to subscribers using the
//! observer pattern. Consumers subscribe here instead of attaching their own
//! raw scroll listeners.

use super::types::{ScrollDirection, ScrollSample};
use crate::page::surface::PageSurface;
use std::time::Duration;

/// Type alias for scroll subscribers
pub type ScrollHandler = Box<dyn FnMut(&ScrollSample, &mut dyn PageSurface) + Send>;

/// Default minimum spacing between two published samples
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(100);

/// Scroll sample distribution
pub trait ScrollBus: Send {
    /// Register a subscriber; it receives one sample immediately (cold start)
    fn subscribe(&mut self, handler: ScrollHandler, page: &mut dyn PageSurface);

    /// Handle one raw scroll event observed at `now`
    ///
    /// Returns the published sample, or `None` when the event was dropped.
    fn publish(&mut self, now: Duration, page: &mut dyn PageSurface) -> Option<ScrollSample>;
}

/// Leading-edge throttle: publish, then drop everything until the cooldown ends
pub struct ThrottledScrollPublisher {
    interval: Duration,
    /// End of the current cooldown; `None` when not cooling down
    cooldown_until: Option<Duration>,
    last_published: Option<u32>,
    handlers: Vec<ScrollHandler>,
}

impl ThrottledScrollPublisher {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            cooldown_until: None,
            last_published: None,
            handlers: Vec::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    fn in_cooldown(&self, now: Duration) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }
}

impl Default for ThrottledScrollPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_INTERVAL)
    }
}

impl ScrollBus for ThrottledScrollPublisher {
    fn subscribe(&mut self, mut handler: ScrollHandler, page: &mut dyn PageSurface) {
        let position = page.scroll_position();
        let sample = ScrollSample::at_rest(position);
        tracing::debug!("Cold-start scroll sample at {} for new subscriber", position);
        handler(&sample, &mut *page);
        self.last_published = Some(position);
        self.handlers.push(handler);
    }

    fn publish(&mut self, now: Duration, page: &mut dyn PageSurface) -> Option<ScrollSample> {
        if self.in_cooldown(now) {
            tracing::trace!("Scroll event at {:?} dropped during cooldown", now);
            return None;
        }

        let position = page.scroll_position();
        let sample = ScrollSample::new(
            position,
            ScrollDirection::between(self.last_published, position),
        );
        for handler in &mut self.handlers {
            handler(&sample, &mut *page);
        }
        self.last_published = Some(position);
        self.cooldown_until = Some(now + self.interval);
        Some(sample)
    }
}
