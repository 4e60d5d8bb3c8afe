//! # Scroll Lock
//!
//! Background scrolling is suppressed while any overlay or menu needs it. The
//! lock is a counter shared by every holder: the page unlocks only when the last
//! holder releases.

use crate::page::surface::PageSurface;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared lock counter for the page body
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A per-controller claim on this lock
    pub fn handle(&self) -> ScrollLockHandle {
        ScrollLockHandle {
            lock: self.clone(),
            held: false,
        }
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }
}

/// One holder's claim; acquiring or releasing twice is a no-op
#[derive(Debug)]
pub struct ScrollLockHandle {
    lock: ScrollLock,
    held: bool,
}

impl ScrollLockHandle {
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn acquire(&mut self, page: &mut dyn PageSurface) {
        if self.held {
            return;
        }
        self.held = true;
        if self.lock.holders.fetch_add(1, Ordering::SeqCst) == 0 {
            let body = page.body();
            page.set_style(body, "overflow", "hidden");
            tracing::debug!("Background scroll locked");
        }
    }

    pub fn release(&mut self, page: &mut dyn PageSurface) {
        if !self.held {
            return;
        }
        self.held = false;
        if self.lock.holders.fetch_sub(1, Ordering::SeqCst) == 1 {
            let body = page.body();
            page.set_style(body, "overflow", "");
            tracing::debug!("Background scroll unlocked");
        }
    }
}
