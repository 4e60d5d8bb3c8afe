//! # Events Module
//!
//! Re-exports all event system components organized by category: raw page
//! events coming from the host, scroll samples, and the throttled scroll bus.

pub mod page_events;
pub mod scroll_bus;
pub mod types;

pub use page_events::{EventOutcome, PageEvent};
pub use scroll_bus::{ScrollBus, ScrollHandler, ThrottledScrollPublisher, DEFAULT_THROTTLE_INTERVAL};
pub use types::{Key, ScrollDirection, ScrollSample};
