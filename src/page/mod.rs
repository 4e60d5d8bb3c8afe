//! # Page Interaction Runtime
//!
//! Everything that runs against the page surface: events and the scroll bus,
//! per-controller state models, shared services and the controllers themselves.
//! Controllers never touch each other's state; the published scroll sample and
//! the scroll lock counter are the only shared signals.

pub mod controllers;
pub mod events;
pub mod models;
pub mod scroll_lock;
pub mod services;
pub mod surface;
pub mod testing;
pub mod timers;

// Re-export core types
pub use controllers::{init, PageRuntime, SubmissionOutcome};
pub use events::{EventOutcome, Key, PageEvent, ScrollDirection, ScrollSample};
pub use scroll_lock::ScrollLock;
pub use surface::{InMemoryPage, NodeId, PageFixture, PageSurface, Rect, Selector};
pub use timers::{TimerId, TimerQueue};

// Re-export specific items from models and services to avoid conflicts
pub use models::{FormPhase, FormState, ModalCatalog, ModalRecord, ModalState, NavState, Section};
pub use services::{SimulatedTransport, SubmissionTransport, TransportError};
