//! # Controllers Module
//!
//! One controller per slice of page state, plus the runtime that wires them to
//! the page surface and the scroll bus.

pub mod app_controller;
pub mod form;
pub mod modal;
pub mod navigation;
pub mod parallax;
pub mod reveal;

// Re-export main types for convenience
pub use app_controller::{init, PageRuntime};
pub use form::{FormController, SubmissionOutcome};
pub use modal::ModalController;
pub use navigation::NavigationController;
pub use parallax::ParallaxController;
pub use reveal::{RevealController, RevealEntry};
