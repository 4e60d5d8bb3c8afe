//! Step definitions for Cucumber tests
//!
//! Steps are organized by feature domain:
//! - `page` - Page loading, clicks, keys, time and generic element assertions
//! - `scroll` - Scroll events, throttling, chrome and parallax
//! - `navigation` - Menu, active links and anchor scrolling
//! - `reveal` - Viewport reveal, deferred images and background video
//! - `modal` - Project overlay
//! - `form` - Validation, submission, notices and floating labels

pub mod form;
pub mod modal;
pub mod navigation;
pub mod page;
pub mod reveal;
pub mod scroll;
