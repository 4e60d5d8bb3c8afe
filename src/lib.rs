//! # Pagewright - Interaction Runtime for Marketing Pages
//!
//! Keeps page chrome in sync with scrolling, reveals content as it enters the
//! viewport, runs the project-detail overlay and drives the consultation form
//! through its submit lifecycle. All page variants share this one engine; their
//! differences live in [`config::RuntimeConfig`].
//!
//! ## Architecture
//!
//! ```text
//!  host events  ┌──────────────┐  samples   ┌──────────────────────┐
//! ─────────────►│ PageRuntime  │───────────►│ Scroll subscribers   │
//!               │              │  (throttle)│ - Navigation         │
//!               │ - dispatch   │            │ - Reveal             │
//!               │ - advance    │            │ - Parallax           │
//!               └──────┬───────┘            └──────────┬───────────┘
//!                      │ clicks, keys, form events     │
//!                      ▼                               ▼
//!               ┌──────────────┐            ┌──────────────────────┐
//!               │ Modal / Form │───────────►│     PageSurface      │
//!               │ controllers  │  mutations │ (DOM or InMemoryPage)│
//!               └──────────────┘            └──────────────────────┘
//! ```
//!
//! ```no_run
//! use pagewright::{init, InMemoryPage, PageEvent, RuntimeConfig, SimulatedTransport};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let page = InMemoryPage::from_json(r#"{ "elements": [] }"#)?;
//! let mut runtime = init(page, RuntimeConfig::from_env(), Arc::new(SimulatedTransport::default()))?;
//! runtime.page_mut().set_scroll_position(150);
//! runtime.dispatch(PageEvent::Scroll).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod page;

// Re-export main types for easy access
pub use config::{RuntimeConfig, Variant};
pub use page::*;
