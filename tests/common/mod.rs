//! Common test utilities and infrastructure
//!
//! This module provides shared functionality for integration tests including:
//! - Cucumber world implementation
//! - The landing page fixture and project catalog

pub mod world;

// Re-export commonly used items
#[allow(unused_imports)]
pub use world::PageWorld;
