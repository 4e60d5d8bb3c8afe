//! # Page Events
//!
//! Raw input entering the runtime at the page surface, and the outcome the
//! runtime reports back to the host.

use super::types::Key;
use crate::page::surface::NodeId;

/// Input events forwarded by the host
///
/// Scroll carries no payload: the publisher samples the position from the page
/// surface, which the host has already updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Scroll,
    Click { target: NodeId },
    KeyDown { key: Key, target: Option<NodeId> },
    Focus { target: NodeId },
    Blur { target: NodeId },
    /// Field value changed while typing (the page already holds the new value)
    Input { target: NodeId },
    /// Field value committed (select change, autofill)
    Change { target: NodeId },
    Submit { form: NodeId },
    MediaLoaded { target: NodeId },
    MediaError { target: NodeId },
}

/// What the runtime did with an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The host must cancel the browser's default action
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }

    /// Merge the outcome of another handler for the same event
    pub fn merge(self, other: EventOutcome) -> Self {
        Self {
            default_prevented: self.default_prevented || other.default_prevented,
        }
    }
}
