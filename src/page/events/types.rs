//! # Core Event Types
//!
//! Scroll samples and key identities shared by the event system.

/// Direction of travel between two published scroll samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    Up,
    Down,
    #[default]
    None,
}

impl ScrollDirection {
    /// Direction from the previously published position to `current`
    pub fn between(previous: Option<u32>, current: u32) -> Self {
        match previous {
            Some(prev) if current > prev => Self::Down,
            Some(prev) if current < prev => Self::Up,
            _ => Self::None,
        }
    }
}

/// One published scroll observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    pub position: u32,
    pub direction: ScrollDirection,
}

impl ScrollSample {
    pub fn new(position: u32, direction: ScrollDirection) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Sample used for the cold-start delivery on subscription
    pub fn at_rest(position: u32) -> Self {
        Self::new(position, ScrollDirection::None)
    }
}

/// Keyboard keys the runtime reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Spacebar" | "Space" => Self::Space,
            other => Self::Other(other.to_string()),
        }
    }

    /// Keys that activate a focused control
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}
