//! # Page Surface Abstraction
//!
//! Provides a clean trait abstraction over the live document so controllers can
//! read and mutate page elements without depending on a particular host.
//!
//! ## Design Principles
//!
//! - **PageSurface**: Everything a controller may do to the page (query, classes,
//!   attributes, styles, form values, geometry, scrolling, media)
//! - **Graceful Misses**: Operations on unknown or removed nodes are no-ops
//! - **Dependency Injection**: Controllers receive `&mut dyn PageSurface` per call
//!
//! ## Architecture
//!
//! ```text
//! Browser host:  PageRuntime ──▶ (host binding) ──▶ live DOM
//!
//! Headless/test: PageRuntime ──▶ InMemoryPage   ──▶ arena of nodes
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod fixture;
pub mod memory;

pub use fixture::{ElementFixture, PageFixture};
pub use memory::InMemoryPage;

/// Handle to an element on the page surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Document-relative box of an element (vertical axis only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub top: i64,
    pub height: u32,
}

impl Rect {
    pub fn new(top: i64, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> i64 {
        self.top + i64::from(self.height)
    }
}

/// How a programmatic scroll should be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// A programmatic scroll request issued by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub top: u32,
    pub behavior: ScrollBehavior,
}

/// Element selector understood by every page surface
///
/// Matching is always evaluated in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
    /// Element carries the attribute, whatever its value
    Attribute(String),
    AttributeValue(String, String),
    /// Every inner selector matches
    All(Vec<Selector>),
    /// At least one inner selector matches
    Any(Vec<Selector>),
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute(name.into())
    }

    pub fn attribute_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AttributeValue(name.into(), value.into())
    }

    /// Conjunction of `self` and `other`
    pub fn and(self, other: Selector) -> Self {
        match self {
            Self::All(mut inner) => {
                inner.push(other);
                Self::All(inner)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Disjunction of `self` and `other`
    pub fn or(self, other: Selector) -> Self {
        match self {
            Self::Any(mut inner) => {
                inner.push(other);
                Self::Any(inner)
            }
            first => Self::Any(vec![first, other]),
        }
    }
}

/// The live document as seen by controllers
///
/// Every mutating operation on a node that does not exist (never existed or has
/// been removed) must be a silent no-op; readers return `None`/`false`.
pub trait PageSurface: Send {
    // === Lookup ===

    /// The document body; always present
    fn body(&self) -> NodeId;

    /// All elements matching `selector`, in document order
    fn query(&self, selector: &Selector) -> Vec<NodeId>;

    /// Descendants of `root` (excluding `root`) matching `selector`, in document order
    fn query_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// First element matching `selector`
    fn query_first(&self, selector: &Selector) -> Option<NodeId> {
        self.query(selector).into_iter().next()
    }

    /// Element with the given `id` attribute
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_first(&Selector::id(id))
    }

    fn exists(&self, node: NodeId) -> bool;

    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// True when `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Nearest inclusive ancestor of `node` matching `selector`
    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId>;

    // === Classes, attributes, styles, text ===

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Returns true when the class list changed
    fn add_class(&mut self, node: NodeId, class: &str) -> bool;

    /// Returns true when the class list changed
    fn remove_class(&mut self, node: NodeId, class: &str) -> bool;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Names of every attribute on `node`, sorted
    fn attribute_names(&self, node: NodeId) -> Vec<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&mut self, node: NodeId, name: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Set an inline style; an empty `value` removes the property
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn text(&self, node: NodeId) -> Option<String>;

    fn set_text(&mut self, node: NodeId, text: &str);

    // === Form fields ===

    fn value(&self, node: NodeId) -> Option<String>;

    fn set_value(&mut self, node: NodeId, value: &str);

    fn is_disabled(&self, node: NodeId) -> bool;

    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    // === Geometry and scrolling ===

    fn rect(&self, node: NodeId) -> Option<Rect>;

    fn scroll_position(&self) -> u32;

    fn viewport_height(&self) -> u32;

    fn scroll_to(&mut self, request: ScrollRequest);

    // === Media ===

    fn play_media(&mut self, node: NodeId) -> Result<()>;

    fn pause_media(&mut self, node: NodeId);

    // === Structure ===

    /// Append a new element under `parent` and return its handle
    fn create_element(&mut self, tag: &str, parent: NodeId) -> NodeId;

    /// Insert a new element before the existing children of `parent`
    fn create_first_child(&mut self, tag: &str, parent: NodeId) -> NodeId;

    /// Detach `node` and its subtree; returns false when it was already gone
    fn remove_element(&mut self, node: NodeId) -> bool;
}
