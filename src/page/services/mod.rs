//! # Services Module
//!
//! Capabilities used by controllers that are not tied to a single slice of UI
//! state: the submission transport and the notice center.

pub mod notice;
pub mod transport;

pub use notice::{NoticeCenter, NoticeKind};
pub use transport::{
    SimulatedTransport, SubmissionReceipt, SubmissionTransport, TransportError, DEFAULT_FAILURE_RATE,
    DEFAULT_LATENCY,
};
