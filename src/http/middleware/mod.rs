//! HTTP middleware.

pub mod deadline;
pub mod metrics;

pub use deadline::enforce_deadline;
pub use metrics::track_requests;
