//! Checker assembly: one immutable definition per diagnostic format, a
//! registry populated at startup, and the per-request lifecycle.

mod definition;
mod registry;
mod request;
mod state;

pub use definition::{CheckOutcome, CheckReport, CheckerDefinition, Resolution};
pub use registry::CheckerRegistry;
pub use request::CheckRequest;
pub use state::{CheckEvent, CheckerState};
