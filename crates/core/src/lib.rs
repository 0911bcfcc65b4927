//! Domain layer of the roadmap tracker: the immutable curriculum tree,
//! checklist and journal value types, and the pure progress aggregator.
//!
//! Nothing in this crate performs I/O; persistence and synchronization live
//! in the `storage` and `services` crates.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod progress;
pub mod time;

pub use error::Error;
pub use time::Clock;
