//! sv-core: shared vocabulary for schedview.
//!
//! Contains:
//! - mode (which report shape the engine is asked for)
//! - policy (scheduling policy selector, opaque to everything but the engine)
//! - params (simulation parameters and process descriptors)
//! - error (shared error types)

pub mod error;
pub mod mode;
pub mod params;
pub mod policy;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use mode::Mode;
pub use params::*;
pub use policy::Policy;
