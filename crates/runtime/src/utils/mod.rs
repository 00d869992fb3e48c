//! Small helpers shared across the runtime.
pub mod hash;
