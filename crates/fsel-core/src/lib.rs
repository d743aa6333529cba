#![forbid(unsafe_code)]

//! Core: canonical events, the rendering-surface seam, an in-memory element
//! tree, and lifecycle primitives shared by fsel controls.

pub mod dom;
pub mod event;
pub mod lifecycle;
pub mod logging;
pub mod surface;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
