//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns that wrap every route.

pub mod trace;

pub use trace::Trace;
