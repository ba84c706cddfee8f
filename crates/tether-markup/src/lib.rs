#![forbid(unsafe_code)]

//! Cached markup rendering for Tether.
//!
//! [`MarkupRenderer`] owns a current source string and a cached rendered
//! fragment, recomputed only when the source actually changes. The source is
//! set explicitly or mirrored from a named host property on every update
//! pass. Unchanged output keeps its identity so a host renderer can skip
//! diffing that subtree.
//!
//! Leaves first: [`convert`] (source string to sanitized HTML fragment)
//! feeds [`mirror`] (host property sampling) feeds [`controller`].

pub mod controller;
pub mod convert;
pub mod mirror;

pub use controller::{MarkupOptions, MarkupRenderer};
pub use convert::{Fragment, render_markup};
pub use mirror::PropertyMirror;
