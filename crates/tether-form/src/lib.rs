#![forbid(unsafe_code)]

//! Form value binding for Tether.
//!
//! [`FormBinder`] keeps a caller-supplied structured value in sync with the
//! interactive controls of an attached container: each change/input/blur
//! event bubbling from a descendant control is resolved to a dotted path,
//! the control's reported value is written through that path, per-field
//! validity is tracked, and a host re-render is requested.
//!
//! Leaves first: [`path`] (deep get/set over untyped values) feeds
//! [`field`] (control-to-path resolution) feeds [`controller`]. The
//! container/control contracts consumed by the binder live in [`control`].

pub mod control;
pub mod controller;
pub mod field;
pub mod path;

pub use control::{Container, ControlEvent, EventKind, FormControl, Validity};
pub use controller::{Attachment, BindError, FormBinder, FormOptions, SharedValue};
pub use field::FieldBinding;
pub use path::Path;
