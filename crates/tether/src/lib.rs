#![forbid(unsafe_code)]

//! Tether public facade and prelude.
//!
//! Re-exports the host/controller contracts (`tether-core`), the form
//! binding controller (`tether-form`), and the cached markup rendering
//! controller (`tether-markup`) under one roof.

pub use tether_core::{Controller, Host, HostRef, Notifier, Subscription};
pub use tether_form::{
    Attachment, BindError, Container, ControlEvent, EventKind, FieldBinding, FormBinder,
    FormControl, FormOptions, Path, SharedValue, Validity,
};
pub use tether_markup::{Fragment, MarkupOptions, MarkupRenderer, PropertyMirror, render_markup};

/// Convenience imports for downstream hosts.
pub mod prelude {
    pub use tether_core::{Controller, Host, HostRef};
    pub use tether_form::{FormBinder, FormOptions};
    pub use tether_markup::{MarkupOptions, MarkupRenderer};
}
