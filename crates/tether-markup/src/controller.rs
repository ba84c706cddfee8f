#![forbid(unsafe_code)]

//! The markup rendering controller.
//!
//! [`MarkupRenderer`] owns a current source string and a cached rendered
//! fragment. The setter is equality-gated: setting an equal string keeps the
//! previously produced `Rc<Fragment>` instance, so a host renderer can skip
//! diffing that subtree. With a mirrored property configured, every host
//! update pass re-samples the property through the same gate, so unrelated
//! host updates never invalidate the fragment.
//!
//! # Invariants
//!
//! 1. The rendered fragment is a pure function of the current source value.
//! 2. `set_value` with an equal string performs no recomputation, requests
//!    no update, and retains fragment identity.
//! 3. Before any value has been set, the value is unset and the fragment is
//!    empty.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use tether_core::{Controller, Host, HostRef};

use crate::convert::{Fragment, render_markup};
use crate::mirror::PropertyMirror;

/// Construction options for [`MarkupRenderer`].
#[derive(Clone, Debug, Default)]
pub struct MarkupOptions {
    /// Mirror this host property into the source value on every update
    /// pass. Without it, the source changes only through
    /// [`MarkupRenderer::set_value`].
    pub property: Option<String>,
}

struct MarkupState {
    value: Option<String>,
    rendered: Rc<Fragment>,
}

/// The markup rendering controller.
pub struct MarkupRenderer {
    host: HostRef,
    mirror: Option<PropertyMirror>,
    state: RefCell<MarkupState>,
}

impl MarkupRenderer {
    /// Create a renderer and register it with `host`.
    ///
    /// With [`MarkupOptions::property`] set, the property's current string
    /// value (if any) becomes the initial source; otherwise the value starts
    /// unset and [`rendered`](Self::rendered) is the empty fragment.
    pub fn new<H: Host + 'static>(host: &Rc<H>, options: MarkupOptions) -> Rc<Self> {
        let host_ref = HostRef::new(host);
        let mirror = options
            .property
            .map(|property| PropertyMirror::new(host_ref.clone(), property));

        let state = match mirror.as_ref().and_then(PropertyMirror::sample) {
            Some(source) => MarkupState {
                rendered: Rc::new(render_markup(&source)),
                value: Some(source),
            },
            None => MarkupState {
                value: None,
                rendered: Rc::new(Fragment::empty()),
            },
        };

        let renderer = Rc::new(Self {
            host: host_ref,
            mirror,
            state: RefCell::new(state),
        });
        host.register_controller(renderer.clone() as Rc<dyn Controller>);
        renderer
    }

    /// Set the source string.
    ///
    /// Equality-gated: a string equal to the current value is a no-op — no
    /// recomputation, no update request, and the cached fragment instance is
    /// retained. Otherwise the fragment is recomputed and a host re-render
    /// is requested; the render itself is batched, so callers observing
    /// rendered output must wait for the host's render completion.
    pub fn set_value(&self, next: impl Into<String>) {
        let next = next.into();
        if self.state.borrow().value.as_deref() == Some(next.as_str()) {
            trace!("markup source unchanged; keeping cached fragment");
            return;
        }

        let fragment = Rc::new(render_markup(&next));
        {
            let mut state = self.state.borrow_mut();
            state.value = Some(next);
            state.rendered = fragment;
        }
        trace!("markup source changed; fragment recomputed");
        self.host.request_update();
    }

    /// The current source string; `None` until first set.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.state.borrow().value.clone()
    }

    /// The cached rendered fragment. Identity is stable while the source is
    /// unchanged.
    #[must_use]
    pub fn rendered(&self) -> Rc<Fragment> {
        Rc::clone(&self.state.borrow().rendered)
    }

    /// The mirrored property name, if mirroring is configured.
    #[must_use]
    pub fn mirrored_property(&self) -> Option<&str> {
        self.mirror.as_ref().map(PropertyMirror::property)
    }
}

impl Controller for MarkupRenderer {
    fn host_updated(&self) {
        if let Some(source) = self.mirror.as_ref().and_then(PropertyMirror::sample) {
            self.set_value(source);
        }
    }
}

impl fmt::Debug for MarkupRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkupRenderer")
            .field("value", &self.state.borrow().value)
            .field("mirrored_property", &self.mirrored_property())
            .finish()
    }
}
