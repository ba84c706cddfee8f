#![forbid(unsafe_code)]

//! The form binding controller.
//!
//! [`FormBinder`] owns a caller-supplied structured value and keeps it in
//! sync with the interactive controls of an attached container. Each
//! change/input/blur event bubbling from a descendant control is resolved to
//! a dotted path, the control's reported value is written through that path,
//! per-field validity is recorded, and a host re-render is requested.
//!
//! # Mutation policy
//!
//! - Default mode mutates the bound value in place: the [`SharedValue`]
//!   handle identity is invariant across edits, and callers holding the same
//!   handle observe edits as they land.
//! - Immutable mode deep-clones before each write and swaps in a fresh
//!   handle: prior snapshots are never touched and stay safe to read
//!   indefinitely.
//!
//! # Invariants
//!
//! 1. A control with neither `name` nor `id` never changes the value, the
//!    error map, or the host's update schedule.
//! 2. Validation never blocks a write: an invalid control's value still
//!    lands, so the host can render it alongside its message.
//! 3. Blur requests an update only when the error map actually changed.
//! 4. In immutable mode, every accepted edit yields a handle not `ptr_eq` to
//!    any prior one, structurally equal to its predecessor except at the
//!    edited path.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use tether_core::{Controller, Host, HostRef, Subscription};

use crate::control::{Container, ControlEvent, EventKind, FormControl, Validity};
use crate::field::FieldBinding;
use crate::path::{self, Path};

/// Shared handle to the bound value.
///
/// Handle identity (`Rc::ptr_eq`) is what the mutation policy is specified
/// against: invariant across edits in default mode, fresh per edit in
/// immutable mode.
pub type SharedValue = Rc<RefCell<Value>>;

/// Construction options for [`FormBinder`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FormOptions {
    /// Copy-on-write mode: every accepted edit produces a fresh top-level
    /// value instead of mutating in place.
    pub immutable: bool,
}

/// Error from the typed boundary of an otherwise untyped binder.
#[derive(Debug)]
pub enum BindError {
    /// The value does not match the requested type's shape.
    Shape(serde_json::Error),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(err) => write!(f, "bound value does not match requested shape: {err}"),
        }
    }
}

impl Error for BindError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for BindError {
    fn from(err: serde_json::Error) -> Self {
        Self::Shape(err)
    }
}

/// The form binding controller.
pub struct FormBinder {
    host: HostRef,
    immutable: bool,
    value: RefCell<SharedValue>,
    errors: RefCell<BTreeMap<String, String>>,
    container: RefCell<Option<Weak<dyn Container>>>,
}

impl FormBinder {
    /// Create a binder over `value` and register it with `host`.
    pub fn new<H: Host + 'static>(host: &Rc<H>, value: Value, options: FormOptions) -> Rc<Self> {
        Self::from_shared(host, Rc::new(RefCell::new(value)), options)
    }

    /// Bind the caller's exact handle.
    ///
    /// In default mode, edits land in place through this very handle; in
    /// immutable mode, the handle is the first of a series of snapshots.
    pub fn from_shared<H: Host + 'static>(
        host: &Rc<H>,
        value: SharedValue,
        options: FormOptions,
    ) -> Rc<Self> {
        let binder = Rc::new(Self {
            host: HostRef::new(host),
            immutable: options.immutable,
            value: RefCell::new(value),
            errors: RefCell::new(BTreeMap::new()),
            container: RefCell::new(None),
        });
        host.register_controller(binder.clone() as Rc<dyn Controller>);
        binder
    }

    /// Serialize a typed initial value at the generic boundary.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Shape`] when `value` does not serialize to JSON.
    pub fn with_value<H, T>(
        host: &Rc<H>,
        value: &T,
        options: FormOptions,
    ) -> Result<Rc<Self>, BindError>
    where
        H: Host + 'static,
        T: Serialize,
    {
        Ok(Self::new(host, serde_json::to_value(value)?, options))
    }

    /// The current handle to the bound value.
    #[must_use]
    pub fn value(&self) -> SharedValue {
        Rc::clone(&self.value.borrow())
    }

    /// A deep copy of the current bound value.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        self.value.borrow().borrow().clone()
    }

    /// Deserialize the bound value at the generic boundary.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Shape`] when the bound value does not
    /// deserialize into `T`.
    pub fn read_as<T: DeserializeOwned>(&self) -> Result<T, BindError> {
        Ok(serde_json::from_value(self.snapshot())?)
    }

    /// Current validation messages, keyed by dotted path. Empty when every
    /// bound control reports valid.
    #[must_use]
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.errors.borrow().clone()
    }

    /// Whether any bound control currently reports invalid.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.borrow().is_empty()
    }

    /// Whether copy-on-write mode is active.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Whether a container is currently attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.container
            .borrow()
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Attach delegated change/input/blur listeners to `container`.
    ///
    /// Exactly one listener per event kind is wired at the container
    /// boundary, never one per control. Dropping the returned [`Attachment`]
    /// detaches all three and clears the recorded container reference.
    pub fn attach<C: Container + 'static>(self: &Rc<Self>, container: &Rc<C>) -> Attachment {
        let weak: Weak<dyn Container> = Rc::downgrade(&(Rc::clone(container) as Rc<dyn Container>));
        *self.container.borrow_mut() = Some(weak);

        let on_change = {
            let binder = Rc::clone(self);
            container.add_listener(
                EventKind::Change,
                Rc::new(move |event: &ControlEvent| binder.on_change(event)),
            )
        };
        let on_input = {
            let binder = Rc::clone(self);
            container.add_listener(
                EventKind::Input,
                Rc::new(move |event: &ControlEvent| binder.on_input(event)),
            )
        };
        let on_blur = {
            let binder = Rc::clone(self);
            container.add_listener(
                EventKind::Blur,
                Rc::new(move |event: &ControlEvent| binder.on_blur(event)),
            )
        };

        Attachment {
            binder: Rc::downgrade(self),
            _listeners: [on_change, on_input, on_blur],
        }
    }

    /// Entry point for delegated change events.
    pub fn on_change(&self, event: &ControlEvent) {
        self.accept_edit(event);
    }

    /// Entry point for delegated input events.
    pub fn on_input(&self, event: &ControlEvent) {
        self.accept_edit(event);
    }

    /// Entry point for delegated blur events: refreshes validity only and
    /// requests an update only when the error set changed.
    pub fn on_blur(&self, event: &ControlEvent) {
        let Some(binding) = FieldBinding::resolve(event.origin()) else {
            trace!(kind = ?event.kind(), "ignoring event from unbound control");
            return;
        };
        if self.refresh_validity(&binding, event.origin()) {
            self.host.request_update();
        }
    }

    fn accept_edit(&self, event: &ControlEvent) {
        let Some(binding) = FieldBinding::resolve(event.origin()) else {
            trace!(kind = ?event.kind(), "ignoring event from unbound control");
            return;
        };
        let reported = event.origin().value();
        self.write(binding.path(), reported);
        self.refresh_validity(&binding, event.origin());
        trace!(
            path = %binding.path(),
            kind = ?event.kind(),
            immutable = self.immutable,
            "accepted edit"
        );
        self.host.request_update();
    }

    fn write(&self, at: &Path, new: Value) {
        if self.immutable {
            let next = {
                let current = self.value.borrow();
                let mut clone = current.borrow().clone();
                path::set(&mut clone, at, new);
                Rc::new(RefCell::new(clone))
            };
            *self.value.borrow_mut() = next;
        } else {
            let handle = self.value();
            let mut guard = handle.borrow_mut();
            path::set(&mut guard, at, new);
        }
    }

    /// Re-read the control's native validity into the error map; returns
    /// whether the map changed.
    fn refresh_validity(&self, binding: &FieldBinding, control: &dyn FormControl) -> bool {
        let key = binding.path().to_string();
        let mut errors = self.errors.borrow_mut();
        match control.validity() {
            Validity::Valid => errors.remove(&key).is_some(),
            Validity::Invalid(message) => {
                let previous = errors.insert(key, message.clone());
                previous.as_deref() != Some(message.as_str())
            }
        }
    }
}

impl Controller for FormBinder {}

impl fmt::Debug for FormBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormBinder")
            .field("immutable", &self.immutable)
            .field("errors", &self.errors.borrow().len())
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// RAII guard for an attached container.
///
/// Holds the three delegated listener subscriptions; dropping it detaches
/// them and clears the binder's container reference.
pub struct Attachment {
    binder: Weak<FormBinder>,
    _listeners: [Subscription; 3],
}

impl Drop for Attachment {
    fn drop(&mut self) {
        if let Some(binder) = self.binder.upgrade() {
            binder.container.borrow_mut().take();
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("binder_alive", &(self.binder.strong_count() > 0))
            .finish()
    }
}
