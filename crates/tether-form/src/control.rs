#![forbid(unsafe_code)]

//! Contracts for form containers and the controls inside them.
//!
//! These traits are the consumed surface of the host framework's DOM-side
//! collaborators. A [`Container`] attaches one delegated listener per event
//! kind at its own boundary; descendant controls may be added, removed, or
//! replaced freely without the binder knowing which controls exist. A
//! [`FormControl`] exposes the identity, reported value, and native
//! constraint-validation state of the control a bubbled event originated
//! from, resolved at dispatch time.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tether_core::Subscription;

/// Event kinds a container delegates to an attached binder.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventKind {
    Change,
    Input,
    /// Loss of focus.
    Blur,
}

/// Native constraint-validation state reported by a control.
///
/// Only what the control natively reports; the binder performs no cross-field
/// or schema validation of its own.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Validity {
    Valid,
    /// Invalid, carrying the control's native validation message.
    Invalid(String),
}

impl Validity {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The validation message, if invalid.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

/// The control a delegated event originated from.
pub trait FormControl {
    /// The control's `name` attribute, if set.
    fn name(&self) -> Option<String>;

    /// The control's `id` attribute, if set.
    fn id(&self) -> Option<String>;

    /// The control's current reported value (a string for text-like
    /// controls).
    fn value(&self) -> Value;

    /// The control's native constraint-validation state.
    fn validity(&self) -> Validity;
}

/// An event bubbled from a descendant control to the container boundary.
#[derive(Clone)]
pub struct ControlEvent {
    kind: EventKind,
    origin: Rc<dyn FormControl>,
}

impl ControlEvent {
    #[must_use]
    pub fn new(kind: EventKind, origin: Rc<dyn FormControl>) -> Self {
        Self { kind, origin }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The originating control, resolved at dispatch time.
    #[must_use]
    pub fn origin(&self) -> &dyn FormControl {
        self.origin.as_ref()
    }
}

impl fmt::Debug for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlEvent")
            .field("kind", &self.kind)
            .field("name", &self.origin.name())
            .field("id", &self.origin.id())
            .finish()
    }
}

/// A form-like container supporting delegated event listeners.
pub trait Container {
    /// Attach a delegated listener for one event kind at the container
    /// boundary. Dropping the returned [`Subscription`] detaches it.
    fn add_listener(
        &self,
        kind: EventKind,
        handler: Rc<dyn Fn(&ControlEvent)>,
    ) -> Subscription;
}
