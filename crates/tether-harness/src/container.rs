#![forbid(unsafe_code)]

//! Reference container and controls for form-binding tests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use tether_core::{Notifier, Subscription};
use tether_form::{Container, ControlEvent, EventKind, FormControl, Validity};

/// A form-like container dispatching delegated events to attached binders.
///
/// Holds one [`Notifier`] per event kind, mirroring a container node with a
/// single listener slot per kind rather than per-control listeners.
#[derive(Default)]
pub struct TestContainer {
    change: Notifier<ControlEvent>,
    input: Notifier<ControlEvent>,
    blur: Notifier<ControlEvent>,
}

impl TestContainer {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    fn notifier(&self, kind: EventKind) -> &Notifier<ControlEvent> {
        match kind {
            EventKind::Change => &self.change,
            EventKind::Input => &self.input,
            EventKind::Blur => &self.blur,
        }
    }

    /// Bubble an event of `kind` from `control` to the delegated listeners.
    pub fn emit(&self, kind: EventKind, control: &Rc<TestControl>) {
        let origin: Rc<dyn FormControl> = Rc::clone(control) as Rc<dyn FormControl>;
        self.notifier(kind).emit(&ControlEvent::new(kind, origin));
    }

    /// Number of live delegated listeners for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.notifier(kind).subscriber_count()
    }
}

impl Container for TestContainer {
    fn add_listener(
        &self,
        kind: EventKind,
        handler: Rc<dyn Fn(&ControlEvent)>,
    ) -> Subscription {
        self.notifier(kind)
            .subscribe(move |event: &ControlEvent| (*handler)(event))
    }
}

impl fmt::Debug for TestContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContainer")
            .field("change_listeners", &self.change.subscriber_count())
            .field("input_listeners", &self.input.subscriber_count())
            .field("blur_listeners", &self.blur.subscriber_count())
            .finish()
    }
}

/// A scripted form control: fixed identity, mutable reported value and
/// validity.
pub struct TestControl {
    name: Option<String>,
    id: Option<String>,
    value: RefCell<Value>,
    validity: RefCell<Validity>,
}

impl TestControl {
    /// A control bound through its `name` attribute.
    #[must_use]
    pub fn named(name: &str, value: impl Into<Value>) -> Rc<Self> {
        Self::with_attributes(Some(name), None, value)
    }

    /// A control bound through its `id` attribute only.
    #[must_use]
    pub fn identified(id: &str, value: impl Into<Value>) -> Rc<Self> {
        Self::with_attributes(None, Some(id), value)
    }

    /// A control with neither `name` nor `id`; inert for binding.
    #[must_use]
    pub fn anonymous(value: impl Into<Value>) -> Rc<Self> {
        Self::with_attributes(None, None, value)
    }

    /// A control with any combination of attributes.
    #[must_use]
    pub fn with_attributes(
        name: Option<&str>,
        id: Option<&str>,
        value: impl Into<Value>,
    ) -> Rc<Self> {
        Rc::new(Self {
            name: name.map(str::to_owned),
            id: id.map(str::to_owned),
            value: RefCell::new(value.into()),
            validity: RefCell::new(Validity::Valid),
        })
    }

    /// Change the reported value, as if the user edited the control.
    pub fn set_value(&self, value: impl Into<Value>) {
        *self.value.borrow_mut() = value.into();
    }

    /// Change the reported constraint-validation state.
    pub fn set_validity(&self, validity: Validity) {
        *self.validity.borrow_mut() = validity;
    }
}

impl FormControl for TestControl {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    fn validity(&self) -> Validity {
        self.validity.borrow().clone()
    }
}

impl fmt::Debug for TestControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestControl")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("value", &*self.value.borrow())
            .finish()
    }
}
