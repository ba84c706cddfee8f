#![forbid(unsafe_code)]

//! Reference host for exercising controllers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ahash::AHashMap;
use serde_json::Value;
use tracing::trace;

use tether_core::{Controller, Host};

/// Update passes [`TestHost::await_update`] runs before declaring livelock.
const MAX_UPDATE_PASSES: u32 = 64;

/// A concrete [`Host`] that drives controller update passes synchronously.
///
/// State changes request a batched update; [`await_update`](Self::await_update)
/// stands in for the host framework's render-completion promise by running
/// passes until no controller requests another one.
#[derive(Default)]
pub struct TestHost {
    controllers: RefCell<Vec<Rc<dyn Controller>>>,
    properties: RefCell<AHashMap<String, Value>>,
    pending: Cell<bool>,
    passes: Cell<u32>,
}

impl TestHost {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Set a host property and notify: the mutation schedules an update
    /// pass, the way a host component's property system would.
    pub fn set_property(&self, name: impl Into<String>, value: Value) {
        self.properties.borrow_mut().insert(name.into(), value);
        self.request_update();
    }

    /// Run update passes until no further update is pending, invoking every
    /// registered controller's `host_updated` on each pass.
    ///
    /// Returns the number of passes run (zero when nothing was pending).
    ///
    /// # Panics
    ///
    /// Panics after [`MAX_UPDATE_PASSES`] passes: a controller re-requesting
    /// an update on every pass is a livelock bug the test should surface.
    pub fn await_update(&self) -> u32 {
        let mut ran = 0u32;
        while self.pending.replace(false) {
            ran += 1;
            assert!(
                ran <= MAX_UPDATE_PASSES,
                "controllers never settled: {ran} update passes without quiescence"
            );
            let controllers = self.controllers.borrow().clone();
            for controller in &controllers {
                controller.host_updated();
            }
            self.passes.set(self.passes.get() + 1);
            trace!(pass = self.passes.get(), "update pass complete");
        }
        ran
    }

    /// Completed update passes over the host's lifetime.
    #[must_use]
    pub fn update_count(&self) -> u32 {
        self.passes.get()
    }

    /// Whether an update is currently scheduled.
    #[must_use]
    pub fn has_pending_update(&self) -> bool {
        self.pending.get()
    }

    /// Number of registered controllers.
    #[must_use]
    pub fn controller_count(&self) -> usize {
        self.controllers.borrow().len()
    }
}

impl Host for TestHost {
    fn register_controller(&self, controller: Rc<dyn Controller>) {
        self.controllers.borrow_mut().push(controller);
    }

    fn request_update(&self) {
        self.pending.set(true);
    }

    fn read_property(&self, name: &str) -> Option<Value> {
        self.properties.borrow().get(name).cloned()
    }
}
