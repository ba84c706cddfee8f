#![forbid(unsafe_code)]

//! Host and controller contracts.
//!
//! A [`Controller`] is a self-contained unit of state and behavior attached
//! to exactly one host component. The [`Host`] trait is the slice of the
//! host's lifecycle/scheduling surface controllers consume: register at
//! construction, request batched re-renders, read named properties.
//!
//! Controllers hold a [`HostRef`] (a `Weak` back-reference) so the host owns
//! its controllers and never the other way around. A controller whose host
//! has been dropped degrades to a silent no-op: its own state still mutates,
//! but update requests go nowhere.
//!
//! # Invariants
//!
//! 1. The host owns its controllers; a controller never keeps its host alive.
//! 2. `request_update` only schedules; the actual render is batched and
//!    completes on the host's own terms. Render completion is host-specific
//!    and deliberately absent from this trait (the test harness drives update
//!    passes to quiescence synchronously).
//! 3. All controller logic is single-threaded; controllers are registered as
//!    `Rc<dyn Controller>` and called back on the host's thread.

use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

/// A self-contained unit of state and behavior attached to exactly one host.
pub trait Controller {
    /// Called by the host on every update pass, after state changes have
    /// been applied and before the host's own render.
    fn host_updated(&self) {}
}

/// The host-component contract controllers consume.
pub trait Host {
    /// Register a controller for lifecycle callbacks.
    fn register_controller(&self, controller: Rc<dyn Controller>);

    /// Schedule a batched re-render. May be called any number of times
    /// before a pass runs; the host coalesces requests.
    fn request_update(&self);

    /// Read a named host property, if present.
    fn read_property(&self, name: &str) -> Option<Value>;
}

/// Weak back-reference from a controller to its host.
///
/// Every operation is a silent no-op once the host is gone.
#[derive(Clone)]
pub struct HostRef {
    inner: Weak<dyn Host>,
}

impl HostRef {
    /// Create a back-reference to `host`.
    pub fn new<H: Host + 'static>(host: &Rc<H>) -> Self {
        let host: Rc<dyn Host> = Rc::clone(host) as Rc<dyn Host>;
        Self {
            inner: Rc::downgrade(&host),
        }
    }

    /// Upgrade to the host, if it is still alive.
    #[must_use]
    pub fn get(&self) -> Option<Rc<dyn Host>> {
        self.inner.upgrade()
    }

    /// Whether the host is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Request a batched re-render, if the host is still alive.
    pub fn request_update(&self) {
        if let Some(host) = self.inner.upgrade() {
            host.request_update();
        }
    }

    /// Read a host property, if the host is alive and has one.
    #[must_use]
    pub fn read_property(&self, name: &str) -> Option<Value> {
        self.inner.upgrade().and_then(|host| host.read_property(name))
    }
}

impl fmt::Debug for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}
