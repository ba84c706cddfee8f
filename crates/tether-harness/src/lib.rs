#![forbid(unsafe_code)]

//! Test host and reference fixtures for Tether.
//!
//! [`TestHost`] is a concrete [`Host`](tether_core::Host) that drives
//! controller update passes synchronously; [`TestContainer`] and
//! [`TestControl`] implement the container/control contracts the form binder
//! consumes. Library crates pull this in as a dev-dependency for their
//! integration suites.

pub mod container;
pub mod host;

pub use container::{TestContainer, TestControl};
pub use host::TestHost;
