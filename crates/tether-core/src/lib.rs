#![forbid(unsafe_code)]

//! Host and controller contracts for Tether.
//!
//! A controller is a self-contained unit of state and behavior attached to
//! exactly one host component. This crate defines the slice of the host's
//! lifecycle/scheduling surface that controllers consume ([`Host`],
//! [`Controller`], [`HostRef`]) and the notification primitive used by
//! delegated event wiring ([`Notifier`], [`Subscription`]).

pub mod controller;
pub mod notify;

pub use controller::{Controller, Host, HostRef};
pub use notify::{Notifier, Subscription};
