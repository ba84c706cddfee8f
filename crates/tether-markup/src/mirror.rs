#![forbid(unsafe_code)]

//! Property mirroring: sampling a named host property as markup source.

use std::fmt;

use tracing::debug;

use tether_core::HostRef;

/// Samples a named host property on demand.
///
/// Only string property values are accepted; anything else (or a missing
/// property, or a dead host) samples as `None`, leaving the mirroring
/// controller's state untouched.
pub struct PropertyMirror {
    host: HostRef,
    property: String,
}

impl PropertyMirror {
    /// Create a mirror of `property` on the host behind `host`.
    #[must_use]
    pub fn new(host: HostRef, property: impl Into<String>) -> Self {
        Self {
            host,
            property: property.into(),
        }
    }

    /// The mirrored property name.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Sample the current value of the mirrored property.
    #[must_use]
    pub fn sample(&self) -> Option<String> {
        let value = self.host.read_property(&self.property)?;
        match value.as_str() {
            Some(text) => Some(text.to_owned()),
            None => {
                debug!(property = %self.property, "mirrored property is not a string; ignoring");
                None
            }
        }
    }
}

impl fmt::Debug for PropertyMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMirror")
            .field("property", &self.property)
            .finish()
    }
}
