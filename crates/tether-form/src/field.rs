#![forbid(unsafe_code)]

//! Field identification: resolving a form control to its bound path.

use crate::control::FormControl;
use crate::path::Path;

/// Association between one form control and one dotted path, derived per
/// event.
///
/// Resolution priority: the control's non-empty `name` attribute, split on
/// `.`, wins; else its non-empty `id` attribute as a single verbatim
/// segment; else no binding and the event is ignored. A non-empty name that
/// fails to parse (empty segment between dots) is treated as a binding miss
/// rather than falling back to the id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldBinding {
    path: Path,
}

impl FieldBinding {
    /// Resolve a control to its bound path, if it has one.
    #[must_use]
    pub fn resolve(control: &dyn FormControl) -> Option<Self> {
        let path = match control.name() {
            Some(name) if !name.is_empty() => Path::dotted(&name)?,
            _ => Path::single(&control.id()?)?,
        };
        Some(Self { path })
    }

    /// The resolved path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the binding, yielding its path.
    #[must_use]
    pub fn into_path(self) -> Path {
        self.path
    }
}
