#![forbid(unsafe_code)]

//! Input-change events consumed by form editors.
//!
//! [`InputChangeEvent`] models the change notification a form control raises
//! when its value is edited. The only part an editor reads is the *current
//! target*: the control the handler is bound to, identified by its `name` and
//! carrying its current `value`.
//!
//! # Design
//!
//! ## Invariants
//! 1. Events are read-only to consumers; nothing in nanostore writes back to
//!    a target.
//! 2. A target's `value` is always the control's full string value, never a
//!    delta.
//!
//! ## Failure Modes
//! - Events dispatched after the control was detached carry no current
//!   target. Consumers treat this as "nothing to apply", not as an error.

// ---------------------------------------------------------------------------
// ControlKind
// ---------------------------------------------------------------------------

/// The kind of form control that raised a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlKind {
    /// Single-line text, number, checkbox value, etc.
    #[default]
    Input,
    /// Drop-down selection; `value` is the selected option's value.
    Select,
    /// Multi-line text.
    TextArea,
}

// ---------------------------------------------------------------------------
// InputTarget
// ---------------------------------------------------------------------------

/// The control an input-change event is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InputTarget {
    /// The control's `name` attribute; used as the record field key.
    pub name: String,
    /// The control's current value.
    pub value: String,
    /// Which control raised the change. Informational; editors key only on
    /// `name` and `value`.
    pub kind: ControlKind,
}

impl InputTarget {
    /// Create a target for a plain input control.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: ControlKind::Input,
        }
    }

    /// Set the control kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ControlKind) -> Self {
        self.kind = kind;
        self
    }
}

// ---------------------------------------------------------------------------
// InputChangeEvent
// ---------------------------------------------------------------------------

/// A change notification from a form control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InputChangeEvent {
    /// The control the event is bound to, if still attached.
    pub current_target: Option<InputTarget>,
}

impl InputChangeEvent {
    /// Create an event from an input control with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_target(InputTarget::new(name, value))
    }

    /// Create an event carrying the given target.
    #[must_use]
    pub fn from_target(target: InputTarget) -> Self {
        Self {
            current_target: Some(target),
        }
    }

    /// Create an event with no current target.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            current_target: None,
        }
    }

    /// The current target, if any.
    #[must_use]
    pub fn current_target(&self) -> Option<&InputTarget> {
        self.current_target.as_ref()
    }
}

impl From<InputTarget> for InputChangeEvent {
    fn from(target: InputTarget) -> Self {
        Self::from_target(target)
    }
}
