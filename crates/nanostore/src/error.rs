#![forbid(unsafe_code)]

//! Errors from strict form-editing operations.
//!
//! The permissive operations ([`FormStore::set_value`],
//! [`FormStore::handle_change`]) never fail. Their `try_` counterparts refuse
//! edits that would change the record's shape or that have nothing to apply.
//!
//! [`FormStore::set_value`]: crate::FormStore::set_value
//! [`FormStore::handle_change`]: crate::FormStore::handle_change

/// Errors from [`FormStore::try_set_value`](crate::FormStore::try_set_value)
/// and [`FormStore::try_handle_change`](crate::FormStore::try_handle_change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The field is not part of the record.
    UnknownField(String),
    /// The input event carried no current target.
    MissingTarget,
}

impl core::fmt::Display for FormError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown form field: {name}"),
            Self::MissingTarget => write!(f, "input event has no current target"),
        }
    }
}

impl std::error::Error for FormError {}
