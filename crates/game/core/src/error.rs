//! Common error infrastructure for armies-core.
//!
//! This module provides the shared classification used by every error type in
//! the crate. Domain errors (`CommandError`, `StateError`) are defined next to
//! the code that raises them.
//!
//! Rule violations are values, never panics: a rejected command reports a
//! [`crate::CommandError`] whose `Display` text is meant for players. Broken
//! internal invariants (out-of-bounds cells, missing items) are bugs and panic.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (not enough resources yet)
/// - **Validation**: the request is illegal as stated
/// - **Internal**: state inconsistency that points at a bug
/// - **Fatal**: state is corrupted and should not be used further
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: not enough gold, no move points left this turn.
    Recoverable,

    /// Examples: cell outside the world, not the owner, illegal placement.
    Validation,

    /// Examples: city item missing behind a city cell.
    Internal,

    /// Examples: restored state references items that do not exist.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all armies-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the `Display`/`Error` impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are SCREAMING_SNAKE_CASE and stable across releases
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
