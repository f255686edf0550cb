//! Errors raised by the styling runtime

use app_ui::tokens::BreakpointConfigError;
use thiserror::Error;

/// Styling runtime errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    /// A theme key that was never registered
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Malformed breakpoint table (fatal at startup)
    #[error("Invalid breakpoint configuration: {0}")]
    InvalidBreakpointConfig(#[from] BreakpointConfigError),

    /// The runtime was configured without any theme
    #[error("At least one theme must be registered")]
    NoThemes,

    /// Two themes share a key
    #[error("Duplicate theme: {0}")]
    DuplicateTheme(String),

    /// A breakpoint name that is not in the table
    #[error("Unknown breakpoint: {0}")]
    UnknownBreakpoint(String),

    /// The global runtime has not been initialized
    #[error("Style runtime is not initialized")]
    NotInitialized,

    /// The global runtime was initialized twice without a reset
    #[error("Style runtime is already initialized")]
    AlreadyInitialized,
}

/// Result type for styling runtime operations
pub type Result<T> = std::result::Result<T, StyleError>;
