//! Crate error type.
//!
//! Only programmer and setup mistakes surface as [`GameError`]. Gameplay
//! outcomes such as a destroyed ship are ordinary state transitions.

use thiserror::Error;

/// Errors reported by the game core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A single-instance object was initialized a second time.
    #[error("{0} already initialized")]
    AlreadyInitialized(&'static str),

    /// A single-instance object was read before it was initialized.
    #[error("{0} read before it was initialized")]
    NotInitialized(&'static str),

    /// Configuration could not be loaded, parsed or saved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A state hook was looked up but never registered.
    #[error("System `{0}` not found in SystemsStore")]
    MissingSystem(String),

    /// A registered system failed to run.
    #[error("System `{name}` failed: {reason}")]
    SystemFailed { name: String, reason: String },
}
