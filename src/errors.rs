//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`Error`] covers the few failure modes the controllers have:
//! - Animation lookups that name an action or model instance that was never registered
//! - Controller options that fail to parse
//!
//! Ignorable input (unknown key identifiers, unnamed clips, missing callbacks) is
//! never surfaced as an error.
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for `std::result::Result<T, Error>`.
//!
//! ```rust,ignore
//! use pawn_control::errors::{Error, Result};
//!
//! fn play_wave(table: &mut ActionTable<MixerAction>) -> Result<()> {
//!     table.toggle("wave")
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// The requested action is not present in the action table.
    #[error("Action not found: {name}")]
    ActionNotFound {
        /// Lowercased clip name that was requested
        name: String,
    },

    /// No action table is registered under this model instance name.
    #[error("Model instance not found: {0}")]
    InstanceNotFound(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Controller options could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
