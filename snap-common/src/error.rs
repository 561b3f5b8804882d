//! Error handling for the Snap compiler
//!
//! This module defines the error type reported by the backend stages that
//! can fail: label table construction and the register allocation driver.

use thiserror::Error;

/// Main compiler error type shared by all backend stages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompilerError {
    #[error("label redefines existing symbol: `{name}'")]
    DuplicateLabel { name: String },

    #[error("Register allocation failed: {message}")]
    RegisterAllocation { message: String },
}

impl CompilerError {
    /// Create a duplicate label error
    pub fn duplicate_label(name: &str) -> Self {
        CompilerError::DuplicateLabel {
            name: name.to_string(),
        }
    }

    /// Create a register allocation error
    pub fn register_allocation(message: impl Into<String>) -> Self {
        CompilerError::RegisterAllocation {
            message: message.into(),
        }
    }
}
