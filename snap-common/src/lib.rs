//! Snap Compiler - Common Types and Utilities
//!
//! This crate contains the error type shared by every layer of the Snap
//! compiler backend for the Turtle16 processor.

pub mod error;

pub use error::CompilerError;
