//! Utility functions shared across layers.
//!
//! - [`token_generator`] - Short token generation and validation

pub mod token_generator;
