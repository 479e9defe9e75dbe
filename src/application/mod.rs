//! Application layer orchestrating domain operations.
//!
//! - [`services`] - Business logic built on repository traits

pub mod services;
