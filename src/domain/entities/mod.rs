//! Core domain entities.
//!
//! A [`Mapping`] is the only persisted entity: it pairs a short token with the
//! long URL it resolves to. Mappings are immutable once written.

pub mod mapping;

pub use mapping::Mapping;
