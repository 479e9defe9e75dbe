//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//!
//! - [`entities`] - Core data structures ([`entities::Mapping`])
//! - [`repositories`] - Data access trait definitions implemented in
//!   [`crate::infrastructure::persistence`]

pub mod entities;
pub mod repositories;
