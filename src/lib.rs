//! # tinylink
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::entities::Mapping`] entity and repository traits
//! - **Application Layer** ([`application`]) - Shortening with bounded collision retry
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool and repository
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//!
//! ## Flow
//!
//! `POST /s` draws a random 8-character token, stores `token -> long_url`
//! and returns `BASE_URL/token`. `GET /{token}` answers with a `302 Found`
//! redirect to the stored URL, or `404` if the token is unknown.
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://urls.db"
//! export BASE_URL="http://localhost:8080"
//! cargo run
//!
//! curl -X POST http://localhost:8080/s \
//!      -H "Content-Type: application/json" \
//!      -d '{"long_url": "https://example.com/page"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::Mapping;
    pub use crate::domain::repositories::MappingRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::token_generator::{OsTokenGenerator, TokenGenerator};
}
