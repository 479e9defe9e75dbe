//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::SqliteMappingRepository;
use crate::utils::token_generator::TokenGenerator;

/// Link service wired to the production store.
///
/// The token source is a trait object so servers and tests can plug in
/// different generators without changing the handler types.
pub type AppLinkService = LinkService<SqliteMappingRepository, dyn TokenGenerator>;

/// State shared by all request handlers.
///
/// Built once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<AppLinkService>) -> Self {
        Self { link_service }
    }
}
