//! Builders for the HTTP state backed by the in-memory registry.

use std::sync::Arc;

use actix_web::web;

use registry::domain::UsersService;
use registry::inbound::http::state::HttpState;
use registry::outbound::persistence::InMemoryUserRepository;

/// Build handler state over a fresh, empty registry.
///
/// One service instance is shared by every worker so all requests observe the
/// same store.
pub(super) fn build_http_state() -> web::Data<HttpState> {
    let repo = Arc::new(InMemoryUserRepository::new());
    let service = Arc::new(UsersService::new(repo));
    web::Data::new(HttpState::new(service.clone(), service))
}
