//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from the user registry ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use registry::domain::UsersService;
    /// use registry::inbound::http::state::HttpState;
    /// use registry::outbound::persistence::InMemoryUserRepository;
    ///
    /// let service = Arc::new(UsersService::new(Arc::new(InMemoryUserRepository::new())));
    /// let state = HttpState::new(service.clone(), service);
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self { users, users_query }
    }
}
