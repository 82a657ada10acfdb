// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and user creation helpers
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for fitlog integration tests.

use std::sync::{Arc, Once};

use fitlog::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    models::{User, UserRole},
    server::{Server, ServerResources},
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test resources over an in-memory database
pub async fn create_test_resources() -> Arc<ServerResources> {
    init_test_logging();
    let database = Database::new("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    let auth_manager = AuthManager::new(generate_jwt_secret().to_vec(), 24);
    Arc::new(ServerResources::new(
        database,
        auth_manager,
        ServerConfig::default(),
    ))
}

/// Build the full application router over test resources
pub fn test_router(resources: &Arc<ServerResources>) -> axum::Router {
    Server::new(resources.clone()).router()
}

/// Create a regular user directly in the database and mint a token
///
/// The stored hash is a placeholder; tests that exercise the login path
/// register through the API instead.
pub async fn create_test_user(
    resources: &Arc<ServerResources>,
    username: &str,
    email: &str,
) -> (Uuid, String) {
    let user = User::new(username.to_owned(), email.to_owned(), "test-hash".to_owned());
    resources
        .database
        .users()
        .create(&user)
        .await
        .expect("Failed to create test user");
    let token = resources
        .auth_manager
        .generate_token(&user)
        .expect("Failed to mint test token");
    (user.id, token)
}

/// Create an admin user directly in the database and mint a token
pub async fn create_admin_user(
    resources: &Arc<ServerResources>,
    username: &str,
    email: &str,
) -> (Uuid, String) {
    let mut user = User::new(username.to_owned(), email.to_owned(), "test-hash".to_owned());
    user.role = UserRole::Admin;
    resources
        .database
        .users()
        .create(&user)
        .await
        .expect("Failed to create admin user");
    resources
        .database
        .users()
        .set_role(user.id, UserRole::Admin)
        .await
        .expect("Failed to set admin role");
    let token = resources
        .auth_manager
        .generate_token(&user)
        .expect("Failed to mint admin token");
    (user.id, token)
}
