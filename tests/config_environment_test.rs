// ABOUTME: Integration tests for environment-driven configuration loading
// ABOUTME: Serialized because they mutate process-global environment variables
#![allow(clippy::unwrap_used, clippy::expect_used)]

use fitlog::config::environment::{DatabaseUrl, Environment, ServerConfig};
use serial_test::serial;

fn clear_fitlog_env() {
    for name in [
        "HTTP_PORT",
        "LOG_LEVEL",
        "ENVIRONMENT",
        "DATABASE_URL",
        "FITLOG_JWT_SECRET",
        "JWT_EXPIRY_HOURS",
        "CORS_ORIGINS",
        "FITLOG_DEBUG_ERRORS",
    ] {
        std::env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_fitlog_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.environment, Environment::Development);
    assert!(config.auth.jwt_secret.is_none());
    assert_eq!(config.auth.jwt_expiry_hours, 24);
    assert!(config.security.cors_origins.is_empty());
    assert!(!config.security.debug_errors);
}

#[test]
#[serial]
fn test_values_read_from_environment() {
    clear_fitlog_env();
    std::env::set_var("HTTP_PORT", "9999");
    std::env::set_var("ENVIRONMENT", "production");
    std::env::set_var("DATABASE_URL", "sqlite::memory:");
    std::env::set_var("FITLOG_JWT_SECRET", "super-secret");
    std::env::set_var("JWT_EXPIRY_HOURS", "2");
    std::env::set_var("CORS_ORIGINS", "https://a.example, https://b.example");
    std::env::set_var("FITLOG_DEBUG_ERRORS", "true");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 9999);
    assert!(config.environment.is_production());
    assert!(config.database.url.is_memory());
    assert_eq!(config.auth.jwt_secret.as_deref(), Some("super-secret"));
    assert_eq!(config.auth.jwt_expiry_hours, 2);
    assert_eq!(
        config.security.cors_origins,
        vec!["https://a.example", "https://b.example"]
    );
    assert!(config.security.debug_errors);

    clear_fitlog_env();
}

#[test]
#[serial]
fn test_invalid_port_is_an_error() {
    clear_fitlog_env();
    std::env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());
    clear_fitlog_env();
}

#[test]
fn test_database_url_parsing() {
    let url = DatabaseUrl::parse_url("sqlite:./data/app.db");
    assert!(!url.is_memory());
    assert_eq!(url.to_connection_string(), "sqlite:./data/app.db");

    // Bare paths fall back to SQLite files.
    let url = DatabaseUrl::parse_url("./data/app.db");
    assert_eq!(url.to_connection_string(), "sqlite:./data/app.db");
}
