// ABOUTME: Server binary: configuration, logging, database, and HTTP listener startup
// ABOUTME: Loads environment config and serves the fitlog REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! # Fitlog API Server Binary

use anyhow::Result;
use clap::Parser;
use fitlog::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    errors, logging,
    server::{Server, ServerResources},
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fitlog-server")]
#[command(about = "Fitlog - fitness tracking REST API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;
    errors::set_debug_errors(config.security.debug_errors);

    info!("Starting Fitlog API");
    info!("{}", config.summary());

    let connection_string = config.database.url.to_connection_string();
    if !config.database.url.is_memory() {
        let db_path = connection_string
            .strip_prefix("sqlite:")
            .unwrap_or(&connection_string);
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let database = Database::new(&connection_string).await?;
    info!("Database initialized: {}", config.database.url);

    let jwt_secret = match &config.auth.jwt_secret {
        Some(secret) => secret.clone().into_bytes(),
        None => {
            warn!("FITLOG_JWT_SECRET not set; generating an ephemeral secret (tokens will not survive restarts)");
            generate_jwt_secret().to_vec()
        }
    };

    let auth_manager = AuthManager::new(jwt_secret, config.auth.jwt_expiry_hours);
    info!("Authentication manager initialized");

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, auth_manager, config));
    let server = Server::new(resources);

    display_available_endpoints(http_port);
    info!("Ready to serve");

    server.run(http_port).await
}

/// Display the API surface at startup
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    info!("Authentication:");
    info!("   Register:          POST http://{host}:{port}/api/auth/register");
    info!("   Login:             POST http://{host}:{port}/api/auth/login");
    info!("   Profile:           GET/PUT http://{host}:{port}/api/auth/profile");
    info!("Workouts:");
    info!("   Collection:        GET/POST http://{host}:{port}/api/workouts");
    info!("   Item:              GET/PUT/DELETE http://{host}:{port}/api/workouts/{{id}}");
    info!("   Stats:             GET http://{host}:{port}/api/workouts/stats");
    info!("Goals:");
    info!("   Collection:        GET/POST http://{host}:{port}/api/goals");
    info!("   Item:              GET/PUT/DELETE http://{host}:{port}/api/goals/{{id}}");
    info!("   Progress:          PATCH http://{host}:{port}/api/goals/{{id}}/progress");
    info!("   Stats:             GET http://{host}:{port}/api/goals/stats");
    info!("Analytics:");
    info!("   Generate:          POST http://{host}:{port}/api/analytics/generate");
    info!("   Latest:            GET http://{host}:{port}/api/analytics");
    info!("   Summary:           GET http://{host}:{port}/api/analytics/summary");
    info!("   Admin:             GET http://{host}:{port}/api/analytics/admin");
    info!("Content:");
    info!("   Health tips:       http://{host}:{port}/api/health-tips[/active|/all|/{{id}}]");
    info!("   Suggestions:       http://{host}:{port}/api/workout-suggestions[/active|/all|/{{id}}]");
    info!("Admin:");
    info!("   Users:             GET http://{host}:{port}/api/admin/users");
    info!("   User:              PUT/DELETE http://{host}:{port}/api/admin/users/{{id}}");
    info!("   System analytics:  GET http://{host}:{port}/api/admin/analytics");
    info!("Monitoring:");
    info!("   Health:            GET http://{host}:{port}/health");
    info!("   Readiness:         GET http://{host}:{port}/ready");
    info!("=== End of Endpoint List ===");
}
