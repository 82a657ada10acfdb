// ABOUTME: Server resources and router assembly
// ABOUTME: Shared state container plus the merged axum router and run loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Server assembly.
//!
//! [`ServerResources`] is the single shared-state container handed to every
//! route module behind an `Arc`; [`Server`] merges the per-resource routers,
//! applies the trace and CORS layers, and runs the listener.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::middleware::{cors_layer, AuthMiddleware};
use crate::routes::{
    AdminRoutes, AnalyticsRoutes, AuthRoutes, GoalRoutes, HealthRoutes, HealthTipRoutes,
    SuggestionRoutes, WorkoutRoutes,
};

/// Shared state for all route handlers
pub struct ServerResources {
    /// Database connection and managers
    pub database: Arc<Database>,
    /// JWT authentication manager
    pub auth_manager: AuthManager,
    /// Request authentication middleware
    pub auth_middleware: AuthMiddleware,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Create server resources from the core components
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        let database = Arc::new(database);
        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), database.clone());
        Self {
            database,
            auth_manager,
            auth_middleware,
            config,
        }
    }
}

/// The HTTP server
pub struct Server {
    resources: Arc<ServerResources>,
}

impl Server {
    /// Create a new server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes())
            .merge(AuthRoutes::routes(self.resources.clone()))
            .merge(WorkoutRoutes::routes(self.resources.clone()))
            .merge(GoalRoutes::routes(self.resources.clone()))
            .merge(AnalyticsRoutes::routes(self.resources.clone()))
            .merge(HealthTipRoutes::routes(self.resources.clone()))
            .merge(SuggestionRoutes::routes(self.resources.clone()))
            .merge(AdminRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&self.resources.config.security))
    }

    /// Bind the listener and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails.
    pub async fn run(self, port: u16) -> Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
