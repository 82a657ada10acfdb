// ABOUTME: Configuration module for deployment and runtime settings
// ABOUTME: Environment-driven configuration with typed sub-configs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Configuration management.

/// Environment-based server configuration
pub mod environment;
