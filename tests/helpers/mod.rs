// ABOUTME: Test helper module exports
// ABOUTME: HTTP test harness shared by route integration tests

pub mod axum_test;
