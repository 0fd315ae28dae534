//! Common test utilities and helpers
//!
//! This module provides shared utilities for all integration tests:
//! - An in-memory test application driven with `tower::ServiceExt::oneshot`
//! - Authentication helpers for registering and signing in test users
//! - Custom assertion macros

#![allow(dead_code)]

pub mod app;
#[macro_use]
pub mod assertions;
pub mod auth_helpers;

// Re-export commonly used utilities
pub use app::*;
pub use auth_helpers::*;
