//! Shared utilities for the SLMS client
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and application-level configuration.

pub mod config;
pub mod logging;

pub use config::{Config, FeatureFlags};
pub use logging::{init_tracing, init_tracing_json, init_tracing_with};
