//! Shared utilities for stockdash
//!
//! This crate provides common functionality used across the stockdash workspace:
//! logging setup and environment-variable helpers for configuration loading.

pub mod config;
pub mod logging;

pub use config::{env_var, load_dotenv};
pub use logging::{init_tracing, init_tracing_with_default};
