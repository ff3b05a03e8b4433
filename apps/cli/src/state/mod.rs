//! # Application State
//!
//! Startup configuration shared by the menu handlers.

pub mod config;

pub use config::AppConfig;
