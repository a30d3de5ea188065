//! Configuration module for freight-gallery
//!
//! This module defines the application configuration and config file lookup.

pub mod app_config;
pub mod path_resolver;

pub use app_config::AppConfig;
