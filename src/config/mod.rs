/// Database configuration and connection management
pub mod database;

/// Seed-data configuration loading from config.toml
pub mod defaults;
