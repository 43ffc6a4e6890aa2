/// Database configuration, connection management, and schema setup
pub mod database;

/// Report settings loading from mill_recap.toml
pub mod settings;
