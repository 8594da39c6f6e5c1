// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod flat_file_repository;
