// Application layer - Use cases and repository contracts
pub mod chat_service;
pub mod degree_day_service;
pub mod log_repository;
