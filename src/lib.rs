// Degree-day aggregation engine plus the thin service glue around it
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
