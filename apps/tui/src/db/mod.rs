pub mod migrations;
pub mod models;
pub mod queries;
pub use migrations::{create_database_pool, create_memory_pool, setup_database};
pub use queries::{get_preference, set_preference};
