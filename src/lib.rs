/// Blog Service Library
///
/// A server-rendered blogging application: posts with images, tags,
/// commentaries, like counters and a paginated listing over PostgreSQL.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers (forms, redirects, views)
/// - `models`: data structures for posts, tags, commentaries, paging
/// - `services`: business logic layer and transaction boundaries
/// - `db`: database access layer and repositories
/// - `views`: minijinja template environment
/// - `error`: error types and handling
/// - `config`: configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};
