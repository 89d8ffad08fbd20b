//! Spherical horses: a CRUD REST service over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, FieldError};
pub use migration::apply_migrations;
pub use routes::app;
pub use service::{HorseService, RequestValidator};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
