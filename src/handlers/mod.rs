//! HTTP handlers for horse CRUD.

pub mod horses;
pub use horses::*;
