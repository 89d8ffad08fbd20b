//! Request extractors.

mod payload;
pub use payload::{ValidJson, ValidQuery};
