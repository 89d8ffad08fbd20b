//! Horse entity, request payloads and list parameters.

mod horse;
mod list;
pub mod timestamp;

pub use horse::*;
pub use list::*;
