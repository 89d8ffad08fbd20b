//! Safe SQL builder: identifiers from constants and allow-lists only, values as parameters.

mod builder;
mod listing;
pub mod params;
pub use builder::*;
pub use listing::*;
pub use params::*;
