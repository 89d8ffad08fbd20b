//! HorseService: CRUD over the safe SQL builder, plus request validation.

mod crud;
mod validation;
pub use crud::HorseService;
pub use validation::RequestValidator;
