pub mod error;
pub mod loader;
pub mod models;
pub mod update;
pub mod validation;


pub use error::RecordError;
pub use loader::*;
pub use models::*;
pub use update::*;
pub use validation::*;
