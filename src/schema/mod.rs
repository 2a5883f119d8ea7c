pub mod registry;
pub mod validator;

pub use registry::{Category, FieldDef, FieldKind, SchemaRegistry};
pub use validator::SchemaValidator;
