mod errors;
mod interpreter;
mod object;

pub use errors::{RuntimeError, RuntimeErrorKind, RuntimeResult};
pub use interpreter::Interpreter;
pub use object::Value;
