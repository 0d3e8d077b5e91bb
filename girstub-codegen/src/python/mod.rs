//! Python stub generation modules.

pub mod classes;
pub mod enums;
pub mod functions;
pub mod types;

pub use classes::ClassGenerator;
pub use enums::EnumGenerator;
pub use functions::{FunctionGenerator, render_method};
pub use types::{map_scalar, map_type, sanitize};
