pub mod classes;
pub mod commands;
pub mod shared_str;
pub mod types;

pub use classes::ClassToken;
pub use commands::DomCommand;
pub use shared_str::SharedStr;
pub use types::{Point, ScrollBehavior, StyleProperty, Target};
