pub mod commands;
pub mod handlers;
pub mod queries;

pub use commands::*;
pub use handlers::*;
pub use queries::*;
