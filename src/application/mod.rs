//! Application layer - use cases wiring the generator to its collaborators

pub mod config;
pub mod errors;
pub mod generate_client;
pub mod template_management;
pub mod traits;

pub use config::*;
pub use errors::*;
pub use generate_client::*;
pub use template_management::*;
pub use traits::*;
