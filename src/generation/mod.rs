//! Generation domain module - turns a specification document into client sources
//!
//! The schema resolver and path grouper build ordered descriptor lists; the
//! orchestrator renders them through compiled templates, concurrently but
//! without losing descriptor order.

pub mod config;
pub mod errors;
pub mod grouper;
pub mod orchestrator;
pub mod resolver;
pub mod sanitizers;
pub mod traits;
pub mod type_mapper;
pub mod types;
pub mod utils;

pub use config::*;
pub use errors::*;
pub use grouper::*;
pub use orchestrator::*;
pub use resolver::*;
pub use traits::*;
pub use type_mapper::*;
pub use types::*;
