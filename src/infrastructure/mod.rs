//! Infrastructure layer - concrete implementations of domain ports

pub mod openapi;
pub mod output;
pub mod templates;

pub use openapi::{CompositeOpenApiLoader, FileOpenApiLoader, HttpOpenApiLoader};
pub use output::*;
pub use templates::*;
