//! Port interfaces for the generation domain

use async_trait::async_trait;

use crate::generation::{GenerationError, SpecDocument};

/// Maps primitive schema types onto target-language type names
pub trait TypeMapper: Send + Sync {
    /// Map a primitive `type`/`format` pair; unknown pairs are an error, never a guess
    fn map_primitive(&self, schema_type: &str, format: Option<&str>)
    -> Result<String, GenerationError>;

    /// Type used for anonymous inline objects
    fn free_form_object(&self) -> String;

    /// Type expression for a string-keyed map of `value`
    fn map_of(&self, value: &str) -> String;

    /// Type expression for an array of `element`
    fn array_of(&self, element: &str) -> String;

    /// Type expression satisfying every one of `members`
    fn intersection_of(&self, members: &[String]) -> String;
}

/// Loads specification documents
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load and parse a specification from a source (path or URL)
    async fn load(&self, source: &str) -> Result<SpecDocument, GenerationError>;
}
