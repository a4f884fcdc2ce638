//! File-based specification loader
//!
//! This loader handles only file I/O. The actual parsing is done by the OpenApiParser.

use async_trait::async_trait;
use tokio::fs;

use super::parser::OpenApiParser;
use crate::generation::{GenerationError, OpenApiLoader, SpecDocument};

/// Loads specifications from local files
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument, GenerationError> {
        let content = fs::read_to_string(source).await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read specification {source}: {e}"))
        })?;

        let spec_value = parse_content(&content, source)?;

        OpenApiParser::new(spec_value).parse()
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode JSON or YAML, picking the format from the source's extension when it has one
pub(crate) fn parse_content(
    content: &str,
    source: &str,
) -> Result<serde_json::Value, GenerationError> {
    if source.ends_with(".json") {
        serde_json::from_str(content).map_err(GenerationError::SerializationError)
    } else if source.ends_with(".yaml") || source.ends_with(".yml") {
        serde_yaml::from_str(content)
            .map_err(|e| GenerationError::LoadError(format!("Failed to parse YAML: {e}")))
    } else {
        // Try JSON first, then YAML
        serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| {
                GenerationError::LoadError(format!("Failed to parse specification: {e}"))
            })
    }
}
