//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// HTTP methods an operation can be declared under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// All methods in canonical order
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
        ]
    }

    /// Key used for this method inside a path item
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = crate::generation::GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "patch" => Ok(HttpMethod::Patch),
            "delete" => Ok(HttpMethod::Delete),
            "head" => Ok(HttpMethod::Head),
            "options" => Ok(HttpMethod::Options),
            _ => Err(crate::generation::GenerationError::invalid_document(format!(
                "Unknown HTTP method: {s}"
            ))),
        }
    }
}

/// Where an operation parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    FormData,
    Body,
}

impl FromStr for ParameterLocation {
    type Err = crate::generation::GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(ParameterLocation::Path),
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            "cookie" => Ok(ParameterLocation::Cookie),
            "formData" => Ok(ParameterLocation::FormData),
            "body" => Ok(ParameterLocation::Body),
            other => Err(crate::generation::GenerationError::invalid_document(format!(
                "Invalid parameter location: {other}"
            ))),
        }
    }
}

/// Resolved, renderable view of one schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Name as declared in the document
    pub name: String,
    /// TypeScript type name, also the file stem
    pub identifier: String,
    pub description: Option<String>,
    /// Models an interface extends, from `allOf` references
    pub extends: Vec<String>,
    /// Type expression for definitions that are not objects
    pub alias: Option<String>,
    pub properties: Vec<PropertyDescriptor>,
    /// Other models referenced by this one, in first-appearance order
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    /// Name as it must appear in a declaration (quoted when not an identifier)
    pub field_name: String,
    /// Element type when `is_array` is set
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
    pub is_array: bool,
    pub is_reference: bool,
    pub description: Option<String>,
}

/// Resolved, renderable view of all operations sharing a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub name: String,
    pub class_name: String,
    pub methods: Vec<MethodDescriptor>,
    /// Models used by any method, sorted
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub http_method: HttpMethod,
    pub path_template: String,
    pub operation_id: String,
    pub method_name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub parameters: Vec<ParameterDescriptor>,
    pub request_body_type: Option<String>,
    pub request_body_required: bool,
    /// Argument carrying the request body, distinct from every parameter
    pub body_variable_name: Option<String>,
    pub response_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,
    /// Identifier-safe variant of `name` for use as an argument
    pub variable_name: String,
    pub location: ParameterLocation,
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
}

/// One rendered output file, relative to its pipeline directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub content: String,
}

impl RenderedFile {
    pub fn new(relative_path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            relative_path: relative_path.into(),
            content,
        }
    }

    /// File name without extension, as listed in a barrel
    pub fn stem(&self) -> String {
        self.relative_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Output of one pipeline: its files in descriptor order plus the barrel
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub files: Vec<RenderedFile>,
    pub barrel: RenderedFile,
}

/// Output of a full generation run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub models: PipelineOutput,
    pub resources: PipelineOutput,
}

// Re-export specification types from infrastructure module
pub use crate::infrastructure::openapi::{
    OperationSpec, ParameterSpec, PathItem, SchemaNode, SpecDocument,
};
