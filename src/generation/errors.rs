//! Error types for the generation domain

use thiserror::Error;

/// Errors that can occur while turning a specification into client sources
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A primitive type/format pair has no mapping in the target language
    #[error("Unsupported type '{schema_type}'{}", format_suffix(.format))]
    UnsupportedType {
        schema_type: String,
        format: Option<String>,
    },

    /// A `$ref` names a definition that does not exist
    #[error("Unresolved reference '{name}' in '{referrer}'")]
    UnresolvedReference { name: String, referrer: String },

    /// A template failed to compile
    #[error("Template syntax error in '{template}': {message}")]
    TemplateSyntax { template: String, message: String },

    /// A compiled template failed while rendering a context
    #[error("Render error in '{template}': {message}")]
    Render { template: String, message: String },

    /// The document does not have the structure the generator expects
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("OpenAPI loading error: {0}")]
    LoadError(String),

    #[error("Render task failed: {0}")]
    TaskFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

fn format_suffix(format: &Option<String>) -> String {
    match format {
        Some(format) => format!(" with format '{format}'"),
        None => String::new(),
    }
}

impl GenerationError {
    pub fn unsupported_type(schema_type: &str, format: Option<&str>) -> Self {
        Self::UnsupportedType {
            schema_type: schema_type.to_string(),
            format: format.map(str::to_string),
        }
    }

    pub fn unresolved_reference(name: &str, referrer: &str) -> Self {
        Self::UnresolvedReference {
            name: name.to_string(),
            referrer: referrer.to_string(),
        }
    }

    pub fn template_syntax<S: Into<String>>(template: &str, message: S) -> Self {
        Self::TemplateSyntax {
            template: template.to_string(),
            message: message.into(),
        }
    }

    pub fn render<S: Into<String>>(template: &str, message: S) -> Self {
        Self::Render {
            template: template.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDocument(msg.into())
    }
}
