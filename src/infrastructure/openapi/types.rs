//! Specification document model consumed by the generation pipelines

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::generation::{GenerationError, HttpMethod, ParameterLocation};

/// A parsed Swagger 2.0 / OpenAPI 3 document, reduced to what the generator needs.
///
/// Map order is declaration order in the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    pub definitions: IndexMap<String, SchemaNode>,
    pub paths: IndexMap<String, PathItem>,
}

impl SpecDocument {
    /// Parse a document from an already decoded JSON value
    pub fn from_value(json: serde_json::Value) -> Result<Self, GenerationError> {
        super::parser::OpenApiParser::new(json).parse()
    }
}

/// Recursive schema structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaNode {
    Primitive {
        #[serde(rename = "type")]
        schema_type: String,
        format: Option<String>,
        description: Option<String>,
    },
    Object {
        properties: IndexMap<String, SchemaNode>,
        required: Vec<String>,
        /// Value schema of `additionalProperties`, when given as a schema
        additional_properties: Option<Box<SchemaNode>>,
        description: Option<String>,
    },
    Array {
        items: Box<SchemaNode>,
        description: Option<String>,
    },
    Reference {
        name: String,
        description: Option<String>,
    },
    /// `allOf` composition, members in declaration order
    AllOf {
        members: Vec<SchemaNode>,
        description: Option<String>,
    },
}

impl SchemaNode {
    pub fn primitive(schema_type: &str, format: Option<&str>) -> Self {
        SchemaNode::Primitive {
            schema_type: schema_type.to_string(),
            format: format.map(str::to_string),
            description: None,
        }
    }

    pub fn reference(name: &str) -> Self {
        SchemaNode::Reference {
            name: name.to_string(),
            description: None,
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Box::new(items),
            description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaNode::Primitive { description, .. }
            | SchemaNode::Object { description, .. }
            | SchemaNode::Array { description, .. }
            | SchemaNode::Reference { description, .. }
            | SchemaNode::AllOf { description, .. } => description.as_deref(),
        }
    }
}

/// Operations declared under one path template, keyed by verb in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    pub operations: IndexMap<HttpMethod, OperationSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSpec {
    pub operation_id: String,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    /// Path-level and operation-level parameters, body parameters excluded
    pub parameters: Vec<ParameterSpec>,
    pub request_body: Option<SchemaNode>,
    pub request_body_required: bool,
    /// Schema of the first successful response that declares one
    pub response: Option<SchemaNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: SchemaNode,
    pub description: Option<String>,
}
