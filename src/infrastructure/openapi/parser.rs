//! Swagger 2.0 / OpenAPI 3 document parser
//!
//! Reduces a raw JSON document to a [`SpecDocument`]:
//! - `definitions` (or `components.schemas`) become [`SchemaNode`] trees
//! - `paths` become ordered [`PathItem`]s with merged parameters
//! - parameter, request body and response `$ref`s are followed
//! - schema `$ref`s are kept as named references and never inlined

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::str::FromStr;

use crate::generation::utils::to_camel_case;
use crate::generation::{GenerationError, HttpMethod, ParameterLocation};
use crate::infrastructure::openapi::{OperationSpec, ParameterSpec, PathItem, SchemaNode, SpecDocument};

/// Parser over the raw JSON value of a specification
pub struct OpenApiParser {
    /// The raw JSON value of the spec
    pub json: JsonValue,
}

impl OpenApiParser {
    /// Create a new parser from JSON content
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Parse the document into the generator's model
    pub fn parse(&self) -> Result<SpecDocument, GenerationError> {
        if !self.json.is_object() {
            return Err(GenerationError::invalid_document(
                "Specification root must be an object",
            ));
        }

        let definitions = self.parse_definitions()?;
        let paths = self.parse_paths()?;

        tracing::debug!(
            definitions = definitions.len(),
            paths = paths.len(),
            "Parsed specification document"
        );

        Ok(SpecDocument { definitions, paths })
    }

    fn parse_definitions(&self) -> Result<IndexMap<String, SchemaNode>, GenerationError> {
        let raw = self
            .json
            .get("definitions")
            .or_else(|| self.json.pointer("/components/schemas"));

        let Some(raw) = raw else {
            return Ok(IndexMap::new());
        };

        let definitions = raw.as_object().ok_or_else(|| {
            GenerationError::invalid_document("'definitions' must be an object")
        })?;

        definitions
            .iter()
            .map(|(name, schema)| Ok((name.clone(), self.parse_schema(schema)?)))
            .collect()
    }

    fn parse_paths(&self) -> Result<IndexMap<String, PathItem>, GenerationError> {
        let Some(raw) = self.json.get("paths") else {
            return Ok(IndexMap::new());
        };

        let paths = raw
            .as_object()
            .ok_or_else(|| GenerationError::invalid_document("'paths' must be an object"))?;

        paths
            .iter()
            .map(|(path, path_item)| Ok((path.clone(), self.parse_path_item(path, path_item)?)))
            .collect()
    }

    fn parse_path_item(
        &self,
        path: &str,
        path_item: &JsonValue,
    ) -> Result<PathItem, GenerationError> {
        let item = path_item.as_object().ok_or_else(|| {
            GenerationError::invalid_document(format!("Path item '{path}' must be an object"))
        })?;

        let mut operations = IndexMap::new();
        for (key, value) in item {
            // Non-verb keys (parameters, summary, servers, x-*) are not operations
            let Ok(method) = HttpMethod::from_str(key) else {
                continue;
            };
            let Some(method_item) = value.as_object() else {
                continue;
            };
            operations.insert(method, self.build_operation(path, method, item, method_item)?);
        }

        Ok(PathItem { operations })
    }

    /// Build an operation from its path, method and method item
    fn build_operation(
        &self,
        path: &str,
        method: HttpMethod,
        path_item: &JsonMap<String, JsonValue>,
        method_item: &JsonMap<String, JsonValue>,
    ) -> Result<OperationSpec, GenerationError> {
        let operation_id = method_item
            .get("operationId")
            .and_then(JsonValue::as_str)
            .map(String::from)
            .unwrap_or_else(|| {
                to_camel_case(&format!(
                    "{}_{}",
                    method,
                    path.trim_start_matches('/').replace('/', "_")
                ))
            });

        let tags = method_item
            .get("tags")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        // Path-level parameters first; an operation-level parameter with the
        // same name and location replaces its path-level counterpart in place
        let mut parameters: Vec<ParameterSpec> = Vec::new();
        let mut request_body = None;
        let mut request_body_required = false;
        let declared = self
            .raw_parameters(path_item, &operation_id)?
            .into_iter()
            .chain(self.raw_parameters(method_item, &operation_id)?);
        for raw in declared {
            let parameter = self.parse_parameter(raw, &operation_id)?;
            if parameter.location == ParameterLocation::Body {
                request_body_required = parameter.required;
                request_body = Some(parameter.schema);
                continue;
            }
            match parameters
                .iter_mut()
                .find(|p| p.name == parameter.name && p.location == parameter.location)
            {
                Some(existing) => *existing = parameter,
                None => parameters.push(parameter),
            }
        }

        if let Some(body) = method_item.get("requestBody") {
            let body = self.follow_ref(body, &operation_id)?;
            if let Some(schema) = body.get("content").and_then(|c| self.content_schema(c)) {
                request_body = Some(self.parse_schema(schema)?);
                request_body_required = body
                    .get("required")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false);
            }
        }

        let response = self.extract_response(method_item, &operation_id)?;

        Ok(OperationSpec {
            operation_id,
            tags,
            summary: string_field(method_item.get("summary")),
            description: string_field(method_item.get("description")),
            deprecated: method_item
                .get("deprecated")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            parameters,
            request_body,
            request_body_required,
            response,
        })
    }

    /// Parameter objects declared on an item, with `$ref`s followed
    fn raw_parameters<'a>(
        &'a self,
        item: &'a JsonMap<String, JsonValue>,
        operation_id: &str,
    ) -> Result<Vec<&'a JsonValue>, GenerationError> {
        let Some(params) = item.get("parameters").and_then(JsonValue::as_array) else {
            return Ok(Vec::new());
        };
        params
            .iter()
            .map(|param| self.follow_ref(param, operation_id))
            .collect()
    }

    /// Parse a single parameter
    fn parse_parameter(
        &self,
        param: &JsonValue,
        operation_id: &str,
    ) -> Result<ParameterSpec, GenerationError> {
        let name = param
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                GenerationError::invalid_document(format!(
                    "Parameter without a name in '{operation_id}'"
                ))
            })?
            .to_string();

        let location = param
            .get("in")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                GenerationError::invalid_document(format!(
                    "Parameter '{name}' in '{operation_id}' has no location"
                ))
            })
            .and_then(ParameterLocation::from_str)?;

        // Swagger 2 non-body parameters carry type/format/items inline
        let schema = match param.get("schema") {
            Some(schema) => self.parse_schema(schema)?,
            None => self.parse_schema(param)?,
        };

        Ok(ParameterSpec {
            name,
            location,
            required: param
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(location == ParameterLocation::Path),
            schema,
            description: string_field(param.get("description")),
        })
    }

    /// Schema of the first declared 2xx response that has one
    fn extract_response(
        &self,
        method_item: &JsonMap<String, JsonValue>,
        operation_id: &str,
    ) -> Result<Option<SchemaNode>, GenerationError> {
        let Some(responses) = method_item.get("responses").and_then(JsonValue::as_object) else {
            return Ok(None);
        };

        for (status, response) in responses {
            if !status.starts_with('2') {
                continue;
            }
            let response = self.follow_ref(response, operation_id)?;
            let schema = response.get("schema").or_else(|| {
                response
                    .get("content")
                    .and_then(|content| self.content_schema(content))
            });
            if let Some(schema) = schema {
                return Ok(Some(self.parse_schema(schema)?));
            }
        }

        Ok(None)
    }

    /// Pick the schema of a media-type map, preferring JSON
    fn content_schema<'a>(&self, content: &'a JsonValue) -> Option<&'a JsonValue> {
        let content = content.as_object()?;
        let media = content
            .get("application/json")
            .or_else(|| {
                content
                    .iter()
                    .find(|(media_type, _)| media_type.contains("json"))
                    .map(|(_, media)| media)
            })
            .or_else(|| content.values().next())?;
        media.get("schema")
    }

    /// Parse a schema object, keeping `$ref`s as named references
    fn parse_schema(&self, schema: &JsonValue) -> Result<SchemaNode, GenerationError> {
        let description = string_field(schema.get("description"));

        if let Some(ref_str) = schema.get("$ref").and_then(JsonValue::as_str) {
            return Ok(SchemaNode::Reference {
                name: ref_name(ref_str)?,
                description,
            });
        }

        if let Some(members) = schema.get("allOf") {
            let members = members.as_array().ok_or_else(|| {
                GenerationError::invalid_document("'allOf' must be an array")
            })?;
            let mut parsed = members
                .iter()
                .map(|member| self.parse_schema(member))
                .collect::<Result<Vec<_>, _>>()?;
            // Sibling properties act as one more inline member
            if schema.get("properties").is_some() {
                parsed.push(self.parse_object(schema, None)?);
            }
            return Ok(SchemaNode::AllOf {
                members: parsed,
                description,
            });
        }

        match schema_type(schema).as_deref() {
            Some("array") => {
                let items = schema.get("items").ok_or_else(|| {
                    GenerationError::invalid_document("Array schema without 'items'")
                })?;
                Ok(SchemaNode::Array {
                    items: Box::new(self.parse_schema(items)?),
                    description,
                })
            }
            Some("object") | None => self.parse_object(schema, description),
            Some(other) => Ok(SchemaNode::Primitive {
                schema_type: other.to_string(),
                format: string_field(schema.get("format")),
                description,
            }),
        }
    }

    fn parse_object(
        &self,
        schema: &JsonValue,
        description: Option<String>,
    ) -> Result<SchemaNode, GenerationError> {
        let mut properties = IndexMap::new();
        if let Some(props) = schema.get("properties").and_then(JsonValue::as_object) {
            for (key, value) in props {
                properties.insert(key.clone(), self.parse_schema(value)?);
            }
        }
        let required = schema
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        // `additionalProperties: true` carries no type information
        let additional_properties = match schema.get("additionalProperties") {
            Some(value) if value.is_object() => Some(Box::new(self.parse_schema(value)?)),
            _ => None,
        };
        Ok(SchemaNode::Object {
            properties,
            required,
            additional_properties,
            description,
        })
    }

    /// Follow a local `$ref` on a parameter, request body or response object
    fn follow_ref<'a>(
        &'a self,
        value: &'a JsonValue,
        referrer: &str,
    ) -> Result<&'a JsonValue, GenerationError> {
        let Some(ref_str) = value.get("$ref").and_then(JsonValue::as_str) else {
            return Ok(value);
        };
        let pointer = ref_str.strip_prefix('#').ok_or_else(|| {
            GenerationError::invalid_document(format!(
                "External references not supported: {ref_str}"
            ))
        })?;
        self.json
            .pointer(pointer)
            .ok_or_else(|| GenerationError::unresolved_reference(ref_str, referrer))
    }
}

/// Definition name targeted by a local schema reference
fn ref_name(ref_str: &str) -> Result<String, GenerationError> {
    if !ref_str.starts_with("#/") {
        return Err(GenerationError::invalid_document(format!(
            "External references not supported: {ref_str}"
        )));
    }
    ref_str
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .ok_or_else(|| GenerationError::invalid_document(format!("Empty reference: {ref_str}")))
}

/// Declared type; OpenAPI 3.1 type arrays resolve to their first non-null entry
fn schema_type(schema: &JsonValue) -> Option<String> {
    match schema.get("type")? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(types) => types
            .iter()
            .filter_map(JsonValue::as_str)
            .find(|t| *t != "null")
            .map(String::from),
        _ => None,
    }
}

fn string_field(value: Option<&JsonValue>) -> Option<String> {
    value.and_then(JsonValue::as_str).map(String::from)
}
