//! Path grouping: operations to resource descriptors

use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::generation::{
    GenerationError, GroupingPolicy, HttpMethod, MethodDescriptor, OperationSpec,
    ParameterDescriptor, ResourceDescriptor, SchemaNode, SchemaResolver, SpecDocument, TypeMapper,
    sanitizers::sanitize_doc,
    utils::{sanitize_variable_name, to_camel_case, to_proper_case},
};

#[derive(Default)]
struct ResourceBucket {
    methods: Vec<MethodDescriptor>,
    imports: BTreeSet<String>,
}

/// Groups a document's operations into resources according to a policy
pub struct PathGrouper<'a> {
    document: &'a SpecDocument,
    resolver: SchemaResolver<'a>,
    policy: &'a GroupingPolicy,
}

impl<'a> PathGrouper<'a> {
    pub fn new(
        document: &'a SpecDocument,
        type_mapper: &'a dyn TypeMapper,
        policy: &'a GroupingPolicy,
    ) -> Self {
        Self {
            document,
            resolver: SchemaResolver::new(&document.definitions, type_mapper),
            policy,
        }
    }

    /// Produce resource descriptors in first-appearance order of their tags.
    ///
    /// Within a resource, methods follow path declaration order, then the
    /// policy's verb order inside each path.
    pub fn group(&self) -> Result<Vec<ResourceDescriptor>, GenerationError> {
        let verb_order = self.verb_order();
        let mut buckets: IndexMap<String, ResourceBucket> = IndexMap::new();

        for (path, item) in &self.document.paths {
            for method in item.operations.keys() {
                if !verb_order.contains(method) {
                    warn!(path = %path, method = %method, "Skipping operation: verb not in verb order");
                }
            }

            for method in &verb_order {
                let Some(operation) = item.operations.get(method) else {
                    continue;
                };
                let (descriptor, references) = self.build_method(path, *method, operation)?;

                for resource in self.policy.resources_for(&operation.tags) {
                    let bucket = buckets.entry(resource.to_string()).or_default();
                    if let Some(existing) = bucket
                        .methods
                        .iter()
                        .find(|m| m.method_name == descriptor.method_name)
                    {
                        return Err(GenerationError::invalid_document(format!(
                            "Operations '{}' and '{}' in resource '{resource}' both map to method '{}'",
                            existing.operation_id, descriptor.operation_id, descriptor.method_name
                        )));
                    }
                    bucket.methods.push(descriptor.clone());
                    bucket.imports.extend(references.iter().cloned());
                }
            }
        }

        let resources: Vec<ResourceDescriptor> = buckets
            .into_iter()
            .map(|(name, bucket)| ResourceDescriptor {
                class_name: format!("{}Resource", to_proper_case(&name)),
                name,
                methods: bucket.methods,
                imports: bucket.imports.into_iter().collect(),
            })
            .collect();

        debug!(resources = resources.len(), "Grouped operations");
        Ok(resources)
    }

    /// Policy verb order with repeats removed
    fn verb_order(&self) -> Vec<HttpMethod> {
        let mut order: Vec<HttpMethod> = Vec::with_capacity(self.policy.verb_order.len());
        for method in &self.policy.verb_order {
            if !order.contains(method) {
                order.push(*method);
            }
        }
        order
    }

    fn build_method(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &OperationSpec,
    ) -> Result<(MethodDescriptor, Vec<String>), GenerationError> {
        let referrer = operation.operation_id.as_str();
        let mut references: Vec<String> = Vec::new();

        let mut parameters = Vec::with_capacity(operation.parameters.len());
        for parameter in &operation.parameters {
            let resolved = self.resolver.resolve_type(&parameter.schema, referrer)?;
            references.extend(resolved.references);
            parameters.push(ParameterDescriptor {
                name: parameter.name.clone(),
                variable_name: sanitize_variable_name(&parameter.name),
                location: parameter.location,
                type_name: resolved.expression,
                required: parameter.required,
            });
        }

        let mut resolve_optional = |schema: Option<&SchemaNode>| -> Result<Option<String>, GenerationError> {
            match schema {
                Some(schema) => {
                    let resolved = self.resolver.resolve_type(schema, referrer)?;
                    references.extend(resolved.references);
                    Ok(Some(resolved.expression))
                }
                None => Ok(None),
            }
        };
        let request_body_type = resolve_optional(operation.request_body.as_ref())?;
        let response_type = resolve_optional(operation.response.as_ref())?;

        let body_variable_name = request_body_type.as_ref().map(|_| {
            let mut name = "body".to_string();
            while parameters.iter().any(|p| p.variable_name == name) {
                name.push('_');
            }
            name
        });

        let method_name = match to_camel_case(&operation.operation_id) {
            name if name.is_empty() => {
                return Err(GenerationError::invalid_document(format!(
                    "Operation '{}' does not yield a method name",
                    operation.operation_id
                )));
            }
            name if name.starts_with(|c: char| c.is_ascii_digit()) => format!("_{name}"),
            name => name,
        };

        let descriptor = MethodDescriptor {
            http_method: method,
            path_template: path.to_string(),
            operation_id: operation.operation_id.clone(),
            method_name,
            summary: operation.summary.as_deref().map(sanitize_doc),
            description: operation.description.as_deref().map(sanitize_doc),
            deprecated: operation.deprecated,
            parameters,
            request_body_type,
            request_body_required: operation.request_body_required,
            body_variable_name,
            response_type,
        };
        Ok((descriptor, references))
    }
}
