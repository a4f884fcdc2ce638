//! Schema resolution: definitions to flat model descriptors
//!
//! References are resolved by name lookup only. A property that points at
//! another definition is emitted as a named reference and never inlined, so
//! self-referential and mutually-referential schemas need no cycle tracking.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

use crate::generation::{
    GenerationError, ModelDescriptor, PropertyDescriptor, SchemaNode, TypeMapper,
    sanitizers::sanitize_doc,
    utils::{property_key, to_type_identifier},
};

/// A schema reduced to the type information templates need
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    /// Element type when `is_array` is set, otherwise the full type
    pub type_name: String,
    pub is_array: bool,
    /// The (element) type names another definition
    pub is_reference: bool,
    /// Complete type expression, e.g. `Pet[]`
    pub expression: String,
    /// Definitions named anywhere in the type, in first-appearance order
    pub references: Vec<String>,
}

impl ResolvedType {
    fn scalar(type_name: String) -> Self {
        Self {
            expression: type_name.clone(),
            type_name,
            is_array: false,
            is_reference: false,
            references: Vec::new(),
        }
    }

    fn with_references(mut self, references: Vec<String>) -> Self {
        self.references = references;
        self
    }
}

fn push_unique(target: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

/// Walks schema definitions and produces one model descriptor per definition
pub struct SchemaResolver<'a> {
    definitions: &'a IndexMap<String, SchemaNode>,
    type_mapper: &'a dyn TypeMapper,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(
        definitions: &'a IndexMap<String, SchemaNode>,
        type_mapper: &'a dyn TypeMapper,
    ) -> Self {
        Self {
            definitions,
            type_mapper,
        }
    }

    /// Resolve every definition, in declaration order.
    ///
    /// Fails with `InvalidDocument` when a definition name yields no type
    /// name, or when two names yield the same one.
    pub fn resolve(&self) -> Result<Vec<ModelDescriptor>, GenerationError> {
        self.check_identifiers()?;
        self.definitions
            .iter()
            .map(|(name, schema)| self.resolve_model(name, schema))
            .collect()
    }

    fn check_identifiers(&self) -> Result<(), GenerationError> {
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(self.definitions.len());
        for name in self.definitions.keys() {
            let identifier = to_type_identifier(name);
            if identifier.is_empty() {
                return Err(GenerationError::invalid_document(format!(
                    "Definition '{name}' does not yield a type name"
                )));
            }
            // File stems must also differ on case-insensitive filesystems
            if let Some(previous) = seen.insert(identifier.to_lowercase(), name) {
                return Err(GenerationError::invalid_document(format!(
                    "Definitions '{previous}' and '{name}' both map to type '{identifier}'"
                )));
            }
        }
        Ok(())
    }

    /// Resolve a single definition
    pub fn resolve_model(
        &self,
        name: &str,
        schema: &SchemaNode,
    ) -> Result<ModelDescriptor, GenerationError> {
        let identifier = to_type_identifier(name);
        let mut references: Vec<String> = Vec::new();
        let mut extends: Vec<String> = Vec::new();
        let mut properties: Vec<PropertyDescriptor> = Vec::new();
        let mut alias = None;

        match schema {
            SchemaNode::Object {
                properties: declared,
                additional_properties: Some(value),
                ..
            } if declared.is_empty() => {
                let value = self.resolve_type(value, name)?;
                alias = Some(self.type_mapper.map_of(&value.expression));
                references = value.references;
            }
            SchemaNode::Object { .. } => {
                self.merge_object(schema, name, &mut properties, &mut references)?;
            }
            SchemaNode::AllOf { members, .. }
                if members
                    .iter()
                    .all(|m| matches!(m, SchemaNode::Reference { .. } | SchemaNode::Object { .. })) =>
            {
                for member in members {
                    if let SchemaNode::Reference { .. } = member {
                        let parent = self.resolve_type(member, name)?;
                        push_unique(&mut extends, [parent.type_name]);
                        push_unique(&mut references, parent.references);
                    } else {
                        self.merge_object(member, name, &mut properties, &mut references)?;
                    }
                }
            }
            other => {
                let resolved = self.resolve_type(other, name)?;
                alias = Some(resolved.expression);
                references = resolved.references;
            }
        }

        let imports: Vec<String> = references
            .into_iter()
            .filter(|reference| *reference != identifier)
            .collect();

        debug!(
            model = %name,
            properties = properties.len(),
            imports = imports.len(),
            "Resolved model"
        );

        Ok(ModelDescriptor {
            name: name.to_string(),
            identifier,
            description: schema.description().map(sanitize_doc),
            extends,
            alias,
            properties,
            imports,
        })
    }

    /// Append an object schema's properties, replacing same-named ones in place
    fn merge_object(
        &self,
        schema: &SchemaNode,
        referrer: &str,
        target: &mut Vec<PropertyDescriptor>,
        references: &mut Vec<String>,
    ) -> Result<(), GenerationError> {
        let SchemaNode::Object {
            properties,
            required,
            additional_properties,
            ..
        } = schema
        else {
            return Ok(());
        };

        for (property_name, property_schema) in properties {
            let resolved = self.resolve_type(property_schema, referrer)?;
            push_unique(references, resolved.references);
            let descriptor = PropertyDescriptor {
                name: property_name.clone(),
                field_name: property_key(property_name),
                type_name: resolved.type_name,
                required: required.iter().any(|r| r == property_name),
                is_array: resolved.is_array,
                is_reference: resolved.is_reference,
                description: property_schema.description().map(sanitize_doc),
            };
            match target.iter_mut().find(|p| p.name == descriptor.name) {
                Some(existing) => *existing = descriptor,
                None => target.push(descriptor),
            }
        }

        // Declared properties fix the shape; the value schema must still resolve
        if let Some(value) = additional_properties {
            self.resolve_type(value, referrer)?;
        }
        Ok(())
    }

    /// Resolve the type of a schema appearing inside `referrer`
    pub fn resolve_type(
        &self,
        schema: &SchemaNode,
        referrer: &str,
    ) -> Result<ResolvedType, GenerationError> {
        match schema {
            SchemaNode::Primitive {
                schema_type,
                format,
                ..
            } => Ok(ResolvedType::scalar(
                self.type_mapper
                    .map_primitive(schema_type, format.as_deref())?,
            )),
            SchemaNode::Reference { name, .. } => {
                if !self.definitions.contains_key(name) {
                    return Err(GenerationError::unresolved_reference(name, referrer));
                }
                let identifier = to_type_identifier(name);
                let mut resolved = ResolvedType::scalar(identifier.clone());
                resolved.is_reference = true;
                resolved.references.push(identifier);
                Ok(resolved)
            }
            SchemaNode::Object {
                properties,
                additional_properties,
                ..
            } => {
                // Inline objects collapse to a free-form type, but their members
                // must still resolve
                for property in properties.values() {
                    self.resolve_type(property, referrer)?;
                }
                match additional_properties {
                    Some(value) => {
                        let value = self.resolve_type(value, referrer)?;
                        if properties.is_empty() {
                            Ok(ResolvedType::scalar(self.type_mapper.map_of(&value.expression))
                                .with_references(value.references))
                        } else {
                            Ok(ResolvedType::scalar(self.type_mapper.free_form_object()))
                        }
                    }
                    None => Ok(ResolvedType::scalar(self.type_mapper.free_form_object())),
                }
            }
            SchemaNode::Array { items, .. } => {
                let element = self.resolve_type(items, referrer)?;
                let type_name = element.expression;
                Ok(ResolvedType {
                    expression: self.type_mapper.array_of(&type_name),
                    type_name,
                    is_array: true,
                    is_reference: element.is_reference,
                    references: element.references,
                })
            }
            SchemaNode::AllOf { members, .. } => {
                let mut resolved = members
                    .iter()
                    .map(|member| self.resolve_type(member, referrer))
                    .collect::<Result<Vec<_>, _>>()?;
                if resolved.len() == 1 {
                    return Ok(resolved.remove(0));
                }
                let mut references = Vec::new();
                let mut expressions = Vec::with_capacity(resolved.len());
                for member in resolved {
                    push_unique(&mut references, member.references);
                    expressions.push(member.expression);
                }
                Ok(
                    ResolvedType::scalar(self.type_mapper.intersection_of(&expressions))
                        .with_references(references),
                )
            }
        }
    }
}
