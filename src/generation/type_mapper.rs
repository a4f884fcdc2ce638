//! Primitive type mapping for the TypeScript target

use crate::generation::{GenerationError, TypeMapper};

/// Maps Swagger/OpenAPI primitives to TypeScript type names
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTypeMapper;

impl TypeScriptTypeMapper {
    pub fn new() -> Self {
        Self
    }
}

impl TypeMapper for TypeScriptTypeMapper {
    fn map_primitive(
        &self,
        schema_type: &str,
        format: Option<&str>,
    ) -> Result<String, GenerationError> {
        let mapped = match (schema_type, format) {
            (
                "string",
                None
                | Some(
                    "byte" | "binary" | "password" | "email" | "uuid" | "uri" | "hostname"
                    | "ipv4" | "ipv6",
                ),
            ) => "string",
            ("string", Some("date" | "date-time")) => "Date",
            ("integer", None | Some("int32" | "int64")) => "number",
            ("number", None | Some("float" | "double")) => "number",
            ("boolean", None) => "boolean",
            ("file", None) => "Blob",
            _ => return Err(GenerationError::unsupported_type(schema_type, format)),
        };
        Ok(mapped.to_string())
    }

    fn free_form_object(&self) -> String {
        "{ [key: string]: any }".to_string()
    }

    fn map_of(&self, value: &str) -> String {
        format!("{{ [key: string]: {value} }}")
    }

    fn array_of(&self, element: &str) -> String {
        // Object literal types need parentheses before []
        if element.contains(' ') && !element.starts_with('(') {
            format!("({element})[]")
        } else {
            format!("{element}[]")
        }
    }

    fn intersection_of(&self, members: &[String]) -> String {
        match members {
            [single] => single.clone(),
            _ => format!("({})", members.join(" & ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_string_formats() {
        let mapper = TypeScriptTypeMapper::new();
        assert_eq!(mapper.map_primitive("string", None).unwrap(), "string");
        assert_eq!(mapper.map_primitive("string", Some("uuid")).unwrap(), "string");
        assert_eq!(mapper.map_primitive("string", Some("binary")).unwrap(), "string");
        assert_eq!(mapper.map_primitive("string", Some("date")).unwrap(), "Date");
        assert_eq!(
            mapper.map_primitive("string", Some("date-time")).unwrap(),
            "Date"
        );
    }

    #[test]
    fn test_map_numeric_and_boolean() {
        let mapper = TypeScriptTypeMapper::new();
        assert_eq!(mapper.map_primitive("integer", Some("int64")).unwrap(), "number");
        assert_eq!(mapper.map_primitive("integer", None).unwrap(), "number");
        assert_eq!(mapper.map_primitive("number", Some("double")).unwrap(), "number");
        assert_eq!(mapper.map_primitive("boolean", None).unwrap(), "boolean");
        assert_eq!(mapper.map_primitive("file", None).unwrap(), "Blob");
    }

    #[test]
    fn test_unknown_pairs_are_rejected() {
        let mapper = TypeScriptTypeMapper::new();

        match mapper.map_primitive("integer", Some("date-time")) {
            Err(GenerationError::UnsupportedType {
                schema_type,
                format,
            }) => {
                assert_eq!(schema_type, "integer");
                assert_eq!(format.as_deref(), Some("date-time"));
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }

        assert!(mapper.map_primitive("null", None).is_err());
        assert!(mapper.map_primitive("boolean", Some("yes-no")).is_err());
    }

    #[test]
    fn test_array_of() {
        let mapper = TypeScriptTypeMapper::new();
        assert_eq!(mapper.array_of("Pet"), "Pet[]");
        assert_eq!(mapper.array_of("string[]"), "string[][]");
        assert_eq!(
            mapper.array_of(&mapper.free_form_object()),
            "({ [key: string]: any })[]"
        );
        assert_eq!(mapper.array_of("(Pet & Named)"), "(Pet & Named)[]");
    }

    #[test]
    fn test_map_of_and_intersection_of() {
        let mapper = TypeScriptTypeMapper::new();
        assert_eq!(mapper.map_of("Stock"), "{ [key: string]: Stock }");
        assert_eq!(mapper.free_form_object(), mapper.map_of("any"));
        assert_eq!(mapper.intersection_of(&["Pet".to_string()]), "Pet");
        assert_eq!(
            mapper.intersection_of(&["Pet".to_string(), "Named".to_string()]),
            "(Pet & Named)"
        );
    }
}
