//! Tera-backed template compiler
//!
//! The engine knows nothing about descriptor shapes: a compiled template is
//! rendered against any serializable value, addressed by key paths.

use serde::Serialize;
use std::collections::HashMap;
use std::error::Error as StdError;
use tera::{Context, Tera, Value};

use crate::generation::{
    GenerationError,
    sanitizers::sanitize_doc,
    utils::{to_camel_case, to_kebab_case, to_proper_case, to_snake_case},
};

/// Compiles template sources
pub struct TemplateEngine;

impl TemplateEngine {
    /// Compile `source` under `name`.
    ///
    /// Syntax errors surface here as `TemplateSyntax`, never at render time.
    pub fn compile(name: &str, source: &str) -> Result<CompiledTemplate, GenerationError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        register_filters(&mut tera);

        tera.add_raw_template(name, source)
            .map_err(|e| GenerationError::template_syntax(name, error_chain(&e)))?;

        Ok(CompiledTemplate {
            name: name.to_string(),
            tera,
        })
    }
}

/// A template compiled once and reused for every record of its kind
pub struct CompiledTemplate {
    name: String,
    tera: Tera,
}

impl CompiledTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render against any value serializing to a map
    pub fn render<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, GenerationError> {
        let context = Context::from_serialize(data)
            .map_err(|e| GenerationError::render(&self.name, error_chain(&e)))?;
        self.tera
            .render(&self.name, &context)
            .map_err(|e| GenerationError::render(&self.name, error_chain(&e)))
    }
}

impl std::fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("name", &self.name)
            .finish()
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("camel_case", string_filter(to_camel_case));
    tera.register_filter("pascal_case", string_filter(to_proper_case));
    tera.register_filter("snake_case", string_filter(to_snake_case));
    tera.register_filter("kebab_case", string_filter(to_kebab_case));
    tera.register_filter("doc", string_filter(sanitize_doc));
}

fn string_filter(
    transform: fn(&str) -> String,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static {
    move |value: &Value, _args: &HashMap<String, Value>| match value {
        Value::String(s) => Ok(Value::String(transform(s))),
        Value::Null => Ok(Value::String(String::new())),
        other => Err(tera::Error::msg(format!(
            "expected a string, got {other}"
        ))),
    }
}

/// Tera reports the useful part of an error in its source chain
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
