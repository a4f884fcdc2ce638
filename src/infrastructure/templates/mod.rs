//! Template engine and template sources

pub mod embedded;
pub mod engine;
pub mod filesystem_loader;

pub use embedded::*;
pub use engine::*;
pub use filesystem_loader::*;

use crate::generation::{GenerationError, GeneratorConfig};

/// The compiled templates of one generation run
#[derive(Debug)]
pub struct TemplateSet {
    pub model: CompiledTemplate,
    pub resource: CompiledTemplate,
    pub barrel: CompiledTemplate,
}

impl TemplateSet {
    /// Resolve and compile all templates named by `config`
    pub async fn load(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let loader = FileSystemTemplateLoader::new(config);
        Ok(Self {
            model: compile(loader.load(TemplateKind::Model).await?)?,
            resource: compile(loader.load(TemplateKind::Resource).await?)?,
            barrel: compile(loader.load(TemplateKind::Barrel).await?)?,
        })
    }

    /// Compile the built-in templates only
    pub fn builtin() -> Result<Self, GenerationError> {
        let compile_builtin = |kind: TemplateKind| {
            TemplateEngine::compile(&format!("builtin:{kind}"), kind.builtin_source())
        };
        Ok(Self {
            model: compile_builtin(TemplateKind::Model)?,
            resource: compile_builtin(TemplateKind::Resource)?,
            barrel: compile_builtin(TemplateKind::Barrel)?,
        })
    }
}

fn compile(source: TemplateSource) -> Result<CompiledTemplate, GenerationError> {
    TemplateEngine::compile(&source.name(), &source.content)
}
