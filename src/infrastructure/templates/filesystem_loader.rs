//! Resolves template sources from configuration overrides or the built-ins

use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::generation::{GenerationError, GeneratorConfig};
use crate::infrastructure::templates::TemplateKind;

/// Where a template's source came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Embedded,
    FileSystem(PathBuf),
}

/// Template source text together with its origin
#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub kind: TemplateKind,
    pub origin: TemplateOrigin,
    pub content: String,
}

impl TemplateSource {
    /// Name the template is compiled under, used in error messages
    pub fn name(&self) -> String {
        match &self.origin {
            TemplateOrigin::Embedded => format!("builtin:{}", self.kind),
            TemplateOrigin::FileSystem(path) => path.display().to_string(),
        }
    }
}

/// Loads template sources, preferring configured files over built-ins
pub struct FileSystemTemplateLoader<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> FileSystemTemplateLoader<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Resolve the source for one kind of template.
    ///
    /// An explicitly configured file must exist. Without one, the template
    /// directory is searched for `<kind>.tera`, then the built-in is used.
    pub async fn load(&self, kind: TemplateKind) -> Result<TemplateSource, GenerationError> {
        let configured = match kind {
            TemplateKind::Model => self.config.model_template.as_deref(),
            TemplateKind::Resource => self.config.resource_template.as_deref(),
            TemplateKind::Barrel => self.config.barrel_template.as_deref(),
        };

        let path = match (configured, &self.config.template_path) {
            (Some(name), _) => Some(self.config.template_file(name)),
            (None, Some(dir)) => {
                let candidate = dir.join(kind.default_file_name());
                fs::try_exists(&candidate)
                    .await
                    .unwrap_or(false)
                    .then_some(candidate)
            }
            (None, None) => None,
        };

        let Some(path) = path else {
            return Ok(TemplateSource {
                kind,
                origin: TemplateOrigin::Embedded,
                content: kind.builtin_source().to_string(),
            });
        };

        debug!(kind = %kind, path = %path.display(), "Loading template override");
        let content = fs::read_to_string(&path).await.map_err(|e| {
            GenerationError::LoadError(format!(
                "Failed to read {kind} template {}: {e}",
                path.display()
            ))
        })?;

        Ok(TemplateSource {
            kind,
            origin: TemplateOrigin::FileSystem(path),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_builtin_when_nothing_configured() {
        let config = GeneratorConfig::default();
        let source = FileSystemTemplateLoader::new(&config)
            .load(TemplateKind::Model)
            .await
            .unwrap();

        assert_eq!(source.origin, TemplateOrigin::Embedded);
        assert_eq!(source.name(), "builtin:model");
        assert_eq!(source.content, TemplateKind::Model.builtin_source());
    }

    #[tokio::test]
    async fn test_named_template_inside_template_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("my-model.hbs"), "custom {{ name }}").unwrap();

        let config = GeneratorConfig {
            template_path: Some(dir.path().to_path_buf()),
            model_template: Some("my-model.hbs".to_string()),
            ..Default::default()
        };
        let loader = FileSystemTemplateLoader::new(&config);

        let model = loader.load(TemplateKind::Model).await.unwrap();
        assert_eq!(model.content, "custom {{ name }}");
        assert_eq!(
            model.origin,
            TemplateOrigin::FileSystem(dir.path().join("my-model.hbs"))
        );

        let resource = loader.load(TemplateKind::Resource).await.unwrap();
        assert_eq!(resource.origin, TemplateOrigin::Embedded);
    }

    #[tokio::test]
    async fn test_default_file_name_in_template_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("barrel.tera"), "{{ paths | length }}").unwrap();

        let config = GeneratorConfig {
            template_path: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let source = FileSystemTemplateLoader::new(&config)
            .load(TemplateKind::Barrel)
            .await
            .unwrap();
        assert_eq!(source.content, "{{ paths | length }}");
    }

    #[tokio::test]
    async fn test_missing_configured_template_fails() {
        let dir = TempDir::new().unwrap();
        let config = GeneratorConfig {
            template_path: Some(dir.path().to_path_buf()),
            resource_template: Some("absent.tera".to_string()),
            ..Default::default()
        };
        let result = FileSystemTemplateLoader::new(&config)
            .load(TemplateKind::Resource)
            .await;
        assert!(matches!(result, Err(GenerationError::LoadError(_))));
    }
}
