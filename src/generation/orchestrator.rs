//! Generation orchestration - drives the model and resource pipelines

use serde_json::json;
use std::collections::HashSet;
use std::path::{Component, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::generation::{
    GenerationError, GenerationResult, GeneratorConfig, ModelDescriptor, PathGrouper,
    PipelineOutput, RenderedFile, ResourceDescriptor, SchemaResolver, SpecDocument, TypeMapper,
    TypeScriptTypeMapper,
    utils::{is_identifier, to_kebab_case},
};
use crate::infrastructure::templates::TemplateSet;

/// Turns one specification document into rendered client sources.
///
/// Cloning is cheap; every field is shared and immutable.
#[derive(Clone)]
pub struct Generator {
    document: Arc<SpecDocument>,
    config: Arc<GeneratorConfig>,
    templates: Arc<TemplateSet>,
    type_mapper: Arc<dyn TypeMapper>,
}

impl Generator {
    /// Create a generator, compiling every template up front
    pub async fn new(
        document: SpecDocument,
        config: GeneratorConfig,
    ) -> Result<Self, GenerationError> {
        let templates = TemplateSet::load(&config).await?;
        Ok(Self::with_templates(document, config, templates))
    }

    /// Create a generator from already compiled templates
    pub fn with_templates(
        document: SpecDocument,
        config: GeneratorConfig,
        templates: TemplateSet,
    ) -> Self {
        Self {
            document: Arc::new(document),
            config: Arc::new(config),
            templates: Arc::new(templates),
            type_mapper: Arc::new(TypeScriptTypeMapper::new()),
        }
    }

    /// Replace the type mapper used by both pipelines
    pub fn with_type_mapper(mut self, type_mapper: Arc<dyn TypeMapper>) -> Self {
        self.type_mapper = type_mapper;
        self
    }

    /// Model descriptors in definition order
    pub fn get_models(&self) -> Result<Vec<ModelDescriptor>, GenerationError> {
        SchemaResolver::new(&self.document.definitions, self.type_mapper.as_ref()).resolve()
    }

    /// Resource descriptors in first-appearance order of their tags
    pub fn get_resources(&self) -> Result<Vec<ResourceDescriptor>, GenerationError> {
        PathGrouper::new(
            &self.document,
            self.type_mapper.as_ref(),
            &self.config.grouping,
        )
        .group()
    }

    /// Render one model, named after its identifier
    pub fn process_model(&self, model: &ModelDescriptor) -> Result<RenderedFile, GenerationError> {
        if !is_identifier(&model.identifier) {
            return Err(GenerationError::invalid_document(format!(
                "Model '{}' has no usable type name",
                model.name
            )));
        }
        let content = self.templates.model.render(model)?;
        Ok(RenderedFile::new(self.file_name(&model.identifier), content))
    }

    /// Render one resource
    pub fn process_resource(
        &self,
        resource: &ResourceDescriptor,
    ) -> Result<RenderedFile, GenerationError> {
        let stem = to_kebab_case(&resource.name);
        if stem.is_empty() {
            return Err(GenerationError::invalid_document(format!(
                "Resource name '{}' does not yield a file name",
                resource.name
            )));
        }
        let content = self.templates.resource.render(resource)?;
        Ok(RenderedFile::new(self.file_name(&stem), content))
    }

    /// Render a barrel listing `names` in the given order
    pub fn render_barrel(&self, names: &[String]) -> Result<RenderedFile, GenerationError> {
        let content = self.templates.barrel.render(&json!({ "paths": names }))?;
        Ok(RenderedFile::new(self.file_name("index"), content))
    }

    /// Run both pipelines.
    ///
    /// Both descriptor lists are resolved before anything is rendered, so a
    /// resolution error in either pipeline yields no output at all.
    pub async fn generate(&self) -> Result<GenerationResult, GenerationError> {
        let models = self.get_models()?;
        let resources = self.get_resources()?;
        info!(
            models = models.len(),
            resources = resources.len(),
            "Resolved descriptors"
        );

        let (models, resources) = tokio::try_join!(
            self.render_pipeline("models", models, Generator::process_model),
            self.render_pipeline("resources", resources, Generator::process_resource),
        )?;

        Ok(GenerationResult { models, resources })
    }

    fn file_name(&self, stem: &str) -> PathBuf {
        PathBuf::from(format!("{stem}.{}", self.config.file_extension))
    }

    /// Render descriptors concurrently, keeping results in descriptor order
    async fn render_pipeline<D>(
        &self,
        pipeline: &'static str,
        descriptors: Vec<D>,
        render: fn(&Generator, &D) -> Result<RenderedFile, GenerationError>,
    ) -> Result<PipelineOutput, GenerationError>
    where
        D: Send + 'static,
    {
        let mut slots: Vec<Option<RenderedFile>> = vec![None; descriptors.len()];
        let mut tasks = JoinSet::new();

        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let generator = self.clone();
            tasks.spawn_blocking(move || (index, render(&generator, &descriptor)));
        }

        while let Some(joined) = tasks.join_next().await {
            let (index, rendered) =
                joined.map_err(|e| GenerationError::TaskFailed(e.to_string()))?;
            slots[index] = Some(rendered?);
        }

        let files: Vec<RenderedFile> = slots
            .into_iter()
            .collect::<Option<_>>()
            .ok_or_else(|| GenerationError::TaskFailed(format!("{pipeline}: missing output")))?;

        // Every file sits directly in the pipeline directory and has its own
        // barrel entry, also on case-insensitive filesystems
        let mut seen = HashSet::with_capacity(files.len() + 1);
        seen.insert("index".to_string());
        let mut names: Vec<String> = Vec::with_capacity(files.len());
        for file in &files {
            let stem = file.stem();
            let mut components = file.relative_path.components();
            let flat = matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            );
            if !flat || stem.is_empty() || !seen.insert(stem.to_lowercase()) {
                return Err(GenerationError::invalid_document(format!(
                    "Output file '{}' in {pipeline} is nested or not unique",
                    file.relative_path.display()
                )));
            }
            names.push(stem);
        }

        let barrel = self.render_barrel(&names)?;
        debug!(pipeline, files = files.len(), "Rendered pipeline");

        Ok(PipelineOutput { files, barrel })
    }
}
