//! Use case for generating an Angular API client

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::application::{ApplicationError, Config, OutputService};
use crate::generation::{Generator, OpenApiLoader};
use crate::infrastructure::templates::TemplateSet;

/// Directory receiving model files, below the output directory
pub const MODELS_DIR: &str = "models";
/// Directory receiving resource files, below the output directory
pub const RESOURCES_DIR: &str = "resources";

/// Summary of a completed generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateClientResponse {
    pub output_path: PathBuf,
    pub model_count: usize,
    pub resource_count: usize,
}

/// Use case for generating client sources from a specification
pub struct GenerateClientUseCase {
    loader: Arc<dyn OpenApiLoader>,
    output_service: Arc<dyn OutputService>,
}

impl GenerateClientUseCase {
    pub fn new(loader: Arc<dyn OpenApiLoader>, output_service: Arc<dyn OutputService>) -> Self {
        Self {
            loader,
            output_service,
        }
    }

    pub async fn execute(&self, config: &Config) -> Result<GenerateClientResponse, ApplicationError> {
        // 1. Validate configuration
        config.validate()?;
        let generator_config = config.generator_config()?;
        let source = config.source()?;

        // 2. Compile templates before any document work
        let templates = TemplateSet::load(&generator_config).await?;

        // 3. Load the specification
        info!(source = %source, "Loading specification");
        let document = self.loader.load(source).await?;

        // 4. Resolve and render both pipelines; nothing is written on failure
        let generator = Generator::with_templates(document, generator_config, templates);
        let result = generator.generate().await?;

        // 5. Write each pipeline as a unit
        let output_path = config.output_dir();
        self.output_service
            .write_pipeline(&output_path.join(MODELS_DIR), &result.models)
            .await?;
        self.output_service
            .write_pipeline(&output_path.join(RESOURCES_DIR), &result.resources)
            .await?;

        Ok(GenerateClientResponse {
            output_path,
            model_count: result.models.files.len(),
            resource_count: result.resources.files.len(),
        })
    }
}
