//! Template management use cases

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::application::{ApplicationError, Config, MODELS_DIR, OutputService, RESOURCES_DIR};
use crate::generation::{Generator, OpenApiLoader, RenderedFile, utils::to_kebab_case};
use crate::infrastructure::templates::{FileSystemTemplateLoader, TemplateKind, TemplateSet};

/// Directory receiving exported templates, below the output directory
pub const TEMPLATES_DIR: &str = "templates";

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTemplatesResponse {
    pub output_path: PathBuf,
    pub files_written: usize,
}

/// Use case for exporting the templates in effect, plus the data each
/// template would be rendered with when a specification is configured
pub struct ExportTemplatesUseCase {
    loader: Arc<dyn OpenApiLoader>,
    output_service: Arc<dyn OutputService>,
}

impl ExportTemplatesUseCase {
    pub fn new(loader: Arc<dyn OpenApiLoader>, output_service: Arc<dyn OutputService>) -> Self {
        Self {
            loader,
            output_service,
        }
    }

    pub async fn execute(
        &self,
        config: &Config,
    ) -> Result<ExportTemplatesResponse, ApplicationError> {
        config.validate_options()?;
        let generator_config = config.generator_config()?;

        let mut files = Vec::new();
        let template_loader = FileSystemTemplateLoader::new(&generator_config);
        for kind in TemplateKind::all() {
            let source = template_loader.load(*kind).await?;
            files.push(RenderedFile::new(kind.default_file_name(), source.content));
        }

        if let Ok(source) = config.source() {
            info!(source = %source, "Exporting template contexts");
            let templates = TemplateSet::load(&generator_config).await?;
            let document = self.loader.load(source).await?;
            let generator = Generator::with_templates(document, generator_config, templates);

            for model in generator.get_models()? {
                let path = PathBuf::from("contexts")
                    .join(MODELS_DIR)
                    .join(format!("{}.json", model.identifier));
                files.push(RenderedFile::new(path, to_json(&model)?));
            }
            for resource in generator.get_resources()? {
                let path = PathBuf::from("contexts")
                    .join(RESOURCES_DIR)
                    .join(format!("{}.json", to_kebab_case(&resource.name)));
                files.push(RenderedFile::new(path, to_json(&resource)?));
            }
        }

        let output_path = config.output_dir().join(TEMPLATES_DIR);
        self.output_service.ensure_directory(&output_path).await?;
        self.output_service.write_files(&output_path, &files).await?;

        Ok(ExportTemplatesResponse {
            output_path,
            files_written: files.len(),
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApplicationError> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(crate::generation::GenerationError::from)?;
    json.push('\n');
    Ok(json)
}
