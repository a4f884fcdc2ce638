//! swagger2angular CLI entrypoint
//! Parses command-line arguments and dispatches to the use cases.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::PathBuf;
use std::sync::Arc;
use swagger2angular::application::{
    Config, ExportTemplatesUseCase, GenerateClientUseCase,
};
use swagger2angular::infrastructure::{CompositeOpenApiLoader, FileSystemOutputService};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "swagger2angular")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path or URL to the Swagger/OpenAPI specification (JSON or YAML)
    #[arg(short = 's', long)]
    source: Option<String>,
    /// Output directory for the generated files [default: client]
    #[arg(short = 'o', long)]
    output_path: Option<PathBuf>,
    /// Enable verbose debug messages
    #[arg(short = 'd', long)]
    debug: bool,
    /// Directory holding custom templates
    #[arg(short = 't', long)]
    template_path: Option<PathBuf>,
    /// Template file for generating model files
    #[arg(short = 'm', long)]
    model_template: Option<String>,
    /// Template file for generating resource files
    #[arg(short = 'r', long)]
    resource_template: Option<String>,
    /// Export the templates and their rendering contexts instead of generating
    #[arg(short = 'g', long)]
    generate_templates: bool,
    /// Build configuration file (JSON, YAML or TOML); its values take precedence
    #[arg(short = 'b', long)]
    build_config: Option<PathBuf>,
}

impl Cli {
    fn to_config(&self) -> Config {
        Config {
            swagger_spec_file: self.source.clone(),
            output: self.output_path.clone(),
            debug: self.debug.then_some(true),
            template_path: self.template_path.clone(),
            model_template: self.model_template.clone(),
            resource_template: self.resource_template.clone(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.build_config {
        Some(path) => Config::load(path)
            .await
            .with_context(|| format!("Failed to load build config {}", path.display()))?
            .merge(cli.to_config()),
        None => cli.to_config(),
    };

    init_tracing(config.debug_enabled());
    info!("Starting swagger2angular");

    let loader = Arc::new(CompositeOpenApiLoader::new().context("Failed to create loader")?);
    let output_service = Arc::new(FileSystemOutputService::new());

    if cli.generate_templates {
        let response = ExportTemplatesUseCase::new(loader, output_service)
            .execute(&config)
            .await
            .context("Failed to export templates")?;
        info!(
            path = %response.output_path.display(),
            files = response.files_written,
            "Exported templates"
        );
    } else {
        let response = GenerateClientUseCase::new(loader, output_service)
            .execute(&config)
            .await
            .context("Failed to generate client")?;
        info!(
            path = %response.output_path.display(),
            models = response.model_count,
            resources = response.resource_count,
            "Generated client"
        );
    }

    Ok(())
}

/// Log to stderr at INFO (DEBUG with `--debug`); `RUST_LOG` overrides
fn init_tracing(debug: bool) {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
