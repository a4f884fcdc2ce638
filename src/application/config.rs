//! Run configuration: build-config files merged with command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;

use crate::application::{ApplicationError, ValidationError};
use crate::generation::{GeneratorConfig, GroupingPolicy, HttpMethod, TagSelection};

/// Output directory used when none is configured
pub const DEFAULT_OUTPUT: &str = "client";

/// Configuration record for one run.
///
/// Field names follow the build-config file format; every field is optional so
/// a file and the command line can each supply a part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub swagger_spec_file: Option<String>,
    pub output: Option<PathBuf>,
    pub debug: Option<bool>,
    pub template_path: Option<PathBuf>,
    pub model_template: Option<String>,
    pub resource_template: Option<String>,
    pub barrel_template: Option<String>,
    /// HTTP verbs, case-insensitive
    pub verb_order: Option<Vec<String>>,
    pub tag_selection: Option<TagSelection>,
    pub default_resource: Option<String>,
    pub file_extension: Option<String>,
}

impl Config {
    /// Load a build-config file (JSON, YAML or TOML)
    pub async fn load(path: &Path) -> Result<Self, ApplicationError> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            ApplicationError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ApplicationError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let parse_error =
            |e: &dyn std::fmt::Display| ApplicationError::ConfigError(format!("{}: {e}", path.display()));

        match extension.as_deref() {
            Some("json") => serde_json::from_str(content).map_err(|e| parse_error(&e)),
            Some("yaml" | "yml") => serde_yaml::from_str(content).map_err(|e| parse_error(&e)),
            Some("toml") => toml::from_str(content).map_err(|e| parse_error(&e)),
            _ => serde_json::from_str(content)
                .or_else(|_| serde_yaml::from_str(content))
                .map_err(|e| parse_error(&e)),
        }
    }

    /// Fill fields left unset here from `fallback`
    pub fn merge(self, fallback: Config) -> Config {
        Config {
            swagger_spec_file: self.swagger_spec_file.or(fallback.swagger_spec_file),
            output: self.output.or(fallback.output),
            debug: self.debug.or(fallback.debug),
            template_path: self.template_path.or(fallback.template_path),
            model_template: self.model_template.or(fallback.model_template),
            resource_template: self.resource_template.or(fallback.resource_template),
            barrel_template: self.barrel_template.or(fallback.barrel_template),
            verb_order: self.verb_order.or(fallback.verb_order),
            tag_selection: self.tag_selection.or(fallback.tag_selection),
            default_resource: self.default_resource.or(fallback.default_resource),
            file_extension: self.file_extension.or(fallback.file_extension),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    /// The specification source, required for generation
    pub fn source(&self) -> Result<&str, ValidationError> {
        self.swagger_spec_file
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ValidationError::MissingField("swaggerSpecFile".to_string()))
    }

    /// Validate everything a generation run needs
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.source()?;
        self.validate_options()
    }

    /// Validate the generator options, without requiring a source
    pub fn validate_options(&self) -> Result<(), ValidationError> {
        self.generator_config().map(|_| ())
    }

    /// Build the immutable configuration handed to the generator
    pub fn generator_config(&self) -> Result<GeneratorConfig, ValidationError> {
        let defaults = GeneratorConfig::default();

        let file_extension = match &self.file_extension {
            Some(ext) => {
                let ext = ext.trim_start_matches('.');
                if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(ValidationError::InvalidFileExtension(ext.to_string()));
                }
                ext.to_string()
            }
            None => defaults.file_extension,
        };

        let verb_order = match &self.verb_order {
            Some(verbs) => {
                let mut order: Vec<HttpMethod> = Vec::with_capacity(verbs.len());
                for verb in verbs {
                    let method = HttpMethod::from_str(verb).map_err(|_| {
                        ValidationError::InvalidConfiguration(format!("Unknown HTTP method '{verb}'"))
                    })?;
                    if order.contains(&method) {
                        return Err(ValidationError::DuplicateVerb(verb.clone()));
                    }
                    order.push(method);
                }
                if order.is_empty() {
                    return Err(ValidationError::InvalidConfiguration(
                        "verbOrder must name at least one HTTP method".to_string(),
                    ));
                }
                order
            }
            None => defaults.grouping.verb_order,
        };

        let default_resource = match &self.default_resource {
            Some(name) if name.trim().is_empty() => {
                return Err(ValidationError::InvalidConfiguration(
                    "defaultResource cannot be empty".to_string(),
                ));
            }
            Some(name) => name.clone(),
            None => defaults.grouping.default_resource,
        };

        Ok(GeneratorConfig {
            template_path: self.template_path.clone(),
            model_template: self.model_template.clone(),
            resource_template: self.resource_template.clone(),
            barrel_template: self.barrel_template.clone(),
            file_extension,
            grouping: GroupingPolicy {
                verb_order,
                tag_selection: self.tag_selection.unwrap_or_default(),
                default_resource,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    async fn load_from(suffix: &str, content: &str) -> Result<Config, ApplicationError> {
        let file = Builder::new().suffix(suffix).tempfile().unwrap();
        std::fs::write(file.path(), content).unwrap();
        Config::load(file.path()).await
    }

    #[tokio::test]
    async fn test_load_json() {
        let config = load_from(
            ".json",
            r#"{ "swaggerSpecFile": "petstore.json", "output": "out", "debug": true, "verbOrder": ["POST", "get"] }"#,
        )
        .await
        .unwrap();

        assert_eq!(config.swagger_spec_file.as_deref(), Some("petstore.json"));
        assert_eq!(config.output_dir(), PathBuf::from("out"));
        assert!(config.debug_enabled());
        assert_eq!(
            config.generator_config().unwrap().grouping.verb_order,
            vec![HttpMethod::Post, HttpMethod::Get]
        );
    }

    #[tokio::test]
    async fn test_load_yaml() {
        let config = load_from(
            ".yml",
            "swaggerSpecFile: https://example.com/api.yaml\ntagSelection: every\nfileExtension: ts\n",
        )
        .await
        .unwrap();

        assert_eq!(config.tag_selection, Some(TagSelection::Every));
        assert_eq!(config.source().unwrap(), "https://example.com/api.yaml");
    }

    #[tokio::test]
    async fn test_load_toml() {
        let config = load_from(
            ".toml",
            "swaggerSpecFile = \"api.json\"\ndefaultResource = \"api\"\n",
        )
        .await
        .unwrap();

        assert_eq!(
            config.generator_config().unwrap().grouping.default_resource,
            "api"
        );
    }

    #[tokio::test]
    async fn test_load_without_extension_falls_back_to_yaml() {
        let config = load_from(".conf", "output: generated\n").await.unwrap();
        assert_eq!(config.output_dir(), PathBuf::from("generated"));
    }

    #[tokio::test]
    async fn test_load_errors() {
        assert!(matches!(
            load_from(".json", "{ not json").await,
            Err(ApplicationError::ConfigError(_))
        ));
        assert!(matches!(
            Config::load(Path::new("/definitely/not/here.json")).await,
            Err(ApplicationError::ConfigError(_))
        ));
    }

    #[test]
    fn test_file_values_win_over_fallback() {
        let file = Config {
            swagger_spec_file: Some("from-file.json".to_string()),
            ..Default::default()
        };
        let cli = Config {
            swagger_spec_file: Some("from-cli.json".to_string()),
            output: Some(PathBuf::from("cli-out")),
            ..Default::default()
        };

        let merged = file.merge(cli);
        assert_eq!(merged.swagger_spec_file.as_deref(), Some("from-file.json"));
        assert_eq!(merged.output_dir(), PathBuf::from("cli-out"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_dir(), PathBuf::from("client"));
        assert!(!config.debug_enabled());
        assert_eq!(config.generator_config().unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_validation() {
        let missing_source = Config::default();
        assert!(matches!(
            missing_source.validate(),
            Err(ValidationError::MissingField(_))
        ));
        assert!(missing_source.validate_options().is_ok());

        let base = Config {
            swagger_spec_file: Some("api.json".to_string()),
            ..Default::default()
        };
        assert!(base.validate().is_ok());

        let bad_extension = Config {
            file_extension: Some("t s".to_string()),
            ..base.clone()
        };
        assert!(matches!(
            bad_extension.validate(),
            Err(ValidationError::InvalidFileExtension(_))
        ));

        let duplicate_verb = Config {
            verb_order: Some(vec!["get".to_string(), "GET".to_string()]),
            ..base.clone()
        };
        assert!(matches!(
            duplicate_verb.validate(),
            Err(ValidationError::DuplicateVerb(_))
        ));

        let unknown_verb = Config {
            verb_order: Some(vec!["trace".to_string()]),
            ..base.clone()
        };
        assert!(matches!(
            unknown_verb.validate(),
            Err(ValidationError::InvalidConfiguration(_))
        ));

        let empty_resource = Config {
            default_resource: Some(" ".to_string()),
            ..base
        };
        assert!(empty_resource.validate().is_err());
    }

    #[test]
    fn test_leading_dot_in_extension_is_ignored() {
        let config = Config {
            file_extension: Some(".tsx".to_string()),
            ..Default::default()
        };
        assert_eq!(config.generator_config().unwrap().file_extension, "tsx");
    }
}
