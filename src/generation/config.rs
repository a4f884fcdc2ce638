//! Immutable configuration handed to the generator

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::generation::HttpMethod;

/// Template overrides and pipeline policy for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Directory holding custom templates
    pub template_path: Option<PathBuf>,
    /// Model template file, relative to `template_path` when that is set
    pub model_template: Option<String>,
    /// Resource template file, relative to `template_path` when that is set
    pub resource_template: Option<String>,
    /// Barrel template file, relative to `template_path` when that is set
    pub barrel_template: Option<String>,
    /// Extension of every generated file
    pub file_extension: String,
    pub grouping: GroupingPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_path: None,
            model_template: None,
            resource_template: None,
            barrel_template: None,
            file_extension: "ts".to_string(),
            grouping: GroupingPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Location of a template file named in the configuration
    pub fn template_file(&self, name: &str) -> PathBuf {
        match &self.template_path {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// How operations are assigned to resources and ordered within them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupingPolicy {
    /// Verbs in the order methods are emitted within one path
    pub verb_order: Vec<HttpMethod>,
    pub tag_selection: TagSelection,
    /// Resource receiving operations without tags
    pub default_resource: String,
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self {
            verb_order: HttpMethod::all().to_vec(),
            tag_selection: TagSelection::First,
            default_resource: "default".to_string(),
        }
    }
}

impl GroupingPolicy {
    /// Resources an operation with `tags` belongs to
    pub fn resources_for<'a>(&'a self, tags: &'a [String]) -> Vec<&'a str> {
        if tags.is_empty() {
            return vec![self.default_resource.as_str()];
        }
        match self.tag_selection {
            TagSelection::First => vec![tags[0].as_str()],
            TagSelection::Every => {
                let mut selected: Vec<&str> = Vec::with_capacity(tags.len());
                for tag in tags {
                    if !selected.contains(&tag.as_str()) {
                        selected.push(tag);
                    }
                }
                selected
            }
        }
    }
}

/// Which of an operation's tags name its resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSelection {
    /// Only the first declared tag
    #[default]
    First,
    /// Every declared tag; the operation appears in each resource
    Every,
}
