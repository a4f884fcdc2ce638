//! Templates compiled into the binary

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MODEL_TEMPLATE: &str = include_str!("../../../templates/angular/model.ts.tera");
pub const RESOURCE_TEMPLATE: &str = include_str!("../../../templates/angular/resource.ts.tera");
pub const BARREL_TEMPLATE: &str = include_str!("../../../templates/angular/barrel.ts.tera");

/// The three templates a generation run compiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Model,
    Resource,
    Barrel,
}

impl TemplateKind {
    pub fn all() -> &'static [TemplateKind] {
        &[TemplateKind::Model, TemplateKind::Resource, TemplateKind::Barrel]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Model => "model",
            TemplateKind::Resource => "resource",
            TemplateKind::Barrel => "barrel",
        }
    }

    /// Built-in source for this kind
    pub fn builtin_source(&self) -> &'static str {
        match self {
            TemplateKind::Model => MODEL_TEMPLATE,
            TemplateKind::Resource => RESOURCE_TEMPLATE,
            TemplateKind::Barrel => BARREL_TEMPLATE,
        }
    }

    /// File looked up inside a template directory when no explicit name is configured
    pub fn default_file_name(&self) -> String {
        format!("{}.tera", self.as_str())
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
