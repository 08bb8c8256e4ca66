use std::collections::HashMap;

use crate::config::settings::ResourceTemplateSettings;

pub mod resource_template;
pub mod resource_templates;
pub mod template;

pub use resource_template::ResourceTemplate;
pub use resource_templates::{NameIndex, Preorder, ResourceTemplates, TableRow};

/// Parameter values keyed by parameter name
pub type Params = HashMap<String, String>;

/// Anything that can be materialized into a resource template node.
///
/// Children may arrive as raw generic structures (deserialized JSON/YAML),
/// as explicit settings, or as nodes that were already built; construction
/// normalizes all three eagerly into one homogeneous tree.
#[derive(Debug, Clone)]
pub enum TemplateEntry {
    Structure(serde_json::Value),
    Settings(ResourceTemplateSettings),
    Template(ResourceTemplate),
}

impl From<serde_json::Value> for TemplateEntry {
    fn from(value: serde_json::Value) -> Self {
        TemplateEntry::Structure(value)
    }
}

impl From<ResourceTemplateSettings> for TemplateEntry {
    fn from(settings: ResourceTemplateSettings) -> Self {
        TemplateEntry::Settings(settings)
    }
}

impl From<ResourceTemplate> for TemplateEntry {
    fn from(template: ResourceTemplate) -> Self {
        TemplateEntry::Template(template)
    }
}
