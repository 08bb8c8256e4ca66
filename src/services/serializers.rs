// Serializers for route description import/export

use anyhow::{bail, Result};

use crate::domain::ResourceTemplates;

/// Strategy trait for route description formats
pub trait ResourceTemplatesSerializer: Send + Sync {
    fn serialize(&self, templates: &ResourceTemplates) -> Result<String>;
    fn deserialize(&self, content: &str) -> Result<ResourceTemplates>;
}

/// YAML serializer
pub struct YamlSerializer;

impl ResourceTemplatesSerializer for YamlSerializer {
    fn serialize(&self, templates: &ResourceTemplates) -> Result<String> {
        Ok(serde_yaml::to_string(&templates.to_list())?)
    }

    fn deserialize(&self, content: &str) -> Result<ResourceTemplates> {
        let value: serde_json::Value = serde_yaml::from_str(content)?;
        Ok(ResourceTemplates::from_value(&value)?)
    }
}

/// JSON serializer
pub struct JsonSerializer;

impl ResourceTemplatesSerializer for JsonSerializer {
    fn serialize(&self, templates: &ResourceTemplates) -> Result<String> {
        Ok(serde_json::to_string_pretty(&templates.to_list())?)
    }

    fn deserialize(&self, content: &str) -> Result<ResourceTemplates> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Ok(ResourceTemplates::from_value(&value)?)
    }
}

/// Pick a serializer from a file extension (`yml`, `yaml` or `json`)
pub fn serializer_for_extension(extension: &str) -> Result<Box<dyn ResourceTemplatesSerializer>> {
    match extension.to_ascii_lowercase().as_str() {
        "yml" | "yaml" => Ok(Box::new(YamlSerializer)),
        "json" => Ok(Box::new(JsonSerializer)),
        other => bail!("Unsupported route description format: {}", other),
    }
}
