use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::ResourceTemplates;
use crate::services::serializers::serializer_for_extension;

pub const DEFAULT_ROUTES_FILE: &str = "routes.yml";

/// Load a route description file, YAML or JSON depending on its extension.
/// Falls back to `routes.yml` in the working directory.
pub fn load_resource_templates(maybe_path: Option<&Path>) -> Result<ResourceTemplates> {
    let path = maybe_path.unwrap_or_else(|| Path::new(DEFAULT_ROUTES_FILE));

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .with_context(|| format!("Route description {} has no file extension", path.display()))?;
    let serializer = serializer_for_extension(extension)?;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let templates = serializer
        .deserialize(&content)
        .with_context(|| format!("Invalid route description in {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        templates = templates.preorder().count(),
        "loaded route description"
    );
    Ok(templates)
}
