use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use super::resource_templates::ResourceTemplates;
use super::template::{AddressExpander, UriTemplateExpander};
use super::{Params, TemplateEntry};
use crate::config::settings::ResourceTemplateSettings;
use crate::error::{RouteError, TemplateResultExt};

/// One node of a route description: a named, linked resource template.
///
/// Nodes are immutable once built. Partial expansion produces a new tree
/// and leaves the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResourceTemplateSettings", into = "ResourceTemplateSettings")]
pub struct ResourceTemplate {
    name: Option<String>,
    rel: Option<String>,
    uri_template: Option<String>,
    path_template: Option<String>,
    params: Vec<String>,
    optional_params: Vec<String>,
    options: Vec<String>,
    resource_templates: ResourceTemplates,
}

impl ResourceTemplate {
    /// Build a node (and its children) from explicit settings.
    ///
    /// Fails with `DuplicateParameter` if a name appears twice across
    /// `params` and `optional_params`.
    pub fn from_settings(settings: ResourceTemplateSettings) -> Result<Self, RouteError> {
        let mut seen = HashSet::new();
        for param in settings.params.iter().chain(&settings.optional_params) {
            if !seen.insert(param.as_str()) {
                return Err(RouteError::DuplicateParameter(param.clone()));
            }
        }

        Ok(Self {
            name: non_empty(settings.name),
            rel: non_empty(settings.rel),
            uri_template: non_empty(settings.uri_template),
            path_template: non_empty(settings.path_template),
            params: settings.params,
            optional_params: settings.optional_params,
            options: settings.options,
            resource_templates: ResourceTemplates::from_settings(settings.resource_templates)?,
        })
    }

    /// Build a node from a generic structure such as deserialized JSON or YAML
    pub fn from_value(value: &serde_json::Value) -> Result<Self, RouteError> {
        let mut map = value
            .as_object()
            .cloned()
            .ok_or_else(|| RouteError::TypeMismatch(format!("{} is not a mapping", value)))?;

        let children = map.remove("resource_templates");
        let settings = ResourceTemplateSettings::deserialize(serde_json::Value::Object(map))
            .map_err(|e| RouteError::TypeMismatch(e.to_string()))?;
        let node = Self::from_settings(settings)?;

        match children {
            None | Some(serde_json::Value::Null) => Ok(node),
            Some(children) => Ok(Self {
                resource_templates: ResourceTemplates::from_value(&children)?,
                ..node
            }),
        }
    }

    pub fn from_entry(entry: TemplateEntry) -> Result<Self, RouteError> {
        match entry {
            TemplateEntry::Structure(value) => Self::from_value(&value),
            TemplateEntry::Settings(settings) => Self::from_settings(settings),
            TemplateEntry::Template(template) => Ok(template),
        }
    }

    /// Replace this node's children with the given entries, materializing
    /// any structures or settings among them.
    pub fn with_resource_templates<I, E>(self, entries: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = E>,
        E: Into<TemplateEntry>,
    {
        Ok(Self {
            resource_templates: ResourceTemplates::from_entries(entries)?,
            ..self
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rel(&self) -> Option<&str> {
        self.rel.as_deref()
    }

    pub fn uri_template(&self) -> Option<&str> {
        self.uri_template.as_deref()
    }

    pub fn path_template(&self) -> Option<&str> {
        self.path_template.as_deref()
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn optional_params(&self) -> &[String] {
        &self.optional_params
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn resource_templates(&self) -> &ResourceTemplates {
        &self.resource_templates
    }

    /// Returns params then optional_params, dropping any the parent already requires
    pub fn positional_params(&self, parent: Option<&ResourceTemplate>) -> Vec<String> {
        self.params
            .iter()
            .chain(&self.optional_params)
            .filter(|p| parent.map_or(true, |parent| !parent.params.contains(*p)))
            .cloned()
            .collect()
    }

    /// Returns the uri_template, or one built from `base` and the path_template
    pub fn uri_template_for_base(&self, base: Option<&str>) -> Option<String> {
        match (&self.uri_template, base, &self.path_template) {
            (Some(uri_template), _, _) => Some(uri_template.clone()),
            (None, Some(base), Some(path_template)) if !base.is_empty() => {
                Some(format!("{}{}", base, path_template))
            }
            _ => None,
        }
    }

    /// Required params that `actual_params` does not bind, in declared order
    pub fn missing_params(&self, actual_params: &Params) -> Vec<String> {
        self.params
            .iter()
            .filter(|p| !actual_params.contains_key(*p))
            .cloned()
            .collect()
    }

    fn check_required(&self, actual_params: &Params) -> Result<(), RouteError> {
        let missing = self.missing_params(actual_params);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RouteError::MissingRequiredParameters(missing))
        }
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Expand the address for this resource, falling back to `base` + path_template
    pub fn uri_for(&self, actual_params: &Params, base: Option<&str>) -> Result<String, RouteError> {
        self.uri_for_with(&UriTemplateExpander::default(), actual_params, base)
    }

    pub fn uri_for_with<E>(
        &self,
        expander: &E,
        actual_params: &Params,
        base: Option<&str>,
    ) -> Result<String, RouteError>
    where
        E: AddressExpander + ?Sized,
    {
        self.check_required(actual_params)?;

        let template = self.uri_template_for_base(base).ok_or_else(|| {
            RouteError::UnresolvableTemplate(format!(
                "{}: uri_template_for_base({:?}) is None; path_template={:?}",
                self.label(),
                base,
                self.path_template
            ))
        })?;

        expander.expand(&template, actual_params).template_err()
    }

    /// Like `uri_for`, parsed into a `Url`
    pub fn parsed_uri_for(&self, actual_params: &Params, base: Option<&str>) -> Result<Url, RouteError> {
        Ok(Url::parse(&self.uri_for(actual_params, base)?)?)
    }

    /// Expand this resource's own path_template
    pub fn path_for(&self, actual_params: &Params) -> Result<String, RouteError> {
        self.path_for_with(&UriTemplateExpander::default(), actual_params)
    }

    pub fn path_for_with<E>(&self, expander: &E, actual_params: &Params) -> Result<String, RouteError>
    where
        E: AddressExpander + ?Sized,
    {
        self.check_required(actual_params)?;

        let path_template = self.path_template.as_deref().ok_or_else(|| {
            RouteError::UnresolvableTemplate(format!("{}: path_template is None", self.label()))
        })?;

        expander.expand(path_template, actual_params).template_err()
    }

    /// Return a new resource template (and subtree) with the given params
    /// substituted into its templates and removed from its param lists.
    pub fn partial_expand(&self, actual_params: &Params) -> Result<ResourceTemplate, RouteError> {
        self.partial_expand_with(&UriTemplateExpander::default(), actual_params)
    }

    pub fn partial_expand_with<E>(
        &self,
        expander: &E,
        actual_params: &Params,
    ) -> Result<ResourceTemplate, RouteError>
    where
        E: AddressExpander + ?Sized,
    {
        tracing::trace!(name = self.label(), "partially expanding resource template");

        let expand = |template: &Option<String>| -> Result<Option<String>, RouteError> {
            template
                .as_deref()
                .map(|t| expander.expand_partial(t, actual_params).template_err())
                .transpose()
        };
        let unbound = |params: &[String]| -> Vec<String> {
            params
                .iter()
                .filter(|p| !actual_params.contains_key(*p))
                .cloned()
                .collect()
        };

        Ok(Self {
            name: self.name.clone(),
            rel: self.rel.clone(),
            uri_template: expand(&self.uri_template)?,
            path_template: expand(&self.path_template)?,
            params: unbound(&self.params),
            optional_params: unbound(&self.optional_params),
            options: self.options.clone(),
            resource_templates: self
                .resource_templates
                .partial_expand_with(expander, actual_params)?,
        })
    }

    /// Direct children with the given rel, in order
    pub fn find_by_rel(&self, rel: &str) -> Vec<&ResourceTemplate> {
        self.resource_templates
            .iter()
            .filter(|rt| rt.rel.as_deref() == Some(rel))
            .collect()
    }

    /// Convert to settings, perhaps for a further conversion to JSON or YAML
    pub fn to_settings(&self) -> ResourceTemplateSettings {
        ResourceTemplateSettings {
            name: self.name.clone(),
            rel: self.rel.clone(),
            uri_template: self.uri_template.clone(),
            path_template: self.path_template.clone(),
            params: self.params.clone(),
            optional_params: self.optional_params.clone(),
            options: self.options.clone(),
            resource_templates: self.resource_templates.to_list(),
        }
    }

    /// Convert to the generic structure format
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.to_settings())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl TryFrom<ResourceTemplateSettings> for ResourceTemplate {
    type Error = RouteError;

    fn try_from(settings: ResourceTemplateSettings) -> Result<Self, Self::Error> {
        Self::from_settings(settings)
    }
}

impl From<ResourceTemplate> for ResourceTemplateSettings {
    fn from(template: ResourceTemplate) -> Self {
        template.to_settings()
    }
}
