use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::resource_template::ResourceTemplate;
use super::template::{AddressExpander, UriTemplateExpander};
use super::{Params, TemplateEntry};
use crate::config::settings::ResourceTemplateSettings;
use crate::error::RouteError;

/// Named resource templates found anywhere in a tree, keyed by name
pub type NameIndex<'a> = HashMap<&'a str, &'a ResourceTemplate>;

/// An ordered collection of resource templates, usually the roots of a
/// route description or the children of one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTemplates {
    templates: Vec<ResourceTemplate>,
}

/// One line of the text report: link, name, options and template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub link: String,
    pub name: String,
    pub options: String,
    pub template: String,
}

impl TableRow {
    pub fn columns(&self) -> [&str; 4] {
        [&self.link, &self.name, &self.options, &self.template]
    }
}

impl ResourceTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from nodes, settings or generic structures (mixed freely)
    pub fn from_entries<I, E>(entries: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = E>,
        E: Into<TemplateEntry>,
    {
        let templates = entries
            .into_iter()
            .map(|entry| ResourceTemplate::from_entry(entry.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { templates })
    }

    pub fn from_settings(settings: Vec<ResourceTemplateSettings>) -> Result<Self, RouteError> {
        Self::from_entries(settings)
    }

    /// Build a collection from a generic structure list
    pub fn from_value(value: &serde_json::Value) -> Result<Self, RouteError> {
        let entries = value
            .as_array()
            .ok_or_else(|| RouteError::TypeMismatch(format!("{} is not a list", value)))?;

        let templates = entries
            .iter()
            .map(ResourceTemplate::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { templates })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResourceTemplate> {
        self.templates.get(index)
    }

    /// Every node in the collection, depth-first, parents before children
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![self.templates.iter()],
        }
    }

    /// Convert member templates to their settings equivalents
    pub fn to_list(&self) -> Vec<ResourceTemplateSettings> {
        self.templates.iter().map(ResourceTemplate::to_settings).collect()
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.to_list())
    }

    /// Index every named template in this collection and its descendants.
    /// When names collide, the one visited last wins.
    pub fn all_by_name(&self) -> NameIndex<'_> {
        self.all_by_name_into(NameIndex::new())
    }

    /// As `all_by_name`, adding to an existing index so several trees can
    /// share one
    pub fn all_by_name_into<'a>(&'a self, mut index: NameIndex<'a>) -> NameIndex<'a> {
        for rt in &self.templates {
            if let Some(name) = rt.name() {
                if index.insert(name, rt).is_some() {
                    tracing::warn!(name, "resource template name seen twice, keeping the later one");
                }
            }
            index = rt.resource_templates().all_by_name_into(index);
        }
        index
    }

    /// Flatten the tree into report rows, children indented under parents
    pub fn to_table(&self) -> Vec<TableRow> {
        let mut rows = Vec::new();
        self.collect_rows(None, &mut rows, "");
        rows
    }

    fn collect_rows(&self, parent: Option<&ResourceTemplate>, rows: &mut Vec<TableRow>, indent: &str) {
        for rt in &self.templates {
            let (link, new_params): (&str, Vec<&String>) = match parent {
                Some(parent) => (
                    rt.rel().unwrap_or(""),
                    rt.params()
                        .iter()
                        .filter(|p| !parent.params().contains(*p))
                        .collect(),
                ),
                None => (rt.name().unwrap_or(""), rt.params().iter().collect()),
            };
            let params = new_params
                .iter()
                .map(|p| format!("{{{}}}", p))
                .collect::<Vec<_>>()
                .join(", ");

            rows.push(TableRow {
                link: format!("{}{}{}", indent, link, params),
                name: rt.name().unwrap_or("").to_string(),
                options: rt.options().join(", "),
                template: rt.uri_template().or(rt.path_template()).unwrap_or("").to_string(),
            });

            rt.resource_templates()
                .collect_rows(Some(rt), rows, &format!("{}  ", indent));
        }
    }

    /// Partially expand every member with the given params, returning new templates
    pub fn partial_expand(&self, actual_params: &Params) -> Result<ResourceTemplates, RouteError> {
        let bound: Vec<&String> = actual_params.keys().collect();
        tracing::debug!(roots = self.templates.len(), params = ?bound, "partially expanding resource templates");
        self.partial_expand_with(&UriTemplateExpander::default(), actual_params)
    }

    pub fn partial_expand_with<E>(
        &self,
        expander: &E,
        actual_params: &Params,
    ) -> Result<ResourceTemplates, RouteError>
    where
        E: AddressExpander + ?Sized,
    {
        let templates = self
            .templates
            .iter()
            .map(|rt| rt.partial_expand_with(expander, actual_params))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { templates })
    }
}

impl<'a> IntoIterator for &'a ResourceTemplates {
    type Item = &'a ResourceTemplate;
    type IntoIter = std::slice::Iter<'a, ResourceTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

impl FromIterator<ResourceTemplate> for ResourceTemplates {
    fn from_iter<I: IntoIterator<Item = ResourceTemplate>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

/// Pre-order walk over a collection and all its descendants
pub struct Preorder<'a> {
    stack: Vec<std::slice::Iter<'a, ResourceTemplate>>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a ResourceTemplate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let siblings = self.stack.last_mut()?;
            match siblings.next() {
                Some(rt) => {
                    self.stack.push(rt.resource_templates().iter());
                    return Some(rt);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> ResourceTemplates {
        ResourceTemplates::from_value(&json!([
            {
                "name": "users",
                "resource_templates": [
                    {"name": "user", "params": ["user_id"], "resource_templates": [
                        {"name": "edit_user", "rel": "edit", "params": ["user_id"]}
                    ]},
                    {"name": "new_user", "rel": "new"}
                ]
            },
            {"name": "pages"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_list() {
        let err = ResourceTemplates::from_value(&json!({"name": "users"})).unwrap_err();
        assert!(matches!(err, RouteError::TypeMismatch(_)));
        assert!(err.to_string().contains("is not a list"));
    }

    #[test]
    fn test_from_value_rejects_non_mapping_member() {
        let err = ResourceTemplates::from_value(&json!([{"name": "users"}, "pages"])).unwrap_err();
        assert!(matches!(err, RouteError::TypeMismatch(_)));
    }

    #[test]
    fn test_preorder_visits_parents_first() {
        let names: Vec<_> = tree().preorder().filter_map(ResourceTemplate::name).map(str::to_string).collect();
        assert_eq!(names, vec!["users", "user", "edit_user", "new_user", "pages"]);
    }

    #[test]
    fn test_all_by_name() {
        let tree = tree();
        let index = tree.all_by_name();
        assert_eq!(index.len(), 5);
        assert_eq!(index["edit_user"].rel(), Some("edit"));
    }

    #[test]
    fn test_all_by_name_last_write_wins() {
        let tree = ResourceTemplates::from_value(&json!([
            {"name": "dup", "rel": "first", "resource_templates": [{"name": "dup", "rel": "nested"}]},
            {"name": "dup", "rel": "last"}
        ]))
        .unwrap();
        assert_eq!(tree.all_by_name()["dup"].rel(), Some("last"));
    }

    #[test]
    fn test_all_by_name_into_threads_index() {
        let first = tree();
        let second = ResourceTemplates::from_value(&json!([{"name": "admin"}])).unwrap();

        let index = second.all_by_name_into(first.all_by_name());
        assert_eq!(index.len(), 6);
        assert!(index.contains_key("admin"));
        assert!(index.contains_key("users"));
    }

    #[test]
    fn test_unnamed_templates_are_not_indexed() {
        let tree = ResourceTemplates::from_value(&json!([{"path_template": "/x"}])).unwrap();
        assert!(tree.all_by_name().is_empty());
    }

    #[test]
    fn test_to_table_rows() {
        let rows = tree().to_table();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].link, "users");
        assert_eq!(rows[1].link, "  {user_id}");
        assert_eq!(rows[2].link, "    edit");
        assert_eq!(rows[3].link, "  new");
        assert_eq!(rows[4].columns(), ["pages", "pages", "", ""]);
    }

    #[test]
    fn test_collect_into_resource_templates() {
        let collected: ResourceTemplates = tree().iter().cloned().collect();
        assert_eq!(collected, tree());
    }
}
