// Partial expansion of resource templates and whole trees
mod common;

use std::collections::HashMap;

use anyhow::Result;
use common::{params, users_templates};
use described_routes::{AddressExpander, Params, ResourceTemplate, ResourceTemplates};
use serde_json::json;

fn assert_params_reduced(original: &ResourceTemplate, expanded: &ResourceTemplate, bound: &Params) {
    let unbound = |names: &[String]| -> Vec<String> {
        names
            .iter()
            .filter(|n| !bound.contains_key(*n))
            .cloned()
            .collect()
    };
    assert_eq!(expanded.params(), unbound(original.params()).as_slice());
    assert_eq!(
        expanded.optional_params(),
        unbound(original.optional_params()).as_slice()
    );
    assert_eq!(
        original.resource_templates().len(),
        expanded.resource_templates().len()
    );
    for (o, e) in original
        .resource_templates()
        .iter()
        .zip(expanded.resource_templates())
    {
        assert_params_reduced(o, e, bound);
    }
}

#[test]
fn test_partial_expand_user_articles() {
    let templates = users_templates();
    let user_articles = templates.all_by_name()["user_articles"];

    let expanded = user_articles
        .partial_expand(&params(&[("user_id", "dojo"), ("format", "json")]))
        .unwrap();

    assert!(expanded.params().is_empty());
    assert!(expanded.optional_params().is_empty());
    assert_eq!(
        expanded.uri_template(),
        Some("http://example.com/users/dojo/articles.json")
    );
    assert_eq!(expanded.path_template(), Some("/users/dojo/articles.json"));

    let user_article = expanded.resource_templates().get(0).unwrap();
    assert_eq!(user_article.params(), ["article_id"]);
    assert_eq!(
        user_article.uri_template(),
        Some("http://example.com/users/dojo/articles/{article_id}.json")
    );

    // The rest of the node is carried over as is
    assert_eq!(expanded.name(), Some("user_articles"));
    assert_eq!(expanded.rel(), Some("articles"));
    assert_eq!(expanded.options(), ["GET", "POST"]);
}

#[test]
fn test_partially_expanded_template_expands_fully_later() {
    let templates = users_templates();
    let user_article = templates.all_by_name()["user_article"];

    let expanded = user_article
        .partial_expand(&params(&[("user_id", "dojo")]))
        .unwrap();
    assert_eq!(expanded.params(), ["article_id"]);
    assert_eq!(expanded.optional_params(), ["format"]);

    let uri = expanded
        .uri_for(&params(&[("article_id", "7"), ("format", "json")]), None)
        .unwrap();
    assert_eq!(uri, "http://example.com/users/dojo/articles/7.json");
}

#[test]
fn test_partially_bound_expression_keeps_bound_values() {
    let search = ResourceTemplate::from_value(&json!({
        "name": "search",
        "uri_template": "http://example.com/search{-prefix|?|q}{-join|&|lang,page}",
        "params": ["q"],
        "optional_params": ["lang", "page"]
    }))
    .unwrap();

    let expanded = search
        .partial_expand(&params(&[("q", "rust"), ("lang", "en")]))
        .unwrap();
    assert_eq!(
        expanded.uri_template(),
        Some("http://example.com/search?rust{-join|&|lang=en,page}")
    );
    assert_eq!(expanded.optional_params(), ["page"]);

    let all = params(&[("q", "rust"), ("lang", "en"), ("page", "2")]);
    assert_eq!(
        expanded.uri_for(&params(&[("page", "2")]), None).unwrap(),
        search.uri_for(&all, None).unwrap()
    );
    assert_eq!(
        expanded.uri_for(&Params::new(), None).unwrap(),
        "http://example.com/search?rustlang=en"
    );
}

#[test]
fn test_param_lists_reduce_recursively() {
    let templates = users_templates();
    for bound in [
        params(&[]),
        params(&[("user_id", "dojo")]),
        params(&[("format", "json")]),
        params(&[("user_id", "dojo"), ("article_id", "1"), ("format", "json")]),
        params(&[("unrelated", "x")]),
    ] {
        let expanded = templates.partial_expand(&bound).unwrap();
        for (o, e) in templates.iter().zip(&expanded) {
            assert_params_reduced(o, e, &bound);
        }
    }
}

#[test]
fn test_partial_expand_does_not_mutate_source() {
    let templates = users_templates();
    let before = templates.clone();

    let expanded = templates
        .partial_expand(&params(&[("user_id", "dojo"), ("format", "json")]))
        .unwrap();

    assert_eq!(templates, before);
    assert_ne!(expanded, templates);
}

#[test]
fn test_partial_expand_tree_keeps_shape() {
    let templates = users_templates();
    let expanded = templates
        .partial_expand(&params(&[("user_id", "dojo")]))
        .unwrap();

    let names = |t: &ResourceTemplates| -> Vec<Option<String>> {
        t.preorder().map(|rt| rt.name().map(str::to_string)).collect()
    };
    assert_eq!(names(&expanded), names(&templates));

    let edit_user = expanded.all_by_name()["edit_user"];
    assert_eq!(
        edit_user.uri_template(),
        Some("http://example.com/users/dojo/edit{-prefix|.|format}")
    );
    assert!(edit_user.params().is_empty());
}

#[test]
fn test_partial_expand_with_no_params_is_identity() {
    let templates = users_templates();
    assert_eq!(templates.partial_expand(&Params::new()).unwrap(), templates);
}

/// Expander that tags every partial expansion, to show the tree delegates to it
struct TaggingExpander;

impl AddressExpander for TaggingExpander {
    fn expand(&self, template: &str, _params: &HashMap<String, String>) -> Result<String> {
        Ok(template.to_string())
    }

    fn expand_partial(&self, template: &str, _known: &HashMap<String, String>) -> Result<String> {
        Ok(format!("partial:{}", template))
    }
}

#[test]
fn test_partial_expand_with_custom_expander() {
    let templates = users_templates();
    let expanded = templates
        .partial_expand_with(&TaggingExpander, &params(&[("user_id", "dojo")]))
        .unwrap();

    for rt in expanded.preorder() {
        assert!(rt.uri_template().unwrap().starts_with("partial:http://"));
        assert!(rt.path_template().unwrap().starts_with("partial:/"));
    }
}
