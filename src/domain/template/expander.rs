// Template expansion, full and partial

use anyhow::{Context, Result};
use std::collections::HashMap;

use super::ast::{Expression, Template, TemplatePart, VariableSpec};
use super::operator::{OperatorRegistry, ResolvedVar};
use super::parser::TemplateParser;

/// Expands address templates against a parameter mapping.
///
/// `expand_partial` substitutes only the variables present in `known` and
/// leaves every other placeholder in the output, so the result can be fed
/// to a later full expansion.
pub trait AddressExpander {
    fn expand(&self, template: &str, params: &HashMap<String, String>) -> Result<String>;
    fn expand_partial(&self, template: &str, known: &HashMap<String, String>) -> Result<String>;
}

/// Default expander for `{var}`, `{var=default}` and `{-op|arg|vars}` templates
pub struct UriTemplateExpander {
    operator_registry: OperatorRegistry,
}

impl UriTemplateExpander {
    pub fn new() -> Self {
        Self {
            operator_registry: OperatorRegistry::new(),
        }
    }

    /// Expand a parsed template with the given variables
    pub fn resolve(&self, template: &Template, variables: &HashMap<String, String>) -> Result<String> {
        let mut result = String::new();

        for part in &template.parts {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Expression(expr) => {
                    result.push_str(&self.expand_expression(expr, variables)?)
                }
            }
        }

        Ok(result)
    }

    /// Expand the expressions whose variables are all known. An expression
    /// with only some known variables keeps its placeholder, with each known
    /// value bound as that variable's default.
    pub fn resolve_partial(
        &self,
        template: &Template,
        known: &HashMap<String, String>,
    ) -> Result<String> {
        let is_known = |name: &str| known.contains_key(name);
        let mut result = String::new();

        for part in &template.parts {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Expression(expr) if expr.is_resolved_by(is_known) => {
                    result.push_str(&self.expand_expression(expr, known)?)
                }
                TemplatePart::Expression(expr) if expr.is_touched_by(is_known) => {
                    result.push_str(&bind_known(expr, known).raw)
                }
                TemplatePart::Expression(expr) => result.push_str(&expr.raw),
            }
        }

        Ok(result)
    }

    fn expand_expression(&self, expr: &Expression, variables: &HashMap<String, String>) -> Result<String> {
        // Empty strings count as undefined, same as a missing key
        let resolved: Vec<ResolvedVar<'_>> = expr
            .variables
            .iter()
            .map(|var| ResolvedVar {
                name: &var.name,
                value: variables
                    .get(&var.name)
                    .filter(|v| !v.is_empty())
                    .or(var.default.as_ref())
                    .map(|v| urlencoding::encode(v).into_owned()),
            })
            .collect();

        match &expr.operator {
            None => Ok(resolved
                .iter()
                .filter_map(|var| var.value.as_deref())
                .collect::<Vec<_>>()
                .join(",")),
            Some(call) => {
                let operator = self
                    .operator_registry
                    .get(&call.name)
                    .with_context(|| format!("Unknown template operator '{}' in {}", call.name, expr.raw))?;
                Ok(operator.expand(&call.arg, &resolved))
            }
        }
    }
}

/// Known variables become defaults; known but undefined ones are dropped,
/// as they expand to nothing under every operator.
fn bind_known(expr: &Expression, known: &HashMap<String, String>) -> Expression {
    let variables = expr
        .variables
        .iter()
        .filter_map(|var| match known.get(&var.name) {
            None => Some(var.clone()),
            Some(value) => Some(value)
                .filter(|v| !v.is_empty())
                .or(var.default.as_ref())
                .map(|value| VariableSpec::new(var.name.clone()).with_default(value.clone())),
        })
        .collect();
    expr.with_variables(variables)
}

impl AddressExpander for UriTemplateExpander {
    fn expand(&self, template: &str, params: &HashMap<String, String>) -> Result<String> {
        let parsed = TemplateParser::parse(template)
            .with_context(|| format!("Invalid template syntax: {}", template))?;
        tracing::trace!(template, "expanding template");
        self.resolve(&parsed, params)
    }

    fn expand_partial(&self, template: &str, known: &HashMap<String, String>) -> Result<String> {
        let parsed = TemplateParser::parse(template)
            .with_context(|| format!("Invalid template syntax: {}", template))?;
        tracing::trace!(template, "partially expanding template");
        self.resolve_partial(&parsed, known)
    }
}

impl Default for UriTemplateExpander {
    fn default() -> Self {
        Self::new()
    }
}
