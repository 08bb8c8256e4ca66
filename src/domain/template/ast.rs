// Abstract Syntax Tree types for URI templates

use std::fmt;

/// Represents a parsed template as a list of parts
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

impl Template {
    pub fn new(parts: Vec<TemplatePart>) -> Self {
        Self { parts }
    }

    /// Get all variables in this template, in order of appearance
    pub fn variables(&self) -> Vec<&VariableSpec> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Expression(expr) => Some(expr.variables.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

/// A template consists of literal strings and `{...}` expressions
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Expression(Expression),
}

/// A single `{...}` expression.
///
/// `raw` is the exact source text including the braces, so a partial
/// expansion can put an unresolved expression back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub operator: Option<OperatorCall>,
    pub variables: Vec<VariableSpec>,
    pub raw: String,
}

impl Expression {
    /// True when every variable this expression names is in `known`
    pub fn is_resolved_by(&self, known: impl Fn(&str) -> bool) -> bool {
        self.variables.iter().all(|var| known(&var.name))
    }

    /// True when at least one variable this expression names is in `known`
    pub fn is_touched_by(&self, known: impl Fn(&str) -> bool) -> bool {
        self.variables.iter().any(|var| known(&var.name))
    }

    /// Same operator over a different variable list, with `raw` rebuilt
    pub fn with_variables(&self, variables: Vec<VariableSpec>) -> Self {
        let mut raw = String::from("{");
        if let Some(call) = &self.operator {
            raw.push_str(&format!("-{}|{}|", call.name, call.arg));
        }
        raw.push_str(
            &variables
                .iter()
                .map(VariableSpec::to_string)
                .collect::<Vec<_>>()
                .join(","),
        );
        raw.push('}');

        Self {
            operator: self.operator.clone(),
            variables,
            raw,
        }
    }
}

/// The `-op|arg|` head of an operator expression such as `{-prefix|.|format}`
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorCall {
    pub name: String,
    pub arg: String,
}

/// A variable reference with an optional default value.
///
/// Defaults are held decoded; in template text they are percent-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    pub name: String,
    pub default: Option<String>,
}

impl VariableSpec {
    pub fn new(name: String) -> Self {
        Self {
            name,
            default: None,
        }
    }

    pub fn with_default(mut self, default: String) -> Self {
        self.default = Some(default);
        self
    }
}

impl fmt::Display for VariableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={}", self.name, urlencoding::encode(default)),
            None => write!(f, "{}", self.name),
        }
    }
}
