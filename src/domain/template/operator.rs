// Expression operator trait and implementations

use std::collections::HashMap;

/// A template variable after default substitution and percent-encoding.
/// `value` is `None` when the variable is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVar<'a> {
    pub name: &'a str,
    pub value: Option<String>,
}

/// Trait for `{-op|arg|vars}` expansions
pub trait ExpressionOperator: Send + Sync {
    fn name(&self) -> &'static str;
    fn expand(&self, arg: &str, vars: &[ResolvedVar<'_>]) -> String;
}

fn defined<'v>(vars: &'v [ResolvedVar<'_>]) -> Vec<&'v str> {
    vars.iter().filter_map(|var| var.value.as_deref()).collect()
}

/// `{-prefix|sep|var}`: separator before each defined value
pub struct PrefixOp;

impl ExpressionOperator for PrefixOp {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn expand(&self, arg: &str, vars: &[ResolvedVar<'_>]) -> String {
        defined(vars).iter().map(|value| format!("{arg}{value}")).collect()
    }
}

/// `{-suffix|sep|var}`: separator after each defined value
pub struct SuffixOp;

impl ExpressionOperator for SuffixOp {
    fn name(&self) -> &'static str {
        "suffix"
    }

    fn expand(&self, arg: &str, vars: &[ResolvedVar<'_>]) -> String {
        defined(vars).iter().map(|value| format!("{value}{arg}")).collect()
    }
}

/// `{-join|sep|a,b}`: `name=value` pairs joined by the separator
pub struct JoinOp;

impl ExpressionOperator for JoinOp {
    fn name(&self) -> &'static str {
        "join"
    }

    fn expand(&self, arg: &str, vars: &[ResolvedVar<'_>]) -> String {
        vars.iter()
            .filter_map(|var| var.value.as_ref().map(|value| format!("{}={}", var.name, value)))
            .collect::<Vec<_>>()
            .join(arg)
    }
}

/// `{-opt|text|vars}`: text when any variable is defined
pub struct OptOp;

impl ExpressionOperator for OptOp {
    fn name(&self) -> &'static str {
        "opt"
    }

    fn expand(&self, arg: &str, vars: &[ResolvedVar<'_>]) -> String {
        if !defined(vars).is_empty() {
            arg.to_string()
        } else {
            String::new()
        }
    }
}

/// `{-neg|text|vars}`: text when no variable is defined
pub struct NegOp;

impl ExpressionOperator for NegOp {
    fn name(&self) -> &'static str {
        "neg"
    }

    fn expand(&self, arg: &str, vars: &[ResolvedVar<'_>]) -> String {
        if defined(vars).is_empty() {
            arg.to_string()
        } else {
            String::new()
        }
    }
}

/// Registry for expression operators
pub struct OperatorRegistry {
    operators: HashMap<&'static str, Box<dyn ExpressionOperator>>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            operators: HashMap::new(),
        };
        registry.register(Box::new(PrefixOp));
        registry.register(Box::new(SuffixOp));
        registry.register(Box::new(JoinOp));
        registry.register(Box::new(OptOp));
        registry.register(Box::new(NegOp));
        registry
    }

    pub fn register(&mut self, op: Box<dyn ExpressionOperator>) {
        self.operators.insert(op.name(), op);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ExpressionOperator> {
        self.operators.get(name).map(|b| b.as_ref())
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
