// Template module for draft URI templates
//
// Parses and expands address patterns such as
// `http://example.com/users/{user_id}{-prefix|.|format}`, either fully or
// partially (unknown placeholders survive for a later expansion).

mod ast;
mod expander;
mod operator;
mod parser;

pub use ast::{Expression, OperatorCall, Template, TemplatePart, VariableSpec};
pub use expander::{AddressExpander, UriTemplateExpander};
pub use operator::{ExpressionOperator, OperatorRegistry, ResolvedVar};
pub use parser::TemplateParser;
