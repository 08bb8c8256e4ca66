// Error handling for described_routes

use thiserror::Error;

/// Errors raised by the resource template model
#[derive(Debug, Error)]
pub enum RouteError {
    /// A value was neither a structure mapping nor an already-built resource template
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Required params absent from the supplied mapping, in declared order
    #[error("missing params {}", .0.join(", "))]
    MissingRequiredParameters(Vec<String>),

    /// No usable uri_template/path_template for the requested expansion
    #[error("Unresolvable template: {0}")]
    UnresolvableTemplate(String),

    #[error("Duplicate parameter: {0}")]
    DuplicateParameter(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid uri: {0}")]
    InvalidUri(#[from] url::ParseError),
}

// Extension trait for expander result handling
pub trait TemplateResultExt<T> {
    /// Convert expander errors to RouteError::InvalidTemplate, keeping the full cause chain
    fn template_err(self) -> Result<T, RouteError>;
}

impl<T> TemplateResultExt<T> for anyhow::Result<T> {
    fn template_err(self) -> Result<T, RouteError> {
        self.map_err(|e| RouteError::InvalidTemplate(format!("{:#}", e)))
    }
}
