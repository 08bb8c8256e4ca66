//! Framework-neutral metadata describing the URI structure of a web
//! application.
//!
//! A route description is a tree of [`ResourceTemplate`]s: named, linked
//! resources with an address pattern, required and optional params and the
//! operations they allow. Trees can be built from generic JSON/YAML
//! structures, indexed by name, walked by relation, and partially expanded
//! into smaller trees once some params are known.
//!
//! ```
//! use described_routes::{Params, ResourceTemplates};
//! use serde_json::json;
//!
//! let templates = ResourceTemplates::from_value(&json!([{
//!     "name": "user",
//!     "uri_template": "http://example.com/users/{user_id}{-prefix|.|format}",
//!     "params": ["user_id"],
//!     "optional_params": ["format"]
//! }]))?;
//!
//! let params: Params = [("user_id", "dojo"), ("format", "json")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! let user = templates.all_by_name()["user"];
//! assert_eq!(user.uri_for(&params, None)?, "http://example.com/users/dojo.json");
//! # Ok::<(), described_routes::RouteError>(())
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod services;

pub use config::settings::ResourceTemplateSettings;
pub use domain::template::{AddressExpander, UriTemplateExpander};
pub use domain::{
    NameIndex, Params, Preorder, ResourceTemplate, ResourceTemplates, TableRow, TemplateEntry,
};
pub use error::RouteError;
pub use services::text_report::TextReport;
