// Common test fixtures shared across test files

use described_routes::{Params, ResourceTemplates};
use serde_json::json;

/// Build a params map from literal pairs
#[allow(dead_code)]
pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// The users/articles route description used throughout the tests
#[allow(dead_code)]
pub fn users_templates() -> ResourceTemplates {
    ResourceTemplates::from_value(&json!([
        {
            "name": "users",
            "uri_template": "http://example.com/users{-prefix|.|format}",
            "path_template": "/users{-prefix|.|format}",
            "optional_params": ["format"],
            "options": ["GET", "POST"],
            "resource_templates": [
                {
                    "name": "user",
                    "uri_template": "http://example.com/users/{user_id}{-prefix|.|format}",
                    "path_template": "/users/{user_id}{-prefix|.|format}",
                    "params": ["user_id"],
                    "optional_params": ["format"],
                    "options": ["GET", "PUT", "DELETE"],
                    "resource_templates": [
                        {
                            "name": "user_articles",
                            "rel": "articles",
                            "uri_template": "http://example.com/users/{user_id}/articles{-prefix|.|format}",
                            "path_template": "/users/{user_id}/articles{-prefix|.|format}",
                            "params": ["user_id"],
                            "optional_params": ["format"],
                            "options": ["GET", "POST"],
                            "resource_templates": [
                                {
                                    "name": "user_article",
                                    "uri_template": "http://example.com/users/{user_id}/articles/{article_id}{-prefix|.|format}",
                                    "path_template": "/users/{user_id}/articles/{article_id}{-prefix|.|format}",
                                    "params": ["user_id", "article_id"],
                                    "optional_params": ["format"],
                                    "options": ["GET", "PUT", "DELETE"]
                                },
                                {
                                    "name": "new_user_article",
                                    "rel": "new",
                                    "uri_template": "http://example.com/users/{user_id}/articles/new{-prefix|.|format}",
                                    "path_template": "/users/{user_id}/articles/new{-prefix|.|format}",
                                    "params": ["user_id"],
                                    "optional_params": ["format"],
                                    "options": ["GET"]
                                }
                            ]
                        },
                        {
                            "name": "edit_user",
                            "rel": "edit",
                            "uri_template": "http://example.com/users/{user_id}/edit{-prefix|.|format}",
                            "path_template": "/users/{user_id}/edit{-prefix|.|format}",
                            "params": ["user_id"],
                            "optional_params": ["format"],
                            "options": ["GET"]
                        }
                    ]
                }
            ]
        }
    ]))
    .expect("fixture should be a valid route description")
}
