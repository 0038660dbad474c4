//! Shared schema for generator tests.

use crudforge_schema::{Schema, resolve};
use serde_json::{Value, json};

pub(crate) fn schema_from(value: Value) -> Schema {
    let Value::Object(document) = value else {
        panic!("fixture must be a mapping");
    };
    Schema::from_document(resolve(document).unwrap()).unwrap()
}

/// Users and blog posts; posts link to users through `author_id`.
pub(crate) fn blog() -> Schema {
    schema_from(json!({
        "name": "Blog",
        "author": {"name": "Ada", "email": "ada@example.com"},
        "tables": {
            "users": {
                "icon": "user",
                "fields": {
                    "name": {"type": "string", "input": "text", "rules": "required"},
                    "password": {"type": "string", "input": "password", "rules": "required|min:8"}
                }
            },
            "blog_posts": {
                "soft_delete": true,
                "fields": {
                    "title": {"type": "string:120", "input": "text", "rules": "required|max:120"},
                    "cover_image": {"type": "string", "input": "image", "rules": "required|image"},
                    "author_id": {
                        "type": "integer",
                        "input": {
                            "type": "select",
                            "options": {"table": "users", "value": "id", "label": "name"}
                        },
                        "rules": "required|exists:users,id"
                    },
                    "tags": {
                        "type": "json",
                        "input": {"type": "checkbox", "options": {"news": "News", "tips": "Tips"}}
                    },
                    "published_at": {"type": "timestamp"}
                }
            }
        }
    }))
}
