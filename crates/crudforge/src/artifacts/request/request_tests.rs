#![allow(non_snake_case)]

use super::*;
use crate::artifacts::fixtures::blog;

const CREATE_RULES: &str = "    public function rules()
    {
        return [
            'title' => 'required|max:120',
            'cover_image' => 'required|image',
            'author_id' => 'required|exists:users,id'
        ];
    }";

#[test]
fn create_request_class___collects_rules_of_input_fields() {
    let schema = blog();
    let posts = schema.table("blog_posts").unwrap();

    let code = create_request_class(&schema, posts).render();

    assert!(code.starts_with("<?php\n\nnamespace App\\Http\\Requests;\n\nuse Illuminate\\Foundation\\Http\\FormRequest;\n"));
    assert!(code.contains("class CreateBlogPostRequest extends FormRequest\n{"));
    assert!(code.contains(CREATE_RULES), "{code}");
}

#[test]
fn create_request_class___authorizes_everyone() {
    let schema = blog();
    let users = schema.table("users").unwrap();

    let code = create_request_class(&schema, users).render();

    let authorize = "    /**
     * Determine if the user is authorized to make this request.
     *
     * @return bool
     */
    public function authorize()
    {
        return true;
    }";
    assert!(code.contains(authorize), "{code}");
}

#[test]
fn update_request_class___relaxes_required_uploads() {
    let schema = blog();
    let posts = schema.table("blog_posts").unwrap();

    let class = update_request_class(&schema, posts);
    let code = class.render();

    assert_eq!(class.name(), "UpdateBlogPostRequest");
    assert!(code.contains("'cover_image' => 'image',"));
    assert!(code.contains("'title' => 'required|max:120',"));
}

#[test]
fn request_class___without_rules___returns_empty_array() {
    let schema = crate::artifacts::fixtures::schema_from(serde_json::json!({
        "tables": {"notes": {"fields": {"body": {"type": "text", "input": "textarea"}}}}
    }));

    let code = create_request_class(&schema, &schema.tables()[0]).render();

    assert!(code.contains("        return [];\n"));
}
