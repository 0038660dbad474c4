#![allow(non_snake_case)]

use super::*;
use crate::artifacts::fixtures::{blog, schema_from};

fn posts_view(render: fn(&Schema, &Table) -> String) -> String {
    let schema = blog();
    render(&schema, schema.table("blog_posts").unwrap())
}

#[test]
fn list_view___extends_layout_with_page_title() {
    let code = posts_view(list_view);

    assert!(code.starts_with(
        "@extends('layout.master')\n\n@section('content')\n<h2 class=\"page-title\">{{ $title }}</h2>\n<div class=\"page-actions\">\n"
    ));
    assert!(code.ends_with("{!! $blog_posts->links() !!}\n@endsection\n"), "{code}");
}

#[test]
fn list_view___one_column_per_visible_input() {
    let code = posts_view(list_view);

    assert!(code.contains("            <th class=\"column-title\">Title</th>\n"), "{code}");
    assert!(code.contains("            <td class=\"column-title\">{{ $blogPost['title'] }}</td>\n"));
    assert!(code.contains("<td colspan=\"6\" class=\"text-center\">Records empty.</td>"));
    assert!(!code.contains("column-published_at"));
}

#[test]
fn list_view___iterates_the_paginator_from_the_controller() {
    let code = posts_view(list_view);

    assert!(code.contains("        @foreach($blog_posts->items() as $i => $blogPost)\n        <tr>\n"));
    assert!(code.contains("<td class=\"text-center column-number\">{{ $blog_posts->firstItem() + $i }}</td>"));
}

#[test]
fn list_view___row_actions_link_to_routes() {
    let code = posts_view(list_view);

    assert!(code.contains("href=\"{{ route('admin::blog-posts.page-detail', [$blogPost->getKey()]) }}\">Show</a>"));
    assert!(code.contains("href=\"{{ route('admin::blog-posts.form-edit', [$blogPost->getKey()]) }}\">Edit</a>"));
    assert!(code.contains("href=\"{{ route('admin::blog-posts.delete', [$blogPost->getKey()]) }}\" onclick="));
    assert!(code.contains("<a class=\"btn btn-primary\" href=\"{{ route('admin::blog-posts.form-create') }}\">Create Blog Post</a>"));
}

#[test]
fn list_view___hidden_field___has_no_column() {
    let schema = blog();
    let code = list_view(&schema, schema.table("users").unwrap());

    assert!(code.contains("column-name"));
    assert!(!code.contains("column-password"));
    assert!(code.contains("<td colspan=\"3\" class=\"text-center\">Records empty.</td>"));
}

#[test]
fn list_view___aliased_relation_label___is_displayed() {
    let schema = schema_from(serde_json::json!({
        "tables": {
            "users": {"fields": {"name": {"type": "string", "input": "text"}}},
            "posts": {"fields": {
                "name": {"type": "string", "input": "text"},
                "user_id": {"type": "integer", "input": {
                    "type": "select",
                    "options": {"table": "users", "value": "id", "label": "name"}
                }}
            }}
        }
    }));

    let code = list_view(&schema, schema.table("posts").unwrap());

    assert!(code.contains("<th class=\"column-user_name\">"), "{code}");
    assert!(code.contains("<td class=\"column-user_name\">{{ $post['user_name'] }}</td>"));
}

#[test]
fn detail_view___renders_read_code_per_field() {
    let code = posts_view(detail_view);

    let title = "    <!-- Column title -->\n    <tr>\n        <td width=\"200\" class=\"field-name\"><strong>Title</strong></td>\n";
    assert!(code.contains(title), "{code}");
    assert!(code.contains("<td class=\"field-value\">{{ $blogPost['title'] }}</td>"));
    assert!(code.contains("<!-- Column published_at -->"));
}

#[test]
fn detail_view___skips_hidden_fields_and_links_back() {
    let schema = blog();
    let code = detail_view(&schema, schema.table("users").unwrap());

    assert!(!code.contains("password"));
    assert!(code.contains("href=\"{{ route('admin::users.page-list') }}\">Back</a>"));
    assert!(code.contains("href=\"{{ route('admin::users.form-edit', [$user->getKey()]) }}\">Edit</a>"));
}

#[test]
fn create_view___posts_to_create_route_with_uploads() {
    let code = posts_view(create_view);

    assert!(code.contains(
        "<form id=\"form-create-blog_post\" method=\"POST\" action=\"{{ route('admin::blog-posts.post-create') }}\" enctype=\"multipart/form-data\">\n    {!! csrf_field() !!}\n\n"
    ), "{code}");
    assert!(code.contains("    </div>\n</form>\n@endsection\n"));
}

#[test]
fn create_view___includes_input_partials_with_old_values() {
    let code = posts_view(create_view);

    assert!(code.contains("    @include('partials.fields.text', ['name' => 'title', 'label' => 'Title'"));
    assert!(code.contains("'value' => old('title')])\n\n    @include('partials.fields.image', "), "{code}");
    assert!(code.contains("'options' => $user_options"));
    assert!(!code.contains("published_at"));
}

#[test]
fn create_view___without_file_inputs___plain_form() {
    let schema = blog();
    let code = create_view(&schema, schema.table("users").unwrap());

    assert!(code.contains("action=\"{{ route('admin::users.post-create') }}\">\n"));
    assert!(!code.contains("enctype"));
    assert!(code.contains("@include('partials.fields.password', "));
}

#[test]
fn edit_view___fills_inputs_from_the_row() {
    let schema = blog();
    let code = edit_view(&schema, schema.table("blog_posts").unwrap()).unwrap();

    assert!(code.contains(
        "<form id=\"form-edit-blog_post\" method=\"POST\" action=\"{{ route('admin::blog-posts.post-edit', [$blogPost['id']]) }}\" enctype=\"multipart/form-data\">"
    ), "{code}");
    assert!(code.contains("'value' => $blogPost['title']])"));
    assert!(code.contains("'value' => $blogPost['author_id']])"));
}

#[test]
fn views___view_namespace___qualifies_layout_and_partials() {
    let schema = schema_from(serde_json::json!({
        "view": {"namespace": "admin"},
        "tables": {"tags": {"fields": {"name": {"type": "string", "input": "text"}}}}
    }));
    let tags = &schema.tables()[0];

    let code = create_view(&schema, tags);

    assert!(code.starts_with("@extends('admin::layout.master')\n"));
    assert!(code.contains("@include('admin::partials.fields.text', "));
}
