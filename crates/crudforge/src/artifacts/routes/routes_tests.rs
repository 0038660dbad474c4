#![allow(non_snake_case)]

use super::*;
use crate::artifacts::fixtures::{blog, schema_from};
use serde_json::json;

fn tags() -> Schema {
    schema_from(json!({
        "tables": {"tags": {"fields": {"name": {"type": "string", "input": "text"}}}}
    }))
}

#[test]
fn route_file___declares_every_action() {
    let file = route_file(&tags()).unwrap();

    let expected = "<?php

use Illuminate\\Support\\Facades\\Route;

Route::name('admin::')->prefix('admin')->namespace('App\\Http\\Controllers')->group(function() {
    Route::name('tags.')->prefix('tags')->group(function() {
        Route::get('/', 'TagController@pageList')->name('page-list');
        Route::get('create', 'TagController@formCreate')->name('form-create');
        Route::post('create', 'TagController@postCreate')->name('post-create');
        Route::get('edit/{id}', 'TagController@formEdit')->name('form-edit');
        Route::post('edit/{id}', 'TagController@postEdit')->name('post-edit');
        Route::get('delete/{id}', 'TagController@delete')->name('delete');
        Route::get('{id}', 'TagController@pageDetail')->name('page-detail');
    });
});
";
    assert_eq!(file, expected);
}

#[test]
fn crud_routes___table_groups_are_separated_by_blank_line() {
    let routes = crud_routes(&blog(), &RouteCollection::new()).unwrap();

    let code = routes.render();

    assert!(code.contains("        Route::get('{id}', 'UserController@pageDetail')->name('page-detail');\n    });\n\n    Route::name('blog-posts.')->prefix('blog-posts')->group(function() {"));
}

#[test]
fn crud_routes___names_compose_with_conventions() {
    let schema = tags();

    let routes = crud_routes(&schema, &RouteCollection::new()).unwrap();

    let names: Vec<_> = routes
        .effective_routes()
        .into_iter()
        .filter_map(|route| route.name)
        .collect();
    let expected: Vec<_> = [
        Action::PageList,
        Action::FormCreate,
        Action::PostCreate,
        Action::FormEdit,
        Action::PostEdit,
        Action::Delete,
        Action::PageDetail,
    ]
    .into_iter()
    .map(|action| schema.table("tags").unwrap().route_name(action))
    .collect();
    assert_eq!(names, expected);

    let detail = routes.find_route_named("admin::tags.page-detail").unwrap();
    assert_eq!(detail.path, "admin/tags/{id}");
    assert_eq!(detail.handler, "App\\Http\\Controllers\\TagController@pageDetail");
    assert_eq!(detail.method, HttpMethod::Get);
}

#[test]
fn crud_routes___skips_routes_already_declared() {
    let schema = tags();
    let mut existing = RouteCollection::new();
    existing
        .add_group(GroupOptions::new().name("admin::tags.")).unwrap()
        .add_route(HttpMethod::Get, "/", "TagController@pageList", RouteOptions::new().name("page-list"));

    let routes = crud_routes(&schema, &existing).unwrap();

    assert!(!routes.has_route_named("admin::tags.page-list"));
    assert!(routes.has_route_named("admin::tags.form-create"));
    assert_eq!(routes.effective_routes().len(), 6);
}

#[test]
fn crud_routes___all_declared___renders_nothing() {
    let schema = tags();
    let existing = crud_routes(&schema, &RouteCollection::new()).unwrap();

    let routes = crud_routes(&schema, &existing).unwrap();

    assert!(routes.effective_routes().is_empty());
    assert_eq!(routes.render(), "");
}

#[test]
fn crud_routes___route_conventions___shape_outer_group() {
    let schema = schema_from(json!({
        "route": {
            "namespace": "App\\Http\\Controllers\\Admin",
            "middleware": ["web", "auth"],
            "domain": "admin.example.com"
        },
        "tables": {"tags": {"fields": {"name": {"type": "string", "input": "text"}}}}
    }));

    let routes = crud_routes(&schema, &RouteCollection::new()).unwrap();

    let code = routes.render();
    assert!(code.starts_with(
        "Route::domain('admin.example.com')->name('admin::')->prefix('admin')->middleware(['web', 'auth'])->namespace('App\\Http\\Controllers\\Admin')->group(function() {"
    ), "{code}");
    let list = routes.find_route_named("admin::tags.page-list").unwrap();
    assert_eq!(list.handler, "App\\Http\\Controllers\\Admin\\TagController@pageList");
    assert_eq!(list.middleware, vec!["web", "auth"]);
    assert_eq!(list.domain.as_deref(), Some("admin.example.com"));
}
