#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn RouteContainer___nested_groups___compose_name_and_path() {
    let mut routes = RouteCollection::new();
    routes
        .add_group(GroupOptions::new().name("a.").prefix("x")).unwrap()
        .add_group(GroupOptions::new().name("b.").prefix("y")).unwrap()
        .add_route(HttpMethod::Get, "z", "H@z", RouteOptions::new().name("c"));

    let effective = routes.effective_routes();

    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].name.as_deref(), Some("a.b.c"));
    assert_eq!(effective[0].path, "x/y/z");
}

#[test]
fn RouteContainer___group_attached_later___still_composes() {
    let mut routes = RouteCollection::new();
    let outer = routes.add_group(GroupOptions::new().name("a.")).unwrap();
    let inner = outer.add_group(GroupOptions::new().name("b.")).unwrap();
    inner.add_route(HttpMethod::Get, "/", "H@index", RouteOptions::new().name("index"));
    outer.options_mut().name = Some("admin.".to_string());

    let found = routes.find_route_named("admin.b.index");

    assert!(found.is_some());
    assert!(!routes.has_route_named("a.b.index"));
}

#[test]
fn RouteContainer___namespace_and_middleware___accumulate() {
    let mut routes = RouteCollection::new();
    routes
        .add_group(
            GroupOptions::new()
                .namespace("App\\Http\\Controllers")
                .middleware("web")
                .domain("admin.example.com"),
        ).unwrap()
        .add_group(GroupOptions::new().namespace("Admin").middleware("auth")).unwrap()
        .add_route(
            HttpMethod::Post,
            "save",
            "PostController@save",
            RouteOptions::new().middleware("throttle"),
        );

    let route = &routes.effective_routes()[0];

    assert_eq!(route.handler, "App\\Http\\Controllers\\Admin\\PostController@save");
    assert_eq!(route.middleware, vec!["web", "auth", "throttle"]);
    assert_eq!(route.domain.as_deref(), Some("admin.example.com"));
    assert_eq!(route.name, None);
}

#[test]
fn RouteContainer___absolute_namespace___replaces_parent() {
    let mut routes = RouteCollection::new();
    routes
        .add_group(GroupOptions::new().namespace("App")).unwrap()
        .add_route(HttpMethod::Get, "/", "\\Vendor\\Home@index", RouteOptions::new());

    assert_eq!(routes.effective_routes()[0].handler, "Vendor\\Home@index");
}

#[test]
fn RouteContainer___add_group___returns_the_attached_group() {
    let mut routes = RouteCollection::new();

    routes
        .add_group(GroupOptions::new().prefix("posts"))
        .unwrap()
        .add_route(HttpMethod::Get, "/", "PostController@pageList", RouteOptions::new())
        .add_route(HttpMethod::Get, "create", "PostController@formCreate", RouteOptions::new());

    assert_eq!(routes.nodes().len(), 1);
    let paths: Vec<_> = routes.effective_routes().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["posts", "posts/create"]);
}

#[test]
fn RouteContainer___root_path___is_slash() {
    let mut routes = RouteCollection::new();
    routes.add_route(HttpMethod::Get, "/", "Home@index", RouteOptions::new());

    assert_eq!(routes.effective_routes()[0].path, "/");
}

#[test]
fn RouteGroup___effective_routes___include_own_attributes() {
    let mut group = RouteGroup::new(GroupOptions::new().name("posts.").prefix("posts"));
    group.add_route(HttpMethod::Get, "/", "PostController@pageList", RouteOptions::new().name("page-list"));

    let found = group.find_route_named("posts.page-list").unwrap();

    assert_eq!(found.path, "posts");
}

#[test]
fn RouteCollection___render___nests_groups() {
    let mut routes = RouteCollection::new();
    let admin = routes.add_group(
        GroupOptions::new()
            .name("admin::")
            .prefix("admin")
            .middleware("auth")
            .domain("example.com")
            .namespace("Admin"),
    ).unwrap();
    let posts = admin.add_group(GroupOptions::new().name("posts.").prefix("posts")).unwrap();
    posts.add_route(HttpMethod::Get, "/", "PostController@pageList", RouteOptions::new().name("page-list"));
    posts.add_route(HttpMethod::Post, "create", "PostController@postCreate", RouteOptions::new().name("post-create"));

    let expected = "\
Route::domain('example.com')->name('admin::')->prefix('admin')->middleware('auth')->namespace('Admin')->group(function() {
    Route::name('posts.')->prefix('posts')->group(function() {
        Route::get('/', 'PostController@pageList')->name('page-list');
        Route::post('create', 'PostController@postCreate')->name('post-create');
    });
});";
    assert_eq!(routes.render(), expected);
}

#[test]
fn RouteCollection___render___separates_groups_with_blank_lines() {
    let mut routes = RouteCollection::new();
    routes.add_route(HttpMethod::Get, "/", "Home@index", RouteOptions::new());
    routes
        .add_group(GroupOptions::new().prefix("a")).unwrap()
        .add_route(HttpMethod::Get, "/", "A@index", RouteOptions::new());
    routes
        .add_group(GroupOptions::new().prefix("b")).unwrap()
        .add_route(HttpMethod::Get, "/", "B@index", RouteOptions::new());

    let lines = routes.lines();

    assert_eq!(lines[0], "Route::get('/', 'Home@index');");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "Route::prefix('a')->group(function() {");
    assert_eq!(lines[5], "");
    assert_eq!(lines.len(), 9);
}

#[test]
fn RouteGroup___without_routes___renders_nothing() {
    let mut routes = RouteCollection::new();
    routes
        .add_group(GroupOptions::new().name("outer.")).unwrap()
        .add_group(GroupOptions::new().name("inner.")).unwrap();

    assert!(routes.lines().is_empty());
}

#[test]
fn Route___middleware_and_name___wrap_verb_segment() {
    let route = Route::new(
        HttpMethod::Delete,
        "delete/{id}",
        "PostController@delete",
        RouteOptions::new().middleware("auth").middleware("can:delete").name("delete"),
    );

    assert_eq!(
        route.lines(),
        vec!["Route::middleware(['auth', 'can:delete'])->delete('delete/{id}', 'PostController@delete')->name('delete');"]
    );
}

#[test_case("GET", HttpMethod::Get ; "upper case")]
#[test_case("post", HttpMethod::Post ; "lower case")]
#[test_case("Patch", HttpMethod::Patch ; "mixed case")]
fn HttpMethod___from_str___is_case_insensitive(input: &str, expected: HttpMethod) {
    assert_eq!(input.parse::<HttpMethod>(), Ok(expected));
}

#[test]
fn RouteContainer___add_route_str___rejects_unknown_verb() {
    let mut routes = RouteCollection::new();

    let result = routes.add_route_str("fetch", "/", "H@x", RouteOptions::new());

    assert_eq!(result.err(), Some(CodegenError::InvalidHttpMethod("fetch".into())));
    assert!(routes.nodes().is_empty());
}
