#![allow(non_snake_case)]

use super::*;
use serde_json::json;
use test_case::test_case;

fn foobar() -> Method {
    let mut method = Method::new("foobar");
    method
        .add_argument("a", None, None)
        .add_argument("b", Some("array"), None)
        .add_argument("c", Some("Closure"), Some(Value::Null));
    method.body().append(
        "
        $array = [
            'a' => 1,
            'b' => 2,
            'c' => [
                'c1' => 3,
                'c2' => 4
            ]
        ];

        $fn = function() {
            return \"value\";
        };
        ",
    );
    method
}

const FOOBAR_BODY: &str = "\
{
    $array = [
        'a' => 1,
        'b' => 2,
        'c' => [
            'c1' => 3,
            'c2' => 4
        ]
    ];

    $fn = function() {
        return \"value\";
    };
}";

#[test_case(Visibility::Public, "public" ; "public")]
#[test_case(Visibility::Protected, "protected" ; "protected")]
#[test_case(Visibility::Private, "private" ; "private")]
fn Method___visibility___prefixes_signature(visibility: Visibility, keyword: &str) {
    let mut method = foobar();
    method.set_visibility(visibility);

    let expected = format!("{keyword} function foobar($a, array $b, Closure $c = null)\n{FOOBAR_BODY}");
    assert_eq!(method.render_code(), expected);
}

#[test]
fn Method___static_final___orders_modifiers() {
    let mut method = foobar();
    method.set_static(true).set_final(true);

    let first = method.lines().remove(0);
    assert_eq!(first, "final public static function foobar($a, array $b, Closure $c = null)");
}

#[test]
fn Method___abstract___has_no_body() {
    let mut method = foobar();
    method.set_abstract(true);

    assert_eq!(
        method.lines(),
        vec!["abstract public function foobar($a, array $b, Closure $c = null);"]
    );
}

#[test]
fn Method___docblock_without_return___defaults_to_void() {
    let mut method = Method::new("handle");
    method.docblock().add_text("Handle it.");

    let lines = method.lines();
    assert_eq!(lines[..5], ["/**", " * Handle it.", " *", " * @return void", " */"]);
    assert_eq!(lines[5], "public function handle()");
}

#[test]
fn Method___docblock_with_return_type___uses_declared_type() {
    let mut method = Method::new("find");
    method.set_return_type("App\\Post");
    method.docblock();

    let mut imports = Imports::new();
    imports.add("App\\Post", None);
    let lines = method.render(&imports, false);

    assert_eq!(lines[1], " * @return Post");
    assert_eq!(lines[3], "public function find(): Post");
}

#[test]
fn Method___long_signature___puts_arguments_on_own_lines() {
    let mut method = Method::new("store");
    for name in ["firstArgument", "secondArgument", "thirdArgument", "fourthArgument", "fifthArgument"] {
        method.add_argument(name, Some("string"), Some(json!("default value")));
    }

    let lines = method.lines();

    assert_eq!(lines[0], "public function store(");
    assert_eq!(lines[1], "    string $firstArgument = 'default value',");
    assert_eq!(lines[5], "    string $fifthArgument = 'default value'");
    assert_eq!(lines[6], ") {");
    assert_eq!(lines[7], "}");
}

#[test]
fn Method___long_abstract_signature___ends_with_terminator() {
    let mut method = Method::new("store");
    method.set_abstract(true);
    for name in ["firstArgument", "secondArgument", "thirdArgument", "fourthArgument", "fifthArgument"] {
        method.add_argument(name, Some("string"), Some(json!("default value")));
    }

    let lines = method.lines();

    assert_eq!(lines.last().map(String::as_str), Some(");"));
}

#[test]
fn Method___qualified_type_without_import___is_absolute() {
    let mut method = Method::new("handle");
    method.add_argument("$request", Some("Illuminate\\Http\\Request"), None);

    assert_eq!(method.lines()[0], "public function handle(\\Illuminate\\Http\\Request $request)");
}

#[test]
fn Method___readded_argument___replaces_in_place() {
    let mut method = Method::new("f");
    method
        .add_argument("a", None, None)
        .add_argument("b", None, None)
        .add_argument("a", Some("int"), Some(json!(1)));

    assert_eq!(method.lines()[0], "public function f(int $a = 1, $b)");
}

#[test]
fn Visibility___from_str___rejects_unknown() {
    assert_eq!("protected".parse::<Visibility>(), Ok(Visibility::Protected));
    assert_eq!(
        "internal".parse::<Visibility>(),
        Err(CodegenError::InvalidVisibility("internal".into()))
    );

    let mut method = Method::new("f");
    assert!(method.set_visibility_str("friend").is_err());
    assert_eq!(method.visibility(), Visibility::Public);
}
