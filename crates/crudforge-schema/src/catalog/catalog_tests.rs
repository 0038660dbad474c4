#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn FieldType___every_name___round_trips() {
    for name in FieldType::names() {
        let ty = FieldType::from_name(name).unwrap();
        assert_eq!(ty.name(), name);
    }
    assert_eq!(FieldType::names().count(), 32);
}

#[test]
fn FieldType___unknown_name___returns_none() {
    assert_eq!(FieldType::from_name("varchar"), None);
    assert_eq!(FieldType::from_name("String"), None);
}

#[test_case("string", true, true ; "string")]
#[test_case("text", true, true ; "text")]
#[test_case("enum", true, true ; "enum")]
#[test_case("date", false, true ; "date")]
#[test_case("timestamp", false, true ; "timestamp")]
#[test_case("integer", false, false ; "integer")]
#[test_case("boolean", false, false ; "boolean")]
fn FieldType___search_and_sort_flags(name: &str, searchable: bool, sortable: bool) {
    let ty = FieldType::from_name(name).unwrap();

    assert_eq!(ty.is_searchable(), searchable);
    assert_eq!(ty.is_sortable(), sortable);
}

#[test_case("string", InputType::Text ; "string")]
#[test_case("long-text", InputType::Textarea ; "long text")]
#[test_case("unsigned-big-integer", InputType::Number ; "integer")]
#[test_case("decimal", InputType::Number ; "decimal")]
#[test_case("enum", InputType::Select ; "enum")]
#[test_case("date", InputType::Text ; "date")]
fn FieldType___default_input(name: &str, expected: InputType) {
    assert_eq!(FieldType::from_name(name).unwrap().default_input(), expected);
}

#[test]
fn parse_type___with_params___splits_and_trims() {
    let (name, params) = parse_type("decimal: 8, 2");

    assert_eq!(name, "decimal");
    assert_eq!(params, vec!["8", "2"]);
}

#[test]
fn parse_type___without_params___returns_empty_list() {
    let (name, params) = parse_type("string");

    assert_eq!(name, "string");
    assert!(params.is_empty());
}

#[test]
fn InputType___names___round_trip() {
    for name in ["text", "textarea", "select-multiple", "password", "radio"] {
        assert_eq!(InputType::from_name(name).unwrap().to_string(), name);
    }
    assert_eq!(InputType::from_name("wysiwyg"), None);
}

#[test]
fn InputType___classification() {
    assert!(InputType::Textarea.is_free_text());
    assert!(!InputType::Email.is_free_text());
    assert!(InputType::Image.is_file());
    assert!(!InputType::Text.is_file());
}

#[test]
fn Display___link___wraps_plain_value_in_storage_url() {
    let code = Display::Link.table_code("cover");

    assert_eq!(
        code,
        "<a target=\"_blank\" href=\"{{ Storage::disk('{? disk ?}')->url(${? varname ?}['cover']) }}\">{{ ${? varname ?}['cover'] }}</a>"
    );
}

#[test]
fn Display___html___echoes_unescaped() {
    assert_eq!(Display::Html.table_code("body"), "{!! ${? varname ?}['body'] !!}");
}

#[test]
fn Display___image_link___nests_image_in_anchor() {
    let code = Display::ImageLink.table_code("photo");

    let lines: Vec<_> = code.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("<a "));
    assert!(lines[1].starts_with("<img "));
    assert_eq!(lines[2], "</a>");
}

#[test]
fn read_code___wraps_table_code_in_detail_row() {
    let code = read_code("{{ $post['title'] }}");

    assert!(code.starts_with("<tr>\n"));
    assert!(code.contains("<strong>{? label ?}</strong>"));
    assert!(code.contains("<td class=\"field-value\">{{ $post['title'] }}</td>"));
    assert!(code.ends_with("</tr>"));
}

#[test_case(RelationKind::HasOne, RelationKind::HasMany ; "has one")]
#[test_case(RelationKind::BelongsTo, RelationKind::HasMany ; "belongs to")]
#[test_case(RelationKind::HasMany, RelationKind::BelongsToMany ; "has many")]
fn RelationKind___reciprocal(kind: RelationKind, expected: RelationKind) {
    assert_eq!(kind.reciprocal(), expected);
}

#[test]
fn RelationKind___names___round_trip_through_serde() {
    let kind: RelationKind = serde_json::from_value(serde_json::json!("belongs-to-many")).unwrap();

    assert_eq!(kind, RelationKind::BelongsToMany);
    assert_eq!(RelationKind::from_name(kind.name()), Some(kind));
}
