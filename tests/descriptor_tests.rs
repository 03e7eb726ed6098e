use stencil::{BodyEncoding, BodyParameter, BodyValue, CancelSignal, Method, ParamValue, RequestDescriptor};

fn descriptor(method: Method, path: &str) -> RequestDescriptor {
    RequestDescriptor::new(method, path, CancelSignal::never())
}

fn pair(name: &str, value: Option<&str>) -> (String, Option<String>) {
    (name.to_string(), value.map(str::to_string))
}

#[test]
fn new_descriptor_starts_empty() {
    let d = descriptor(Method::GET, "/users/{id}");

    assert_eq!(d.method(), &Method::GET);
    assert_eq!(d.path(), "/users/{id}");
    assert!(d.query_params().is_empty());
    assert!(d.path_params().is_empty());
    assert!(d.interface_headers().is_empty());
    assert!(d.method_headers().is_empty());
    assert!(d.header_params().is_empty());
    assert!(d.body().is_none());
}

#[test]
fn query_sequence_expands_one_entry_per_element() {
    let mut d = descriptor(Method::GET, "/search");
    d.add_query_parameter("tag", vec!["a", "b", "c"]);

    assert_eq!(
        d.query_params().to_vec(),
        vec![pair("tag", Some("a")), pair("tag", Some("b")), pair("tag", Some("c"))]
    );
}

#[test]
fn query_sequence_stringifies_elements_in_iteration_order() {
    let mut d = descriptor(Method::GET, "/search");
    d.add_query_parameter("n", vec![3, 1, 2]);

    assert_eq!(
        d.query_params().to_vec(),
        vec![pair("n", Some("3")), pair("n", Some("1")), pair("n", Some("2"))]
    );
}

#[test]
fn query_sequence_absent_element_becomes_empty_string() {
    let mut d = descriptor(Method::GET, "/search");
    d.add_query_parameter(
        "tag",
        ParamValue::Sequence(vec![Some("a".to_string()), None, Some("b".to_string())]),
    );

    assert_eq!(
        d.query_params().to_vec(),
        vec![pair("tag", Some("a")), pair("tag", Some("")), pair("tag", Some("b"))]
    );
}

#[test]
fn query_string_is_one_entry_not_one_per_character() {
    let mut d = descriptor(Method::GET, "/search");
    d.add_query_parameter("q", "abc");

    assert_eq!(d.query_params().to_vec(), vec![pair("q", Some("abc"))]);
}

#[test]
fn query_absent_value_yields_one_absent_entry() {
    let mut d = descriptor(Method::GET, "/search");
    d.add_query_parameter("q", ParamValue::Absent);

    assert_eq!(d.query_params().to_vec(), vec![pair("q", None)]);
}

#[test]
fn query_scalar_is_stringified() {
    let mut d = descriptor(Method::GET, "/search");
    d.add_query_parameter("page", 7);
    d.add_query_parameter("debug", true);

    assert_eq!(
        d.query_params().to_vec(),
        vec![pair("page", Some("7")), pair("debug", Some("true"))]
    );
}

#[test]
fn query_duplicate_names_are_kept() {
    let mut d = descriptor(Method::GET, "/search");
    d.add_query_parameter("q", "first");
    d.add_query_parameter("q", "second");

    assert_eq!(
        d.query_params().to_vec(),
        vec![pair("q", Some("first")), pair("q", Some("second"))]
    );
}

#[test]
fn path_parameter_never_expands_sequences() {
    let mut d = descriptor(Method::GET, "/items/{id}");
    d.add_path_parameter("id", vec![1, 2]);

    assert_eq!(d.path_params().to_vec(), vec![pair("id", Some("[1, 2]"))]);
}

#[test]
fn path_parameter_absent_value_is_recorded_absent() {
    let mut d = descriptor(Method::GET, "/items/{id}");
    d.add_path_parameter("id", Option::<String>::None);

    assert_eq!(d.path_params().to_vec(), vec![pair("id", None)]);
}

#[test]
fn insertion_order_is_preserved_across_mixed_calls() {
    let mut d = descriptor(Method::GET, "/search");
    d.add_query_parameter("a", 1);
    d.add_query_parameter("b", vec!["x", "y"]);
    d.add_query_parameter("a", 2);

    assert_eq!(
        d.query_params().to_vec(),
        vec![
            pair("a", Some("1")),
            pair("b", Some("x")),
            pair("b", Some("y")),
            pair("a", Some("2")),
        ]
    );
}

#[test]
fn header_collections_stay_separate_and_unmerged() {
    let mut d = descriptor(Method::GET, "/users");
    d.add_interface_header("Accept: application/json");
    d.add_method_header("X-Mode: fast");
    d.add_header_parameter("X-Request-Id", "abc".to_string());

    assert_eq!(d.interface_headers(), ["Accept: application/json".to_string()]);
    assert_eq!(d.method_headers(), ["X-Mode: fast".to_string()]);
    assert_eq!(d.header_params().to_vec(), vec![pair("X-Request-Id", Some("abc"))]);
}

#[test]
fn raw_headers_are_stored_unparsed() {
    let mut d = descriptor(Method::GET, "/users");
    d.add_interface_header("not even a header");

    assert_eq!(d.interface_headers(), ["not even a header".to_string()]);
}

#[test]
fn header_parameter_value_may_be_absent() {
    let mut d = descriptor(Method::GET, "/users");
    d.add_header_parameter("X-Trace", None);

    assert_eq!(d.header_params().to_vec(), vec![pair("X-Trace", None)]);
}

#[test]
fn body_read_exposes_exactly_what_was_set() {
    let mut d = descriptor(Method::POST, "/users");
    d.set_body(BodyEncoding::Json, serde_json::json!({ "name": "Alice" }));

    assert_eq!(
        d.body(),
        Some(&BodyParameter {
            encoding: BodyEncoding::Json,
            value: BodyValue::Json(serde_json::json!({ "name": "Alice" })),
        })
    );
}

#[test]
fn setting_body_twice_keeps_the_last_one() {
    let mut d = descriptor(Method::POST, "/users");
    d.set_body(BodyEncoding::Json, serde_json::json!({ "first": true }));
    d.set_body(BodyEncoding::UrlEncoded, "a=1");

    assert_eq!(
        d.body(),
        Some(&BodyParameter {
            encoding: BodyEncoding::UrlEncoded,
            value: BodyValue::Text("a=1".to_string()),
        })
    );
}

#[test]
fn scenario_get_user_by_id() {
    let mut d = descriptor(Method::GET, "/users/{id}");
    d.add_path_parameter("id", 42);
    d.add_query_parameter("tag", vec!["a", "b"]);
    d.add_interface_header("Accept: application/json");

    assert_eq!(d.path_params().to_vec(), vec![pair("id", Some("42"))]);
    assert_eq!(d.query_params().to_vec(), vec![pair("tag", Some("a")), pair("tag", Some("b"))]);
    assert_eq!(d.interface_headers(), ["Accept: application/json".to_string()]);
    assert!(d.method_headers().is_empty());
    assert!(d.header_params().is_empty());
    assert!(d.body().is_none());
}
