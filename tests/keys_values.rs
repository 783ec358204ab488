use rstest::{fixture, rstest};
use serde_json::{json, Map, Value};
use simple_keys::{enumerate_paths, keys, lookup, resolve, value, ErrorKind};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[fixture]
fn tree() -> Map<String, Value> {
    object(json!({
        "a": {
            "a": {"a": "aaa", "b": "aab"},
            "b": {
                "a": "aba",
                "b": "abb",
                "c": {"a": "abca", "b": "abcb", "c[a]": "abcca"}
            }
        },
        "b": {
            "a": {"a": "baa", "b": "bab"},
            "b": {
                "a": "bba",
                "b": "bbb",
                "c": {"a": "bbca", "b": "bbcb"}
            }
        }
    }))
}

#[rstest]
fn keys_of_whole_tree(tree: Map<String, Value>) {
    assert_eq!(
        keys(&tree),
        [
            "a[a][a]",
            "a[a][b]",
            "a[b][a]",
            "a[b][b]",
            "a[b][c][a]",
            "a[b][c][b]",
            "a[b][c][c][a]",
            "b[a][a]",
            "b[a][b]",
            "b[b][a]",
            "b[b][b]",
            "b[b][c][a]",
            "b[b][c][b]",
        ]
    );
}

#[rstest]
fn keys_of_subtrees(tree: Map<String, Value>) {
    let a = tree["a"].as_object().expect("object");
    assert_eq!(
        keys(a),
        [
            "a[a]",
            "a[b]",
            "b[a]",
            "b[b]",
            "b[c][a]",
            "b[c][b]",
            "b[c][c][a]",
        ]
    );
    let ab = a["b"].as_object().expect("object");
    assert_eq!(keys(ab), ["a", "b", "c[a]", "c[b]", "c[c][a]"]);
}

#[rstest]
fn keys_of_empty_map() {
    assert!(keys(&Map::new()).is_empty());
}

#[rstest]
fn enumerate_paths_matches_keys(tree: Map<String, Value>) {
    assert_eq!(enumerate_paths(&tree), keys(&tree));
}

#[rstest]
#[case("a[b][c][a]", Some(json!("abca")))]
#[case("b[b][c][b]", Some(json!("bbcb")))]
#[case("a[b][c][c[a]]", None)]
#[case("a[b][c][c][a]", None)]
#[case("a[x]", None)]
#[case("c", None)]
#[case("a[b][a][x]", None)]
#[case("", None)]
#[case("a[", None)]
#[case("]", None)]
fn value_reads_stored_paths(
    tree: Map<String, Value>,
    #[case] simple_key: &str,
    #[case] expected: Option<Value>,
) {
    assert_eq!(value(simple_key, &tree), expected.as_ref());
    assert_eq!(lookup(simple_key, &tree), expected.as_ref());
}

#[rstest]
fn value_returns_subtrees(tree: Map<String, Value>) {
    assert_eq!(
        value("a[b][c]", &tree),
        Some(&json!({"a": "abca", "b": "abcb", "c[a]": "abcca"}))
    );
}

#[rstest]
fn value_on_empty_map() {
    assert_eq!(value("z", &Map::new()), None);
    assert_eq!(value("z[a][b]", &Map::new()), None);
}

#[rstest]
#[case("a", json!({
    "a": {"a": "aaa", "b": "aab"},
    "b": {"a": "aba", "b": "abb", "c": {"a": "abca", "b": "abcb", "c": {"a": "abcca"}}}
}))]
#[case("a[b]", json!({"a": "aba", "b": "abb", "c": {"a": "abca", "b": "abcb", "c": {"a": "abcca"}}}))]
#[case("a[b][c]", json!({"a": "abca", "b": "abcb", "c": {"a": "abcca"}}))]
#[case("a[b][c][a]", json!("abca"))]
#[case("a[b][c][c][a]", json!("abcca"))]
#[case("b[b][c][b]", json!("bbcb"))]
fn resolve_canonicalises_first(
    tree: Map<String, Value>,
    #[case] simple_key: &str,
    #[case] expected: Value,
) {
    let resolved = resolve(simple_key, &Value::Object(tree)).expect("resolve");
    assert_eq!(resolved, Some(expected));
}

#[rstest]
#[case("a[x]")]
#[case("c")]
fn resolve_misses(tree: Map<String, Value>, #[case] simple_key: &str) {
    let resolved = resolve(simple_key, &Value::Object(tree)).expect("resolve");
    assert_eq!(resolved, None);
}

#[rstest]
fn resolve_rejects_scalar_input() {
    let err = resolve("a", &json!(1)).expect_err("scalar");
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
}

#[rstest]
fn resolve_flat_input() {
    let flat = json!({"user[name]": "Ada", "user[langs][]": "en"});
    assert_eq!(resolve("user[name]", &flat).expect("resolve"), Some(json!("Ada")));
    assert_eq!(resolve("user[langs][]", &flat).expect("resolve"), Some(json!("en")));
    assert_eq!(resolve("user[langs][0]", &flat).expect("resolve"), None);
}
