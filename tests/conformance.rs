use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use simple_keys::{flatten_with_options, unflatten_with_options, Options};

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct FixtureFile {
    version: String,
    category: String,
    description: String,
    tests: Vec<FixtureCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureCase {
    name: String,
    input: Value,
    expected: Value,
    #[serde(default)]
    should_error: bool,
    options: Option<FixtureOptions>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FixtureOptions {
    max_depth: Option<usize>,
}

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture_file(path: &Path) -> FixtureFile {
    let contents = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {err}", path.display()));
    serde_json::from_str(&contents)
        .unwrap_or_else(|err| panic!("failed to parse fixture {}: {err}", path.display()))
}

fn load_fixture_dir(category: &str) -> Vec<(PathBuf, FixtureFile)> {
    let root = fixture_root().join(category);
    let mut entries = Vec::new();
    for entry in fs::read_dir(&root)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {}: {err}", root.display()))
    {
        let entry = entry
            .unwrap_or_else(|err| panic!("failed to read fixture dir {}: {err}", root.display()));
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        entries.push((path.clone(), load_fixture_file(&path)));
    }
    entries.sort_by_key(|(path, _)| path.file_name().map(|name| name.to_os_string()));
    entries
}

fn options(fixture: Option<&FixtureOptions>) -> Options {
    let mut options = Options::default();
    if let Some(max_depth) = fixture.and_then(|fixture| fixture.max_depth) {
        options = options.with_max_depth(max_depth);
    }
    options
}

// Serialised form compares key order as well as content.
fn assert_same_order(actual: &Value, expected: &Value, name: &str) {
    let actual = serde_json::to_string(actual).expect("serialize actual");
    let expected = serde_json::to_string(expected).expect("serialize expected");
    assert_eq!(actual, expected, "mismatch for {name}");
}

#[rstest::rstest]
fn conformance_flatten_fixtures() {
    let mut executed = 0;
    for (path, fixture) in load_fixture_dir("flatten") {
        for case in fixture.tests {
            executed += 1;
            let name = format!("{}::{}", path.display(), case.name);
            let options = options(case.options.as_ref());
            if case.should_error {
                assert!(
                    flatten_with_options(&case.input, &options).is_err(),
                    "expected error for {name}"
                );
                continue;
            }
            let actual = flatten_with_options(&case.input, &options)
                .unwrap_or_else(|err| panic!("flatten failed for {name}: {err}"));
            assert_same_order(&Value::Object(actual), &case.expected, &name);
        }
    }
    assert!(executed > 0, "no flatten fixtures executed");
}

#[rstest::rstest]
fn conformance_unflatten_fixtures() {
    let mut executed = 0;
    for (path, fixture) in load_fixture_dir("unflatten") {
        for case in fixture.tests {
            executed += 1;
            let name = format!("{}::{}", path.display(), case.name);
            let options = options(case.options.as_ref());
            let input = case
                .input
                .as_object()
                .unwrap_or_else(|| panic!("unflatten input must be an object for {name}"));
            if case.should_error {
                assert!(
                    unflatten_with_options(input, &options).is_err(),
                    "expected error for {name}"
                );
                continue;
            }
            let actual = unflatten_with_options(input, &options)
                .unwrap_or_else(|err| panic!("unflatten failed for {name}: {}", err.message));
            assert_same_order(&Value::Object(actual), &case.expected, &name);
        }
    }
    assert!(executed > 0, "no unflatten fixtures executed");
}
