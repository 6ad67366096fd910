//! Fixture-driven corpus test: each entry lists a filename, optional
//! parse options (`option_*` keys), and every element the parse is
//! expected to produce, keyed by element kind. String values mean one
//! element, arrays mean several of the same kind.

use std::collections::HashMap;

use serde_json::Value;

use seiri_parse::{parse_with, ElementKind, Options};

const FIXTURES: &str = include_str!("data/fixtures.json");

const ALL_KINDS: &[ElementKind] = &[
    ElementKind::AnimeSeason,
    ElementKind::AnimeSeasonPrefix,
    ElementKind::AnimeTitle,
    ElementKind::AnimeType,
    ElementKind::AnimeYear,
    ElementKind::AudioTerm,
    ElementKind::DeviceCompatibility,
    ElementKind::EpisodeNumber,
    ElementKind::EpisodeNumberAlt,
    ElementKind::EpisodePrefix,
    ElementKind::EpisodeTitle,
    ElementKind::FileChecksum,
    ElementKind::FileExtension,
    ElementKind::Language,
    ElementKind::Other,
    ElementKind::ReleaseGroup,
    ElementKind::ReleaseInformation,
    ElementKind::ReleaseVersion,
    ElementKind::Source,
    ElementKind::Subtitles,
    ElementKind::VideoResolution,
    ElementKind::VideoTerm,
    ElementKind::VolumeNumber,
    ElementKind::VolumePrefix,
    ElementKind::Unknown,
];

fn options_from(fixture: &serde_json::Map<String, Value>) -> Options {
    let mut options = Options::default();
    if let Some(ignored) = fixture.get("option_ignored_strings") {
        options.ignored_strings = ignored
            .as_array()
            .expect("option_ignored_strings must be an array")
            .iter()
            .map(|v| v.as_str().expect("ignored string").to_string())
            .collect();
    }
    if let Some(delimiters) = fixture.get("option_allowed_delimiters") {
        options.allowed_delimiters = delimiters
            .as_str()
            .expect("option_allowed_delimiters must be a string")
            .to_string();
    }
    options
}

fn expected_from(fixture: &serde_json::Map<String, Value>) -> HashMap<ElementKind, Vec<String>> {
    let mut expected = HashMap::new();
    for (key, value) in fixture {
        if key == "file_name" || key.starts_with("option_") {
            continue;
        }
        let kind: ElementKind = serde_json::from_value(Value::String(key.clone()))
            .unwrap_or_else(|_| panic!("unknown element kind key: {key}"));
        let values: Vec<String> = match value {
            Value::String(single) => vec![single.clone()],
            Value::Array(many) => many
                .iter()
                .map(|v| v.as_str().expect("element value").to_string())
                .collect(),
            other => panic!("unsupported fixture value for {key}: {other}"),
        };
        expected.insert(kind, values);
    }
    expected
}

#[test]
fn fixture_corpus() {
    let fixtures: Vec<Value> = serde_json::from_str(FIXTURES).expect("fixtures.json parses");
    assert!(!fixtures.is_empty());

    for fixture in &fixtures {
        let fixture = fixture.as_object().expect("fixture object");
        let file_name = fixture["file_name"].as_str().expect("file_name");
        let options = options_from(fixture);
        let expected = expected_from(fixture);

        let result = parse_with(file_name, &options);
        assert!(result.succeeded, "{file_name}: parse did not succeed");

        // Strict comparison: every kind the fixture lists must match, and
        // kinds it omits must be absent. The file-name element is derived,
        // not asserted.
        for &kind in ALL_KINDS {
            let mut actual: Vec<String> = result
                .elements
                .get_all(kind)
                .into_iter()
                .map(str::to_string)
                .collect();
            let mut wanted = expected.get(&kind).cloned().unwrap_or_default();
            actual.sort();
            wanted.sort();
            assert_eq!(
                wanted, actual,
                "{file_name}: mismatch for {}",
                kind.as_str()
            );
        }
    }
}

#[test]
fn corpus_is_idempotent() {
    let fixtures: Vec<Value> = serde_json::from_str(FIXTURES).expect("fixtures.json parses");
    for fixture in &fixtures {
        let fixture = fixture.as_object().expect("fixture object");
        let file_name = fixture["file_name"].as_str().expect("file_name");
        let options = options_from(fixture);

        let first = parse_with(file_name, &options);
        let second = parse_with(file_name, &options);
        assert_eq!(
            first.elements, second.elements,
            "{file_name}: element lists diverged between runs"
        );
    }
}
