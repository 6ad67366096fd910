//! Best-effort structural decomposition of anime video filenames.
//!
//! Fansub releases follow no single naming convention, so this is not a
//! grammar: a bracket- and delimiter-aware tokenizer feeds a fixed
//! sequence of heuristic passes that classify tokens against a static
//! keyword table and assemble typed [`Element`]s. Ambiguous names get a
//! deterministic decomposition, not a guaranteed one.
//!
//! ```
//! use seiri_parse::{parse, ElementKind};
//!
//! let result = parse("[TaigaSubs]_Toradora!_(2008)_-_01v2_[1280x720_H.264_AAC][ABCD1234].mkv");
//! assert!(result.succeeded);
//! assert_eq!(result.elements.get(ElementKind::AnimeTitle), Some("Toradora!"));
//! assert_eq!(result.elements.get(ElementKind::EpisodeNumber), Some("01"));
//! assert_eq!(result.elements.get(ElementKind::ReleaseGroup), Some("TaigaSubs"));
//! ```

mod elements;
pub mod keyword;
mod options;
mod parser;
mod text;
mod token;
mod tokenizer;

pub use elements::{Element, ElementKind, Elements};
pub use options::Options;

use serde::Serialize;
use tracing::debug;

use parser::Parser;
use tokenizer::Tokenizer;

/// Everything a parse produced: the ordered element list plus whether the
/// filename yielded an anime title. Elements identified before a failure
/// are still present.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub elements: Elements,
    pub succeeded: bool,
}

/// Parse `filename` with default [`Options`].
pub fn parse(filename: &str) -> ParseResult {
    parse_with(filename, &Options::default())
}

/// Parse `filename` with explicit [`Options`].
pub fn parse_with(filename: &str, options: &Options) -> ParseResult {
    let mut elements = Elements::new();
    let mut working = filename.to_string();

    if options.parse_file_extension {
        if let Some(extension) = strip_extension(&mut working) {
            elements.add(ElementKind::FileExtension, extension);
        }
    }

    if !options.ignored_strings.is_empty() {
        remove_ignored_strings(&mut working, &options.ignored_strings);
    }

    if filename.is_empty() {
        return ParseResult {
            elements,
            succeeded: false,
        };
    }
    elements.add(ElementKind::FileName, working.clone());

    let mut tokens = Vec::new();
    if !Tokenizer::new(&working, options, &mut elements, &mut tokens).tokenize() {
        debug!(filename, "tokenization produced nothing");
        return ParseResult {
            elements,
            succeeded: false,
        };
    }

    let succeeded = Parser::new(&mut elements, options, &mut tokens).parse();
    debug!(filename, succeeded, elements = elements.len(), "parsed");

    ParseResult { elements, succeeded }
}

/// Strip a recognized extension: the suffix after the final dot, at most
/// four alphanumeric characters, present in the file-extension table.
fn strip_extension(filename: &mut String) -> Option<String> {
    let position = filename.rfind('.')?;
    let extension = &filename[position + 1..];

    if extension.chars().count() > 4 {
        return None;
    }
    if !extension.chars().all(|c| c.is_alphanumeric()) {
        return None;
    }

    let normalized = keyword::normalize(extension);
    match keyword::find(ElementKind::FileExtension, &normalized) {
        Some(kw) if kw.kind == ElementKind::FileExtension => {}
        _ => return None,
    }

    let extension = extension.to_string();
    filename.truncate(position);
    Some(extension)
}

/// Delete every ignored substring, repeatedly, by verbatim search.
fn remove_ignored_strings(filename: &mut String, ignored_strings: &[String]) {
    for ignored in ignored_strings {
        if ignored.is_empty() {
            continue;
        }
        while let Some(position) = filename.find(ignored.as_str()) {
            filename.replace_range(position..position + ignored.len(), "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_stripped_and_reported() {
        let result = parse("Bleach - 01.mkv");
        assert_eq!(result.elements.get(ElementKind::FileExtension), Some("mkv"));
        assert_eq!(result.elements.get(ElementKind::FileName), Some("Bleach - 01"));
    }

    #[test]
    fn unknown_extension_is_left_alone() {
        let result = parse("Bleach - 01.xyz");
        assert!(!result.elements.has(ElementKind::FileExtension));
        assert_eq!(
            result.elements.get(ElementKind::FileName),
            Some("Bleach - 01.xyz")
        );
    }

    #[test]
    fn audio_extension_is_accepted_by_the_stripper() {
        // Flagged invalid in the table, but registered: still stripped.
        let result = parse("Some Song.flac");
        assert_eq!(result.elements.get(ElementKind::FileExtension), Some("flac"));
    }

    #[test]
    fn extension_stripping_can_be_disabled() {
        let options = Options {
            parse_file_extension: false,
            ..Options::default()
        };
        let result = parse_with("Bleach - 01.mkv", &options);
        assert!(!result.elements.has(ElementKind::FileExtension));
    }

    #[test]
    fn ignored_strings_are_removed_before_tokenization() {
        let options = Options {
            ignored_strings: vec!["[Foo]".to_string()],
            ..Options::default()
        };
        let result = parse_with("Show [Foo] - 01.mkv", &options);
        assert_eq!(result.elements.get(ElementKind::FileName), Some("Show  - 01"));
        assert_eq!(result.elements.get(ElementKind::AnimeTitle), Some("Show"));
        assert_eq!(result.elements.get(ElementKind::EpisodeNumber), Some("01"));
        // The bracketed marker never reached the tokenizer.
        assert!(!result.elements.has(ElementKind::ReleaseGroup));
    }

    #[test]
    fn empty_filename_fails_but_returns() {
        let result = parse("");
        assert!(!result.succeeded);
        assert!(result.elements.is_empty());
    }

    #[test]
    fn bare_extension_fails_with_partial_elements() {
        let result = parse(".mkv");
        assert!(!result.succeeded);
        assert_eq!(result.elements.get(ElementKind::FileExtension), Some("mkv"));
    }

    #[test]
    fn parsing_is_idempotent() {
        let filename = "[HorribleSubs] Boku no Hero Academia - 01 [720p].mkv";
        let options = Options::default();
        let first = parse_with(filename, &options);
        let second = parse_with(filename, &options);
        assert_eq!(first.elements, second.elements);
        assert_eq!(first.succeeded, second.succeeded);
    }
}
