//! Structural number patterns: everything that turns a token into episode
//! or volume numbers, season combos, and release versions.

use std::sync::LazyLock;

use regex::Regex;

use super::{Parser, EPISODE_NUMBER_MAX, VOLUME_NUMBER_MAX};
use crate::elements::ElementKind;
use crate::keyword;
use crate::text::{find_first_digit, is_numeric, to_int_c, to_int_or, trim_word};
use crate::token::{Token, TokenKind};

// ── Patterns (compiled once) ────────────────────────────────────

/// "01v2"
static SINGLE_EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})[vV](\d)$").expect("static pattern"));

/// "01-02", "03-05v2", "08&09"
static MULTI_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,4})(?:[vV](\d))?[-~&+](\d{1,4})(?:[vV](\d))?$").expect("static pattern")
});

/// "2x01", "S01E03", "s02e15", "S01-02xE001-150"
static SEASON_AND_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^S?(\d{1,2})(?:-S?(\d{1,2}))?(?:x|[ ._-x]?E)(\d{1,4})(?:-E?(\d{1,4}))?(?:[vV](\d))?$")
        .expect("static pattern")
});

/// "07.5"; no other fraction counts, since ".1" and the like show up in
/// titles ("Evangelion: 1.11") and keywords ("5.1").
static FRACTIONAL_EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.5$").expect("static pattern"));

/// "#01", "#02-03v2"
static NUMBER_SIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(\d{1,4})(?:[-~&+](\d{1,4}))?(?:[vV](\d))?$").expect("static pattern")
});

/// "第12話"; U+8A71 is the counter for stories and TV episodes.
static JAPANESE_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})\u{8A71}$").expect("static pattern"));

/// "3v2"
static SINGLE_VOLUME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[vV](\d)$").expect("static pattern"));

/// "3-5", "3-5v2"
static MULTI_VOLUME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[-~&+](\d{1,2})(?:[vV](\d))?$").expect("static pattern")
});

/// Leading integer stays below the year range.
pub(super) fn is_valid_episode_number(number: &str) -> bool {
    to_int_c(number) <= EPISODE_NUMBER_MAX
}

pub(super) fn is_valid_volume_number(number: &str) -> bool {
    to_int_c(number) <= VOLUME_NUMBER_MAX
}

impl Parser<'_> {
    /// Try the structural episode patterns against `word`, most specific
    /// first. Plain numbers never match here; they are handled by the
    /// positional searches.
    pub(super) fn match_episode_patterns(&mut self, word: &str, token_index: usize) -> bool {
        if is_numeric(word) {
            return false;
        }

        let trimmed = trim_word(word);
        if trimmed.is_empty() {
            return false;
        }
        let numeric_front = trimmed.chars().next().is_some_and(|c| c.is_ascii_digit());
        let numeric_back = trimmed.chars().last().is_some_and(|c| c.is_ascii_digit());

        if numeric_front && numeric_back {
            // e.g. "01v2"
            if self.match_single_episode_pattern(trimmed, token_index) {
                return true;
            }
            // e.g. "01-02", "03-05v2"
            if self.match_multi_episode_pattern(trimmed, token_index) {
                return true;
            }
        }
        if numeric_back {
            // e.g. "2x01", "S01E03"
            if self.match_season_and_episode_pattern(trimmed, token_index) {
                return true;
            }
        }
        if !numeric_front {
            // e.g. "ED1", "OP4a", "OVA2"
            if self.match_type_and_episode_pattern(trimmed, token_index) {
                return true;
            }
        }
        if numeric_front && numeric_back {
            // e.g. "07.5"
            if self.match_fractional_episode_pattern(word, token_index) {
                return true;
            }
        }
        if numeric_front && !numeric_back {
            // e.g. "4a", "111C"
            if self.match_partial_episode_pattern(word, token_index) {
                return true;
            }
        }
        if numeric_back {
            // e.g. "#01", "#02-03v2"
            if self.match_number_sign_pattern(word, token_index) {
                return true;
            }
        }
        if numeric_front {
            // e.g. "第12話"
            if self.match_japanese_counter_pattern(word, token_index) {
                return true;
            }
        }

        false
    }

    fn match_single_episode_pattern(&mut self, word: &str, token_index: usize) -> bool {
        let Some(caps) = SINGLE_EPISODE.captures(word) else {
            return false;
        };
        self.set_episode_number(&caps[1], token_index, false);
        self.elements.add(ElementKind::ReleaseVersion, &caps[2]);
        true
    }

    fn match_multi_episode_pattern(&mut self, word: &str, token_index: usize) -> bool {
        let Some(caps) = MULTI_EPISODE.captures(word) else {
            return false;
        };
        let lower = caps[1].to_string();
        let upper = caps[3].to_string();
        // Avoid matching expressions such as "009-1" or "5-2".
        if to_int_or(&lower, 0) < to_int_or(&upper, 0)
            && self.set_episode_number(&lower, token_index, true)
        {
            self.set_episode_number(&upper, token_index, false);
            if let Some(version) = caps.get(2) {
                self.elements.add(ElementKind::ReleaseVersion, version.as_str());
            }
            if let Some(version) = caps.get(4) {
                self.elements.add(ElementKind::ReleaseVersion, version.as_str());
            }
            return true;
        }
        false
    }

    fn match_season_and_episode_pattern(&mut self, word: &str, token_index: usize) -> bool {
        let Some(caps) = SEASON_AND_EPISODE.captures(word) else {
            return false;
        };
        if to_int_or(&caps[1], -1) == 0 {
            return false;
        }
        self.elements.add(ElementKind::AnimeSeason, &caps[1]);
        if let Some(second_season) = caps.get(2) {
            self.elements
                .add(ElementKind::AnimeSeason, second_season.as_str());
        }
        let episode = caps[3].to_string();
        self.set_episode_number(&episode, token_index, false);
        if let Some(second_episode) = caps.get(4) {
            let second = second_episode.as_str().to_string();
            self.set_episode_number(&second, token_index, false);
        }
        true
    }

    /// "OP4", "OVA2": a registered anime-type word fused to the number.
    /// On success the token splits into a type token plus a number token.
    fn match_type_and_episode_pattern(&mut self, word: &str, token_index: usize) -> bool {
        let Some(number_begin) = find_first_digit(word) else {
            return false;
        };
        let prefix = &word[..number_begin];

        let Some(kw) = keyword::find(ElementKind::AnimeType, &keyword::normalize(prefix)) else {
            return false;
        };
        if kw.kind != ElementKind::AnimeType {
            return false;
        }

        self.elements.add(ElementKind::AnimeType, prefix);
        let number = word[number_begin..].to_string();
        if self.match_episode_patterns(&number, token_index)
            || self.set_episode_number(&number, token_index, true)
        {
            // Split last so the indices above stay meaningful.
            let enclosed = self.tokens[token_index].enclosed;
            self.tokens[token_index].text = number;
            let prefix_kind = if kw.is_identifiable() {
                TokenKind::Identifier
            } else {
                TokenKind::Unknown
            };
            self.tokens
                .insert(token_index, Token::new(prefix, prefix_kind, enclosed));
            return true;
        }
        false
    }

    fn match_fractional_episode_pattern(&mut self, word: &str, token_index: usize) -> bool {
        FRACTIONAL_EPISODE.is_match(word) && self.set_episode_number(word, token_index, true)
    }

    /// "4a", "111C": a number with a single A-C letter suffix.
    fn match_partial_episode_pattern(&mut self, word: &str, token_index: usize) -> bool {
        let chars: Vec<char> = word.chars().collect();
        let Some(suffix_begin) = chars.iter().position(|c| !c.is_ascii_digit()) else {
            return false;
        };
        let is_valid_suffix =
            |c: char| ('A'..='C').contains(&c) || ('a'..='c').contains(&c);

        chars.len() - suffix_begin == 1
            && is_valid_suffix(chars[suffix_begin])
            && self.set_episode_number(word, token_index, true)
    }

    fn match_number_sign_pattern(&mut self, word: &str, token_index: usize) -> bool {
        if !word.starts_with('#') {
            return false;
        }
        let Some(caps) = NUMBER_SIGN.captures(word) else {
            return false;
        };
        let first = caps[1].to_string();
        if self.set_episode_number(&first, token_index, true) {
            if let Some(second) = caps.get(2) {
                let second = second.as_str().to_string();
                self.set_episode_number(&second, token_index, false);
            }
            if let Some(version) = caps.get(3) {
                self.elements.add(ElementKind::ReleaseVersion, version.as_str());
            }
            return true;
        }
        false
    }

    fn match_japanese_counter_pattern(&mut self, word: &str, token_index: usize) -> bool {
        if !word.ends_with('\u{8A71}') {
            return false;
        }
        let Some(caps) = JAPANESE_COUNTER.captures(word) else {
            return false;
        };
        let number = caps[1].to_string();
        self.set_episode_number(&number, token_index, false);
        true
    }

    pub(super) fn match_volume_patterns(&mut self, word: &str, token_index: usize) -> bool {
        // Every volume pattern contains at least one non-numeric character.
        if is_numeric(word) {
            return false;
        }

        let trimmed = trim_word(word);
        if trimmed.is_empty() {
            return false;
        }
        let numeric_front = trimmed.chars().next().is_some_and(|c| c.is_ascii_digit());
        let numeric_back = trimmed.chars().last().is_some_and(|c| c.is_ascii_digit());

        if numeric_front && numeric_back {
            if self.match_single_volume_pattern(trimmed, token_index) {
                return true;
            }
            if self.match_multi_volume_pattern(trimmed, token_index) {
                return true;
            }
        }

        false
    }

    fn match_single_volume_pattern(&mut self, word: &str, token_index: usize) -> bool {
        let Some(caps) = SINGLE_VOLUME.captures(word) else {
            return false;
        };
        self.set_volume_number(&caps[1], token_index, false);
        self.elements.add(ElementKind::ReleaseVersion, &caps[2]);
        true
    }

    fn match_multi_volume_pattern(&mut self, word: &str, token_index: usize) -> bool {
        let Some(caps) = MULTI_VOLUME.captures(word) else {
            return false;
        };
        let lower = caps[1].to_string();
        let upper = caps[2].to_string();
        if to_int_or(&lower, 0) < to_int_or(&upper, 0)
            && self.set_volume_number(&lower, token_index, true)
        {
            self.set_volume_number(&upper, token_index, false);
            if let Some(version) = caps.get(3) {
                self.elements.add(ElementKind::ReleaseVersion, version.as_str());
            }
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Elements;
    use crate::options::Options;

    fn run(word: &str) -> (Elements, Vec<Token>, bool) {
        let options = Options::default();
        let mut elements = Elements::new();
        let mut tokens = vec![Token::new(word, TokenKind::Unknown, false)];
        let matched = {
            let mut parser = Parser::new(&mut elements, &options, &mut tokens);
            let text = word.to_string();
            parser.match_episode_patterns(&text, 0)
        };
        (elements, tokens, matched)
    }

    #[test]
    fn single_episode_with_version() {
        let (elements, tokens, matched) = run("01v2");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("01"));
        assert_eq!(elements.get(ElementKind::ReleaseVersion), Some("2"));
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn multi_episode_range() {
        let (elements, _, matched) = run("01-02");
        assert!(matched);
        assert_eq!(
            elements.get_all(ElementKind::EpisodeNumber),
            vec!["01", "02"]
        );
    }

    #[test]
    fn multi_episode_rejects_descending_range() {
        let (elements, _, matched) = run("009-1");
        assert!(!matched);
        assert!(!elements.has(ElementKind::EpisodeNumber));
    }

    #[test]
    fn season_and_episode_forms() {
        let (elements, _, matched) = run("S01E03");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::AnimeSeason), Some("01"));
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("03"));

        let (elements, _, matched) = run("2x01");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::AnimeSeason), Some("2"));
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("01"));

        let (elements, _, matched) = run("s02e15");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::AnimeSeason), Some("02"));
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("15"));
    }

    #[test]
    fn season_zero_is_rejected() {
        let (elements, _, matched) = run("S00E01");
        assert!(!matched);
        assert!(!elements.has(ElementKind::AnimeSeason));
    }

    #[test]
    fn type_prefixed_episode_splits_the_token() {
        let (elements, tokens, matched) = run("OP2");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::AnimeType), Some("OP"));
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("2"));
        // "OP" is unidentifiable, so the split leaves it unknown.
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "OP");
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].text, "2");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn fractional_episode() {
        let (elements, _, matched) = run("07.5");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("07.5"));

        let (_, _, matched) = run("1.11");
        assert!(!matched);
    }

    #[test]
    fn partial_episode_suffix() {
        let (elements, _, matched) = run("4a");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("4a"));

        let (_, _, matched) = run("4d");
        assert!(!matched);
    }

    #[test]
    fn number_sign() {
        let (elements, _, matched) = run("#04");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("04"));

        let (elements, _, matched) = run("#02-03v2");
        assert!(matched);
        assert_eq!(
            elements.get_all(ElementKind::EpisodeNumber),
            vec!["02", "03"]
        );
        assert_eq!(elements.get(ElementKind::ReleaseVersion), Some("2"));
    }

    #[test]
    fn japanese_counter() {
        let (elements, _, matched) = run("\u{7B2C}12\u{8A71}");
        // "第12話" fails here because of the leading counter word; the
        // prefix path handles it. The bare "12話" form matches.
        assert!(!matched);
        assert!(!elements.has(ElementKind::EpisodeNumber));

        let (elements, _, matched) = run("12\u{8A71}");
        assert!(matched);
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("12"));
    }

    #[test]
    fn plain_numbers_never_match() {
        let (_, _, matched) = run("05");
        assert!(!matched);
    }

    #[test]
    fn episode_validator_rejects_years() {
        assert!(is_valid_episode_number("1899"));
        assert!(!is_valid_episode_number("1900"));
        assert!(!is_valid_episode_number("2024"));
        assert!(is_valid_episode_number("01v2"));
    }

    #[test]
    fn volume_validator_caps_at_twenty() {
        assert!(is_valid_volume_number("20"));
        assert!(!is_valid_volume_number("21"));
    }

    #[test]
    fn volume_patterns() {
        let options = Options::default();
        let mut elements = Elements::new();
        let mut tokens = vec![Token::new("3-5v2", TokenKind::Unknown, false)];
        {
            let mut parser = Parser::new(&mut elements, &options, &mut tokens);
            assert!(parser.match_volume_patterns("3-5v2", 0));
        }
        assert_eq!(elements.get_all(ElementKind::VolumeNumber), vec!["3", "5"]);
        assert_eq!(elements.get(ElementKind::ReleaseVersion), Some("2"));
    }
}
