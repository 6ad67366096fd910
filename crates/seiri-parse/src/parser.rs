mod number;

use tracing::trace;

use crate::elements::{ElementKind, Elements};
use crate::keyword;
use crate::options::Options;
use crate::text::{
    find_first_digit, is_crc32, is_dash_character, is_mostly_latin, is_numeric, is_resolution,
    ordinal_to_number, to_int_or, trim_dashes_and_spaces, trim_word,
};
use crate::token::{
    find_next_token, find_prev_token, find_token, Token, TokenFlags, TokenKind,
};

pub(crate) const ANIME_YEAR_MIN: i64 = 1900;
pub(crate) const ANIME_YEAR_MAX: i64 = 2050;
pub(crate) const EPISODE_NUMBER_MAX: i64 = ANIME_YEAR_MIN - 1;
pub(crate) const VOLUME_NUMBER_MAX: i64 = 20;

/// Tokens treated as "N of M" / "N & M" separators; the flag marks whether
/// the right-hand number is also an episode number.
const SEPARATORS: &[(&str, bool)] = &[("&", true), ("of", true)];

/// Runs the fixed sequence of heuristic passes over the token arena,
/// appending typed elements as meanings are pinned down.
pub(crate) struct Parser<'a> {
    elements: &'a mut Elements,
    options: &'a Options,
    tokens: &'a mut Vec<Token>,
    found_episode_number: bool,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        elements: &'a mut Elements,
        options: &'a Options,
        tokens: &'a mut Vec<Token>,
    ) -> Self {
        Self {
            elements,
            options,
            tokens,
            found_episode_number: false,
        }
    }

    /// Succeeds when an anime title was identified.
    pub(crate) fn parse(&mut self) -> bool {
        self.search_for_keywords();
        self.search_for_isolated_numbers();

        if self.options.parse_episode_number {
            self.search_for_episode_number();
        }

        self.search_for_anime_title();

        if self.options.parse_release_group && !self.elements.has(ElementKind::ReleaseGroup) {
            self.search_for_release_group();
        }

        if self.options.parse_episode_title && self.elements.has(ElementKind::EpisodeNumber) {
            self.search_for_episode_title();
        }

        self.validate_elements();
        trace!(elements = self.elements.len(), "parser passes complete");

        self.elements.has(ElementKind::AnimeTitle)
    }

    // ── Pass (a): keyword search ─────────────────────────────────

    fn search_for_keywords(&mut self) {
        for index in 0..self.tokens.len() {
            if self.tokens[index].kind != TokenKind::Unknown {
                continue;
            }

            let mut word = trim_word(&self.tokens[index].text).to_string();
            if word.is_empty() {
                continue;
            }
            // A number that cannot be a CRC32 is of no interest here.
            if word.len() != 8 && is_numeric(&word) {
                continue;
            }

            let normalized = keyword::normalize(&word);
            match keyword::find(ElementKind::Unknown, &normalized) {
                Some(kw) => {
                    let kind = kw.kind;
                    if !self.options.parse_release_group && kind == ElementKind::ReleaseGroup {
                        continue;
                    }
                    if !kind.is_searchable() || !kw.is_searchable() {
                        continue;
                    }
                    if kind.is_singular() && self.elements.has(kind) {
                        continue;
                    }
                    // Prefix kinds get dedicated handling instead of a
                    // plain element.
                    match kind {
                        ElementKind::AnimeSeasonPrefix => {
                            self.check_anime_season_keyword(index);
                            continue;
                        }
                        ElementKind::EpisodePrefix => {
                            if kw.is_valid() {
                                self.check_extent_keyword(ElementKind::EpisodeNumber, index);
                            }
                            continue;
                        }
                        ElementKind::VolumePrefix => {
                            self.check_extent_keyword(ElementKind::VolumeNumber, index);
                            continue;
                        }
                        ElementKind::ReleaseVersion => {
                            word.remove(0); // number without "v"
                        }
                        _ => {}
                    }
                    self.elements.add(kind, word);
                    if kw.is_identifiable() {
                        self.tokens[index].kind = TokenKind::Identifier;
                    }
                }
                None => {
                    let kind = if !self.elements.has(ElementKind::FileChecksum) && is_crc32(&word)
                    {
                        Some(ElementKind::FileChecksum)
                    } else if !self.elements.has(ElementKind::VideoResolution)
                        && is_resolution(&word)
                    {
                        Some(ElementKind::VideoResolution)
                    } else {
                        None
                    };
                    if let Some(kind) = kind {
                        self.elements.add(kind, word);
                        self.tokens[index].kind = TokenKind::Identifier;
                    }
                }
            }
        }
    }

    /// "2nd Season" / "Season 2": pull the number from the adjacent token
    /// and consume both.
    fn check_anime_season_keyword(&mut self, token_index: usize) -> bool {
        if let Some(prev) = find_prev_token(self.tokens, token_index, TokenFlags::NOT_DELIMITER) {
            if let Some(num) = ordinal_to_number(&self.tokens[prev].text) {
                self.elements.add(ElementKind::AnimeSeason, num);
                self.tokens[prev].kind = TokenKind::Identifier;
                self.tokens[token_index].kind = TokenKind::Identifier;
                return true;
            }
        }

        if let Some(next) = find_next_token(self.tokens, token_index, TokenFlags::NOT_DELIMITER) {
            if is_numeric(&self.tokens[next].text) {
                let content = self.tokens[next].text.clone();
                self.elements.add(ElementKind::AnimeSeason, content);
                self.tokens[token_index].kind = TokenKind::Identifier;
                self.tokens[next].kind = TokenKind::Identifier;
                return true;
            }
        }

        false
    }

    /// "EP 12" / "Vol 3": the number lives in the token after the prefix
    /// keyword.
    fn check_extent_keyword(&mut self, kind: ElementKind, token_index: usize) -> bool {
        let Some(next) = find_next_token(self.tokens, token_index, TokenFlags::NOT_DELIMITER)
        else {
            return false;
        };
        if self.tokens[next].kind != TokenKind::Unknown {
            return false;
        }
        if find_first_digit(&self.tokens[next].text) != Some(0) {
            return false;
        }

        let content = self.tokens[next].text.clone();
        match kind {
            ElementKind::EpisodeNumber => {
                if !self.match_episode_patterns(&content, next) {
                    self.set_episode_number(&content, next, false);
                }
            }
            ElementKind::VolumeNumber => {
                if !self.match_volume_patterns(&content, next) {
                    self.set_volume_number(&content, next, false);
                }
            }
            _ => {}
        }
        self.tokens[token_index].kind = TokenKind::Identifier;
        true
    }

    // ── Pass (b): isolated numbers ───────────────────────────────

    fn search_for_isolated_numbers(&mut self) {
        for index in 0..self.tokens.len() {
            if self.tokens[index].kind != TokenKind::Unknown
                || !is_numeric(&self.tokens[index].text)
                || !self.is_token_isolated(index)
            {
                continue;
            }

            let number = to_int_or(&self.tokens[index].text, 0);

            if (ANIME_YEAR_MIN..=ANIME_YEAR_MAX).contains(&number)
                && !self.elements.has(ElementKind::AnimeYear)
            {
                let content = self.tokens[index].text.clone();
                self.elements.add(ElementKind::AnimeYear, content);
                self.tokens[index].kind = TokenKind::Identifier;
                continue;
            }

            // Some fansub groups use these without the "p" suffix; isolated,
            // they are far more likely the resolution than an episode.
            if (number == 480 || number == 720 || number == 1080)
                && !self.elements.has(ElementKind::VideoResolution)
            {
                let content = self.tokens[index].text.clone();
                self.elements.add(ElementKind::VideoResolution, content);
                self.tokens[index].kind = TokenKind::Identifier;
            }
        }
    }

    // ── Pass (c): episode number ─────────────────────────────────

    fn search_for_episode_number(&mut self) {
        let mut candidates: Vec<usize> = (0..self.tokens.len())
            .filter(|&i| {
                self.tokens[i].kind == TokenKind::Unknown
                    && find_first_digit(&self.tokens[i].text).is_some()
            })
            .collect();
        if candidates.is_empty() {
            return;
        }

        self.found_episode_number = self.elements.has(ElementKind::EpisodeNumber);

        // A token matching a structural pattern has to be the episode number.
        if self.search_for_episode_patterns(&candidates) {
            return;
        }

        if self.elements.has(ElementKind::EpisodeNumber) {
            return; // an episode prefix keyword already delivered one
        }

        // From here on, only plain numeric tokens are of interest.
        candidates.retain(|&i| is_numeric(&self.tokens[i].text));
        if candidates.is_empty() {
            return;
        }

        if self.search_for_equivalent_numbers(&candidates) {
            return;
        }
        if self.search_for_separated_numbers(&candidates) {
            return;
        }
        if self.search_for_isolated_episode_number(&candidates) {
            return;
        }
        self.search_for_last_number(&candidates);
    }

    fn search_for_episode_patterns(&mut self, candidates: &[usize]) -> bool {
        for &index in candidates {
            let numeric_front = self.tokens[index]
                .text
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit());

            if !numeric_front {
                // e.g. "EP.1", "Vol.1"
                if self.number_comes_after_prefix(ElementKind::EpisodePrefix, index) {
                    return true;
                }
                if self.number_comes_after_prefix(ElementKind::VolumePrefix, index) {
                    continue;
                }
            } else if self.number_comes_before_prefix(index) {
                // e.g. "8 & 10", "01 of 24"
                return true;
            }

            let word = self.tokens[index].text.clone();
            if self.match_episode_patterns(&word, index) {
                return true;
            }
        }
        false
    }

    fn number_comes_after_prefix(&mut self, kind: ElementKind, token_index: usize) -> bool {
        let content = self.tokens[token_index].text.clone();
        let Some(number_begin) = find_first_digit(&content) else {
            return false;
        };
        let prefix = keyword::normalize(&content[..number_begin]);

        let Some(kw) = keyword::find(kind, &prefix) else {
            return false;
        };
        if kw.kind != kind {
            return false;
        }

        let number = &content[number_begin..];
        match kind {
            ElementKind::EpisodePrefix => {
                if !self.match_episode_patterns(number, token_index) {
                    self.set_episode_number(number, token_index, false);
                }
                true
            }
            ElementKind::VolumePrefix => {
                if !self.match_volume_patterns(number, token_index) {
                    self.set_volume_number(number, token_index, false);
                }
                true
            }
            _ => false,
        }
    }

    fn number_comes_before_prefix(&mut self, token_index: usize) -> bool {
        let Some(separator_index) =
            find_next_token(self.tokens, token_index, TokenFlags::NOT_DELIMITER)
        else {
            return false;
        };

        for (separator, both_episodes) in SEPARATORS {
            if self.tokens[separator_index].text != *separator {
                continue;
            }
            let Some(other_index) =
                find_next_token(self.tokens, separator_index, TokenFlags::NOT_DELIMITER)
            else {
                continue;
            };
            if !is_numeric(&self.tokens[other_index].text) {
                continue;
            }

            let content = self.tokens[token_index].text.clone();
            self.set_episode_number(&content, token_index, false);
            if *both_episodes {
                let other = self.tokens[other_index].text.clone();
                self.set_episode_number(&other, other_index, false);
            }
            self.tokens[separator_index].kind = TokenKind::Identifier;
            self.tokens[other_index].kind = TokenKind::Identifier;
            return true;
        }

        false
    }

    /// "07 (07)": a plain number whose value reappears isolated in the
    /// following bracket group; stored as primary plus alternate.
    fn search_for_equivalent_numbers(&mut self, candidates: &[usize]) -> bool {
        for &index in candidates {
            if self.is_token_isolated(index)
                || !number::is_valid_episode_number(&self.tokens[index].text)
            {
                continue;
            }

            // The next non-delimiter token has to open a bracket group.
            let Some(bracket) = find_next_token(self.tokens, index, TokenFlags::NOT_DELIMITER)
            else {
                continue;
            };
            if self.tokens[bracket].kind != TokenKind::Bracket {
                continue;
            }

            let Some(inner) = find_next_token(
                self.tokens,
                bracket,
                TokenFlags::ENCLOSED | TokenFlags::NOT_DELIMITER,
            ) else {
                continue;
            };
            if self.tokens[inner].kind != TokenKind::Unknown {
                continue;
            }
            if !self.is_token_isolated(inner)
                || !is_numeric(&self.tokens[inner].text)
                || !number::is_valid_episode_number(&self.tokens[inner].text)
            {
                continue;
            }

            let first = to_int_or(&self.tokens[index].text, 0);
            let second = to_int_or(&self.tokens[inner].text, 0);
            let (lower, upper) = if first <= second {
                (index, inner)
            } else {
                (inner, index)
            };

            let lower_text = self.tokens[lower].text.clone();
            self.set_episode_number(&lower_text, lower, false);
            let upper_text = self.tokens[upper].text.clone();
            self.set_alternative_episode_number(&upper_text, upper);
            return true;
        }

        false
    }

    /// "Title - 05": a number right after an isolated dash token.
    fn search_for_separated_numbers(&mut self, candidates: &[usize]) -> bool {
        for &index in candidates {
            let Some(prev) = find_prev_token(self.tokens, index, TokenFlags::NOT_DELIMITER)
            else {
                continue;
            };
            if self.tokens[prev].kind != TokenKind::Unknown
                || !is_dash_character(&self.tokens[prev].text)
            {
                continue;
            }

            let content = self.tokens[index].text.clone();
            if self.set_episode_number(&content, index, true) {
                self.tokens[prev].kind = TokenKind::Identifier;
                return true;
            }
        }

        false
    }

    fn search_for_isolated_episode_number(&mut self, candidates: &[usize]) -> bool {
        for &index in candidates {
            if !self.tokens[index].enclosed || !self.is_token_isolated(index) {
                continue;
            }
            let content = self.tokens[index].text.clone();
            if self.set_episode_number(&content, index, true) {
                return true;
            }
        }
        false
    }

    fn search_for_last_number(&mut self, candidates: &[usize]) -> bool {
        for &index in candidates.iter().rev() {
            // The episode number always trails the title, so the very first
            // token is out.
            if index == 0 {
                continue;
            }
            if self.tokens[index].enclosed {
                continue;
            }
            // Equally out when everything before it is enclosed or a
            // delimiter: it would be the first meaningful token.
            if self.tokens[..index]
                .iter()
                .all(|t| t.enclosed || t.kind == TokenKind::Delimiter)
            {
                continue;
            }
            if let Some(prev) = find_prev_token(self.tokens, index, TokenFlags::NOT_DELIMITER) {
                if self.tokens[prev].kind == TokenKind::Unknown
                    && (self.tokens[prev].text == "Movie" || self.tokens[prev].text == "Part")
                {
                    continue;
                }
            }

            let content = self.tokens[index].text.clone();
            if self.set_episode_number(&content, index, true) {
                return true;
            }
        }
        false
    }

    // ── Pass (d): anime title ────────────────────────────────────

    fn search_for_anime_title(&mut self) {
        let mut enclosed_title = false;

        // The first non-enclosed unknown run is the natural candidate.
        let mut token_begin = find_token(
            self.tokens,
            0,
            TokenFlags::NOT_ENCLOSED | TokenFlags::UNKNOWN,
        );

        // Everything enclosed: assume the first group is the release group
        // and look for the first mostly-Latin token of a later group.
        if token_begin.is_none() {
            enclosed_title = true;
            let mut skipped_previous_group = false;
            let mut cursor = 0usize;
            loop {
                let Some(found) = find_token(self.tokens, cursor, TokenFlags::UNKNOWN) else {
                    token_begin = None;
                    break;
                };
                token_begin = Some(found);
                if is_mostly_latin(&self.tokens[found].text) && skipped_previous_group {
                    break;
                }
                skipped_previous_group = true;
                match find_token(self.tokens, found, TokenFlags::BRACKET)
                    .and_then(|b| find_token(self.tokens, b, TokenFlags::UNKNOWN))
                {
                    Some(next_group) => cursor = next_group,
                    None => {
                        token_begin = None;
                        break;
                    }
                }
            }
        }
        let Some(token_begin) = token_begin else { return };

        let end_flags = if enclosed_title {
            TokenFlags::IDENTIFIER | TokenFlags::BRACKET
        } else {
            TokenFlags::IDENTIFIER
        };
        let mut token_end =
            find_token(self.tokens, token_begin, end_flags).unwrap_or(self.tokens.len());

        if !enclosed_title {
            // An unmatched open bracket inside the interval clamps it.
            let mut last_bracket = token_end;
            let mut bracket_open = false;
            for index in token_begin..token_end {
                if self.tokens[index].kind == TokenKind::Bracket {
                    last_bracket = index;
                    bracket_open = !bracket_open;
                }
            }
            if bracket_open {
                token_end = last_bracket;
            }
        }

        if !enclosed_title {
            // Walk back over a trailing enclosed group ("Anime Title [Fansub]"),
            // leaving parenthesized groups such as "(TV)" intact.
            let mut token_index =
                find_prev_token(self.tokens, token_end, TokenFlags::NOT_DELIMITER);
            while let Some(current) = token_index {
                if self.tokens[current].kind != TokenKind::Bracket
                    || self.tokens[current].text.starts_with(')')
                {
                    break;
                }
                token_index = find_prev_token(self.tokens, current, TokenFlags::BRACKET);
                if let Some(opening) = token_index {
                    token_end = opening;
                    token_index =
                        find_prev_token(self.tokens, token_end, TokenFlags::NOT_DELIMITER);
                }
            }
        }

        self.build_element(ElementKind::AnimeTitle, false, token_begin, token_end);
    }

    // ── Pass (e): release group ──────────────────────────────────

    fn search_for_release_group(&mut self) {
        let mut cursor = 0usize;
        loop {
            // First enclosed unknown run...
            let Some(token_begin) = find_token(
                self.tokens,
                cursor,
                TokenFlags::ENCLOSED | TokenFlags::UNKNOWN,
            ) else {
                return;
            };

            // ...spanning to its closing bracket...
            let Some(token_end) = find_token(
                self.tokens,
                token_begin,
                TokenFlags::BRACKET | TokenFlags::IDENTIFIER,
            ) else {
                return;
            };
            if self.tokens[token_end].kind != TokenKind::Bracket {
                cursor = token_end;
                continue;
            }

            // ...whose group starts at its opening bracket.
            if let Some(prev) = find_prev_token(self.tokens, token_begin, TokenFlags::NOT_DELIMITER)
            {
                if self.tokens[prev].kind != TokenKind::Bracket {
                    cursor = token_end;
                    continue;
                }
            }

            self.build_element(ElementKind::ReleaseGroup, true, token_begin, token_end);
            return;
        }
    }

    // ── Pass (f): episode title ──────────────────────────────────

    fn search_for_episode_title(&mut self) {
        let mut cursor = 0usize;
        loop {
            let Some(token_begin) = find_token(
                self.tokens,
                cursor,
                TokenFlags::NOT_ENCLOSED | TokenFlags::UNKNOWN,
            ) else {
                return;
            };
            let token_end = find_token(
                self.tokens,
                token_begin,
                TokenFlags::BRACKET | TokenFlags::IDENTIFIER,
            )
            .unwrap_or(self.tokens.len());

            // A lone dash between the episode number and a bracket group is
            // not a title.
            if token_end - token_begin <= 2 && is_dash_character(&self.tokens[token_begin].text) {
                cursor = token_end;
                continue;
            }

            self.build_element(ElementKind::EpisodeTitle, false, token_begin, token_end);
            return;
        }
    }

    // ── Pass (g): validation ─────────────────────────────────────

    fn validate_elements(&mut self) {
        if !self.elements.has(ElementKind::AnimeType) {
            return;
        }
        let Some(episode_title) = self
            .elements
            .get(ElementKind::EpisodeTitle)
            .map(str::to_string)
        else {
            return;
        };

        let mut index = 0;
        while index < self.elements.items.len() {
            let element = &self.elements.items[index];
            if element.kind == ElementKind::AnimeType
                && episode_title.contains(&element.value)
            {
                if episode_title.len() == element.value.len() {
                    // The "episode title" was nothing but the type word.
                    self.elements
                        .items
                        .retain(|e| e.kind != ElementKind::EpisodeTitle);
                } else {
                    let normalized = keyword::normalize(&element.value);
                    let known_type = matches!(
                        keyword::find(ElementKind::AnimeType, &normalized),
                        Some(kw) if kw.kind == ElementKind::AnimeType
                    );
                    if known_type {
                        // The type word is part of the episode title; drop the
                        // type element and examine whatever slid into this slot.
                        self.elements.items.remove(index);
                        continue;
                    }
                }
            }
            index += 1;
        }
    }

    // ── Shared helpers ───────────────────────────────────────────

    /// Both non-delimiter neighbors are brackets.
    fn is_token_isolated(&self, token_index: usize) -> bool {
        let Some(prev) = find_prev_token(self.tokens, token_index, TokenFlags::NOT_DELIMITER)
        else {
            return false;
        };
        if self.tokens[prev].kind != TokenKind::Bracket {
            return false;
        }
        let Some(next) = find_next_token(self.tokens, token_index, TokenFlags::NOT_DELIMITER)
        else {
            return false;
        };
        self.tokens[next].kind == TokenKind::Bracket
    }

    fn set_episode_number(&mut self, number: &str, token_index: usize, validate: bool) -> bool {
        if validate && !number::is_valid_episode_number(number) {
            return false;
        }

        self.tokens[token_index].kind = TokenKind::Identifier;
        let mut kind = ElementKind::EpisodeNumber;

        if self.found_episode_number {
            if let Some(position) = self
                .elements
                .items
                .iter()
                .position(|e| e.kind == ElementKind::EpisodeNumber)
            {
                let existing = to_int_or(&self.elements.items[position].value, 0);
                let value = to_int_or(number, 0);
                // The larger number gets to be the alternative one.
                if value > existing {
                    kind = ElementKind::EpisodeNumberAlt;
                } else if value < existing {
                    self.elements.items[position].kind = ElementKind::EpisodeNumberAlt;
                } else {
                    return false; // no need to record the same number twice
                }
            }
        }

        self.elements.add(kind, number);
        true
    }

    fn set_alternative_episode_number(&mut self, number: &str, token_index: usize) {
        self.elements.add(ElementKind::EpisodeNumberAlt, number);
        self.tokens[token_index].kind = TokenKind::Identifier;
    }

    fn set_volume_number(&mut self, number: &str, token_index: usize, validate: bool) -> bool {
        if validate && !number::is_valid_volume_number(number) {
            return false;
        }
        self.elements.add(ElementKind::VolumeNumber, number);
        self.tokens[token_index].kind = TokenKind::Identifier;
        true
    }

    /// Concatenate a token interval into one element. Unknown tokens are
    /// consumed (promoted to identifier); bracket text is kept; single
    /// delimiters map to a space unless kept verbatim (`,`, `&`, or
    /// `keep_delimiters`).
    fn build_element(
        &mut self,
        kind: ElementKind,
        keep_delimiters: bool,
        token_begin: usize,
        token_end: usize,
    ) {
        let mut value = String::new();

        for index in token_begin..token_end {
            match self.tokens[index].kind {
                TokenKind::Unknown => {
                    value.push_str(&self.tokens[index].text);
                    self.tokens[index].kind = TokenKind::Identifier;
                }
                TokenKind::Bracket => {
                    value.push_str(&self.tokens[index].text);
                }
                TokenKind::Delimiter => {
                    let Some(delimiter) = self.tokens[index].text.chars().next() else {
                        continue;
                    };
                    if keep_delimiters {
                        value.push(delimiter);
                    } else if index != token_begin && index != token_end {
                        match delimiter {
                            ',' | '&' => value.push(delimiter),
                            _ => value.push(' '),
                        }
                    }
                }
                _ => {}
            }
        }

        if !keep_delimiters {
            value = trim_dashes_and_spaces(&value).to_string();
        }

        if !value.is_empty() {
            self.elements.add(kind, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, parse_with, ElementKind, Options};

    #[test]
    fn year_is_claimed_once() {
        let result = parse("[Group] Title (1999) (2000) - 05.mkv");
        assert_eq!(result.elements.get_all(ElementKind::AnimeYear), vec!["1999"]);
        assert_eq!(result.elements.get(ElementKind::EpisodeNumber), Some("05"));
        assert_eq!(result.elements.get(ElementKind::AnimeTitle), Some("Title"));
    }

    #[test]
    fn bare_bracketed_resolution_is_claimed_once() {
        let result = parse("[Group] Show - 01 [720] [1080].mkv");
        assert_eq!(
            result.elements.get_all(ElementKind::VideoResolution),
            vec!["720"]
        );
        assert_eq!(result.elements.get(ElementKind::EpisodeNumber), Some("01"));
    }

    #[test]
    fn episode_number_pass_can_be_disabled() {
        let options = Options {
            parse_episode_number: false,
            ..Options::default()
        };
        let result = parse_with("Bleach - 15.mkv", &options);
        assert!(!result.elements.has(ElementKind::EpisodeNumber));
        // The numeral stays unknown and gets swallowed by the title run.
        assert_eq!(result.elements.get(ElementKind::AnimeTitle), Some("Bleach - 15"));
    }

    #[test]
    fn release_group_pass_can_be_disabled() {
        let options = Options {
            parse_release_group: false,
            ..Options::default()
        };
        let result = parse_with("[HorribleSubs] Show - 01 [720p].mkv", &options);
        assert!(!result.elements.has(ElementKind::ReleaseGroup));
        assert_eq!(result.elements.get(ElementKind::AnimeTitle), Some("Show"));
    }

    #[test]
    fn episode_title_pass_can_be_disabled() {
        let options = Options {
            parse_episode_title: false,
            ..Options::default()
        };
        let result = parse_with("Show - 01 - Black God.mkv", &options);
        assert!(!result.elements.has(ElementKind::EpisodeTitle));
        assert_eq!(result.elements.get(ElementKind::EpisodeNumber), Some("01"));
    }

    #[test]
    fn fused_single_letter_episode_prefix() {
        let result = parse("Accel World E7.mkv");
        assert_eq!(result.elements.get(ElementKind::EpisodeNumber), Some("7"));
        assert_eq!(result.elements.get(ElementKind::AnimeTitle), Some("Accel World"));
    }

    #[test]
    fn number_before_of_separator() {
        let result = parse("Hidamari Sketch 01 of 24.mkv");
        assert_eq!(
            result.elements.get_all(ElementKind::EpisodeNumber),
            vec!["01", "24"]
        );
        assert_eq!(
            result.elements.get(ElementKind::AnimeTitle),
            Some("Hidamari Sketch")
        );
    }

    #[test]
    fn season_prefix_without_a_number_is_left_alone() {
        let result = parse("Title Season.mkv");
        assert!(!result.elements.has(ElementKind::AnimeSeason));
        assert_eq!(result.elements.get(ElementKind::AnimeTitle), Some("Title Season"));
    }

    #[test]
    fn anime_type_outside_the_episode_title_survives_validation() {
        let result = parse("Seto no Hanayome OVA - 01 - Jormungand.mkv");
        assert_eq!(result.elements.get_all(ElementKind::AnimeType), vec!["OVA"]);
        assert_eq!(result.elements.get(ElementKind::EpisodeTitle), Some("Jormungand"));
    }

    #[test]
    fn larger_of_two_episode_numbers_becomes_the_alternate() {
        let result = parse("Ore no Imouto - 10 (11).mkv");
        assert_eq!(result.elements.get(ElementKind::EpisodeNumber), Some("10"));
        assert_eq!(result.elements.get(ElementKind::EpisodeNumberAlt), Some("11"));
    }
}
