use std::ops::Range;

use tracing::trace;

use crate::elements::Elements;
use crate::keyword;
use crate::options::Options;
use crate::text::is_numeric;
use crate::token::{find_next_token, find_prev_token, Token, TokenFlags, TokenKind};

/// Bracket pairs recognized by the bracket pass, including the CJK corner
/// and lenticular brackets and the fullwidth parentheses.
const BRACKET_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('\u{300C}', '\u{300D}'), // 「」
    ('\u{300E}', '\u{300F}'), // 『』
    ('\u{3010}', '\u{3011}'), // 【】
    ('\u{FF08}', '\u{FF09}'), // （）
];

fn matching_bracket(open: char) -> Option<char> {
    BRACKET_PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, c)| *c)
}

/// Splits the cleaned filename into the token sequence.
///
/// Bracket state is a single open/close flag: nesting is not tracked, an
/// opener seen while inside a bracket is ordinary text until the matching
/// closer of the outer bracket appears.
pub(crate) struct Tokenizer<'a> {
    filename: &'a str,
    options: &'a Options,
    elements: &'a mut Elements,
    tokens: &'a mut Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(
        filename: &'a str,
        options: &'a Options,
        elements: &'a mut Elements,
        tokens: &'a mut Vec<Token>,
    ) -> Self {
        Self {
            filename,
            options,
            elements,
            tokens,
        }
    }

    /// Tokenize the filename. Fails only when nothing was produced.
    pub(crate) fn tokenize(mut self) -> bool {
        self.tokenize_by_brackets();
        self.validate_delimiter_tokens();
        trace!(tokens = self.tokens.len(), "tokenized");
        !self.tokens.is_empty()
    }

    fn tokenize_by_brackets(&mut self) {
        let mut bracket_open = false;
        let mut matching = ')';
        let mut index = 0;

        while index < self.filename.len() {
            let found = if bracket_open {
                self.filename[index..]
                    .char_indices()
                    .find(|&(_, c)| c == matching)
                    .map(|(i, c)| (index + i, c))
            } else {
                self.filename[index..]
                    .char_indices()
                    .find_map(|(i, c)| matching_bracket(c).map(|close| (index + i, c, close)))
                    .map(|(i, c, close)| {
                        matching = close;
                        (i, c)
                    })
            };

            let span_end = found.map_or(self.filename.len(), |(i, _)| i);
            if span_end > index {
                self.tokenize_by_pre_identified(bracket_open, index..span_end);
            }

            match found {
                Some((at, bracket)) => {
                    let len = bracket.len_utf8();
                    self.add_token(TokenKind::Bracket, true, at..at + len);
                    bracket_open = !bracket_open;
                    index = at + len;
                }
                None => break,
            }
        }
    }

    /// Cut a span at every phrase-list hit, emitting identifier tokens for
    /// the hits and delimiter-splitting the gaps.
    fn tokenize_by_pre_identified(&mut self, enclosed: bool, range: Range<usize>) {
        let mut pre_identified: Vec<Range<usize>> = Vec::new();
        keyword::peek(self.filename, range.clone(), self.elements, &mut pre_identified);

        let mut sub_start = range.start;
        let mut index = range.start;
        while index < range.end {
            if let Some(span) = pre_identified
                .iter()
                .find(|span| span.start == index)
                .cloned()
            {
                if index > sub_start {
                    self.tokenize_by_delimiters(enclosed, sub_start..index);
                }
                self.add_token(TokenKind::Identifier, enclosed, span.clone());
                sub_start = span.end;
                index = span.end;
            } else {
                index += 1;
            }
        }

        if range.end > sub_start {
            self.tokenize_by_delimiters(enclosed, sub_start..range.end);
        }
    }

    fn tokenize_by_delimiters(&mut self, enclosed: bool, range: Range<usize>) {
        let span = &self.filename[range.clone()];
        let delimiters: Vec<char> = self
            .options
            .allowed_delimiters
            .chars()
            .filter(|&d| span.contains(d))
            .collect();

        if delimiters.is_empty() {
            self.add_token(TokenKind::Unknown, enclosed, range);
            return;
        }

        let mut index = range.start;
        while index < range.end {
            let found = self.filename[index..range.end]
                .char_indices()
                .find(|(_, c)| delimiters.contains(c))
                .map(|(i, c)| (index + i, c));

            match found {
                Some((at, delimiter)) => {
                    if at > index {
                        self.add_token(TokenKind::Unknown, enclosed, index..at);
                    }
                    let len = delimiter.len_utf8();
                    self.add_token(TokenKind::Delimiter, enclosed, at..at + len);
                    index = at + len;
                }
                None => {
                    self.add_token(TokenKind::Unknown, enclosed, index..range.end);
                    break;
                }
            }
        }
    }

    /// Reclassify or absorb delimiter tokens that were misdetected as
    /// separators, then compact the tombstones out.
    fn validate_delimiter_tokens(&mut self) {
        fn is_delimiter(tokens: &[Token], index: Option<usize>) -> bool {
            index.is_some_and(|i| tokens[i].kind == TokenKind::Delimiter)
        }

        fn is_unknown(tokens: &[Token], index: Option<usize>) -> bool {
            index.is_some_and(|i| tokens[i].kind == TokenKind::Unknown)
        }

        fn is_single_character(tokens: &[Token], index: Option<usize>) -> bool {
            is_unknown(tokens, index)
                && index.is_some_and(|i| {
                    let mut chars = tokens[i].text.chars();
                    matches!((chars.next(), chars.next()), (Some(c), None) if c != '-')
                })
        }

        fn append_to(tokens: &mut [Token], from: usize, to: usize) {
            let text = std::mem::take(&mut tokens[from].text);
            tokens[to].text.push_str(&text);
            tokens[from].kind = TokenKind::Invalid;
        }

        for index in 0..self.tokens.len() {
            if self.tokens[index].kind != TokenKind::Delimiter {
                continue;
            }
            let Some(delimiter) = self.tokens[index].text.chars().next() else {
                continue;
            };

            let prev = find_prev_token(self.tokens, index, TokenFlags::VALID);
            let mut next = find_next_token(self.tokens, index, TokenFlags::VALID);

            if delimiter != ' ' && delimiter != '_' {
                // A single character next to a non-space delimiter is a
                // word fragment, not a separate token ("x.264", "Vol.3").
                if let Some(target) = prev.filter(|_| is_single_character(self.tokens, prev)) {
                    append_to(self.tokens, index, target);
                    while let Some(absorbed) = next.filter(|_| is_unknown(self.tokens, next)) {
                        append_to(self.tokens, absorbed, target);
                        next = find_next_token(self.tokens, absorbed, TokenFlags::VALID);
                        if let Some(chained) = next.filter(|&n| {
                            self.tokens[n].kind == TokenKind::Delimiter
                                && self.tokens[n].text.chars().next() == Some(delimiter)
                        }) {
                            append_to(self.tokens, chained, target);
                            next = find_next_token(self.tokens, chained, TokenFlags::VALID);
                        }
                    }
                    continue;
                }

                if is_single_character(self.tokens, next) {
                    if let (Some(target), Some(single)) = (prev, next) {
                        append_to(self.tokens, index, target);
                        append_to(self.tokens, single, target);
                    }
                    continue;
                }
            }

            // Adjacent delimiters.
            if is_unknown(self.tokens, prev) && is_delimiter(self.tokens, next) {
                let next_delimiter = next
                    .and_then(|n| self.tokens[n].text.chars().next())
                    .unwrap_or(' ');
                if delimiter != next_delimiter
                    && delimiter != ','
                    && (next_delimiter == ' ' || next_delimiter == '_')
                {
                    if let Some(target) = prev {
                        append_to(self.tokens, index, target);
                    }
                }
            } else if is_delimiter(self.tokens, prev) && is_delimiter(self.tokens, next) {
                let prev_delimiter = prev.and_then(|p| self.tokens[p].text.chars().next());
                let next_delimiter = next.and_then(|n| self.tokens[n].text.chars().next());
                if prev_delimiter == next_delimiter
                    && prev_delimiter != Some(delimiter)
                {
                    // e.g. "&" in "_&_"
                    self.tokens[index].kind = TokenKind::Unknown;
                }
            }

            // Number ranges joined by "&" or "+" ("08&09").
            if (delimiter == '&' || delimiter == '+')
                && is_unknown(self.tokens, prev)
                && is_unknown(self.tokens, next)
                && prev.is_some_and(|p| is_numeric(&self.tokens[p].text))
                && next.is_some_and(|n| is_numeric(&self.tokens[n].text))
            {
                if let (Some(target), Some(other)) = (prev, next) {
                    append_to(self.tokens, index, target);
                    append_to(self.tokens, other, target);
                }
            }
        }

        self.tokens.retain(|t| t.kind != TokenKind::Invalid);
    }

    fn add_token(&mut self, kind: TokenKind, enclosed: bool, range: Range<usize>) {
        self.tokens
            .push(Token::new(&self.filename[range], kind, enclosed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(filename: &str) -> Vec<Token> {
        let options = Options::default();
        let mut elements = Elements::new();
        let mut tokens = Vec::new();
        assert!(Tokenizer::new(filename, &options, &mut elements, &mut tokens).tokenize());
        tokens
    }

    fn texts(tokens: &[Token], kind: TokenKind) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.text.clone())
            .collect()
    }

    #[test]
    fn brackets_and_enclosure() {
        let tokens = tokenize("[Group] Title");
        assert_eq!(tokens[0].kind, TokenKind::Bracket);
        assert!(tokens[0].enclosed);
        assert_eq!(tokens[1].text, "Group");
        assert!(tokens[1].enclosed);
        assert_eq!(tokens[2].text, "]");
        let title = tokens.iter().find(|t| t.text == "Title").unwrap();
        assert!(!title.enclosed);
    }

    #[test]
    fn cjk_brackets() {
        let tokens = tokenize("【Group】Title 「01」");
        assert_eq!(tokens[0].text, "\u{3010}");
        assert_eq!(tokens[0].kind, TokenKind::Bracket);
        assert!(tokens[1].enclosed);
        assert_eq!(tokens[1].text, "Group");
    }

    #[test]
    fn nesting_is_not_tracked() {
        // The inner opener is plain text while the outer bracket is open.
        let tokens = tokenize("[a[b]c");
        let brackets = texts(&tokens, TokenKind::Bracket);
        assert_eq!(brackets, vec!["[", "]"]);
        let unknown = texts(&tokens, TokenKind::Unknown);
        assert!(unknown.contains(&"a[b".to_string()));
        // "c" follows the matched closer, so it is outside.
        let c = tokens.iter().find(|t| t.text == "c").unwrap();
        assert!(!c.enclosed);
    }

    #[test]
    fn phrase_pass_cuts_before_delimiters() {
        let options = Options::default();
        let mut elements = Elements::new();
        let mut tokens = Vec::new();
        assert!(
            Tokenizer::new("[1080p Dual Audio]", &options, &mut elements, &mut tokens).tokenize()
        );
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Identifier && t.text == "Dual Audio"));
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Identifier && t.text == "1080p"));
        assert_eq!(
            elements.get(crate::elements::ElementKind::AudioTerm),
            Some("Dual Audio")
        );
    }

    #[test]
    fn dotted_codec_is_reassembled() {
        // "H.265" is not in the phrase list, so it arrives split on the dot
        // and is rebuilt by delimiter cleanup.
        let tokens = tokenize("Title H.265 AAC");
        let unknown = texts(&tokens, TokenKind::Unknown);
        assert!(unknown.contains(&"H.265".to_string()));
    }

    #[test]
    fn numeric_range_absorbs_ampersand() {
        let tokens = tokenize("Title - 08&09");
        let unknown = texts(&tokens, TokenKind::Unknown);
        assert!(unknown.contains(&"08&09".to_string()));
    }

    #[test]
    fn ampersand_between_underscores_becomes_a_word() {
        let tokens = tokenize("Foo_&_Bar");
        let amp = tokens.iter().find(|t| t.text == "&").unwrap();
        assert_eq!(amp.kind, TokenKind::Unknown);
    }

    #[test]
    fn round_trip_before_cleanup() {
        let filename = "[TaigaSubs]_Toradora!_(2008)_-_01v2_[1280x720_H.264_AAC][ABCD1234]";
        let options = Options::default();
        let mut elements = Elements::new();
        let mut tokens = Vec::new();
        let mut tokenizer = Tokenizer::new(filename, &options, &mut elements, &mut tokens);
        tokenizer.tokenize_by_brackets();
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, filename);
    }

    #[test]
    fn empty_input_produces_no_tokens() {
        let options = Options::default();
        let mut elements = Elements::new();
        let mut tokens = Vec::new();
        assert!(!Tokenizer::new("", &options, &mut elements, &mut tokens).tokenize());
        assert!(tokens.is_empty());
    }

    #[test]
    fn active_delimiters_are_the_configured_set_present_in_the_span() {
        let tokens = tokenize("AB|CD EF");
        let delimiters = texts(&tokens, TokenKind::Delimiter);
        assert!(delimiters.contains(&"|".to_string()));
        assert!(delimiters.contains(&" ".to_string()));
    }
}
