use bitflags::bitflags;

/// Lexical classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Not yet assigned a meaning; the raw material of the parser passes.
    Unknown,
    /// A single bracket character from the bracket table.
    Bracket,
    /// A single delimiter character.
    Delimiter,
    /// Already assigned semantic meaning; excluded from further heuristics.
    Identifier,
    /// Tombstoned during delimiter cleanup; compacted out before parsing.
    Invalid,
}

/// A lexical unit of the filename.
///
/// `text` and `kind` are mutable (merging, splitting, promotion); the
/// `enclosed` flag is fixed at tokenization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub enclosed: bool,
}

impl Token {
    pub(crate) fn new(text: impl Into<String>, kind: TokenKind, enclosed: bool) -> Self {
        Self {
            text: text.into(),
            kind,
            enclosed,
        }
    }
}

bitflags! {
    /// Predicate over a token, composed from two independent axes: kind
    /// (five kind/polarity pairs) and enclosure (one pair). Consumed by
    /// the linear scans below.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenFlags: u16 {
        const BRACKET = 1 << 0;
        const NOT_BRACKET = 1 << 1;
        const DELIMITER = 1 << 2;
        const NOT_DELIMITER = 1 << 3;
        const IDENTIFIER = 1 << 4;
        const NOT_IDENTIFIER = 1 << 5;
        const UNKNOWN = 1 << 6;
        const NOT_UNKNOWN = 1 << 7;
        const VALID = 1 << 8;
        const NOT_VALID = 1 << 9;

        const ENCLOSED = 1 << 10;
        const NOT_ENCLOSED = 1 << 11;

        const MASK_KINDS = Self::BRACKET.bits()
            | Self::NOT_BRACKET.bits()
            | Self::DELIMITER.bits()
            | Self::NOT_DELIMITER.bits()
            | Self::IDENTIFIER.bits()
            | Self::NOT_IDENTIFIER.bits()
            | Self::UNKNOWN.bits()
            | Self::NOT_UNKNOWN.bits()
            | Self::VALID.bits()
            | Self::NOT_VALID.bits();
        const MASK_ENCLOSED = Self::ENCLOSED.bits() | Self::NOT_ENCLOSED.bits();
    }
}

/// Whether `token` satisfies `flags`.
///
/// The enclosure axis must hold when present; within the kind axis, the
/// first matching kind/polarity pair wins, so several positive kind flags
/// act as an OR.
pub(crate) fn check_token_flags(token: &Token, flags: TokenFlags) -> bool {
    if flags.intersects(TokenFlags::MASK_ENCLOSED) {
        let wanted = if flags.contains(TokenFlags::ENCLOSED) {
            token.enclosed
        } else {
            !token.enclosed
        };
        if !wanted {
            return false;
        }
    }

    if flags.intersects(TokenFlags::MASK_KINDS) {
        let pairs = [
            (TokenFlags::BRACKET, TokenFlags::NOT_BRACKET, TokenKind::Bracket),
            (TokenFlags::DELIMITER, TokenFlags::NOT_DELIMITER, TokenKind::Delimiter),
            (TokenFlags::IDENTIFIER, TokenFlags::NOT_IDENTIFIER, TokenKind::Identifier),
            (TokenFlags::UNKNOWN, TokenFlags::NOT_UNKNOWN, TokenKind::Unknown),
            (TokenFlags::NOT_VALID, TokenFlags::VALID, TokenKind::Invalid),
        ];
        let mut success = false;
        for (positive, negative, kind) in pairs {
            if success {
                break;
            }
            if flags.contains(positive) {
                success = token.kind == kind;
            } else if flags.contains(negative) {
                success = token.kind != kind;
            }
        }
        if !success {
            return false;
        }
    }

    true
}

/// First index in `start..` whose token satisfies `flags`.
pub(crate) fn find_token(tokens: &[Token], start: usize, flags: TokenFlags) -> Option<usize> {
    (start..tokens.len()).find(|&i| check_token_flags(&tokens[i], flags))
}

/// First index after `start` whose token satisfies `flags`.
pub(crate) fn find_next_token(tokens: &[Token], start: usize, flags: TokenFlags) -> Option<usize> {
    find_token(tokens, start + 1, flags)
}

/// Last index before `start` whose token satisfies `flags`. `start` may
/// equal `tokens.len()`.
pub(crate) fn find_prev_token(tokens: &[Token], start: usize, flags: TokenFlags) -> Option<usize> {
    (0..start.min(tokens.len()))
        .rev()
        .find(|&i| check_token_flags(&tokens[i], flags))
}
