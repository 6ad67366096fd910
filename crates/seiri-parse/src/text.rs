//! Character-level predicates shared by the tokenizer and the parser.

/// Dash-family characters: hyphen-minus plus the Unicode hyphen/dash block.
pub(crate) const DASHES: &str = "-\u{2010}\u{2011}\u{2012}\u{2013}\u{2014}\u{2015}";

pub(crate) fn is_dash_character(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if DASHES.contains(c))
}

pub(crate) fn trim_dashes_and_spaces(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || DASHES.contains(c))
}

/// Trim of plain spaces and hyphen-minus only, used when normalizing a
/// word for keyword lookup.
pub(crate) fn trim_word(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || c == '-')
}

pub(crate) fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Byte offset of the first ASCII digit.
pub(crate) fn find_first_digit(s: &str) -> Option<usize> {
    s.char_indices()
        .find(|(_, c)| c.is_ascii_digit())
        .map(|(i, _)| i)
}

/// C-style leading-integer conversion: whitespace is skipped, the first
/// other non-digit stops the scan, no digits yields 0.
pub(crate) fn to_int_c(s: &str) -> i64 {
    let mut num: i64 = 0;
    for c in s.chars() {
        if c.is_whitespace() {
            continue;
        }
        let Some(digit) = c.to_digit(10) else { break };
        num = num.saturating_mul(10).saturating_add(i64::from(digit));
    }
    num
}

/// Whole-string integer conversion with a fallback.
pub(crate) fn to_int_or(s: &str, default: i64) -> i64 {
    s.parse::<i64>().unwrap_or(default)
}

/// An 8-digit hex string, the conventional CRC32 tag.
pub(crate) fn is_crc32(s: &str) -> bool {
    s.len() == 8 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// `###x###` (any of x/X/×) or `###p`, with at least three digits per side.
pub(crate) fn is_resolution(s: &str) -> bool {
    const MIN_WIDTH: usize = 3;
    const MIN_HEIGHT: usize = 3;

    let chars: Vec<char> = s.chars().collect();
    if chars.len() >= MIN_WIDTH + 1 + MIN_HEIGHT {
        let Some(pos) = chars
            .iter()
            .position(|&c| c == 'x' || c == 'X' || c == '\u{00D7}')
        else {
            return false;
        };
        if pos >= MIN_WIDTH && pos <= chars.len() - (MIN_HEIGHT + 1) {
            return chars
                .iter()
                .enumerate()
                .all(|(i, &c)| i == pos || c.is_ascii_digit());
        }
        false
    } else if chars.len() >= MIN_HEIGHT + 1 {
        matches!(chars.last(), Some('p') | Some('P'))
            && chars[..chars.len() - 1].iter().all(|c| c.is_ascii_digit())
    } else {
        false
    }
}

/// At least half of the characters fall below U+024F (Latin plus its
/// supplements and extensions).
pub(crate) fn is_mostly_latin(s: &str) -> bool {
    let len = if s.is_empty() {
        1.0
    } else {
        s.chars().count() as f64
    };
    s.chars().filter(|&c| c < '\u{024F}').count() as f64 / len >= 0.5
}

/// English ordinal words mapped to their numeral, for "2nd Season" forms.
pub(crate) fn ordinal_to_number(word: &str) -> Option<&'static str> {
    match word {
        "1st" | "First" => Some("1"),
        "2nd" | "Second" => Some("2"),
        "3rd" | "Third" => Some("3"),
        "4th" | "Fourth" => Some("4"),
        "5th" | "Fifth" => Some("5"),
        "6th" | "Sixth" => Some("6"),
        "7th" | "Seventh" => Some("7"),
        "8th" | "Eighth" => Some("8"),
        "9th" | "Ninth" => Some("9"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_shapes() {
        assert!(is_resolution("1280x720"));
        assert!(is_resolution("1920X1080"));
        assert!(is_resolution("1920\u{00D7}1080"));
        assert!(is_resolution("720p"));
        assert!(is_resolution("1080P"));
        assert!(!is_resolution("72p"));
        assert!(!is_resolution("12x34"));
        assert!(!is_resolution("1280x72O"));
        assert!(!is_resolution("x264"));
    }

    #[test]
    fn crc32_shape() {
        assert!(is_crc32("ABCD1234"));
        assert!(is_crc32("12f00e89"));
        assert!(!is_crc32("ABCD123"));
        assert!(!is_crc32("ABCD123G"));
    }

    #[test]
    fn leading_integer_conversion() {
        assert_eq!(to_int_c("01v2"), 1);
        assert_eq!(to_int_c("07.5"), 7);
        assert_eq!(to_int_c("abc"), 0);
        assert_eq!(to_int_c(" 12"), 12);
    }

    #[test]
    fn dash_characters() {
        assert!(is_dash_character("-"));
        assert!(is_dash_character("\u{2014}"));
        assert!(!is_dash_character("--"));
        assert!(!is_dash_character("a"));
    }

    #[test]
    fn mostly_latin() {
        assert!(is_mostly_latin("Toradora"));
        assert!(!is_mostly_latin("\u{3068}\u{3089}\u{30C9}\u{30E9}"));
        assert!(!is_mostly_latin(""));
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal_to_number("2nd"), Some("2"));
        assert_eq!(ordinal_to_number("Ninth"), Some("9"));
        assert_eq!(ordinal_to_number("tenth"), None);
    }
}
