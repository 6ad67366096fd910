use serde::{Deserialize, Serialize};

/// Knobs for a single parse call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Look for an episode number.
    pub parse_episode_number: bool,
    /// Look for an episode title.
    pub parse_episode_title: bool,
    /// Strip and report a recognized file extension.
    pub parse_file_extension: bool,
    /// Look for a release group.
    pub parse_release_group: bool,
    /// Characters the tokenizer may treat as delimiters.
    pub allowed_delimiters: String,
    /// Substrings removed verbatim (repeatedly) before tokenization.
    pub ignored_strings: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parse_episode_number: true,
            parse_episode_title: true,
            parse_file_extension: true,
            parse_release_group: true,
            allowed_delimiters: " _.&+,|".to_string(),
            ignored_strings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert!(options.parse_episode_number);
        assert_eq!(options.allowed_delimiters, " _.&+,|");
        assert!(options.ignored_strings.is_empty());
    }

    #[test]
    fn partial_deserialization_fills_defaults() {
        let options: Options =
            serde_json::from_str(r#"{"parse_episode_title": false}"#).unwrap();
        assert!(!options.parse_episode_title);
        assert!(options.parse_episode_number);
        assert_eq!(options.allowed_delimiters, " _.&+,|");
    }
}
