use serde::{Deserialize, Serialize};

/// The category of a fact extracted from a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    AnimeSeason,
    AnimeSeasonPrefix,
    AnimeTitle,
    AnimeType,
    AnimeYear,
    AudioTerm,
    DeviceCompatibility,
    EpisodeNumber,
    EpisodeNumberAlt,
    EpisodePrefix,
    EpisodeTitle,
    FileChecksum,
    FileExtension,
    FileName,
    Language,
    Other,
    ReleaseGroup,
    ReleaseInformation,
    ReleaseVersion,
    Source,
    Subtitles,
    VideoResolution,
    VideoTerm,
    VolumeNumber,
    VolumePrefix,
    Unknown,
}

impl ElementKind {
    /// Snake-case name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::AnimeSeason => "anime_season",
            ElementKind::AnimeSeasonPrefix => "anime_season_prefix",
            ElementKind::AnimeTitle => "anime_title",
            ElementKind::AnimeType => "anime_type",
            ElementKind::AnimeYear => "anime_year",
            ElementKind::AudioTerm => "audio_term",
            ElementKind::DeviceCompatibility => "device_compatibility",
            ElementKind::EpisodeNumber => "episode_number",
            ElementKind::EpisodeNumberAlt => "episode_number_alt",
            ElementKind::EpisodePrefix => "episode_prefix",
            ElementKind::EpisodeTitle => "episode_title",
            ElementKind::FileChecksum => "file_checksum",
            ElementKind::FileExtension => "file_extension",
            ElementKind::FileName => "file_name",
            ElementKind::Language => "language",
            ElementKind::Other => "other",
            ElementKind::ReleaseGroup => "release_group",
            ElementKind::ReleaseInformation => "release_information",
            ElementKind::ReleaseVersion => "release_version",
            ElementKind::Source => "source",
            ElementKind::Subtitles => "subtitles",
            ElementKind::VideoResolution => "video_resolution",
            ElementKind::VideoTerm => "video_term",
            ElementKind::VolumeNumber => "volume_number",
            ElementKind::VolumePrefix => "volume_prefix",
            ElementKind::Unknown => "unknown",
        }
    }

    /// Whether the generic keyword-search pass may populate this kind.
    pub(crate) fn is_searchable(self) -> bool {
        matches!(
            self,
            ElementKind::AnimeSeasonPrefix
                | ElementKind::AnimeType
                | ElementKind::AudioTerm
                | ElementKind::DeviceCompatibility
                | ElementKind::EpisodePrefix
                | ElementKind::FileChecksum
                | ElementKind::Language
                | ElementKind::Other
                | ElementKind::ReleaseGroup
                | ElementKind::ReleaseInformation
                | ElementKind::ReleaseVersion
                | ElementKind::Source
                | ElementKind::Subtitles
                | ElementKind::VideoResolution
                | ElementKind::VideoTerm
                | ElementKind::VolumePrefix
        )
    }

    /// Whether the search logic adds at most one element of this kind.
    pub(crate) fn is_singular(self) -> bool {
        !matches!(
            self,
            ElementKind::AnimeSeason
                | ElementKind::AnimeType
                | ElementKind::AudioTerm
                | ElementKind::DeviceCompatibility
                | ElementKind::EpisodeNumber
                | ElementKind::Language
                | ElementKind::Other
                | ElementKind::ReleaseInformation
                | ElementKind::Source
                | ElementKind::VideoTerm
        )
    }
}

/// A single (kind, text) fact extracted from a filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub value: String,
}

/// The ordered element list produced by a parse.
///
/// Insertion order is extraction order; [`get`](Elements::get) returns the
/// first match, which matters for kinds that can repeat (episode numbers,
/// audio/video terms).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Elements {
    pub(crate) items: Vec<Element>,
}

impl Elements {
    pub(crate) fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn add(&mut self, kind: ElementKind, value: impl Into<String>) {
        self.items.push(Element {
            kind,
            value: value.into(),
        });
    }

    /// First value recorded for `kind`, if any.
    pub fn get(&self, kind: ElementKind) -> Option<&str> {
        self.items
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.value.as_str())
    }

    /// Every value recorded for `kind`, in extraction order.
    pub fn get_all(&self, kind: ElementKind) -> Vec<&str> {
        self.items
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.value.as_str())
            .collect()
    }

    /// Whether at least one element of `kind` was recorded.
    pub fn has(&self, kind: ElementKind) -> bool {
        self.items.iter().any(|e| e.kind == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Elements {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins_on_get() {
        let mut elements = Elements::new();
        elements.add(ElementKind::EpisodeNumber, "01");
        elements.add(ElementKind::EpisodeNumber, "02");
        assert_eq!(elements.get(ElementKind::EpisodeNumber), Some("01"));
        assert_eq!(
            elements.get_all(ElementKind::EpisodeNumber),
            vec!["01", "02"]
        );
    }

    #[test]
    fn searchable_and_singular_partitions() {
        assert!(ElementKind::FileChecksum.is_searchable());
        assert!(!ElementKind::EpisodeNumber.is_searchable());
        assert!(!ElementKind::AnimeTitle.is_searchable());

        assert!(ElementKind::VideoResolution.is_singular());
        assert!(ElementKind::AnimeYear.is_singular());
        assert!(!ElementKind::EpisodeNumber.is_singular());
        assert!(!ElementKind::AudioTerm.is_singular());
    }

    #[test]
    fn kind_names_match_serde() {
        let json = serde_json::to_string(&ElementKind::EpisodeNumberAlt).unwrap();
        assert_eq!(json, "\"episode_number_alt\"");
        assert_eq!(ElementKind::EpisodeNumberAlt.as_str(), "episode_number_alt");
    }
}
