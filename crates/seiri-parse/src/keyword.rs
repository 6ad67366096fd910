use bitflags::bitflags;
use phf::phf_map;

use crate::elements::{ElementKind, Elements};

bitflags! {
    /// Flags controlling how a registered keyword behaves once matched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeywordFlags: u8 {
        /// On match, the token is promoted to identifier and excluded from
        /// further heuristics.
        const IDENTIFIABLE = 0b0000_0001;
        /// Eligible for the generic keyword-search pass at all.
        const SEARCHABLE = 0b0000_0010;
        /// Recognized but reliable; keywords without this flag are known
        /// false-positive sources ("OP", "PV" as anime type, "E" as an
        /// episode prefix) and skipped by certain cross-checks.
        const VALID = 0b0000_0100;
    }
}

/// A registered keyword: the element kind it maps to plus matching flags.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    pub kind: ElementKind,
    pub flags: KeywordFlags,
}

impl Keyword {
    const fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            flags: KeywordFlags::IDENTIFIABLE
                .union(KeywordFlags::SEARCHABLE)
                .union(KeywordFlags::VALID),
        }
    }

    const fn invalid(kind: ElementKind) -> Self {
        Self {
            kind,
            flags: KeywordFlags::IDENTIFIABLE.union(KeywordFlags::SEARCHABLE),
        }
    }

    const fn unidentifiable(kind: ElementKind) -> Self {
        Self {
            kind,
            flags: KeywordFlags::SEARCHABLE.union(KeywordFlags::VALID),
        }
    }

    const fn unidentifiable_invalid(kind: ElementKind) -> Self {
        Self {
            kind,
            flags: KeywordFlags::SEARCHABLE,
        }
    }

    const fn unidentifiable_unsearchable(kind: ElementKind) -> Self {
        Self {
            kind,
            flags: KeywordFlags::VALID,
        }
    }

    pub fn is_identifiable(&self) -> bool {
        self.flags.contains(KeywordFlags::IDENTIFIABLE)
    }

    pub fn is_searchable(&self) -> bool {
        self.flags.contains(KeywordFlags::SEARCHABLE)
    }

    pub fn is_valid(&self) -> bool {
        self.flags.contains(KeywordFlags::VALID)
    }
}

/// Compile-time keyword table for everything except file extensions.
/// All keys are normalized (uppercase).
static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    // ── Anime season prefix ──────────────────────────────────────
    "SAISON" => Keyword::unidentifiable(ElementKind::AnimeSeasonPrefix),
    "SEASON" => Keyword::unidentifiable(ElementKind::AnimeSeasonPrefix),

    // ── Anime type ───────────────────────────────────────────────
    "GEKIJOUBAN" => Keyword::unidentifiable(ElementKind::AnimeType),
    "MOVIE" => Keyword::unidentifiable(ElementKind::AnimeType),
    "OAD" => Keyword::unidentifiable(ElementKind::AnimeType),
    "OAV" => Keyword::unidentifiable(ElementKind::AnimeType),
    "ONA" => Keyword::unidentifiable(ElementKind::AnimeType),
    "OVA" => Keyword::unidentifiable(ElementKind::AnimeType),
    "SPECIAL" => Keyword::unidentifiable(ElementKind::AnimeType),
    "SPECIALS" => Keyword::unidentifiable(ElementKind::AnimeType),
    "TV" => Keyword::unidentifiable(ElementKind::AnimeType),
    // e.g. "Yumeiro Patissiere SP Professional"
    "SP" => Keyword::unidentifiable_unsearchable(ElementKind::AnimeType),
    "ED" => Keyword::unidentifiable_invalid(ElementKind::AnimeType),
    "ENDING" => Keyword::unidentifiable_invalid(ElementKind::AnimeType),
    "NCED" => Keyword::unidentifiable_invalid(ElementKind::AnimeType),
    "NCOP" => Keyword::unidentifiable_invalid(ElementKind::AnimeType),
    "OP" => Keyword::unidentifiable_invalid(ElementKind::AnimeType),
    "OPENING" => Keyword::unidentifiable_invalid(ElementKind::AnimeType),
    "PREVIEW" => Keyword::unidentifiable_invalid(ElementKind::AnimeType),
    "PV" => Keyword::unidentifiable_invalid(ElementKind::AnimeType),

    // ── Audio terms ──────────────────────────────────────────────
    // Channels
    "2.0CH" => Keyword::new(ElementKind::AudioTerm),
    "2CH" => Keyword::new(ElementKind::AudioTerm),
    "5.1" => Keyword::new(ElementKind::AudioTerm),
    "5.1CH" => Keyword::new(ElementKind::AudioTerm),
    "7.1" => Keyword::new(ElementKind::AudioTerm),
    "7.1CH" => Keyword::new(ElementKind::AudioTerm),
    "DTS" => Keyword::new(ElementKind::AudioTerm),
    "DTS-ES" => Keyword::new(ElementKind::AudioTerm),
    "DTS5.1" => Keyword::new(ElementKind::AudioTerm),
    "DOLBY TRUEHD" => Keyword::new(ElementKind::AudioTerm),
    "TRUEHD" => Keyword::new(ElementKind::AudioTerm),
    "TRUEHD5.1" => Keyword::new(ElementKind::AudioTerm),
    // Codec
    "AAC" => Keyword::new(ElementKind::AudioTerm),
    "AACX2" => Keyword::new(ElementKind::AudioTerm),
    "AACX3" => Keyword::new(ElementKind::AudioTerm),
    "AACX4" => Keyword::new(ElementKind::AudioTerm),
    "AC3" => Keyword::new(ElementKind::AudioTerm),
    "EAC3" => Keyword::new(ElementKind::AudioTerm),
    "E-AC-3" => Keyword::new(ElementKind::AudioTerm),
    "FLAC" => Keyword::new(ElementKind::AudioTerm),
    "FLACX2" => Keyword::new(ElementKind::AudioTerm),
    "FLACX3" => Keyword::new(ElementKind::AudioTerm),
    "FLACX4" => Keyword::new(ElementKind::AudioTerm),
    "LOSSLESS" => Keyword::new(ElementKind::AudioTerm),
    "MP3" => Keyword::new(ElementKind::AudioTerm),
    "OGG" => Keyword::new(ElementKind::AudioTerm),
    "VORBIS" => Keyword::new(ElementKind::AudioTerm),
    "ATMOS" => Keyword::new(ElementKind::AudioTerm),
    "DOLBY ATMOS" => Keyword::new(ElementKind::AudioTerm),
    "OPUS" => Keyword::unidentifiable(ElementKind::AudioTerm),
    // Language
    "DUALAUDIO" => Keyword::new(ElementKind::AudioTerm),
    "DUAL AUDIO" => Keyword::new(ElementKind::AudioTerm),

    // ── Device compatibility ─────────────────────────────────────
    "IPAD3" => Keyword::new(ElementKind::DeviceCompatibility),
    "IPHONE5" => Keyword::new(ElementKind::DeviceCompatibility),
    "IPOD" => Keyword::new(ElementKind::DeviceCompatibility),
    "PS3" => Keyword::new(ElementKind::DeviceCompatibility),
    "XBOX" => Keyword::new(ElementKind::DeviceCompatibility),
    "XBOX360" => Keyword::new(ElementKind::DeviceCompatibility),
    "ANDROID" => Keyword::unidentifiable(ElementKind::DeviceCompatibility),

    // ── Episode prefix ───────────────────────────────────────────
    "EP" => Keyword::new(ElementKind::EpisodePrefix),
    "EP." => Keyword::new(ElementKind::EpisodePrefix),
    "EPS" => Keyword::new(ElementKind::EpisodePrefix),
    "EPS." => Keyword::new(ElementKind::EpisodePrefix),
    "EPISODE" => Keyword::new(ElementKind::EpisodePrefix),
    "EPISODE." => Keyword::new(ElementKind::EpisodePrefix),
    "EPISODES" => Keyword::new(ElementKind::EpisodePrefix),
    "CAPITULO" => Keyword::new(ElementKind::EpisodePrefix),
    "EPISODIO" => Keyword::new(ElementKind::EpisodePrefix),
    "EPISÓDIO" => Keyword::new(ElementKind::EpisodePrefix),
    "FOLGE" => Keyword::new(ElementKind::EpisodePrefix),
    "E" => Keyword::invalid(ElementKind::EpisodePrefix),
    "第" => Keyword::invalid(ElementKind::EpisodePrefix),

    // ── Language ─────────────────────────────────────────────────
    "ENG" => Keyword::new(ElementKind::Language),
    "ENGLISH" => Keyword::new(ElementKind::Language),
    "ESPANOL" => Keyword::new(ElementKind::Language),
    "JAP" => Keyword::new(ElementKind::Language),
    "PT-BR" => Keyword::new(ElementKind::Language),
    "SPANISH" => Keyword::new(ElementKind::Language),
    "VOSTFR" => Keyword::new(ElementKind::Language),
    // e.g. "Tokyo ESP", "Bokura ga Ita"
    "ESP" => Keyword::unidentifiable(ElementKind::Language),
    "ITA" => Keyword::unidentifiable(ElementKind::Language),

    // ── Other ────────────────────────────────────────────────────
    "REMASTER" => Keyword::new(ElementKind::Other),
    "REMASTERED" => Keyword::new(ElementKind::Other),
    "UNCENSORED" => Keyword::new(ElementKind::Other),
    "UNCUT" => Keyword::new(ElementKind::Other),
    "TS" => Keyword::new(ElementKind::Other),
    "VFR" => Keyword::new(ElementKind::Other),
    "WIDESCREEN" => Keyword::new(ElementKind::Other),
    "WS" => Keyword::new(ElementKind::Other),

    // ── Release group ────────────────────────────────────────────
    "THORA" => Keyword::new(ElementKind::ReleaseGroup),

    // ── Release information ──────────────────────────────────────
    "BATCH" => Keyword::new(ElementKind::ReleaseInformation),
    "COMPLETE" => Keyword::new(ElementKind::ReleaseInformation),
    "PATCH" => Keyword::new(ElementKind::ReleaseInformation),
    "REMUX" => Keyword::new(ElementKind::ReleaseInformation),
    // e.g. "The End of Evangelion", "Final Approach"
    "END" => Keyword::unidentifiable(ElementKind::ReleaseInformation),
    "FINAL" => Keyword::unidentifiable(ElementKind::ReleaseInformation),

    // ── Release version ──────────────────────────────────────────
    "V0" => Keyword::new(ElementKind::ReleaseVersion),
    "V1" => Keyword::new(ElementKind::ReleaseVersion),
    "V2" => Keyword::new(ElementKind::ReleaseVersion),
    "V3" => Keyword::new(ElementKind::ReleaseVersion),
    "V4" => Keyword::new(ElementKind::ReleaseVersion),

    // ── Source ───────────────────────────────────────────────────
    "BD" => Keyword::new(ElementKind::Source),
    "BDRIP" => Keyword::new(ElementKind::Source),
    "BLURAY" => Keyword::new(ElementKind::Source),
    "BLU-RAY" => Keyword::new(ElementKind::Source),
    "DVD" => Keyword::new(ElementKind::Source),
    "DVD5" => Keyword::new(ElementKind::Source),
    "DVD9" => Keyword::new(ElementKind::Source),
    "DVD-R2J" => Keyword::new(ElementKind::Source),
    "DVDRIP" => Keyword::new(ElementKind::Source),
    "DVD-RIP" => Keyword::new(ElementKind::Source),
    "R2DVD" => Keyword::new(ElementKind::Source),
    "R2J" => Keyword::new(ElementKind::Source),
    "R2JDVD" => Keyword::new(ElementKind::Source),
    "R2JDVDRIP" => Keyword::new(ElementKind::Source),
    "HDTV" => Keyword::new(ElementKind::Source),
    "HDTVRIP" => Keyword::new(ElementKind::Source),
    "TVRIP" => Keyword::new(ElementKind::Source),
    "TV-RIP" => Keyword::new(ElementKind::Source),
    "WEBCAST" => Keyword::new(ElementKind::Source),
    "WEBRIP" => Keyword::new(ElementKind::Source),

    // ── Subtitles ────────────────────────────────────────────────
    "ASS" => Keyword::new(ElementKind::Subtitles),
    "BIG5" => Keyword::new(ElementKind::Subtitles),
    "DUB" => Keyword::new(ElementKind::Subtitles),
    "DUBBED" => Keyword::new(ElementKind::Subtitles),
    "HARDSUB" => Keyword::new(ElementKind::Subtitles),
    "HARDSUBS" => Keyword::new(ElementKind::Subtitles),
    "RAW" => Keyword::new(ElementKind::Subtitles),
    "SOFTSUB" => Keyword::new(ElementKind::Subtitles),
    "SOFTSUBS" => Keyword::new(ElementKind::Subtitles),
    "SUB" => Keyword::new(ElementKind::Subtitles),
    "SUBBED" => Keyword::new(ElementKind::Subtitles),
    "SUBTITLED" => Keyword::new(ElementKind::Subtitles),
    "MULTISUB" => Keyword::new(ElementKind::Subtitles),
    "MULTI SUB" => Keyword::new(ElementKind::Subtitles),

    // ── Video terms ──────────────────────────────────────────────
    // Frame rate
    "23.976FPS" => Keyword::new(ElementKind::VideoTerm),
    "24FPS" => Keyword::new(ElementKind::VideoTerm),
    "29.97FPS" => Keyword::new(ElementKind::VideoTerm),
    "30FPS" => Keyword::new(ElementKind::VideoTerm),
    "60FPS" => Keyword::new(ElementKind::VideoTerm),
    "120FPS" => Keyword::new(ElementKind::VideoTerm),
    // Codec
    "8BIT" => Keyword::new(ElementKind::VideoTerm),
    "8-BIT" => Keyword::new(ElementKind::VideoTerm),
    "10BIT" => Keyword::new(ElementKind::VideoTerm),
    "10BITS" => Keyword::new(ElementKind::VideoTerm),
    "10-BIT" => Keyword::new(ElementKind::VideoTerm),
    "10-BITS" => Keyword::new(ElementKind::VideoTerm),
    "HI10" => Keyword::new(ElementKind::VideoTerm),
    "HI10P" => Keyword::new(ElementKind::VideoTerm),
    "HI444" => Keyword::new(ElementKind::VideoTerm),
    "HI444P" => Keyword::new(ElementKind::VideoTerm),
    "HI444PP" => Keyword::new(ElementKind::VideoTerm),
    "HDR" => Keyword::new(ElementKind::VideoTerm),
    "DV" => Keyword::new(ElementKind::VideoTerm),
    "DOLBY VISION" => Keyword::new(ElementKind::VideoTerm),
    "H264" => Keyword::new(ElementKind::VideoTerm),
    "H265" => Keyword::new(ElementKind::VideoTerm),
    "H.264" => Keyword::new(ElementKind::VideoTerm),
    "H.265" => Keyword::new(ElementKind::VideoTerm),
    "X264" => Keyword::new(ElementKind::VideoTerm),
    "X265" => Keyword::new(ElementKind::VideoTerm),
    "X.264" => Keyword::new(ElementKind::VideoTerm),
    "AVC" => Keyword::new(ElementKind::VideoTerm),
    "HEVC" => Keyword::new(ElementKind::VideoTerm),
    "HEVC2" => Keyword::new(ElementKind::VideoTerm),
    "DIVX" => Keyword::new(ElementKind::VideoTerm),
    "DIVX5" => Keyword::new(ElementKind::VideoTerm),
    "DIVX6" => Keyword::new(ElementKind::VideoTerm),
    "XVID" => Keyword::new(ElementKind::VideoTerm),
    "AV1" => Keyword::new(ElementKind::VideoTerm),
    // Format
    "AVI" => Keyword::new(ElementKind::VideoTerm),
    "RMVB" => Keyword::new(ElementKind::VideoTerm),
    "WMV" => Keyword::new(ElementKind::VideoTerm),
    "WMV3" => Keyword::new(ElementKind::VideoTerm),
    "WMV9" => Keyword::new(ElementKind::VideoTerm),
    // Quality
    "HQ" => Keyword::new(ElementKind::VideoTerm),
    "LQ" => Keyword::new(ElementKind::VideoTerm),
    // Resolution
    "4K" => Keyword::new(ElementKind::VideoTerm),
    "HD" => Keyword::new(ElementKind::VideoTerm),
    "SD" => Keyword::new(ElementKind::VideoTerm),

    // ── Volume prefix ────────────────────────────────────────────
    "VOL" => Keyword::new(ElementKind::VolumePrefix),
    "VOL." => Keyword::new(ElementKind::VolumePrefix),
    "VOLUME" => Keyword::new(ElementKind::VolumePrefix),
};

/// File extensions live in their own table so that extension words never
/// shadow (or get shadowed by) same-spelled media keywords such as "AVI".
static FILE_EXTENSIONS: phf::Map<&'static str, Keyword> = phf_map! {
    "3GP" => Keyword::new(ElementKind::FileExtension),
    "AVI" => Keyword::new(ElementKind::FileExtension),
    "DIVX" => Keyword::new(ElementKind::FileExtension),
    "FLV" => Keyword::new(ElementKind::FileExtension),
    "M2TS" => Keyword::new(ElementKind::FileExtension),
    "MKV" => Keyword::new(ElementKind::FileExtension),
    "MOV" => Keyword::new(ElementKind::FileExtension),
    "MP4" => Keyword::new(ElementKind::FileExtension),
    "MPG" => Keyword::new(ElementKind::FileExtension),
    "OGM" => Keyword::new(ElementKind::FileExtension),
    "RM" => Keyword::new(ElementKind::FileExtension),
    "RMVB" => Keyword::new(ElementKind::FileExtension),
    "TS" => Keyword::new(ElementKind::FileExtension),
    "WEBM" => Keyword::new(ElementKind::FileExtension),
    "WMV" => Keyword::new(ElementKind::FileExtension),
    // Audio, archive and subtitle extensions: recognized so that the
    // stripper accepts them, flagged invalid for cross-checks.
    "AAC" => Keyword::invalid(ElementKind::FileExtension),
    "AIFF" => Keyword::invalid(ElementKind::FileExtension),
    "FLAC" => Keyword::invalid(ElementKind::FileExtension),
    "M4A" => Keyword::invalid(ElementKind::FileExtension),
    "MP3" => Keyword::invalid(ElementKind::FileExtension),
    "MKA" => Keyword::invalid(ElementKind::FileExtension),
    "OGG" => Keyword::invalid(ElementKind::FileExtension),
    "WAV" => Keyword::invalid(ElementKind::FileExtension),
    "WMA" => Keyword::invalid(ElementKind::FileExtension),
    "7Z" => Keyword::invalid(ElementKind::FileExtension),
    "RAR" => Keyword::invalid(ElementKind::FileExtension),
    "ZIP" => Keyword::invalid(ElementKind::FileExtension),
    "ASS" => Keyword::invalid(ElementKind::FileExtension),
    "SRT" => Keyword::invalid(ElementKind::FileExtension),
};

/// Literal phrases that must be recognized before delimiter splitting
/// would fragment them. Matched case-sensitively against the raw text.
const PEEK_ENTRIES: &[(ElementKind, &[&str])] = &[
    (ElementKind::AudioTerm, &["Dual Audio"]),
    (ElementKind::VideoTerm, &["H264", "H.264", "h264", "h.264"]),
    (
        ElementKind::VideoResolution,
        &["480p", "720p", "1080p", "2160p"],
    ),
    (ElementKind::Source, &["Blu-Ray"]),
];

/// Look up `word` in the table matching `kind`.
///
/// The returned keyword keeps its registered kind, which may differ from
/// the requested one; callers compare kinds themselves.
pub fn find(kind: ElementKind, word: &str) -> Option<&'static Keyword> {
    if kind == ElementKind::FileExtension {
        FILE_EXTENSIONS.get(word)
    } else {
        KEYWORDS.get(word)
    }
}

/// Case-normalize a word for table lookup.
pub fn normalize(word: &str) -> String {
    word.to_uppercase()
}

/// Scan `filename[range]` for the fixed phrase list, recording an element
/// and the matched span for the first occurrence of each phrase.
pub(crate) fn peek(
    filename: &str,
    range: std::ops::Range<usize>,
    elements: &mut Elements,
    pre_identified: &mut Vec<std::ops::Range<usize>>,
) {
    let span = &filename[range.clone()];
    for (kind, phrases) in PEEK_ENTRIES {
        for phrase in *phrases {
            if let Some(found) = span.find(phrase) {
                let start = range.start + found;
                elements.add(*kind, *phrase);
                pre_identified.push(start..start + phrase.len());
            }
        }
    }
}
