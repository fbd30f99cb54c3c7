//! It-marker identification and deletion (1.3.2 - 1.3.9).
//!
//! Every identification rule looks at the *original* sequence. Indices are
//! collected first and removed in one pass afterwards (1.3.9 tasya lopaḥ), so
//! deleting one marker can never expose another.

use crate::phoneme::{CANDRABINDU, Phoneme, PhonemeSequence, Tags};
use crate::scope::RuleAddress;
use std::collections::BTreeSet;
use tracing::debug;

/// What kind of upadesha is being stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A dhatu from the root list.
    Root,
    /// A sup or tin ending.
    Inflection,
    /// Any other pratyaya (krt, taddhita).
    Suffix,
    /// Augments and substitutes such as `रुँ`.
    General,
}

/// One deleted marker: where it was, what it was, and which rule found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub index: usize,
    pub glyph: String,
    pub rule: RuleAddress,
    pub tag: Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stripped {
    pub sequence: PhonemeSequence,
    pub markers: Vec<Marker>,
    /// Union of the deleted markers' tags.
    pub tags: Tags,
}

pub const UPADESHE_AJ: RuleAddress = RuleAddress::new(1, 3, 2);
pub const HAL_ANTYAM: RuleAddress = RuleAddress::new(1, 3, 3);
pub const ADIR_NITUDAVAH: RuleAddress = RuleAddress::new(1, 3, 5);
pub const SHAH_PRATYAYASYA: RuleAddress = RuleAddress::new(1, 3, 6);
pub const CUTU: RuleAddress = RuleAddress::new(1, 3, 7);
pub const LASHAKV: RuleAddress = RuleAddress::new(1, 3, 8);
pub const TASYA_LOPAH: RuleAddress = RuleAddress::new(1, 3, 9);

fn nasal_vowel_tag(vowel: &str) -> Tags {
    match vowel {
        "अ" => Tags::ADIT,
        "आ" => Tags::AADIT,
        "इ" => Tags::IDIT,
        "ई" => Tags::IIDIT,
        "उ" => Tags::UDIT,
        "ऊ" => Tags::UUDIT,
        "ऋ" | "ॠ" => Tags::RDIT,
        "ऌ" | "ॡ" => Tags::LRDIT,
        "ओ" => Tags::ODIT,
        _ => Tags::empty(),
    }
}

/// Tag named after a consonant marker: `क्` -> kit, `ञ्` -> ñit.
fn consonant_tag(glyph: &str) -> Tags {
    match glyph {
        "क्" => Tags::KIT,
        "ग्" => Tags::GIT,
        "ङ्" => Tags::NGIT,
        "ञ्" => Tags::NYIT,
        "ण्" => Tags::NNIT,
        "न्" => Tags::NIT,
        "ट्" => Tags::TIT,
        "ड्" => Tags::DIT,
        "प्" => Tags::PIT,
        "च्" => Tags::CIT,
        "ज्" => Tags::JIT,
        "ल्" => Tags::LIT,
        "श्" => Tags::SHIT,
        "घ्" => Tags::GHIT,
        "म्" => Tags::MIT,
        "ष्" => Tags::SSIT,
        "र्" => Tags::RIT,
        _ => Tags::empty(),
    }
}

struct Collector<'s> {
    seq: &'s PhonemeSequence,
    found: Vec<Marker>,
    indices: BTreeSet<usize>,
}

impl<'s> Collector<'s> {
    fn mark(&mut self, index: usize, rule: RuleAddress, tag: Tags) {
        if self.indices.insert(index) {
            let glyph = self.seq[index].glyph().to_string();
            debug!(%rule, index, glyph = %glyph, "it marker");
            self.found.push(Marker { index, glyph, rule, tag });
        }
    }
}

/// Identify and delete it-markers.
///
/// Order: (a) 1.3.2 nasalized vowels, (b) 1.3.5 root-initial `ञि टु डु`,
/// (c) pratyaya-initial `ष्` (1.3.6), palatals and retroflexes (1.3.7), then
/// `ल् श्` and velars (1.3.8, not for taddhita), (d) 1.3.3 final consonant,
/// which 1.3.4 protects in inflectional endings.
pub fn strip_markers(seq: &PhonemeSequence, kind: SourceKind, is_derived: bool) -> Stripped {
    let mut c = Collector { seq, found: Vec::new(), indices: BTreeSet::new() };

    // (a)
    for (i, p) in seq.iter().enumerate() {
        if p.is(CANDRABINDU) {
            let tag = match i.checked_sub(1).map(|j| &seq[j]) {
                Some(v) if v.is_vowel() => {
                    let tag = nasal_vowel_tag(v.key());
                    c.mark(i - 1, UPADESHE_AJ, tag);
                    tag
                }
                _ => Tags::empty(),
            };
            c.mark(i, UPADESHE_AJ, tag);
        }
    }

    // (b)
    if kind == SourceKind::Root && seq.len() > 2 {
        let tag = match (seq[0].key(), seq[1].key()) {
            ("ञ्", "इ") => Tags::NYI_IT,
            ("ट्", "उ") => Tags::TU_IT,
            ("ड्", "उ") => Tags::DU_IT,
            _ => Tags::empty(),
        };
        if !tag.is_empty() {
            c.mark(0, ADIR_NITUDAVAH, tag);
            c.mark(1, ADIR_NITUDAVAH, tag);
        }
    }

    // (c)
    if matches!(kind, SourceKind::Inflection | SourceKind::Suffix) && seq.len() > 1 {
        let first = &seq[0];
        if first.is("ष्") {
            c.mark(0, SHAH_PRATYAYASYA, Tags::SSIT);
        } else if first.is_any(&["च्", "छ्", "ज्", "झ्", "ञ्", "ट्", "ठ्", "ड्", "ढ्", "ण्"]) {
            c.mark(0, CUTU, consonant_tag(first.key()));
        } else if !is_derived && first.is_any(&["ल्", "श्", "क्", "ख्", "ग्", "घ्", "ङ्"]) {
            c.mark(0, LASHAKV, consonant_tag(first.key()));
        }
    }

    // (d)
    if seq.len() > 1 {
        let last_index = seq.len() - 1;
        let last = &seq[last_index];
        let protected = kind == SourceKind::Inflection && last.is_any(&["त्", "थ्", "द्", "ध्", "न्", "स्", "म्"]);
        if last.is_consonant() && !protected {
            c.mark(last_index, HAL_ANTYAM, consonant_tag(last.key()));
        }
    }

    let Collector { found, indices, .. } = c;
    let tags = found.iter().fold(Tags::empty(), |acc, m| acc | m.tag);
    let mut sequence = seq.without_indices(&indices);
    if !indices.is_empty() {
        if let Some(first) = sequence.get_mut(0) {
            first.tags |= tags;
            first.touch(TASYA_LOPAH);
        }
    }

    Stripped { sequence, markers: found, tags }
}

/// Convenience for literal upadeshas.
pub fn strip_text(upadesha: &str, kind: SourceKind) -> Stripped {
    strip_markers(&crate::codec::decompose(upadesha), kind, false)
}

/// Marker tags present on a stripped sequence.
pub fn marker_tags(seq: &[Phoneme]) -> Tags {
    seq.iter().fold(Tags::empty(), |acc, p| acc | (p.tags & Tags::MARKERS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::recompose;

    fn strip(text: &str, kind: SourceKind) -> (String, Tags) {
        let s = strip_text(text, kind);
        (recompose(&s.sequence), s.tags)
    }

    #[test]
    fn sup_endings() {
        let cases = [
            ("सुँ", "स्", Tags::UDIT),
            ("जस्", "अस्", Tags::JIT),
            ("औट्", "औ", Tags::TIT),
            ("शस्", "अस्", Tags::SHIT),
            ("टा", "आ", Tags::TIT),
            ("ङे", "ए", Tags::NGIT),
            ("ङसिँ", "अस्", Tags::NGIT | Tags::IDIT),
            ("ङस्", "अस्", Tags::NGIT),
            ("आम्", "आम्", Tags::empty()),
            ("सुप्", "सु", Tags::PIT),
            ("भिस्", "भिस्", Tags::empty()),
        ];
        for (upadesha, expected, tags) in cases {
            assert_eq!(strip(upadesha, SourceKind::Inflection), (expected.to_string(), tags), "{upadesha}");
        }
    }

    #[test]
    fn krt_suffixes() {
        let cases = [
            ("क्त", "त"),
            ("क्तवतुँ", "तवत्"),
            ("तृच्", "तृ"),
            ("तव्यत्", "तव्य"),
            ("ल्युट्", "यु"),
            ("ण्वुल्", "वु"),
            ("घञ्", "अ"),
            ("तुमुँन्", "तुम्"),
            ("ण्यत्", "य"),
        ];
        for (upadesha, expected) in cases {
            assert_eq!(strip(upadesha, SourceKind::Suffix).0, expected, "{upadesha}");
        }
    }

    #[test]
    fn roots() {
        assert_eq!(strip("डुकृञ्", SourceKind::Root), ("कृ".to_string(), Tags::DU_IT | Tags::NYIT));
        assert_eq!(strip("पठँ", SourceKind::Root).0, "पठ्");
        assert_eq!(strip("गमॢँ", SourceKind::Root), ("गम्".to_string(), Tags::LRDIT));
        assert_eq!(strip("डुपचँष्", SourceKind::Root).0, "पच्");
        // roots do not lose an initial palatal or velar
        assert_eq!(strip("णीञ्", SourceKind::Root).0, "णी");
        assert_eq!(strip("भू", SourceKind::Root).0, "भू");
    }

    #[test]
    fn derived_category_keeps_initial_velar() {
        let s = strip_markers(&crate::codec::decompose("कक्"), SourceKind::Suffix, true);
        assert_eq!(recompose(&s.sequence), "क");
    }

    #[test]
    fn deleted_tags_land_on_first_survivor() {
        let s = strip_text("घञ्", SourceKind::Suffix);
        assert_eq!(s.sequence.len(), 1);
        assert!(s.sequence[0].tags.contains(Tags::GHIT | Tags::NYIT));
        assert_eq!(s.sequence[0].trace.last(), Some(&TASYA_LOPAH));
    }

    #[test]
    fn marker_tags_are_conserved() {
        for (text, kind) in [
            ("ङसिँ", SourceKind::Inflection),
            ("तुमुँन्", SourceKind::Suffix),
            ("डुपचँष्", SourceKind::Root),
            ("ण्वुल्", SourceKind::Suffix),
            ("रुँ", SourceKind::General),
        ] {
            let s = strip_text(text, kind);
            let union = s.markers.iter().fold(Tags::empty(), |acc, m| acc | m.tag);
            assert_eq!(union, s.tags, "{text}");
            assert_eq!(marker_tags(&s.sequence), s.tags, "{text}");
        }
    }

    #[test]
    fn general_mode_cleans_ru() {
        let s = strip_text("रुँ", SourceKind::General);
        assert_eq!(s.sequence.glyphs(), vec!["र्"]);
        assert_eq!(s.markers.len(), 2);
    }
}
