//! Phoneme model.
//!
//! A [`Phoneme`] is one sound unit of Devanagari text after decomposition:
//! independent vowels are stored as their letter (`इ`), consonants as the
//! virama form (`क्`), and everything else (anusvara, visarga, candrabindu,
//! avagraha, spaces, punctuation) as an accessory carrying its own glyph.
//!
//! Attributes are never set by hand: they are looked up in the letter table
//! whenever a phoneme is built or substituted, so a rule that turns `इ` into
//! `ए` automatically gets the compound place and the long grade of `ए`.
//!
//! ```text
//! "कृष्ण"  ->  [क्] [ऋ] [ष्] [ण्] [अ]
//! ```

use crate::scope::RuleAddress;
use bitflags::bitflags;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, Range};

pub const VIRAMA: char = '\u{094D}';
pub const PROTRACTION: char = '\u{0969}';
pub const ANUSVARA: &str = "\u{0902}";
pub const VISARGA: &str = "\u{0903}";
pub const CANDRABINDU: &str = "\u{0901}";
pub const AVAGRAHA: &str = "\u{093D}";
pub const ANUDATTA: &str = "\u{0952}";
pub const SVARITA: &str = "\u{0951}";

// --- Attributes ---------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhonemeClass {
    Vowel,
    Consonant,
    Accessory,
}

bitflags! {
    /// Places of articulation (sthāna). Compound vowels carry two places,
    /// nasals add `NASIKA` to their stop place.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Places: u8 {
        const KANTHA = 1 << 0;
        const TALU = 1 << 1;
        const MURDHA = 1 << 2;
        const DANTA = 1 << 3;
        const OSHTHA = 1 << 4;
        const NASIKA = 1 << 5;
    }
}

/// Manner of articulation (prayatna), coarse enough for the rule predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Manner {
    Vowel,
    Stop { voiced: bool, aspirated: bool },
    Nasal,
    Semivowel,
    Sibilant,
    Aspirate,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Length {
    Half,
    Short,
    Long,
    Protracted,
}

impl Length {
    /// Duration in mātrās.
    pub fn morae(self) -> f32 {
        match self {
            Length::Half => 0.5,
            Length::Short => 1.0,
            Length::Long => 2.0,
            Length::Protracted => 3.0,
        }
    }
}

/// Vedic pitch. Unmarked vowels are `Rising` (udātta); `॒` marks `Falling`
/// (anudātta) and `॑` marks `Circumflex` (svarita).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pitch {
    #[default]
    Rising,
    Falling,
    Circumflex,
}

impl Pitch {
    pub fn mark(self) -> Option<&'static str> {
        match self {
            Pitch::Rising => None,
            Pitch::Falling => Some(ANUDATTA),
            Pitch::Circumflex => Some(SVARITA),
        }
    }
}

bitflags! {
    /// Tags carried by a phoneme: it-marker tags (transferred by 1.3.9) and
    /// origin tags set by the orchestrator and the rules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Tags: u64 {
        const KIT = 1 << 0;
        const GIT = 1 << 1;
        const NGIT = 1 << 2;
        const NYIT = 1 << 3;
        const NNIT = 1 << 4;
        const NIT = 1 << 5;
        const TIT = 1 << 6;
        const DIT = 1 << 7;
        const PIT = 1 << 8;
        const CIT = 1 << 9;
        const JIT = 1 << 10;
        const LIT = 1 << 11;
        const SHIT = 1 << 12;
        const GHIT = 1 << 13;
        const MIT = 1 << 14;
        const SSIT = 1 << 15;
        const RIT = 1 << 16;
        const ADIT = 1 << 17;
        const AADIT = 1 << 18;
        const IDIT = 1 << 19;
        const IIDIT = 1 << 20;
        const UDIT = 1 << 21;
        const UUDIT = 1 << 22;
        const RDIT = 1 << 23;
        const LRDIT = 1 << 24;
        const ODIT = 1 << 25;
        const NYI_IT = 1 << 26;
        const TU_IT = 1 << 27;
        const DU_IT = 1 << 28;

        const SUFFIX_ORIGIN = 1 << 40;
        const AUGMENT = 1 << 41;
        const PADANTA = 1 << 42;
        const IRREGULAR = 1 << 43;
        /// Written as part of the `ॐ` ligature.
        const LIGATURE = 1 << 44;

        const MARKERS = (1 << 29) - 1;
    }
}

// --- Letter table -------------------------------------------------------------

/// Static description of a base letter.
#[derive(Debug, Clone, Copy)]
pub struct Letter {
    /// Stored glyph: the independent vowel or the virama form of a consonant.
    pub glyph: &'static str,
    /// Dependent vowel sign; empty for `अ` and for consonants.
    pub sign: &'static str,
    pub class: PhonemeClass,
    pub places: Places,
    pub manner: Manner,
    pub length: Length,
}

const fn vowel(glyph: &'static str, sign: &'static str, places: Places, length: Length) -> Letter {
    Letter { glyph, sign, class: PhonemeClass::Vowel, places, manner: Manner::Vowel, length }
}

const fn consonant(glyph: &'static str, places: Places, manner: Manner) -> Letter {
    Letter { glyph, sign: "", class: PhonemeClass::Consonant, places, manner, length: Length::Half }
}

const fn stop(glyph: &'static str, places: Places, voiced: bool, aspirated: bool) -> Letter {
    consonant(glyph, places, Manner::Stop { voiced, aspirated })
}

const K: Places = Places::KANTHA;
const T: Places = Places::TALU;
const M: Places = Places::MURDHA;
const D: Places = Places::DANTA;
const O: Places = Places::OSHTHA;

static LETTERS: &[Letter] = &[
    vowel("अ", "", K, Length::Short),
    vowel("आ", "ा", K, Length::Long),
    vowel("इ", "ि", T, Length::Short),
    vowel("ई", "ी", T, Length::Long),
    vowel("उ", "ु", O, Length::Short),
    vowel("ऊ", "ू", O, Length::Long),
    vowel("ऋ", "ृ", M, Length::Short),
    vowel("ॠ", "ॄ", M, Length::Long),
    vowel("ऌ", "ॢ", D, Length::Short),
    vowel("ॡ", "ॣ", D, Length::Long),
    vowel("ए", "े", K.union(T), Length::Long),
    vowel("ऐ", "ै", K.union(T), Length::Long),
    vowel("ओ", "ो", K.union(O), Length::Long),
    vowel("औ", "ौ", K.union(O), Length::Long),
    stop("क्", K, false, false),
    stop("ख्", K, false, true),
    stop("ग्", K, true, false),
    stop("घ्", K, true, true),
    consonant("ङ्", K.union(Places::NASIKA), Manner::Nasal),
    stop("च्", T, false, false),
    stop("छ्", T, false, true),
    stop("ज्", T, true, false),
    stop("झ्", T, true, true),
    consonant("ञ्", T.union(Places::NASIKA), Manner::Nasal),
    stop("ट्", M, false, false),
    stop("ठ्", M, false, true),
    stop("ड्", M, true, false),
    stop("ढ्", M, true, true),
    consonant("ण्", M.union(Places::NASIKA), Manner::Nasal),
    stop("त्", D, false, false),
    stop("थ्", D, false, true),
    stop("द्", D, true, false),
    stop("ध्", D, true, true),
    consonant("न्", D.union(Places::NASIKA), Manner::Nasal),
    stop("प्", O, false, false),
    stop("फ्", O, false, true),
    stop("ब्", O, true, false),
    stop("भ्", O, true, true),
    consonant("म्", O.union(Places::NASIKA), Manner::Nasal),
    consonant("य्", T, Manner::Semivowel),
    consonant("र्", M, Manner::Semivowel),
    consonant("ल्", D, Manner::Semivowel),
    consonant("व्", D.union(O), Manner::Semivowel),
    consonant("ळ्", M, Manner::Semivowel),
    consonant("श्", T, Manner::Sibilant),
    consonant("ष्", M, Manner::Sibilant),
    consonant("स्", D, Manner::Sibilant),
    consonant("ह्", K, Manner::Aspirate),
];

static BY_GLYPH: Lazy<HashMap<&'static str, &'static Letter>> =
    Lazy::new(|| LETTERS.iter().map(|l| (l.glyph, l)).collect());

static BY_SIGN: Lazy<HashMap<&'static str, &'static Letter>> =
    Lazy::new(|| LETTERS.iter().filter(|l| !l.sign.is_empty()).map(|l| (l.sign, l)).collect());

/// Look up a base letter by its stored glyph (`"क्"`, `"ई"`).
pub fn letter(glyph: &str) -> Option<&'static Letter> {
    BY_GLYPH.get(glyph).copied()
}

/// Look up the vowel written by a dependent sign (`"ी"` -> `ई`).
pub fn letter_for_sign(sign: &str) -> Option<&'static Letter> {
    BY_SIGN.get(sign).copied()
}

/// The five stop classes, each ordered unvoiced, aspirate, voiced, voiced
/// aspirate, nasal.
pub static VARGAS: [[&str; 5]; 5] = [
    ["क्", "ख्", "ग्", "घ्", "ङ्"],
    ["च्", "छ्", "ज्", "झ्", "ञ्"],
    ["ट्", "ठ्", "ड्", "ढ्", "ण्"],
    ["त्", "थ्", "द्", "ध्", "न्"],
    ["प्", "फ्", "ब्", "भ्", "म्"],
];

pub const UNVOICED: usize = 0;
pub const VOICED: usize = 2;
pub const NASAL: usize = 4;

/// Row of the stop class a consonant is articulated with. Sibilants and `ह्`
/// map to the row of their place.
pub fn varga_row(glyph: &str) -> Option<usize> {
    match glyph {
        "श्" => return Some(1),
        "ष्" => return Some(2),
        "स्" => return Some(3),
        "ह्" => return Some(0),
        _ => {}
    }
    VARGAS.iter().position(|row| row.contains(&glyph))
}

pub fn varga_member(row: usize, column: usize) -> Option<&'static str> {
    VARGAS.get(row).and_then(|r| r.get(column)).copied()
}

// --- Vowel grades ---------------------------------------------------------------

/// Short counterpart of a vowel (`आ` -> `अ`); the vowel itself when short.
pub fn short_of(glyph: &str) -> Option<&'static str> {
    Some(match glyph {
        "अ" | "आ" => "अ",
        "इ" | "ई" => "इ",
        "उ" | "ऊ" => "उ",
        "ऋ" | "ॠ" => "ऋ",
        "ऌ" | "ॡ" => "ऌ",
        _ => return None,
    })
}

/// Long counterpart of a simple vowel.
pub fn long_of(glyph: &str) -> Option<&'static str> {
    Some(match glyph {
        "अ" | "आ" => "आ",
        "इ" | "ई" => "ई",
        "उ" | "ऊ" => "ऊ",
        "ऋ" | "ॠ" => "ॠ",
        "ऌ" | "ॡ" => "ॡ",
        _ => return None,
    })
}

/// Two vowels are savarna when they share the same short base.
pub fn savarna(a: &str, b: &str) -> bool {
    matches!((short_of(a), short_of(b)), (Some(x), Some(y)) if x == y)
}

/// Guna grade (1.1.2 with 1.1.51 uraṇ raparaḥ).
pub fn guna_of(glyph: &str) -> Option<&'static [&'static str]> {
    Some(match glyph {
        "अ" | "आ" => &["अ"],
        "इ" | "ई" => &["ए"],
        "उ" | "ऊ" => &["ओ"],
        "ऋ" | "ॠ" => &["अ", "र्"],
        "ऌ" | "ॡ" => &["अ", "ल्"],
        _ => return None,
    })
}

/// Vriddhi grade (1.1.1 with 1.1.51).
pub fn vriddhi_of(glyph: &str) -> Option<&'static [&'static str]> {
    Some(match glyph {
        "अ" | "आ" => &["आ"],
        "इ" | "ई" | "ए" | "ऐ" => &["ऐ"],
        "उ" | "ऊ" | "ओ" | "औ" => &["औ"],
        "ऋ" | "ॠ" => &["आ", "र्"],
        "ऌ" | "ॡ" => &["आ", "ल्"],
        _ => return None,
    })
}

// --- Phoneme ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Phoneme {
    glyph: Cow<'static, str>,
    pub class: PhonemeClass,
    pub places: Places,
    pub manner: Manner,
    pub length: Length,
    pub nasalized: bool,
    pub pitch: Pitch,
    pub tags: Tags,
    /// Rules that touched this phoneme, oldest first.
    pub trace: Vec<RuleAddress>,
}

impl Phoneme {
    /// Build a phoneme from its stored glyph. Returns `None` for an empty glyph.
    pub fn new(glyph: impl Into<Cow<'static, str>>) -> Option<Self> {
        let glyph = glyph.into();
        if glyph.is_empty() { None } else { Some(Self::build(glyph)) }
    }

    /// Build a phoneme from a literal glyph.
    pub fn of(glyph: &'static str) -> Self {
        debug_assert!(!glyph.is_empty());
        Self::build(Cow::Borrowed(glyph))
    }

    fn build(glyph: Cow<'static, str>) -> Self {
        let protracted = glyph.ends_with(PROTRACTION) && glyph.len() > PROTRACTION.len_utf8();
        let base = if protracted { &glyph[..glyph.len() - PROTRACTION.len_utf8()] } else { &glyph[..] };

        match letter(base) {
            Some(l) => Phoneme {
                class: l.class,
                places: l.places,
                manner: l.manner,
                length: if protracted && l.class == PhonemeClass::Vowel { Length::Protracted } else { l.length },
                nasalized: false,
                pitch: Pitch::Rising,
                tags: Tags::empty(),
                trace: Vec::new(),
                glyph,
            },
            None => {
                let (class, places, manner) = if base.ends_with(VIRAMA) {
                    (PhonemeClass::Consonant, Places::empty(), Manner::Other)
                } else {
                    let places = match base {
                        ANUSVARA | CANDRABINDU => Places::NASIKA,
                        VISARGA => Places::KANTHA,
                        _ => Places::empty(),
                    };
                    (PhonemeClass::Accessory, places, Manner::Other)
                };
                Phoneme {
                    class,
                    places,
                    manner,
                    length: Length::Half,
                    nasalized: base == CANDRABINDU || base == ANUSVARA,
                    pitch: Pitch::Rising,
                    tags: Tags::empty(),
                    trace: Vec::new(),
                    glyph,
                }
            }
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Glyph without the protraction mark; the key used for class membership.
    pub fn key(&self) -> &str {
        if self.length == Length::Protracted {
            self.glyph.strip_suffix(PROTRACTION).unwrap_or(&self.glyph[..])
        } else {
            &self.glyph
        }
    }

    pub fn is(&self, glyph: &str) -> bool {
        self.key() == glyph
    }

    pub fn is_any(&self, glyphs: &[&str]) -> bool {
        glyphs.contains(&self.key())
    }

    pub fn is_vowel(&self) -> bool {
        self.class == PhonemeClass::Vowel
    }

    pub fn is_consonant(&self) -> bool {
        self.class == PhonemeClass::Consonant
    }

    pub fn is_accessory(&self) -> bool {
        self.class == PhonemeClass::Accessory
    }

    pub fn is_protracted(&self) -> bool {
        self.length == Length::Protracted
    }

    pub fn is_short_vowel(&self) -> bool {
        self.is_vowel() && self.length == Length::Short
    }

    /// Dependent sign used when this vowel follows a consonant.
    pub fn sign(&self) -> &'static str {
        letter(self.key()).map(|l| l.sign).unwrap_or("")
    }

    /// Replace the sound while keeping tags, pitch and history.
    pub fn substitute(&self, glyph: &'static str, rule: RuleAddress) -> Phoneme {
        let mut next = Phoneme::of(glyph);
        next.tags = self.tags;
        next.pitch = self.pitch;
        next.trace = self.trace.clone();
        next.trace.push(rule);
        next
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags |= tags;
        self
    }

    pub fn touched_by(mut self, rule: RuleAddress) -> Self {
        self.trace.push(rule);
        self
    }

    pub fn touch(&mut self, rule: RuleAddress) {
        self.trace.push(rule);
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glyph)
    }
}

// --- PhonemeSequence ------------------------------------------------------------

/// Ordered, index-addressable phonemes. Never holds an empty glyph.
///
/// Read access goes through `Deref<Target = [Phoneme]>`; mutation only
/// through the methods below so the invariant cannot be broken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhonemeSequence(Vec<Phoneme>);

impl PhonemeSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_glyphs(glyphs: &[&'static str]) -> Self {
        glyphs.iter().filter_map(|g| Phoneme::new(*g)).collect()
    }

    pub fn push(&mut self, phoneme: Phoneme) {
        if !phoneme.glyph.is_empty() {
            self.0.push(phoneme);
        }
    }

    pub fn insert(&mut self, index: usize, phoneme: Phoneme) {
        if !phoneme.glyph.is_empty() && index <= self.0.len() {
            self.0.insert(index, phoneme);
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<Phoneme> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn pop(&mut self) -> Option<Phoneme> {
        self.0.pop()
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Replace `range` with `replacement`. Out-of-bounds ranges are clamped.
    pub fn splice(&mut self, range: Range<usize>, replacement: PhonemeSequence) {
        let end = range.end.min(self.0.len());
        let start = range.start.min(end);
        self.0.splice(start..end, replacement.0);
    }

    pub fn extend(&mut self, other: PhonemeSequence) {
        self.0.extend(other.0);
    }

    pub fn concat(&self, other: &PhonemeSequence) -> PhonemeSequence {
        let mut out = self.clone();
        out.0.extend(other.0.iter().cloned());
        out
    }

    /// Substitute the phoneme at `index` through the letter table.
    pub fn substitute(&mut self, index: usize, glyph: &'static str, rule: RuleAddress) -> bool {
        match self.0.get(index) {
            Some(old) => {
                let next = old.substitute(glyph, rule);
                self.0[index] = next;
                true
            }
            None => false,
        }
    }

    /// Replace the phoneme at `index` by several glyphs (guna `ऋ` -> `अर्`).
    /// The first replacement inherits the old phoneme's tags and trace.
    pub fn substitute_many(&mut self, index: usize, glyphs: &[&'static str], rule: RuleAddress) -> bool {
        let Some(old) = self.0.get(index).cloned() else {
            return false;
        };
        let replacement: PhonemeSequence = glyphs
            .iter()
            .enumerate()
            .map(|(i, &g)| {
                if i == 0 { old.substitute(g, rule) } else { Phoneme::of(g).with_tags(old.tags).touched_by(rule) }
            })
            .collect();
        self.splice(index..index + 1, replacement);
        true
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Phoneme> {
        self.0.get_mut(index)
    }

    pub fn last_mut(&mut self) -> Option<&mut Phoneme> {
        self.0.last_mut()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Phoneme> {
        self.0.iter_mut()
    }

    /// Keep phonemes whose index is not in `removed`.
    pub fn without_indices(&self, removed: &std::collections::BTreeSet<usize>) -> PhonemeSequence {
        self.0.iter().enumerate().filter(|(i, _)| !removed.contains(i)).map(|(_, p)| p.clone()).collect()
    }

    pub fn glyphs(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.glyph()).collect()
    }

    /// Compare the membership keys against a glyph list.
    pub fn keys_eq(&self, glyphs: &[&str]) -> bool {
        self.0.len() == glyphs.len() && self.0.iter().zip(glyphs).all(|(p, g)| p.key() == *g)
    }

    pub fn starts_with_keys(&self, glyphs: &[&str]) -> bool {
        self.0.len() >= glyphs.len() && self.0.iter().zip(glyphs).all(|(p, g)| p.key() == *g)
    }

    /// Penultimate phoneme (upadhā, 1.1.65).
    pub fn upadha(&self) -> Option<&Phoneme> {
        self.0.len().checked_sub(2).and_then(|i| self.0.get(i))
    }

    pub fn last_vowel_index(&self) -> Option<usize> {
        self.0.iter().rposition(Phoneme::is_vowel)
    }

    pub fn vowel_count(&self) -> usize {
        self.0.iter().filter(|p| p.is_vowel()).count()
    }

    pub fn into_vec(self) -> Vec<Phoneme> {
        self.0
    }
}

impl Deref for PhonemeSequence {
    type Target = [Phoneme];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Phoneme> for PhonemeSequence {
    fn from_iter<I: IntoIterator<Item = Phoneme>>(iter: I) -> Self {
        let mut seq = PhonemeSequence::new();
        for p in iter {
            seq.push(p);
        }
        seq
    }
}

impl IntoIterator for PhonemeSequence {
    type Item = Phoneme;
    type IntoIter = std::vec::IntoIter<Phoneme>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PhonemeSequence {
    type Item = &'a Phoneme;
    type IntoIter = std::slice::Iter<'a, Phoneme>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PhonemeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(p.glyph())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_vowels_have_two_places() {
        let e = Phoneme::of("ए");
        assert_eq!(e.places, Places::KANTHA | Places::TALU);
        assert_eq!(e.length, Length::Long);

        let v = Phoneme::of("व्");
        assert_eq!(v.places, Places::DANTA | Places::OSHTHA);
        assert!(v.is_consonant());
    }

    #[test]
    fn protracted_vowel_keeps_multi_codepoint_glyph() {
        let o = Phoneme::of("ओ३");
        assert_eq!(o.glyph(), "ओ३");
        assert_eq!(o.key(), "ओ");
        assert_eq!(o.length, Length::Protracted);
        assert_eq!(o.length.morae(), 3.0);
    }

    #[test]
    fn substitution_keeps_tags_and_extends_trace() {
        let rule = RuleAddress::new(6, 1, 87);
        let i = Phoneme::of("इ").with_tags(Tags::PADANTA);
        let e = i.substitute("ए", rule);
        assert_eq!(e.glyph(), "ए");
        assert!(e.tags.contains(Tags::PADANTA));
        assert_eq!(e.trace, vec![rule]);
    }

    #[test]
    fn empty_glyphs_never_enter_a_sequence() {
        assert!(Phoneme::new("").is_none());
        let seq = PhonemeSequence::from_glyphs(&["क्", "", "अ"]);
        assert_eq!(seq.glyphs(), vec!["क्", "अ"]);
    }

    #[test]
    fn substitute_many_splits_guna_of_r() {
        let mut seq = PhonemeSequence::from_glyphs(&["क्", "ऋ"]);
        assert!(seq.substitute_many(1, guna_of("ऋ").unwrap(), RuleAddress::new(7, 3, 84)));
        assert_eq!(seq.glyphs(), vec!["क्", "अ", "र्"]);
    }

    #[test]
    fn grades_and_savarna() {
        assert!(savarna("इ", "ई"));
        assert!(!savarna("इ", "उ"));
        assert_eq!(vriddhi_of("ए"), Some(&["ऐ"][..]));
        assert_eq!(varga_row("ष्"), Some(2));
        assert_eq!(varga_member(3, VOICED), Some("द्"));
    }
}
