//! Pratyahara algebra over the fourteen Maheshvara sutras.
//!
//! A pratyahara `XY` names every phoneme from `X` up to the group closed by
//! the marker `Y`. Markers themselves are never members. Because the same
//! marker closes more than one group (`ण्` closes 1 and 6), a resolution is
//! always identified by `(start, terminator, occurrence)`.

use crate::codec;
use crate::error::Error;
use crate::phoneme::{self, Phoneme};
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// One Maheshvara sutra: its members and its closing marker.
#[derive(Debug, Clone, Copy)]
pub struct Group {
    pub members: &'static [&'static str],
    pub terminator: &'static str,
}

pub static SUTRAS: [Group; 14] = [
    Group { members: &["अ", "इ", "उ"], terminator: "ण्" },
    Group { members: &["ऋ", "ऌ"], terminator: "क्" },
    Group { members: &["ए", "ओ"], terminator: "ङ्" },
    Group { members: &["ऐ", "औ"], terminator: "च्" },
    Group { members: &["ह्", "य्", "व्", "र्"], terminator: "ट्" },
    Group { members: &["ल्"], terminator: "ण्" },
    Group { members: &["ञ्", "म्", "ङ्", "ण्", "न्"], terminator: "म्" },
    Group { members: &["झ्", "भ्"], terminator: "ञ्" },
    Group { members: &["घ्", "ढ्", "ध्"], terminator: "ष्" },
    Group { members: &["ज्", "ब्", "ग्", "ड्", "द्"], terminator: "श्" },
    Group { members: &["ख्", "फ्", "छ्", "ठ्", "थ्", "च्", "ट्", "त्"], terminator: "व्" },
    Group { members: &["क्", "प्"], terminator: "य्" },
    Group { members: &["श्", "ष्", "स्"], terminator: "र्" },
    Group { members: &["ह्"], terminator: "ल्" },
];

/// Conventional readings that do not use the first terminator after the start.
const OCCURRENCE_OVERRIDES: &[(&str, usize)] = &[("इण्", 1)];

/// Classes referenced by the rule catalogue, resolved once.
const NAMED: &[&str] = &[
    "अक्", "अच्", "अट्", "अण्", "अम्", "अल्", "इक्", "इच्", "इण्", "उक्", "एच्", "एङ्", "ऐच्", "खय्", "खर्", "चर्",
    "छव्", "जश्", "झय्", "झर्", "झल्", "झश्", "झष्", "यञ्", "यण्", "यय्", "यर्", "वल्", "शर्", "शल्", "हल्", "हश्",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key {
    start: &'static str,
    terminator: &'static str,
    occurrence: usize,
}

static CACHE: Lazy<HashMap<Key, BTreeSet<&'static str>>> = Lazy::new(|| {
    NAMED
        .iter()
        .filter_map(|name| parse_name(name).ok())
        .map(|key| (key, resolve(key.start, key.terminator, key.occurrence, false)))
        .collect()
});

static BY_NAME: Lazy<HashMap<&'static str, Key>> =
    Lazy::new(|| NAMED.iter().filter_map(|name| parse_name(name).ok().map(|key| (*name, key))).collect());

static EMPTY: BTreeSet<&'static str> = BTreeSet::new();

fn savarna_partners(glyph: &str) -> &'static [&'static str] {
    match glyph {
        "अ" => &["आ"],
        "इ" => &["ई"],
        "उ" => &["ऊ"],
        "ऋ" => &["ॠ"],
        "ऌ" => &["ॡ"],
        _ => &[],
    }
}

fn intern(glyph: &str) -> Option<&'static str> {
    SUTRAS.iter().flat_map(|g| g.members.iter().chain(std::iter::once(&g.terminator))).find(|m| **m == glyph).copied()
}

/// Resolve `(start, terminator, occurrence)` to a phoneme set.
///
/// `occurrence` counts terminator groups from the start's group onward,
/// zero-based. An out-of-order pair resolves to the empty set. An occurrence
/// beyond the available groups is logged and also resolves to the empty set;
/// use [`resolve_checked`] to see it as an error.
pub fn resolve(start: &str, terminator: &str, occurrence: usize, no_expansion: bool) -> BTreeSet<&'static str> {
    match resolve_checked(start, terminator, occurrence, no_expansion) {
        Ok(set) => set,
        Err(err) => {
            warn!(%err, "pratyahara");
            BTreeSet::new()
        }
    }
}

pub fn resolve_checked(
    start: &str,
    terminator: &str,
    occurrence: usize,
    no_expansion: bool,
) -> Result<BTreeSet<&'static str>, Error> {
    let Some(first) = SUTRAS.iter().position(|g| g.members.contains(&start)) else {
        return Ok(BTreeSet::new());
    };

    let mut collected: Vec<&'static str> = Vec::new();
    let mut seen = 0;
    let mut started = false;
    for group in &SUTRAS[first..] {
        for member in group.members {
            started |= *member == start;
            if started {
                collected.push(*member);
            }
        }
        if group.terminator == terminator {
            if seen == occurrence {
                let mut set: BTreeSet<&'static str> = collected.iter().copied().collect();
                if !no_expansion {
                    for member in &collected {
                        set.extend(savarna_partners(member));
                    }
                }
                debug!(start, terminator, occurrence, size = set.len(), "pratyahara resolved");
                return Ok(set);
            }
            seen += 1;
        }
    }

    if seen == 0 {
        // terminator never closes a group at or after the start
        return Ok(BTreeSet::new());
    }
    Err(Error::AmbiguousPratyahara { start: start.to_string(), terminator: terminator.to_string(), occurrence })
}

fn parse_name(name: &str) -> Result<Key, Error> {
    let seq = codec::decompose(name);
    let malformed = || Error::MalformedInput(format!("not a pratyahara name: {name:?}"));
    if seq.len() < 2 {
        return Err(malformed());
    }

    let start = intern(seq[0].key()).ok_or_else(malformed)?;
    let last = &seq[seq.len() - 1];
    let mut rest = seq.len() - 1;
    if seq[0].is_consonant() && seq.get(1).is_some_and(|p| p.is("अ")) {
        rest -= 1;
    }
    if rest != 1 || !last.is_consonant() {
        return Err(malformed());
    }
    let terminator = SUTRAS.iter().map(|g| g.terminator).find(|t| last.is(t)).ok_or_else(malformed)?;

    let canonical = codec::recompose(&seq);
    let occurrence =
        OCCURRENCE_OVERRIDES.iter().find(|(n, _)| *n == canonical).map(|(_, occurrence)| *occurrence).unwrap_or(0);
    Ok(Key { start, terminator, occurrence })
}

/// Resolve a pratyahara name such as `अच्`, `हल्` or `यण्`.
///
/// The inherent `अ` after a consonant start is the pronunciation vowel and
/// not part of the name.
pub fn resolve_name(name: &str) -> Result<BTreeSet<&'static str>, Error> {
    let key = parse_name(name)?;
    if let Some(set) = CACHE.get(&key) {
        return Ok(set.clone());
    }
    resolve_checked(key.start, key.terminator, key.occurrence, false)
}

/// A named class from the fixed catalogue; unknown names are the empty set.
pub fn class(name: &str) -> &'static BTreeSet<&'static str> {
    match BY_NAME.get(name).and_then(|key| CACHE.get(key)) {
        Some(set) => set,
        None => {
            warn!(name, "unknown pratyahara class");
            &EMPTY
        }
    }
}

/// Whether `phoneme` belongs to the named class.
pub fn contains(name: &str, phoneme: &Phoneme) -> bool {
    class(name).contains(phoneme.key())
}

/// Udit class names: `कु` is the velar row, and so on.
pub fn udit(name: &str) -> &'static [&'static str] {
    match name {
        "कु" => &phoneme::VARGAS[0],
        "चु" => &phoneme::VARGAS[1],
        "टु" => &phoneme::VARGAS[2],
        "तु" => &phoneme::VARGAS[3],
        "पु" => &phoneme::VARGAS[4],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(glyphs: &[&'static str]) -> BTreeSet<&'static str> {
        glyphs.iter().copied().collect()
    }

    #[test]
    fn ac_contains_every_vowel() {
        let ac = resolve_name("अच्").unwrap();
        for v in ["अ", "इ", "उ", "ऋ", "ऌ", "ए", "ओ", "ऐ", "औ", "आ", "ई", "ऊ", "ॠ", "ॡ"] {
            assert!(ac.contains(v), "{v}");
        }
        assert!(!ac.contains("च्"));
        assert_eq!(ac.len(), 14);
    }

    #[test]
    fn terminator_is_never_a_member() {
        let hal = resolve_name("हल्").unwrap();
        assert!(hal.contains("ह्"));
        assert!(hal.contains("ल्"));
        assert_eq!(hal.len(), 33);

        let yan = resolve_name("यण्").unwrap();
        assert_eq!(yan, set(&["य्", "व्", "र्", "ल्"]));
    }

    #[test]
    fn occurrence_disambiguates_repeated_markers() {
        assert_eq!(resolve("अ", "ण्", 0, true), set(&["अ", "इ", "उ"]));
        let in_ = resolve_name("इण्").unwrap();
        assert!(in_.contains("ल्"));
        assert!(in_.contains("ओ"));
        assert!(!in_.contains("अ"));
    }

    #[test]
    fn no_expansion_skips_savarna_partners() {
        let ak = resolve("अ", "क्", 0, true);
        assert_eq!(ak, set(&["अ", "इ", "उ", "ऋ", "ऌ"]));
        let ak = resolve("अ", "क्", 0, false);
        assert!(ak.contains("ॠ"));
    }

    #[test]
    fn out_of_order_pair_is_empty() {
        assert!(resolve("ह्", "क्", 0, false).is_empty());
        assert!(resolve("?", "क्", 0, false).is_empty());
    }

    #[test]
    fn missing_occurrence_is_ambiguous() {
        assert!(resolve("अ", "ण्", 5, false).is_empty());
        assert!(matches!(resolve_checked("अ", "ण्", 5, false), Err(Error::AmbiguousPratyahara { .. })));
    }

    #[test]
    fn jhal_and_jash_classes() {
        let jash = class("जश्");
        assert_eq!(*jash, set(&["ज्", "ब्", "ग्", "ड्", "द्"]));
        let jhal = class("झल्");
        assert!(jhal.contains("स्") && jhal.contains("ह्") && !jhal.contains("न्"));
        assert!(class("नहीं").is_empty());
    }

    #[test]
    fn bad_names_are_malformed() {
        assert!(matches!(resolve_name("अ"), Err(Error::MalformedInput(_))));
        assert!(matches!(resolve_name("अकि"), Err(Error::MalformedInput(_))));
    }
}
