use crate::codec::decompose;
use crate::engine::{DerivationState, Site};
use crate::phoneme::{Phoneme, Tags, long_of};
use crate::rules::predicates::from_suffix;
use crate::scope::RuleAddress;

pub type Grade = fn(&str) -> Option<&'static [&'static str]>;

/// Replace the whole suffix by `text` (an ādeśa). Term tags and the markers
/// of the original stay on the term (1.1.56 sthānivad ādeśo 'nalvidhau).
pub fn replace_suffix(mut st: DerivationState, text: &str, rule: RuleAddress) -> DerivationState {
    let seq = from_suffix(decompose(text)).into_iter().map(|p| p.touched_by(rule)).collect();
    if let Some(t) = st.suffix_mut() {
        t.sequence = seq;
    }
    st
}

/// Delete the suffix (luk).
pub fn clear_suffix(mut st: DerivationState) -> DerivationState {
    if let Some(t) = st.suffix_mut() {
        t.sequence.clear();
    }
    st
}

/// Apply a vowel grade at `site`; `ऋ` grades expand to two phonemes.
pub fn regrade(mut st: DerivationState, site: &Site, grade: Grade, rule: RuleAddress) -> DerivationState {
    if let Some(term) = st.terms.get_mut(site.term) {
        if let Some(glyphs) = term.sequence.get(site.index).and_then(|p| grade(p.key())) {
            term.sequence.substitute_many(site.index, glyphs, rule);
        }
    }
    st
}

pub fn substitute(mut st: DerivationState, site: &Site, glyph: &'static str, rule: RuleAddress) -> DerivationState {
    if let Some(term) = st.terms.get_mut(site.term) {
        term.sequence.substitute(site.index, glyph, rule);
    }
    st
}

pub fn lengthen(st: DerivationState, site: &Site, rule: RuleAddress) -> DerivationState {
    let long = st.terms.get(site.term).and_then(|t| t.sequence.get(site.index)).and_then(|p| long_of(p.key()));
    match long {
        Some(glyph) => substitute(st, site, glyph, rule),
        None => st,
    }
}

/// Insert an augment phoneme at `site`.
pub fn insert(
    mut st: DerivationState,
    site: &Site,
    glyph: &'static str,
    tags: Tags,
    rule: RuleAddress,
) -> DerivationState {
    if let Some(term) = st.terms.get_mut(site.term) {
        term.sequence.insert(site.index, Phoneme::of(glyph).with_tags(tags).touched_by(rule));
    }
    st
}

pub fn remove(mut st: DerivationState, site: &Site) -> DerivationState {
    if let Some(term) = st.terms.get_mut(site.term) {
        term.sequence.remove(site.index);
    }
    st
}
