use crate::engine::{DerivationState, Site, Term, TermTags};
use crate::lexicon::Gender;
use crate::phoneme::{Phoneme, PhonemeSequence, Tags};
use crate::pratyahara;

pub const IK: &[&str] = &["इ", "ई", "उ", "ऊ", "ऋ", "ॠ", "ऌ", "ॡ"];
pub const UK: &[&str] = &["उ", "ऊ", "ऋ", "ॠ", "ऌ", "ॡ"];

/// The aṅga sequence (first term).
pub fn anga(st: &DerivationState) -> Option<&PhonemeSequence> {
    st.anga().map(|t| &t.sequence)
}

/// The sup term, if the second term is one.
pub fn sup(st: &DerivationState) -> Option<&Term> {
    st.suffix().filter(|t| t.has(TermTags::SUP))
}

/// The krt term, if the second term is one.
pub fn krt(st: &DerivationState) -> Option<&Term> {
    st.suffix().filter(|t| t.has(TermTags::KRT))
}

/// Returns true when the sup was introduced as one of `upadeshas`.
pub fn sup_is(st: &DerivationState, upadeshas: &[&str]) -> bool {
    sup(st).is_some_and(|t| upadeshas.contains(&t.upadesha.as_str()))
}

/// Returns true when the sup still has exactly the given phonemes.
pub fn sup_reads(st: &DerivationState, glyphs: &[&str]) -> bool {
    sup(st).is_some_and(|t| t.sequence.keys_eq(glyphs))
}

pub fn suffix_first(st: &DerivationState) -> Option<&Phoneme> {
    st.suffix().and_then(|t| t.sequence.first())
}

/// Returns true when the suffix begins with a member of the named pratyahara.
pub fn suffix_starts_in(st: &DerivationState, class: &str) -> bool {
    suffix_first(st).is_some_and(|p| pratyahara::contains(class, p))
}

pub fn anga_last(st: &DerivationState) -> Option<&Phoneme> {
    anga(st).and_then(|s| s.last())
}

/// Site of the aṅga's final phoneme.
pub fn anga_end(st: &DerivationState) -> Option<Site> {
    anga(st).filter(|s| !s.is_empty()).map(|s| Site::new(0, s.len() - 1))
}

/// Returns true when the aṅga ends in short `अ`.
pub fn is_a_stem(st: &DerivationState) -> bool {
    anga_last(st).is_some_and(|p| p.is("अ"))
}

/// Short `इ`/`उ` final other than `सखि` and `पति` (1.4.7 śeṣo ghy asakhi).
pub fn is_ghi(st: &DerivationState) -> bool {
    let stem = st.anga().map(|t| t.upadesha.as_str()).unwrap_or_default();
    anga_last(st).is_some_and(|p| p.is_any(&["इ", "उ"])) && !matches!(stem, "सखि" | "पति")
}

pub fn gender(st: &DerivationState) -> Option<Gender> {
    st.gender()
}

pub fn is_neuter(st: &DerivationState) -> bool {
    gender(st) == Some(Gender::Neuter)
}

/// Case and number of an inflection.
pub fn case_number(st: &DerivationState) -> Option<(u8, u8)> {
    match &st.subject {
        crate::engine::Subject::Inflection { case, number, .. } => Some((*case, *number)),
        crate::engine::Subject::Derivative { .. } => None,
    }
}

pub fn is_plural(st: &DerivationState) -> bool {
    case_number(st).is_some_and(|(_, n)| n == 3)
}

/// Returns true when the suffix carries any of the marker tags.
pub fn suffix_has_marker(st: &DerivationState, tags: Tags) -> bool {
    st.suffix().is_some_and(|t| t.has_marker(tags))
}

/// kit, ṅit or git suffix (1.1.5 kṅiti ca blocks guṇa and vṛddhi).
pub fn is_weak(st: &DerivationState) -> bool {
    suffix_has_marker(st, Tags::KIT | Tags::NGIT | Tags::GIT)
}

/// ñit or ṇit suffix.
pub fn is_nyit_or_nnit(st: &DerivationState) -> bool {
    suffix_has_marker(st, Tags::NYIT | Tags::NNIT)
}

/// Tag every phoneme as coming from a suffix.
pub fn from_suffix(seq: PhonemeSequence) -> PhonemeSequence {
    seq.into_iter().map(|p| p.with_tags(Tags::SUFFIX_ORIGIN)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decompose;
    use crate::engine::Subject;

    fn state(stem: &str, sup_upadesha: &str, sup_text: &str) -> DerivationState {
        let subject = Subject::Inflection { stem: stem.into(), case: 3, number: 1, gender: Gender::Masculine };
        let mut s = DerivationState::new(subject);
        s.terms.push(Term::new(stem, decompose(stem), TermTags::PRATIPADIKA, Tags::empty()));
        s.terms.push(Term::new(sup_upadesha, decompose(sup_text), TermTags::SUP, Tags::empty()));
        s
    }

    #[test]
    fn ghi_excludes_sakhi() {
        assert!(is_ghi(&state("हरि", "टा", "आ")));
        assert!(is_ghi(&state("गुरु", "टा", "आ")));
        assert!(!is_ghi(&state("सखि", "टा", "आ")));
        assert!(!is_ghi(&state("राम", "टा", "आ")));
    }

    #[test]
    fn sup_identity_and_current_form() {
        let s = state("राम", "भिस्", "भिस्");
        assert!(sup_is(&s, &["भिस्"]));
        assert!(sup_reads(&s, &["भ्", "इ", "स्"]));
        assert!(suffix_starts_in(&s, "झल्"));
        assert!(suffix_starts_in(&s, "यञ्"));
        assert_eq!(anga_end(&s), Some(Site::new(0, 3)));
    }
}
