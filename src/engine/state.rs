//! Derivation state: the terms under construction, the flags that gate
//! headings and rules, and the step history.

use crate::codec;
use crate::lexicon::{Gender, KrtTags, RootTags};
use crate::phoneme::{PhonemeSequence, Tags};
use crate::scope::RuleAddress;
use bitflags::bitflags;
use tracing::debug;

bitflags! {
    /// Grammatical designations of a term.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TermTags: u32 {
        const DHATU = 1 << 0;
        const PRATIPADIKA = 1 << 1;
        const PRATYAYA = 1 << 2;
        const SUP = 1 << 3;
        const KRT = 1 << 4;
        const ARDHADHATUKA = 1 << 5;
        /// 1.1.42 / 1.1.43
        const SARVANAMASTHANA = 1 << 6;
        const SAMBUDDHI = 1 << 7;
        const AVYAYA = 1 << 8;
        const ANGA = 1 << 9;
        /// The neuter `शि` substitute of jas/śas.
        const SHI = 1 << 10;
        /// Carries the nuṭ or num augment.
        const NUT = 1 << 11;
        /// Terms merged by a junction.
        const WORD = 1 << 12;
    }
}

bitflags! {
    /// Derivation-wide flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StateFlags: u32 {
        /// The suffix is kit, ṅit or git (1.1.5).
        const WEAK_GRADE = 1 << 0;
        /// The suffix lost markers when it was introduced.
        const MARKER_BY_SUFFIX = 1 << 1;
        const ANGA = 1 << 2;
        const PADA = 1 << 3;
        const ARDHADHATUKA = 1 << 4;
        const SAMBUDDHI = 1 << 5;
        /// The junction applied 6.1.102.
        const PURVASAVARNA = 1 << 6;
        const IRREGULAR = 1 << 7;
        const PAUSE = 1 << 8;
        const DHATU = 1 << 9;
        /// 8.4.56 is requested.
        const DEVOICE = 1 << 10;
    }
}

/// One morpheme under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// The form it was introduced as, markers included.
    pub upadesha: String,
    pub sequence: PhonemeSequence,
    pub tags: TermTags,
    /// Union of the tags of its deleted markers.
    pub markers: Tags,
}

impl Term {
    pub fn new(upadesha: impl Into<String>, sequence: PhonemeSequence, tags: TermTags, markers: Tags) -> Self {
        Self { upadesha: upadesha.into(), sequence, tags, markers }
    }

    pub fn has(&self, tags: TermTags) -> bool {
        self.tags.contains(tags)
    }

    pub fn has_marker(&self, tags: Tags) -> bool {
        self.markers.intersects(tags)
    }

    pub fn text(&self) -> String {
        codec::recompose(&self.sequence)
    }
}

/// What is being derived.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    Inflection { stem: String, case: u8, number: u8, gender: Gender },
    Derivative { root: String, suffix: String, root_tags: RootTags, krt_tags: KrtTags },
}

/// A rule location: term index and phoneme index inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Site {
    pub term: usize,
    pub index: usize,
}

impl Site {
    pub const fn new(term: usize, index: usize) -> Self {
        Self { term, index }
    }
}

/// One entry of the derivation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub rule: Option<RuleAddress>,
    pub operation: String,
    pub surface: String,
}

#[derive(Debug, Clone)]
pub struct DerivationState {
    pub terms: Vec<Term>,
    pub history: Vec<Step>,
    pub flags: StateFlags,
    pub subject: Subject,
}

impl DerivationState {
    pub fn new(subject: Subject) -> Self {
        Self { terms: Vec::new(), history: Vec::new(), flags: StateFlags::empty(), subject }
    }

    pub fn anga(&self) -> Option<&Term> {
        self.terms.first()
    }

    pub fn anga_mut(&mut self) -> Option<&mut Term> {
        self.terms.first_mut()
    }

    pub fn suffix(&self) -> Option<&Term> {
        self.terms.get(1)
    }

    pub fn suffix_mut(&mut self) -> Option<&mut Term> {
        self.terms.get_mut(1)
    }

    pub fn gender(&self) -> Option<Gender> {
        match &self.subject {
            Subject::Inflection { gender, .. } => Some(*gender),
            Subject::Derivative { .. } => None,
        }
    }

    pub fn root_tags(&self) -> RootTags {
        match &self.subject {
            Subject::Derivative { root_tags, .. } => *root_tags,
            Subject::Inflection { .. } => RootTags::empty(),
        }
    }

    /// All terms as one sequence.
    pub fn word(&self) -> PhonemeSequence {
        self.terms.iter().fold(PhonemeSequence::new(), |acc, t| acc.concat(&t.sequence))
    }

    /// Surface text with `+` between terms that are not joined yet. Empty
    /// terms (after luk) are skipped.
    pub fn surface(&self) -> String {
        self.terms.iter().filter(|t| !t.sequence.is_empty()).map(Term::text).collect::<Vec<_>>().join(" + ")
    }

    /// Replace all terms by a single joined word.
    pub fn merge(&mut self, sequence: PhonemeSequence) {
        let tags = self.terms.iter().fold(TermTags::WORD, |acc, t| acc | (t.tags & TermTags::AVYAYA));
        let upadesha = self.terms.iter().map(|t| t.upadesha.as_str()).collect::<Vec<_>>().join(" + ");
        let markers = self.terms.iter().fold(Tags::empty(), |acc, t| acc | t.markers);
        self.terms = vec![Term::new(upadesha, sequence, tags, markers)];
    }

    pub fn record(&mut self, rule: Option<RuleAddress>, operation: impl Into<String>) {
        let step = Step { index: self.history.len(), rule, operation: operation.into(), surface: self.surface() };
        debug!(
            step = step.index,
            rule = ?step.rule.map(|r| r.to_string()),
            op = %step.operation,
            surface = %step.surface,
            "step"
        );
        self.history.push(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decompose;

    fn state() -> DerivationState {
        let mut s = DerivationState::new(Subject::Inflection {
            stem: "राम".into(),
            case: 1,
            number: 1,
            gender: Gender::Masculine,
        });
        s.terms.push(Term::new("राम", decompose("राम"), TermTags::PRATIPADIKA, Tags::empty()));
        s.terms.push(Term::new("सुँ", decompose("स्"), TermTags::SUP, Tags::UDIT));
        s
    }

    #[test]
    fn surface_separates_unjoined_terms() {
        let s = state();
        assert_eq!(s.surface(), "राम + स्");
        assert_eq!(codec::recompose(&s.word()), "रामस्");
    }

    #[test]
    fn merge_keeps_marker_union() {
        let mut s = state();
        let word = s.word();
        s.merge(word);
        assert_eq!(s.terms.len(), 1);
        assert_eq!(s.surface(), "रामस्");
        assert!(s.terms[0].has_marker(Tags::UDIT));
        assert!(s.terms[0].has(TermTags::WORD));
    }

    #[test]
    fn record_numbers_steps() {
        let mut s = state();
        s.record(None, "first");
        s.record(Some(RuleAddress::new(8, 2, 66)), "second");
        assert_eq!(s.history[1].index, 1);
        assert_eq!(s.history[1].surface, "राम + स्");
    }
}
