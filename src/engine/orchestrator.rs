use super::interpreter::saturate;
use super::metrics::RunMetrics;
use super::state::{DerivationState, StateFlags, Subject, Term, TermTags};
use crate::api::Options;
use crate::error::Error;
use crate::lexicon::{self, Gender, KrtTags, RootTags};
use crate::markers::{SourceKind, strip_markers, strip_text};
use crate::phoneme::Tags;
use crate::rules::predicates::from_suffix;
use crate::rules::{DHATU, KRDANTA, SAMHITA, SUBANTA};
use crate::sandhi::{self, JunctionContext, JunctionKind};
use crate::scope::RuleAddress;
use crate::tripadi;
use std::time::Instant;
use tracing::{debug, info_span};

const SVAUJASMAUT: RuleAddress = RuleAddress::new(4, 1, 2);
const KRT_ATIN: RuleAddress = RuleAddress::new(3, 1, 91);

/// Join `terms[0]` and `terms[1]`, then run the palatal and retroflex
/// assimilations on the merged word.
fn join(mut state: DerivationState, ctx: JunctionContext) -> DerivationState {
    let left = state.terms.first().map(|t| t.sequence.clone()).unwrap_or_default();
    let right = state.terms.get(1).map(|t| t.sequence.clone()).unwrap_or_default();
    let junction = sandhi::join_vowels(&left, &right, ctx);
    debug!(kind = ?junction.kind, rule = ?junction.rule.map(|r| r.to_string()), "junction");

    match junction.kind {
        JunctionKind::PurvaSavarna => state.flags |= StateFlags::PURVASAVARNA,
        JunctionKind::Pause => state.flags |= StateFlags::PAUSE,
        _ => {}
    }
    state.merge(junction.sequence);
    state.record(junction.rule, junction.operation);

    let word = state.terms[0].sequence.clone();
    let (word, palatal) = sandhi::palatalize(&word);
    if palatal {
        state.terms[0].sequence = word.clone();
        state.record(Some(sandhi::STOH_SHCUNA), "stoḥ ścunā ścuḥ");
    }
    let (word, retroflex) = sandhi::retroflex(&word);
    if retroflex {
        state.terms[0].sequence = word;
        state.record(Some(sandhi::SHTUNA_SHTUH), "ṣṭunā ṣṭuḥ");
    }
    state
}

/// Inflect `stem` with the sup ending of `case` and `number`.
pub(crate) fn derive_inflection(
    stem: &str,
    case: u8,
    number: u8,
    options: &Options,
) -> Result<(DerivationState, RunMetrics), Error> {
    let _span = info_span!("inflection", stem, case, number).entered();
    let started = Instant::now();
    lexicon::ensure_loaded();

    let stem = stem.trim();
    if stem.is_empty() {
        return Err(Error::MalformedInput("empty stem".into()));
    }
    let sup = lexicon::lookup_suffix(case, number).ok_or(Error::UnknownSuffixAddress { case, number })?;
    let gender = lexicon::lookup_stem(stem).map_or(Gender::Masculine, |r| r.gender);

    let mut state = DerivationState::new(Subject::Inflection { stem: stem.into(), case, number, gender });
    let anga = crate::codec::decompose(stem);
    if anga.is_empty() {
        return Err(Error::MalformedInput(format!("no phonemes in {stem:?}")));
    }
    state.terms.push(Term::new(stem, anga, TermTags::PRATIPADIKA | TermTags::ANGA, Tags::empty()));
    state.record(None, format!("prātipadika {stem} ({})", gender.label()));

    let stripped = strip_text(sup.upadesha, SourceKind::Inflection);
    let mut tags = sup.tags;
    // 1.1.42 śi sarvanāmasthānam handles the neuter separately.
    if gender == Gender::Neuter {
        tags.remove(TermTags::SARVANAMASTHANA);
    }
    state.terms.push(Term::new(sup.upadesha, from_suffix(stripped.sequence), tags, stripped.tags));
    state.record(Some(SVAUJASMAUT), format!("sup {}", sup.upadesha));
    if let Some(marker) = stripped.markers.first() {
        state.record(Some(crate::markers::TASYA_LOPAH), format!("it {} ({})", sup.upadesha, marker.rule));
    }

    state.flags = StateFlags::ANGA | StateFlags::PADA;
    if sup.is_sambuddhi() {
        state.flags |= StateFlags::SAMBUDDHI;
    }
    if !stripped.markers.is_empty() {
        state.flags |= StateFlags::MARKER_BY_SUFFIX;
    }
    if options.final_devoicing {
        state.flags |= StateFlags::DEVOICE;
    }

    let mut metrics = RunMetrics::default();
    let (state, phase) = saturate(state, &SUBANTA, options.max_passes, "subanta")?;
    metrics.phases.push(phase);

    let mut ctx = JunctionContext::SUFFIX_BOUNDARY;
    if state.suffix().is_some_and(|t| t.sequence.keys_eq(&["अ", "म्"])) {
        ctx |= JunctionContext::AMI;
    }
    if matches!(sup.upadesha, "ङसिँ" | "ङस्") {
        ctx |= JunctionContext::NGASI_NGAS;
    }
    if matches!(case, 1 | 2 | 8) {
        ctx |= JunctionContext::PRATHAMAYOH;
    }
    let state = join(state, ctx);

    let (state, phase) = saturate(state, &SAMHITA, options.max_passes, "samhita")?;
    metrics.phases.push(phase);

    let (state, phase) = tripadi::run(state);
    metrics.phases.push(phase);

    metrics.total = started.elapsed();
    Ok((state, metrics))
}

/// Derive a primary derivative of `root` with the krt suffix `suffix`.
pub(crate) fn derive_derivative(
    root: &str,
    suffix: &str,
    options: &Options,
) -> Result<(DerivationState, RunMetrics), Error> {
    let _span = info_span!("derivative", root, suffix).entered();
    let started = Instant::now();
    lexicon::ensure_loaded();

    let root = root.trim();
    if root.is_empty() {
        return Err(Error::MalformedInput("empty root".into()));
    }
    let record = lexicon::lookup_root(root);
    let upadesha = record.map_or(root, |r| r.upadesha);
    let root_tags = record.map_or(RootTags::empty(), |r| r.tags);
    let krt = lexicon::lookup_krt(suffix.trim())
        .ok_or_else(|| Error::MalformedInput(format!("unknown krt suffix {suffix:?}")))?;

    let mut state = DerivationState::new(Subject::Derivative {
        root: upadesha.into(),
        suffix: krt.upadesha.into(),
        root_tags,
        krt_tags: krt.tags,
    });

    let stripped = strip_markers(&crate::codec::decompose(upadesha), SourceKind::Root, false);
    if stripped.sequence.is_empty() {
        return Err(Error::MalformedInput(format!("no phonemes in {root:?}")));
    }
    state.terms.push(Term::new(upadesha, stripped.sequence, TermTags::DHATU | TermTags::ANGA, stripped.tags));
    state.record(None, format!("dhātu {upadesha}"));
    if !stripped.markers.is_empty() {
        state.record(Some(crate::markers::TASYA_LOPAH), format!("it {upadesha}"));
    }
    state.flags = StateFlags::DHATU | StateFlags::ANGA;

    let mut metrics = RunMetrics::default();
    let (mut state, phase) = saturate(state, &DHATU, options.max_passes, "dhatu")?;
    metrics.phases.push(phase);

    let stripped = strip_text(krt.upadesha, SourceKind::Suffix);
    let mut tags = TermTags::PRATYAYA | TermTags::KRT | TermTags::ARDHADHATUKA;
    if krt.tags.contains(KrtTags::AVYAYA) {
        tags |= TermTags::AVYAYA;
    }
    state.terms.push(Term::new(krt.upadesha, from_suffix(stripped.sequence), tags, stripped.tags));
    state.record(Some(KRT_ATIN), format!("krt {}", krt.upadesha));
    if !stripped.markers.is_empty() {
        state.record(Some(crate::markers::TASYA_LOPAH), format!("it {}", krt.upadesha));
    }

    state.flags |= StateFlags::ARDHADHATUKA;
    if !stripped.markers.is_empty() {
        state.flags |= StateFlags::MARKER_BY_SUFFIX;
    }
    if lexicon::is_weak_grade(stripped.tags) {
        state.flags |= StateFlags::WEAK_GRADE;
    }

    let (state, phase) = saturate(state, &KRDANTA, options.max_passes, "krdanta")?;
    metrics.phases.push(phase);

    let mut state = join(state, JunctionContext::SUFFIX_BOUNDARY);
    // An indeclinable is a pada without a sup (1.1.37, 2.4.82).
    if krt.tags.contains(KrtTags::AVYAYA) {
        state.flags |= StateFlags::PADA;
        if options.final_devoicing {
            state.flags |= StateFlags::DEVOICE;
        }
    }

    let (state, phase) = tripadi::run(state);
    metrics.phases.push(phase);

    metrics.total = started.elapsed();
    Ok((state, metrics))
}
