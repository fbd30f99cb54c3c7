//! The tripadi (8.2 - 8.4).
//!
//! Rules of the last three quarters are invisible to each other in the
//! reverse direction (8.2.1 pūrvatrāsiddham), so they are not interpreted to
//! a fixpoint. Instead the word moves once through a fixed sequence of stages
//! and each stage evaluates its own records exactly once, in order.
//!
//! ```text
//! Raw -> RuSubstituted -> MarkerCleaned -> VisargaOrRetroflexed -> Assimilated -> Terminal
//! ```
//!
//! The irregular-finals record in `Raw` jumps straight to `Terminal`.

use crate::engine::{DerivationState, PassMetrics, PhaseMetrics, StateFlags};
use crate::scope::is_deactivated;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Raw,
    RuSubstituted,
    MarkerCleaned,
    VisargaOrRetroflexed,
    Assimilated,
    Terminal,
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::Raw => Stage::RuSubstituted,
            Stage::RuSubstituted => Stage::MarkerCleaned,
            Stage::MarkerCleaned => Stage::VisargaOrRetroflexed,
            Stage::VisargaOrRetroflexed => Stage::Assimilated,
            Stage::Assimilated | Stage::Terminal => Stage::Terminal,
        }
    }
}

/// Run the word through every stage. Expects the terms to be merged.
pub fn run(mut state: DerivationState) -> (DerivationState, PhaseMetrics) {
    let started = Instant::now();
    let mut metrics = PhaseMetrics { name: "tripadi", ..Default::default() };
    let mut stage = Stage::Raw;

    while stage != Stage::Terminal {
        let pass_started = Instant::now();
        let mut pass = PassMetrics::default();
        let mut irregular = false;

        for rule in crate::rules::tripadi_stage(stage) {
            if rule.heading.is_some_and(|h| is_deactivated(h, state.flags)) {
                continue;
            }
            let Some(site) = (rule.condition)(&state) else { continue };
            debug!(?stage, rule = %rule.id, name = rule.name, ?site, "apply");
            pass.candidates += 1;
            let was_irregular = state.flags.contains(StateFlags::IRREGULAR);
            state = (rule.apply)(state, &site);
            state.record(Some(rule.id), rule.name);
            pass.fired = Some(rule.id);

            if !was_irregular && state.flags.contains(StateFlags::IRREGULAR) {
                irregular = true;
                break;
            }
        }

        pass.duration = pass_started.elapsed();
        metrics.passes.push(pass);
        stage = if irregular { Stage::Terminal } else { stage.next() };
    }

    metrics.duration = started.elapsed();
    (state, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decompose, recompose};
    use crate::engine::{Subject, Term, TermTags};
    use crate::lexicon::Gender;
    use crate::phoneme::Tags;

    fn pada(text: &str, flags: StateFlags) -> String {
        let mut st = DerivationState::new(Subject::Inflection {
            stem: text.into(),
            case: 1,
            number: 1,
            gender: Gender::Masculine,
        });
        st.terms.push(Term::new(text, decompose(text), TermTags::WORD, Tags::empty()));
        st.flags = flags;
        recompose(&run(st).0.terms[0].sequence)
    }

    #[test]
    fn final_s_becomes_visarga() {
        assert_eq!(pada("रामस्", StateFlags::PADA), "रामः");
        assert_eq!(pada("हरिभिस्", StateFlags::PADA), "हरिभिः");
    }

    #[test]
    fn padasya_rules_need_a_pada() {
        assert_eq!(pada("रामस्", StateFlags::empty()), "रामस्");
    }

    #[test]
    fn final_devoicing_is_optional() {
        assert_eq!(pada("मरुत्", StateFlags::PADA | StateFlags::DEVOICE), "मरुत्");
        assert_eq!(pada("मरुत्", StateFlags::PADA), "मरुद्");
    }

    #[test]
    fn irregular_final_skips_later_stages() {
        assert_eq!(pada("गिर्", StateFlags::PADA), "गीः");
        assert_eq!(pada("अहन्", StateFlags::PADA), "अहः");
    }

    #[test]
    fn natva_scans_across_allowed_interveners() {
        assert_eq!(pada("रामेन", StateFlags::PADA), "रामेण");
        assert_eq!(pada("करनीय", StateFlags::empty()), "करणीय");
        // 8.4.37: not pada-final
        assert_eq!(pada("रामान्", StateFlags::PADA), "रामान्");
        // a dental blocks the scan
        assert_eq!(pada("रथेन", StateFlags::PADA), "रथेन");
    }

    #[test]
    fn internal_nasal_assimilates() {
        assert_eq!(pada("गम्तुम्", StateFlags::PADA), "गन्तुम्");
    }

    #[test]
    fn stages_run_in_order_once() {
        assert!(Stage::Raw < Stage::Terminal);
        assert_eq!(Stage::Assimilated.next(), Stage::Terminal);
        assert_eq!(Stage::Terminal.next(), Stage::Terminal);
    }
}
