use super::metrics::{PassMetrics, PhaseMetrics};
use super::registry::RuleRecord;
use super::state::{DerivationState, Site};
use crate::error::Error;
use crate::scope::{RuleAddress, is_deactivated, resolve_conflict};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, trace};

/// Apply `rules` until none is applicable.
///
/// Each pass collects every rule whose heading is active and whose condition
/// finds a site it has not already rewritten, folds the candidates through
/// [`resolve_conflict`], applies the winner and records one step. A phase that
/// still has candidates after `max_passes` passes fails with
/// [`Error::RuleRegistryCycle`].
pub(crate) fn saturate(
    mut state: DerivationState,
    rules: &[RuleRecord],
    max_passes: usize,
    phase: &'static str,
) -> Result<(DerivationState, PhaseMetrics), Error> {
    let started = Instant::now();
    let mut metrics = PhaseMetrics { name: phase, ..Default::default() };
    let mut seen: HashSet<(RuleAddress, Site)> = HashSet::new();
    let mut last: Option<RuleAddress> = None;

    for pass in 0.. {
        let pass_started = Instant::now();
        let candidates: Vec<(&RuleRecord, Site)> = rules
            .iter()
            .filter(|r| r.heading.is_none_or(|h| !is_deactivated(h, state.flags)))
            .filter_map(|r| (r.condition)(&state).map(|site| (r, site)))
            .filter(|(r, site)| !seen.contains(&(r.id, *site)))
            .collect();

        trace!(phase, pass, candidates = candidates.len(), "pass");

        let Some(&first) = candidates.first() else {
            metrics.passes.push(PassMetrics { duration: pass_started.elapsed(), candidates: 0, fired: None });
            break;
        };

        if pass >= max_passes {
            return Err(Error::RuleRegistryCycle { passes: pass, last: last.unwrap_or(first.0.id) });
        }

        let (winner, site) = candidates.iter().skip(1).fold(first, |best, &candidate| {
            let (chosen, _) = resolve_conflict(best.0, candidate.0);
            if std::ptr::eq(chosen, best.0) { best } else { candidate }
        });

        debug!(phase, pass, rule = %winner.id, name = winner.name, ?site, "apply");
        state = (winner.apply)(state, &site);
        state.record(Some(winner.id), winner.name);
        seen.insert((winner.id, site));
        last = Some(winner.id);

        metrics.passes.push(PassMetrics {
            duration: pass_started.elapsed(),
            candidates: candidates.len(),
            fired: Some(winner.id),
        });
    }

    metrics.duration = started.elapsed();
    Ok((state, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decompose, recompose};
    use crate::engine::{Subject, Term, TermTags};
    use crate::lexicon::Gender;
    use crate::phoneme::{Phoneme, Tags};
    use crate::scope::{Adhikara, Precedence};

    fn state(text: &str) -> DerivationState {
        let mut s = DerivationState::new(Subject::Inflection {
            stem: text.into(),
            case: 1,
            number: 1,
            gender: Gender::Masculine,
        });
        s.terms.push(Term::new(text, decompose(text), TermTags::PRATIPADIKA, Tags::empty()));
        s
    }

    fn final_a_to(glyph: &'static str, sutra: u16, precedence: Precedence) -> RuleRecord {
        rule! {
            id: (6, 1, sutra),
            name: "test",
            precedence: precedence,
            when: |st| {
                let seq = &st.terms[0].sequence;
                seq.last().filter(|p| p.is("अ")).map(|_| Site::new(0, seq.len() - 1))
            },
            apply: |st, site| {
                st.terms[0].sequence.substitute(site.index, glyph, RuleAddress::new(6, 1, sutra));
                st
            }
        }
    }

    #[test]
    fn exception_wins_over_later_general_rule() {
        let rules = vec![final_a_to("इ", 50, Precedence::Exception), final_a_to("उ", 90, Precedence::General)];
        let (st, metrics) = saturate(state("राम"), &rules, 20, "test").unwrap();
        assert_eq!(recompose(&st.terms[0].sequence), "रामि");
        assert_eq!(st.history.len(), 1);
        assert_eq!(st.history[0].rule, Some(RuleAddress::new(6, 1, 50)));
        assert_eq!(metrics.passes[0].candidates, 2);
    }

    #[test]
    fn later_address_wins_among_general_rules_in_any_order() {
        let forward = vec![final_a_to("इ", 50, Precedence::General), final_a_to("उ", 90, Precedence::General)];
        let backward = vec![final_a_to("उ", 90, Precedence::General), final_a_to("इ", 50, Precedence::General)];
        for rules in [forward, backward] {
            let (st, _) = saturate(state("राम"), &rules, 20, "test").unwrap();
            assert_eq!(recompose(&st.terms[0].sequence), "रामु");
        }
    }

    #[test]
    fn inactive_heading_is_skipped() {
        let rules = vec![rule! {
            id: (7, 3, 1),
            name: "needs anga",
            heading: Adhikara::Angasya,
            when: |_st| { Some(Site::new(0, 0)) },
            apply: |st, _site| { st }
        }];
        let (st, _) = saturate(state("राम"), &rules, 20, "test").unwrap();
        assert!(st.history.is_empty());
    }

    #[test]
    fn runaway_registry_reports_a_cycle() {
        let rules = vec![rule! {
            id: (6, 1, 1),
            name: "grow",
            when: |st| { Some(Site::new(0, st.terms[0].sequence.len())) },
            apply: |st, _site| {
                st.terms[0].sequence.push(Phoneme::of("अ"));
                st
            }
        }];
        let err = saturate(state("क"), &rules, 5, "test").unwrap_err();
        assert_eq!(err, Error::RuleRegistryCycle { passes: 5, last: RuleAddress::new(6, 1, 1) });
    }
}
