//! Records of the tripadi, grouped by the stage that evaluates them.
//!
//! All of them work on the single merged word in `terms[0]`. Rules that may
//! rewrite several places at once (8.2.39, 8.4.2, 8.4.55 ...) report the first
//! site from `when` and rewrite every qualifying site in `apply`, since a stage
//! looks at each record only once.

use crate::engine::{DerivationState, RuleRecord, Site, StateFlags};
use crate::markers::{SourceKind, strip_markers};
use crate::phoneme::{
    ANUSVARA, CANDRABINDU, NASAL, Phoneme, PhonemeSequence, Tags, UNVOICED, VARGAS, VISARGA, VOICED, long_of,
    varga_member,
};
use crate::pratyahara;
use crate::scope::{Adhikara, Precedence, RuleAddress};
use crate::tripadi::Stage;

const KU: &[&str] = &["क्", "ख्", "ग्", "घ्", "ङ्"];
const PU: &[&str] = &["प्", "फ्", "ब्", "भ्", "म्"];

fn word(st: &DerivationState) -> Option<&PhonemeSequence> {
    st.terms.first().map(|t| &t.sequence)
}

/// Row and column of a stop in the varga grid.
fn stop(p: &Phoneme) -> Option<(usize, usize)> {
    VARGAS.iter().enumerate().find_map(|(r, row)| row.iter().position(|g| p.is(g)).map(|c| (r, c)))
}

/// Rewrite every site in `sites` to the given column of its row.
fn to_column(mut st: DerivationState, sites: Vec<usize>, column: usize, rule: RuleAddress) -> DerivationState {
    if let Some(t) = st.terms.first_mut() {
        for i in sites {
            let target = t.sequence.get(i).and_then(stop).and_then(|(row, _)| varga_member(row, column));
            if let Some(glyph) = target {
                t.sequence.substitute(i, glyph, rule);
            }
        }
    }
    st
}

fn rewrite_all(mut st: DerivationState, sites: Vec<usize>, glyph: &'static str, rule: RuleAddress) -> DerivationState {
    if let Some(t) = st.terms.first_mut() {
        for i in sites {
            t.sequence.substitute(i, glyph, rule);
        }
    }
    st
}

fn first_site(sites: Vec<usize>) -> Option<Site> {
    sites.first().map(|&i| Site::new(0, i))
}

/// Words whose pada-final form is listed rather than derived here.
fn irregular_final(seq: &PhonemeSequence) -> Option<RuleAddress> {
    if [["ग्", "इ", "र्"], ["प्", "उ", "र्"], ["ध्", "उ", "र्"]].iter().any(|w| seq.keys_eq(w)) {
        Some(RuleAddress::new(8, 2, 76))
    } else if seq.keys_eq(&["अ", "ह्", "अ", "न्"]) {
        Some(RuleAddress::new(8, 2, 68))
    } else {
        None
    }
}

/// 8.2.39: stops that end the word or a pada inside it.
fn jhal_at_pada_end(seq: &PhonemeSequence) -> Vec<usize> {
    let last = seq.len().saturating_sub(1);
    seq.iter()
        .enumerate()
        .filter(|(i, p)| *i == last || p.tags.contains(Tags::PADANTA))
        .filter(|(_, p)| stop(p).is_some_and(|(_, c)| c < NASAL && c != VOICED))
        .map(|(i, _)| i)
        .collect()
}

/// 8.3.24: a non-final `न्`/`म्` before a jhal.
fn nasal_before_jhal(seq: &PhonemeSequence) -> Vec<usize> {
    (0..seq.len().saturating_sub(1))
        .filter(|&i| seq[i].is_any(&["न्", "म्"]) && pratyahara::contains("झल्", &seq[i + 1]))
        .collect()
}

/// 8.3.59 with 8.3.58: a suffix `स्` after iṇ or ku, across num or visarga.
fn murdhanya_sites(seq: &PhonemeSequence) -> Vec<usize> {
    (1..seq.len().saturating_sub(1))
        .filter(|&i| seq[i].is("स्") && seq[i].tags.contains(Tags::SUFFIX_ORIGIN) && !seq[i + 1].is("र्"))
        .filter(|&i| {
            let mut j = i - 1;
            if seq[j].is_any(&[ANUSVARA, VISARGA]) && j > 0 {
                j -= 1;
            }
            pratyahara::contains("इण्", &seq[j]) || seq[j].is_any(KU)
        })
        .collect()
}

/// 8.4.1 / 8.4.2: `न्` preceded in the same word by `र् ष् ऋ ॠ`, with only
/// aṭ, ku, pu or num in between. 8.4.37 keeps a word-final `न्`.
fn natva_sites(seq: &PhonemeSequence) -> Vec<usize> {
    (0..seq.len().saturating_sub(1))
        .filter(|&i| seq[i].is("न्"))
        .filter(|&i| {
            for p in seq[..i].iter().rev() {
                if p.is_any(&["र्", "ष्", "ऋ", "ॠ"]) {
                    return true;
                }
                let intervenes = pratyahara::contains("अट्", p)
                    || p.is_any(KU)
                    || p.is_any(PU)
                    || p.is(ANUSVARA);
                if !intervenes {
                    return false;
                }
            }
            false
        })
        .collect()
}

/// 8.4.55: a voiced stop before khar.
fn stop_before_khar(seq: &PhonemeSequence) -> Vec<usize> {
    (0..seq.len().saturating_sub(1))
        .filter(|&i| stop(&seq[i]).is_some_and(|(_, c)| c < NASAL && c != UNVOICED))
        .filter(|&i| pratyahara::contains("खर्", &seq[i + 1]))
        .collect()
}

/// 8.4.58: anusvara before a stop.
fn anusvara_before_stop(seq: &PhonemeSequence) -> Vec<usize> {
    (0..seq.len().saturating_sub(1))
        .filter(|&i| seq[i].is(ANUSVARA) && stop(&seq[i + 1]).is_some())
        .collect()
}

pub(crate) fn rules() -> Vec<(Stage, RuleRecord)> {
    vec![
        (
            Stage::Raw,
            rule! {
                id: (8, 2, 76),
                name: "irregular pada-final forms (8.2.76 rvor upadhāyā dīrgha iki, 8.2.68 ahan)",
                precedence: Precedence::Exception,
                heading: Adhikara::Padasya,
                when: |st| {
                    let seq = word(st)?;
                    irregular_final(seq).map(|_| Site::new(0, seq.len() - 1))
                },
                apply: |st, site| {
                    let Some(rule) = word(&st).and_then(irregular_final) else { return st };
                    if let Some(t) = st.terms.first_mut() {
                        if rule == RuleAddress::new(8, 2, 76) {
                            let long = t.sequence.get(site.index - 1).and_then(|p| long_of(p.key()));
                            if let Some(long) = long {
                                t.sequence.substitute(site.index - 1, long, rule);
                            }
                        }
                        t.sequence.substitute(site.index, VISARGA, rule);
                    }
                    st.flags |= StateFlags::IRREGULAR;
                    st
                }
            },
        ),
        (
            Stage::Raw,
            rule! {
                id: (8, 2, 39),
                name: "jhalāṃ jaśo 'nte",
                heading: Adhikara::Padasya,
                when: |st| { first_site(jhal_at_pada_end(word(st)?)) },
                apply: |st, _site| {
                    let sites = word(&st).map(jhal_at_pada_end).unwrap_or_default();
                    to_column(st, sites, VOICED, RuleAddress::new(8, 2, 39))
                }
            },
        ),
        (
            Stage::Raw,
            rule! {
                id: (8, 2, 66),
                name: "sasajuṣo ruḥ",
                heading: Adhikara::Padasya,
                when: |st| {
                    let seq = word(st)?;
                    seq.last().is_some_and(|p| p.is("स्")).then(|| Site::new(0, seq.len() - 1))
                },
                apply: |st, site| {
                    if let Some(t) = st.terms.first_mut() {
                        t.sequence.substitute_many(site.index, &["र्", "उ", CANDRABINDU], RuleAddress::new(8, 2, 66));
                        for p in t.sequence.iter_mut().skip(site.index).take(3) {
                            p.tags |= Tags::AUGMENT;
                        }
                    }
                    st
                }
            },
        ),
        (
            Stage::RuSubstituted,
            rule! {
                id: (1, 3, 9),
                name: "tasya lopaḥ",
                when: |st| {
                    word(st)?
                        .iter()
                        .position(|p| p.is(CANDRABINDU) && p.tags.contains(Tags::AUGMENT))
                        .map(|i| Site::new(0, i))
                },
                apply: |st, site| {
                    if let Some(t) = st.terms.first_mut() {
                        let end = site.index + 1;
                        let start = t.sequence[..end]
                            .iter()
                            .rposition(|p| !p.tags.contains(Tags::AUGMENT))
                            .map_or(0, |i| i + 1);
                        let segment: PhonemeSequence = t.sequence[start..end].iter().cloned().collect();
                        let stripped = strip_markers(&segment, SourceKind::General, false);
                        t.sequence.splice(start..end, stripped.sequence);
                    }
                    st
                }
            },
        ),
        (
            Stage::MarkerCleaned,
            rule! {
                id: (8, 3, 15),
                name: "kharavasānayor visarjanīyaḥ",
                heading: Adhikara::Padasya,
                when: |st| {
                    let seq = word(st)?;
                    seq.last().is_some_and(|p| p.is("र्")).then(|| Site::new(0, seq.len() - 1))
                },
                apply: |st, site| { rewrite_all(st, vec![site.index], VISARGA, RuleAddress::new(8, 3, 15)) }
            },
        ),
        (
            Stage::MarkerCleaned,
            rule! {
                id: (8, 3, 24),
                name: "naś cāpadāntasya jhali",
                when: |st| { first_site(nasal_before_jhal(word(st)?)) },
                apply: |st, _site| {
                    let sites = word(&st).map(nasal_before_jhal).unwrap_or_default();
                    rewrite_all(st, sites, ANUSVARA, RuleAddress::new(8, 3, 24))
                }
            },
        ),
        (
            Stage::MarkerCleaned,
            rule! {
                id: (8, 3, 59),
                name: "ādeśapratyayayoḥ",
                heading: Adhikara::ApadantasyaMurdhanyah,
                when: |st| { first_site(murdhanya_sites(word(st)?)) },
                apply: |st, _site| {
                    let sites = word(&st).map(murdhanya_sites).unwrap_or_default();
                    rewrite_all(st, sites, "ष्", RuleAddress::new(8, 3, 59))
                }
            },
        ),
        (
            Stage::VisargaOrRetroflexed,
            rule! {
                id: (8, 4, 2),
                name: "aṭkupvāṅnumvyavāye 'pi",
                when: |st| { first_site(natva_sites(word(st)?)) },
                apply: |st, _site| {
                    let sites = word(&st).map(natva_sites).unwrap_or_default();
                    rewrite_all(st, sites, "ण्", RuleAddress::new(8, 4, 2))
                }
            },
        ),
        (
            Stage::VisargaOrRetroflexed,
            rule! {
                id: (8, 4, 55),
                name: "khari ca",
                when: |st| { first_site(stop_before_khar(word(st)?)) },
                apply: |st, _site| {
                    let sites = word(&st).map(stop_before_khar).unwrap_or_default();
                    to_column(st, sites, UNVOICED, RuleAddress::new(8, 4, 55))
                }
            },
        ),
        (
            Stage::VisargaOrRetroflexed,
            rule! {
                id: (8, 4, 58),
                name: "anusvārasya yayi parasavarṇaḥ",
                when: |st| { first_site(anusvara_before_stop(word(st)?)) },
                apply: |st, _site| {
                    let sites = word(&st).map(anusvara_before_stop).unwrap_or_default();
                    let rule = RuleAddress::new(8, 4, 58);
                    if let Some(t) = st.terms.first_mut() {
                        for i in sites {
                            let next = t.sequence.get(i + 1).and_then(stop);
                            let nasal = next.and_then(|(row, _)| varga_member(row, NASAL));
                            if let Some(glyph) = nasal {
                                t.sequence.substitute(i, glyph, rule);
                            }
                        }
                    }
                    st
                }
            },
        ),
        (
            Stage::Assimilated,
            rule! {
                id: (8, 4, 56),
                name: "vāvasāne",
                when: |st| {
                    if !st.flags.contains(StateFlags::DEVOICE | StateFlags::PADA) {
                        return None;
                    }
                    let seq = word(st)?;
                    let voiced = seq.last().and_then(stop).is_some_and(|(_, c)| c < NASAL && c != UNVOICED);
                    voiced.then(|| Site::new(0, seq.len() - 1))
                },
                apply: |st, site| { to_column(st, vec![site.index], UNVOICED, RuleAddress::new(8, 4, 56)) }
            },
        ),
    ]
}
