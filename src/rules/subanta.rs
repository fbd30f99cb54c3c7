//! Nominal inflection: operations on a prātipadika and its sup ending before
//! the two are joined.

use crate::engine::{DerivationState, RuleKind, RuleRecord, Site, StateFlags, TermTags};
use crate::lexicon::Gender;
use crate::phoneme::{Tags, guna_of};
use crate::rules::helpers::{clear_suffix, insert, lengthen, regrade, replace_suffix, substitute};
use crate::rules::predicates::{
    anga, anga_end, anga_last, gender, is_a_stem, is_ghi, is_neuter, is_plural, suffix_first, suffix_has_marker,
    suffix_starts_in, sup, sup_is, sup_reads,
};
use crate::scope::{Adhikara, Precedence, RuleAddress};

fn is_sarvanamasthana(st: &DerivationState) -> bool {
    st.suffix().is_some_and(|t| t.has(TermTags::SARVANAMASTHANA))
}

const SUFFIX: Site = Site::new(1, 0);

pub(crate) fn rules() -> Vec<RuleRecord> {
    vec![
        rule! {
            id: (1, 4, 17),
            name: "svādiṣv asarvanāmasthāne",
            kind: RuleKind::Definition,
            when: |st| {
                let first = suffix_first(st)?;
                let last = anga_last(st)?;
                let applies = sup(st).is_some()
                    && !is_sarvanamasthana(st)
                    && first.is_consonant()
                    && !first.is("य्")
                    && last.is_consonant()
                    && !last.tags.contains(Tags::PADANTA);
                if applies { anga_end(st) } else { None }
            },
            apply: |st, site| {
                if let Some(p) = st.terms[site.term].sequence.get_mut(site.index) {
                    p.tags |= Tags::PADANTA;
                    p.touch(RuleAddress::new(1, 4, 17));
                }
                st
            }
        },
        rule! {
            id: (6, 1, 68),
            name: "halṅyābbhyo dīrghāt sutisyapṛktaṃ hal",
            when: |st| {
                let applies =
                    anga_last(st).is_some_and(|p| p.is_consonant()) && sup_is(st, &["सुँ"]) && sup_reads(st, &["स्"]);
                applies.then_some(SUFFIX)
            },
            apply: |st, _site| { clear_suffix(st) }
        },
        rule! {
            id: (6, 1, 69),
            name: "eṅhrasvāt sambuddheḥ",
            when: |st| {
                let stem_ok = anga_last(st).is_some_and(|p| p.is_short_vowel() || p.is_any(&["ए", "ओ"]));
                (st.flags.contains(StateFlags::SAMBUDDHI) && stem_ok && sup_reads(st, &["स्"])).then_some(SUFFIX)
            },
            apply: |st, _site| { clear_suffix(st) }
        },
        rule! {
            id: (6, 4, 3),
            name: "nāmi",
            heading: Adhikara::Angasya,
            when: |st| {
                let short = anga_last(st).is_some_and(|p| p.is_short_vowel());
                if short && sup_reads(st, &["न्", "आ", "म्"]) { anga_end(st) } else { None }
            },
            apply: |st, site| { lengthen(st, site, RuleAddress::new(6, 4, 3)) }
        },
        rule! {
            id: (6, 4, 8),
            name: "sarvanāmasthāne cāsambuddhau",
            heading: Adhikara::Angasya,
            when: |st| {
                let seq = anga(st)?;
                let n_final = seq.last().is_some_and(|p| p.is("न्"));
                let short_upadha = seq.upadha().is_some_and(|p| p.is_short_vowel());
                let applies =
                    n_final && short_upadha && is_sarvanamasthana(st) && !st.flags.contains(StateFlags::SAMBUDDHI);
                applies.then(|| Site::new(0, seq.len() - 2))
            },
            apply: |st, site| { lengthen(st, site, RuleAddress::new(6, 4, 8)) }
        },
        rule! {
            id: (7, 1, 9),
            name: "ato bhisa ais",
            precedence: Precedence::Exception,
            heading: Adhikara::Angasya,
            when: |st| { (is_a_stem(st) && sup_reads(st, &["भ्", "इ", "स्"])).then_some(SUFFIX) },
            apply: |st, _site| { replace_suffix(st, "ऐस्", RuleAddress::new(7, 1, 9)) }
        },
        rule! {
            id: (7, 1, 12),
            name: "ṭāṅasiṅasām inātsyāḥ",
            heading: Adhikara::Angasya,
            when: |st| {
                let ta = sup_is(st, &["टा"]) && sup_reads(st, &["आ"]);
                let ngas = sup_is(st, &["ङसिँ", "ङस्"]) && sup_reads(st, &["अ", "स्"]);
                (is_a_stem(st) && (ta || ngas)).then_some(SUFFIX)
            },
            apply: |st, _site| {
                let form = match sup(&st).map(|t| t.upadesha.as_str()) {
                    Some("टा") => "इन",
                    Some("ङसिँ") => "आत्",
                    _ => "स्य",
                };
                replace_suffix(st, form, RuleAddress::new(7, 1, 12))
            }
        },
        rule! {
            id: (7, 1, 13),
            name: "ṅer yaḥ",
            heading: Adhikara::Angasya,
            when: |st| { (is_a_stem(st) && sup_is(st, &["ङे"]) && sup_reads(st, &["ए"])).then_some(SUFFIX) },
            apply: |st, _site| { replace_suffix(st, "य", RuleAddress::new(7, 1, 13)) }
        },
        rule! {
            id: (7, 1, 19),
            name: "napuṃsakāc ca",
            heading: Adhikara::Angasya,
            when: |st| { (is_neuter(st) && sup_is(st, &["औ", "औट्"]) && sup_reads(st, &["औ"])).then_some(SUFFIX) },
            apply: |st, _site| { replace_suffix(st, "ई", RuleAddress::new(7, 1, 19)) }
        },
        rule! {
            id: (7, 1, 20),
            name: "jaśśasoḥ śiḥ",
            heading: Adhikara::Angasya,
            when: |st| {
                (is_neuter(st) && sup_is(st, &["जस्", "शस्"]) && sup_reads(st, &["अ", "स्"])).then_some(SUFFIX)
            },
            apply: |st, _site| {
                let mut st = replace_suffix(st, "इ", RuleAddress::new(7, 1, 20));
                if let Some(t) = st.suffix_mut() {
                    // 1.1.42 śi sarvanāmasthānam
                    t.tags |= TermTags::SHI | TermTags::SARVANAMASTHANA;
                }
                st
            }
        },
        rule! {
            id: (7, 1, 23),
            name: "svamor napuṃsakāt",
            heading: Adhikara::Angasya,
            when: |st| {
                let present = st.suffix().is_some_and(|t| !t.sequence.is_empty());
                (is_neuter(st) && !is_a_stem(st) && sup_is(st, &["सुँ", "अम्"]) && present).then_some(SUFFIX)
            },
            apply: |st, _site| { clear_suffix(st) }
        },
        rule! {
            id: (7, 1, 24),
            name: "ato 'm",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = is_neuter(st)
                    && is_a_stem(st)
                    && sup_is(st, &["सुँ"])
                    && sup_reads(st, &["स्"])
                    && !st.flags.contains(StateFlags::SAMBUDDHI);
                applies.then_some(SUFFIX)
            },
            apply: |st, _site| { replace_suffix(st, "अम्", RuleAddress::new(7, 1, 24)) }
        },
        rule! {
            id: (7, 1, 54),
            name: "hrasvanadyāpo nuṭ",
            heading: Adhikara::Angasya,
            when: |st| {
                let short = anga_last(st).is_some_and(|p| p.is_short_vowel());
                (short && sup_is(st, &["आम्"]) && sup_reads(st, &["आ", "म्"])).then_some(SUFFIX)
            },
            apply: |st, site| {
                let mut st = insert(st, site, "न्", Tags::SUFFIX_ORIGIN, RuleAddress::new(7, 1, 54));
                if let Some(t) = st.suffix_mut() {
                    t.tags |= TermTags::NUT;
                }
                st
            }
        },
        rule! {
            id: (7, 1, 72),
            name: "napuṃsakasya jhalacaḥ",
            heading: Adhikara::Angasya,
            when: |st| {
                let term = st.anga()?;
                let last = term.sequence.last()?;
                let stem_ok = last.is_vowel() || crate::pratyahara::contains("झल्", last);
                let shi = st.suffix().is_some_and(|t| t.has(TermTags::SHI));
                let applies = is_neuter(st) && shi && stem_ok && !term.has(TermTags::NUT);
                // mid-acaḥ antyāt paraḥ: after the last vowel
                applies.then(|| term.sequence.last_vowel_index().map(|i| Site::new(0, i + 1))).flatten()
            },
            apply: |st, site| {
                let mut st = insert(st, site, "न्", Tags::AUGMENT, RuleAddress::new(7, 1, 72));
                if let Some(t) = st.anga_mut() {
                    t.tags |= TermTags::NUT;
                }
                st
            }
        },
        rule! {
            id: (7, 3, 102),
            name: "supi ca",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = is_a_stem(st) && sup(st).is_some() && suffix_starts_in(st, "यञ्");
                if applies { anga_end(st) } else { None }
            },
            apply: |st, site| { substitute(st, site, "आ", RuleAddress::new(7, 3, 102)) }
        },
        rule! {
            id: (7, 3, 103),
            name: "bahuvacane jhaly et",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = is_a_stem(st) && is_plural(st) && sup(st).is_some() && suffix_starts_in(st, "झल्");
                if applies { anga_end(st) } else { None }
            },
            apply: |st, site| { substitute(st, site, "ए", RuleAddress::new(7, 3, 103)) }
        },
        rule! {
            id: (7, 3, 104),
            name: "osi ca",
            heading: Adhikara::Angasya,
            when: |st| { if is_a_stem(st) && sup_reads(st, &["ओ", "स्"]) { anga_end(st) } else { None } },
            apply: |st, site| { substitute(st, site, "ए", RuleAddress::new(7, 3, 104)) }
        },
        rule! {
            id: (7, 3, 108),
            name: "hrasvasya guṇaḥ",
            heading: Adhikara::Angasya,
            when: |st| {
                let short = anga_last(st).is_some_and(|p| p.is_any(&["इ", "उ", "ऋ"]));
                if short && st.flags.contains(StateFlags::SAMBUDDHI) { anga_end(st) } else { None }
            },
            apply: |st, site| { regrade(st, site, guna_of, RuleAddress::new(7, 3, 108)) }
        },
        rule! {
            id: (7, 3, 109),
            name: "jasi ca",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = is_ghi(st) && !is_neuter(st) && sup_is(st, &["जस्"]) && sup_reads(st, &["अ", "स्"]);
                if applies { anga_end(st) } else { None }
            },
            apply: |st, site| { regrade(st, site, guna_of, RuleAddress::new(7, 3, 109)) }
        },
        rule! {
            id: (7, 3, 111),
            name: "gher ṅiti",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = is_ghi(st) && sup(st).is_some() && suffix_has_marker(st, Tags::NGIT);
                if applies { anga_end(st) } else { None }
            },
            apply: |st, site| { regrade(st, site, guna_of, RuleAddress::new(7, 3, 111)) }
        },
        rule! {
            id: (7, 3, 119),
            name: "ac ca gheḥ",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = is_ghi(st) && sup_is(st, &["ङि"]) && sup_reads(st, &["इ"]);
                if applies { anga_end(st) } else { None }
            },
            apply: |st, site| {
                // 7.3.118 idudbhyām: ṅi becomes au
                let st = replace_suffix(st, "औ", RuleAddress::new(7, 3, 119));
                substitute(st, site, "अ", RuleAddress::new(7, 3, 119))
            }
        },
        rule! {
            id: (7, 3, 120),
            name: "āṅo nā 'striyām",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = is_ghi(st)
                    && gender(st) != Some(Gender::Feminine)
                    && sup_is(st, &["टा"])
                    && sup_reads(st, &["आ"]);
                applies.then_some(SUFFIX)
            },
            apply: |st, _site| { replace_suffix(st, "ना", RuleAddress::new(7, 3, 120)) }
        },
    ]
}
