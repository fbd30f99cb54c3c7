//! Primary derivatives: a dhatu and one krt suffix.

use crate::engine::{DerivationState, RuleRecord, Site, StateFlags};
use crate::lexicon::RootTags;
use crate::phoneme::{Tags, guna_of, vriddhi_of};
use crate::rules::helpers::{insert, regrade, remove, replace_suffix, substitute};
use crate::rules::predicates::{
    IK, UK, anga, anga_end, anga_last, is_nyit_or_nnit, is_weak, krt, suffix_has_marker, suffix_starts_in,
};
use crate::scope::{Adhikara, Precedence, RuleAddress};
use tracing::debug;

/// Rules that normalize a root as it is listed (6.1.64 - 6.1.65).
pub(crate) fn dhatu_rules() -> Vec<RuleRecord> {
    vec![
        rule! {
            id: (6, 1, 64),
            name: "dhātvādeḥ ṣaḥ saḥ",
            when: |st| {
                let initial = anga(st).and_then(|s| s.first()).is_some_and(|p| p.is("ष्"));
                (st.flags.contains(StateFlags::DHATU) && initial).then_some(Site::new(0, 0))
            },
            apply: |st, site| { substitute(st, site, "स्", RuleAddress::new(6, 1, 64)) }
        },
        rule! {
            id: (6, 1, 65),
            name: "ṇo naḥ",
            when: |st| {
                let initial = anga(st).and_then(|s| s.first()).is_some_and(|p| p.is("ण्"));
                (st.flags.contains(StateFlags::DHATU) && initial).then_some(Site::new(0, 0))
            },
            apply: |st, site| { substitute(st, site, "न्", RuleAddress::new(6, 1, 65)) }
        },
    ]
}

/// 7.2.11 śryukaḥ kiti
fn blocks_it(st: &DerivationState) -> bool {
    let kit = suffix_has_marker(st, Tags::KIT);
    let uk_final = anga_last(st).is_some_and(|p| p.is_any(UK));
    let shri = anga(st).is_some_and(|s| s.keys_eq(&["श्", "र्", "इ"]));
    kit && (uk_final || shri)
}

pub(crate) fn rules() -> Vec<RuleRecord> {
    vec![
        rule! {
            id: (6, 4, 37),
            name: "anudāttopadeśa... anunāsikalopo jhali kṅiti",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = st.root_tags().contains(RootTags::ANUDATTOPADESHA)
                    && anga_last(st).is_some_and(|p| p.is_any(&["म्", "न्"]))
                    && suffix_has_marker(st, Tags::KIT | Tags::NGIT)
                    && suffix_starts_in(st, "झल्");
                if applies { anga_end(st) } else { None }
            },
            apply: |st, site| { remove(st, site) }
        },
        rule! {
            id: (7, 1, 1),
            name: "yuvor anākau",
            precedence: Precedence::Exception,
            heading: Adhikara::Angasya,
            when: |st| {
                let seq = &krt(st)?.sequence;
                (seq.keys_eq(&["य्", "उ"]) || seq.keys_eq(&["व्", "उ"])).then_some(Site::new(1, 0))
            },
            apply: |st, _site| {
                let yu = krt(&st).is_some_and(|t| t.sequence.starts_with_keys(&["य्"]));
                replace_suffix(st, if yu { "अन" } else { "अक" }, RuleAddress::new(7, 1, 1))
            }
        },
        rule! {
            id: (7, 2, 35),
            name: "ārdhadhātukasyeḍ valādeḥ",
            heading: Adhikara::Angasya,
            when: |st| {
                let applies = st.root_tags().contains(RootTags::SET)
                    && st.flags.contains(StateFlags::ARDHADHATUKA)
                    && krt(st).is_some()
                    && suffix_starts_in(st, "वल्");
                if applies && blocks_it(st) {
                    debug!(rule = "7.2.11", "iṭ blocked");
                    return None;
                }
                applies.then_some(Site::new(1, 0))
            },
            apply: |st, site| {
                insert(st, site, "इ", Tags::AUGMENT | Tags::SUFFIX_ORIGIN, RuleAddress::new(7, 2, 35))
            }
        },
        rule! {
            id: (7, 2, 115),
            name: "aco ñṇiti",
            precedence: Precedence::Exception,
            heading: Adhikara::Angasya,
            when: |st| {
                let grows = anga_last(st).is_some_and(|p| p.is_vowel() && !p.is_any(&["आ", "ऐ", "औ"]));
                if grows && is_nyit_or_nnit(st) { anga_end(st) } else { None }
            },
            apply: |st, site| { regrade(st, site, vriddhi_of, RuleAddress::new(7, 2, 115)) }
        },
        rule! {
            id: (7, 2, 116),
            name: "ata upadhāyāḥ",
            precedence: Precedence::Exception,
            heading: Adhikara::Angasya,
            when: |st| {
                let seq = anga(st)?;
                let applies = seq.last().is_some_and(|p| p.is_consonant())
                    && seq.upadha().is_some_and(|p| p.is("अ"))
                    && is_nyit_or_nnit(st);
                applies.then(|| Site::new(0, seq.len() - 2))
            },
            apply: |st, site| { substitute(st, site, "आ", RuleAddress::new(7, 2, 116)) }
        },
        rule! {
            id: (7, 3, 52),
            name: "cajoḥ ku ghiṇṇyatoḥ",
            heading: Adhikara::Angasya,
            when: |st| {
                let palatal = anga_last(st).is_some_and(|p| p.is_any(&["च्", "ज्"]));
                let trigger = suffix_has_marker(st, Tags::GHIT) || krt(st).is_some_and(|t| t.upadesha == "ण्यत्");
                if palatal && trigger { anga_end(st) } else { None }
            },
            apply: |st, site| {
                let velar = if anga_last(&st).is_some_and(|p| p.is("च्")) { "क्" } else { "ग्" };
                substitute(st, site, velar, RuleAddress::new(7, 3, 52))
            }
        },
        rule! {
            id: (7, 3, 84),
            name: "sārvadhātukārdhadhātukayoḥ",
            heading: Adhikara::Angasya,
            when: |st| {
                let ik = anga_last(st).is_some_and(|p| p.is_any(IK));
                if ik && krt(st).is_some() && !is_weak(st) { anga_end(st) } else { None }
            },
            apply: |st, site| { regrade(st, site, guna_of, RuleAddress::new(7, 3, 84)) }
        },
        rule! {
            id: (7, 3, 86),
            name: "pugantalaghūpadhasya ca",
            heading: Adhikara::Angasya,
            when: |st| {
                let seq = anga(st)?;
                let light = seq.last().is_some_and(|p| p.is_consonant())
                    && seq.upadha().is_some_and(|p| p.is_short_vowel() && p.is_any(IK));
                (light && krt(st).is_some() && !is_weak(st)).then(|| Site::new(0, seq.len() - 2))
            },
            apply: |st, site| { regrade(st, site, guna_of, RuleAddress::new(7, 3, 86)) }
        },
    ]
}
