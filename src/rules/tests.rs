use super::catalogue;
use crate::api::{Derivation, Options, derive_derivative, derive_inflection, derive_inflection_with};
use crate::lexicon::lookup_rule_text;
use crate::scope::RuleAddress;

fn inflect(stem: &str, case: u8, number: u8) -> String {
    match derive_inflection(stem, case, number) {
        Ok(d) => d.surface,
        Err(e) => format!("error: {e}"),
    }
}

/// Compare a stem against its paradigm, case-major; `None` skips a cell.
fn check_paradigm(stem: &str, forms: [[Option<&str>; 3]; 8]) {
    for (c, row) in forms.iter().enumerate() {
        for (n, expected) in row.iter().enumerate() {
            let Some(expected) = expected else { continue };
            let (case, number) = (c as u8 + 1, n as u8 + 1);
            assert_eq!(inflect(stem, case, number), *expected, "{stem} {case}.{number}");
        }
    }
}

#[test]
fn rama_full_paradigm() {
    check_paradigm(
        "राम",
        [
            [Some("रामः"), Some("रामौ"), Some("रामाः")],
            [Some("रामम्"), Some("रामौ"), Some("रामान्")],
            [Some("रामेण"), Some("रामाभ्याम्"), Some("रामैः")],
            [Some("रामाय"), Some("रामाभ्याम्"), Some("रामेभ्यः")],
            [Some("रामात्"), Some("रामाभ्याम्"), Some("रामेभ्यः")],
            [Some("रामस्य"), Some("रामयोः"), Some("रामाणाम्")],
            [Some("रामे"), Some("रामयोः"), Some("रामेषु")],
            [Some("राम"), Some("रामौ"), Some("रामाः")],
        ],
    );
}

#[test]
fn hari_paradigm() {
    check_paradigm(
        "हरि",
        [
            [Some("हरिः"), Some("हरी"), Some("हरयः")],
            [Some("हरिम्"), Some("हरी"), Some("हरीन्")],
            [Some("हरिणा"), Some("हरिभ्याम्"), Some("हरिभिः")],
            [Some("हरये"), Some("हरिभ्याम्"), Some("हरिभ्यः")],
            [Some("हरेः"), None, None],
            [Some("हरेः"), Some("हर्योः"), Some("हरीणाम्")],
            [Some("हरौ"), None, Some("हरिषु")],
            [Some("हरे"), None, None],
        ],
    );
}

#[test]
fn guru_and_mati() {
    let cases = [
        ("गुरु", 1, 3, "गुरवः"),
        ("गुरु", 3, 1, "गुरुणा"),
        ("गुरु", 6, 3, "गुरूणाम्"),
        ("गुरु", 7, 1, "गुरौ"),
        ("गुरु", 7, 3, "गुरुषु"),
        ("गुरु", 8, 1, "गुरो"),
        ("मति", 1, 3, "मतयः"),
        ("मति", 2, 3, "मतीः"),
        ("मति", 3, 1, "मत्या"),
        ("मति", 4, 1, "मतये"),
        ("मति", 6, 3, "मतीनाम्"),
        ("मति", 7, 1, "मतौ"),
        ("मति", 8, 1, "मते"),
    ];
    for (stem, case, number, expected) in cases {
        assert_eq!(inflect(stem, case, number), expected, "{stem} {case}.{number}");
    }
}

#[test]
fn vana_neuter() {
    let cases = [(1, 1, "वनम्"), (1, 2, "वने"), (1, 3, "वनानि"), (3, 1, "वनेन"), (3, 2, "वनाभ्याम्"), (8, 1, "वन")];
    for (case, number, expected) in cases {
        assert_eq!(inflect("वन", case, number), expected, "वन {case}.{number}");
    }
}

#[test]
fn consonant_stems() {
    assert_eq!(inflect("मरुत्", 1, 1), "मरुत्");
    assert_eq!(inflect("मरुत्", 3, 2), "मरुद्भ्याम्");
    assert_eq!(inflect("मरुत्", 7, 3), "मरुत्सु");
}

#[test]
fn devoicing_can_be_switched_off() {
    let options = Options { final_devoicing: false, ..Options::default() };
    let out = derive_inflection_with("मरुत्", 1, 1, &options).unwrap();
    assert_eq!(out.surface, "मरुद्");
    assert!(!out.steps.iter().any(|s| s.rule == Some(RuleAddress::new(8, 4, 56))));
}

#[test]
fn irregular_finals() {
    assert_eq!(inflect("अहन्", 1, 1), "अहः");
    assert_eq!(inflect("गिर्", 1, 1), "गीः");
}

#[test]
fn irregular_finals_stay_within_their_set() {
    let fired = |d: &Derivation| d.steps.iter().any(|s| s.rule == Some(RuleAddress::new(8, 2, 76)));

    let ahan = derive_inflection("अहन्", 3, 1).unwrap();
    assert_eq!(ahan.surface, "अहना");
    assert!(!fired(&ahan), "अहन् 3.1 is not pada-final");

    for (stem, expected) in [("गिरि", "गिरिः"), ("पुर", "पुरः")] {
        let out = derive_inflection(stem, 1, 1).unwrap();
        assert_eq!(out.surface, expected);
        assert!(!fired(&out), "{stem} is outside the closed set");
    }
}

#[test]
fn primary_derivatives() {
    let cases = [
        ("भू", "क्त", "भूत"),
        ("भू", "ल्युट्", "भवन"),
        ("भू", "तव्यत्", "भवितव्य"),
        ("भू", "ण्यत्", "भाव्य"),
        ("कृ", "तृच्", "कर्तृ"),
        ("कृ", "ण्वुल्", "कारक"),
        ("कृ", "अनीयर्", "करणीय"),
        ("कृ", "क्त", "कृत"),
        ("कृ", "ण्यत्", "कार्य"),
        ("नी", "तृच्", "नेतृ"),
        ("पच्", "घञ्", "पाक"),
        ("हृ", "घञ्", "हार"),
        ("पठ्", "क्त", "पठित"),
        ("पठ्", "तव्यत्", "पठितव्य"),
        ("श्रि", "क्त", "श्रित"),
        ("गम्", "तुमुन्", "गन्तुम्"),
        ("गम्", "क्त्वा", "गत्वा"),
    ];
    for (root, suffix, expected) in cases {
        let out = derive_derivative(root, suffix).map(|d| d.surface);
        assert_eq!(out.as_deref(), Ok(expected), "{root} + {suffix}");
    }
}

#[test]
fn listed_root_forms_are_accepted() {
    assert_eq!(derive_derivative("डुकृञ्", "तृच्").unwrap().surface, "कर्तृ");
    assert_eq!(derive_derivative("णीञ्", "तृच्").unwrap().surface, "नेतृ");
}

#[test]
fn derivations_are_deterministic() {
    let a = derive_inflection("हरि", 6, 3).unwrap();
    let b = derive_inflection("हरि", 6, 3).unwrap();
    assert_eq!(a.steps, b.steps);
}

#[test]
fn tripadi_steps_follow_morphology() {
    let out = derive_inflection("राम", 3, 1).unwrap();
    let pos = |id: RuleAddress| out.steps.iter().position(|s| s.rule == Some(id));
    let inat = pos(RuleAddress::new(7, 1, 12)).unwrap();
    let guna = pos(RuleAddress::new(6, 1, 87)).unwrap();
    let natva = pos(RuleAddress::new(8, 4, 2)).unwrap();
    assert!(inat < guna && guna < natva);
}

#[test]
fn every_rule_has_a_text() {
    for rule in catalogue() {
        assert!(lookup_rule_text(rule.id).is_some(), "{} has no text", rule.id);
    }
}

#[test]
fn rule_ids_are_unique_per_catalogue() {
    let tripadi: Vec<RuleAddress> = super::TRIPADI.iter().map(|(_, r)| r.id).collect();
    let catalogues: [(&str, Vec<RuleAddress>); 5] = [
        ("subanta", super::SUBANTA.iter().map(|r| r.id).collect()),
        ("dhatu", super::DHATU.iter().map(|r| r.id).collect()),
        ("krdanta", super::KRDANTA.iter().map(|r| r.id).collect()),
        ("samhita", super::SAMHITA.iter().map(|r| r.id).collect()),
        ("tripadi", tripadi),
    ];
    for (name, mut ids) in catalogues {
        let before = ids.len();
        assert!(before > 0, "{name} is empty");
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before, "{name} repeats an id");
    }
}
