//! Junction (sandhi) rules.
//!
//! [`join_vowels`] joins two sequences at one boundary, walking a fixed ladder
//! where the first applicable branch wins. [`join_consonants`] runs the two
//! consonant assimilations over a whole word.
//!
//! ```text
//! irregular table -> pluta pause -> pragrhya pause -> āṭ vriddhi
//!   -> ami / ṅasi-ṅas / prathamayoḥ -> savarṇa dīrgha -> vriddhi / guṇa
//!   -> eṅaḥ padāntād ati -> yaṇ -> ayādi -> concatenation
//! ```

use crate::codec::{decompose, recompose};
use crate::phoneme::{self, AVAGRAHA, Phoneme, PhonemeSequence, Tags, guna_of, long_of, savarna, vriddhi_of};
use crate::scope::RuleAddress;
use bitflags::bitflags;
use tracing::debug;

bitflags! {
    /// What kind of boundary is being joined.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct JunctionContext: u16 {
        /// Left side ends in the āṭ augment.
        const AUGMENT_AT = 1 << 0;
        /// Right side is the sup `अम्`.
        const AMI = 1 << 1;
        /// Right side is ṅasi or ṅas.
        const NGASI_NGAS = 1 << 2;
        /// Right side is a nominative or accusative ending.
        const PRATHAMAYOH = 1 << 3;
        /// Left side is a dual form.
        const DUAL_LEFT = 1 << 4;
        /// Left side is an indeclinable.
        const INDECLINABLE_LEFT = 1 << 5;
        const PADA_BOUNDARY = 1 << 6;
        const SUFFIX_BOUNDARY = 1 << 7;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JunctionKind {
    Concatenation,
    Irregular,
    Pause,
    Vriddhi,
    Purvarupa,
    PurvaSavarna,
    SavarnaDirgha,
    Guna,
    Yan,
    Ayadi,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub sequence: PhonemeSequence,
    pub rule: Option<RuleAddress>,
    pub operation: String,
    pub kind: JunctionKind,
}

pub const ADGUNAH: RuleAddress = RuleAddress::new(6, 1, 87);
pub const VRDDHIR_ECI: RuleAddress = RuleAddress::new(6, 1, 88);
pub const ETYEDHATYUTHSU: RuleAddress = RuleAddress::new(6, 1, 89);
pub const ATAS_CA: RuleAddress = RuleAddress::new(6, 1, 90);
pub const SHAKANDHVADISHU: RuleAddress = RuleAddress::new(6, 1, 94);
pub const IKO_YAN_ACI: RuleAddress = RuleAddress::new(6, 1, 77);
pub const ECO_AYAVAYAVAH: RuleAddress = RuleAddress::new(6, 1, 78);
pub const VANTO_YI: RuleAddress = RuleAddress::new(6, 1, 79);
pub const AKAH_SAVARNE: RuleAddress = RuleAddress::new(6, 1, 101);
pub const PRATHAMAYOH: RuleAddress = RuleAddress::new(6, 1, 102);
pub const NADICI: RuleAddress = RuleAddress::new(6, 1, 104);
pub const AMI_PURVAH: RuleAddress = RuleAddress::new(6, 1, 107);
pub const ENGAH_PADANTAD: RuleAddress = RuleAddress::new(6, 1, 109);
pub const NGASINGASOS: RuleAddress = RuleAddress::new(6, 1, 110);
pub const PLUTA_PRAGRHYA: RuleAddress = RuleAddress::new(6, 1, 125);
pub const IDUDED_DVIVACANAM: RuleAddress = RuleAddress::new(1, 1, 11);
pub const NIPATA_EKAJ: RuleAddress = RuleAddress::new(1, 1, 14);
pub const OT: RuleAddress = RuleAddress::new(1, 1, 15);
pub const STOH_SHCUNA: RuleAddress = RuleAddress::new(8, 4, 40);
pub const SHTUNA_SHTUH: RuleAddress = RuleAddress::new(8, 4, 41);

/// Vārttika forms that do not follow the general ladder.
static IRREGULAR: &[(&str, &str, &str, RuleAddress)] = &[
    ("प्र", "ऊह", "प्रौह", ETYEDHATYUTHSU),
    ("अक्ष", "ऊहिनी", "अक्षौहिणी", ETYEDHATYUTHSU),
    ("स्व", "ईर", "स्वैर", ETYEDHATYUTHSU),
    ("प्र", "ऋण", "प्रार्ण", ETYEDHATYUTHSU),
    ("दश", "ऋण", "दशार्ण", ETYEDHATYUTHSU),
    ("शक", "अन्धु", "शकन्धु", SHAKANDHVADISHU),
    ("कर्क", "अन्धु", "कर्कन्धु", SHAKANDHVADISHU),
    ("कुल", "अटा", "कुलटा", SHAKANDHVADISHU),
    ("सीमन्", "अन्त", "सीमन्त", SHAKANDHVADISHU),
    ("मार्त", "अण्ड", "मार्तण्ड", SHAKANDHVADISHU),
];

/// Indeclinables ending in `ओ` that are always pragṛhya.
static PRAGRHYA_NIPATAS: &[&str] = &["अहो", "उताहो", "अथो", "हो"];

const AK: &[&str] = &["अ", "आ", "इ", "ई", "उ", "ऊ", "ऋ", "ॠ", "ऌ", "ॡ"];
const IK: &[&str] = &["इ", "ई", "उ", "ऊ", "ऋ", "ॠ", "ऌ", "ॡ"];
const EC: &[&str] = &["ए", "ऐ", "ओ", "औ"];
const ENG: &[&str] = &["ए", "ओ"];

fn junction(sequence: PhonemeSequence, rule: Option<RuleAddress>, kind: JunctionKind, operation: String) -> Junction {
    debug!(rule = ?rule.map(|r| r.to_string()), ?kind, result = %recompose(&sequence), "junction");
    Junction { sequence, rule, operation, kind }
}

fn concatenation(left: &PhonemeSequence, right: &PhonemeSequence) -> Junction {
    junction(left.concat(right), None, JunctionKind::Concatenation, "concatenate".into())
}

fn pause(left: &PhonemeSequence, right: &PhonemeSequence, rule: RuleAddress, why: &str) -> Junction {
    let mut out = left.clone();
    out.push(Phoneme::of(" ").touched_by(rule));
    out.extend(right.clone());
    junction(out, Some(rule), JunctionKind::Pause, format!("{why}: no sandhi"))
}

fn stored(glyph: &str) -> Option<&'static str> {
    phoneme::letter(glyph).map(|l| l.glyph)
}

/// Replace the last vowel of `left` and the first vowel of `right` by a
/// single substitute (ekādeśa). The substitute carries both sides' tags.
fn fuse(
    left: &PhonemeSequence,
    right: &PhonemeSequence,
    glyphs: &[&'static str],
    rule: RuleAddress,
) -> PhonemeSequence {
    let (a, b) = (&left[left.len() - 1], &right[0]);
    let mut out: PhonemeSequence = left[..left.len() - 1].iter().cloned().collect();
    for (i, &g) in glyphs.iter().enumerate() {
        let mut p = Phoneme::of(g).with_tags(if i == 0 { a.tags | b.tags } else { Tags::empty() });
        p.pitch = a.pitch;
        p.trace = a.trace.clone();
        p.touch(rule);
        out.push(p);
    }
    out.extend(right[1..].iter().cloned().collect());
    out
}

/// Replace the last phoneme of `left` and keep all of `right`.
fn replace_last(
    left: &PhonemeSequence,
    right: &PhonemeSequence,
    glyphs: &[&'static str],
    rule: RuleAddress,
) -> PhonemeSequence {
    let mut out = left.clone();
    out.substitute_many(left.len() - 1, glyphs, rule);
    out.extend(right.clone());
    out
}

fn irregular(left: &PhonemeSequence, right: &PhonemeSequence) -> Option<Junction> {
    let (l, r) = (recompose(left), recompose(right));
    let &(_, _, form, rule) = IRREGULAR.iter().find(|(a, b, _, _)| *a == l && *b == r)?;
    let sequence = decompose(form).into_iter().map(|p| p.with_tags(Tags::IRREGULAR).touched_by(rule)).collect();
    Some(junction(sequence, Some(rule), JunctionKind::Irregular, format!("{l} + {r} → {form}")))
}

fn pragrhya(left: &PhonemeSequence, last: &Phoneme, ctx: JunctionContext) -> Option<RuleAddress> {
    if ctx.contains(JunctionContext::DUAL_LEFT) && last.is_any(&["ई", "ऊ", "ए"]) {
        return Some(IDUDED_DVIVACANAM);
    }
    if PRAGRHYA_NIPATAS.contains(&recompose(left).as_str()) {
        return Some(OT);
    }
    if ctx.contains(JunctionContext::INDECLINABLE_LEFT) {
        // āṅ is excluded from 1.1.14
        if left.len() == 1 && !last.is("आ") {
            return Some(NIPATA_EKAJ);
        }
        if last.is("ओ") {
            return Some(OT);
        }
    }
    None
}

/// Join two sequences at a vowel boundary.
pub fn join_vowels(left: &PhonemeSequence, right: &PhonemeSequence, ctx: JunctionContext) -> Junction {
    if let Some(j) = irregular(left, right) {
        return j;
    }
    let (Some(l), Some(r)) = (left.last(), right.first()) else {
        return concatenation(left, right);
    };

    if ctx.contains(JunctionContext::SUFFIX_BOUNDARY) && l.is_any(&["ओ", "औ"]) && r.is("य्") {
        let glyphs: &[&'static str] = if l.is("ओ") { &["अ", "व्"] } else { &["आ", "व्"] };
        let op = format!("{} → {} before य", l.key(), glyphs.concat());
        let seq = replace_last(left, right, glyphs, VANTO_YI);
        return junction(seq, Some(VANTO_YI), JunctionKind::Ayadi, op);
    }
    if !l.is_vowel() || !r.is_vowel() {
        return concatenation(left, right);
    }

    // Only a protracted final vowel is kept apart.
    if l.is_protracted() {
        return pause(left, right, PLUTA_PRAGRHYA, "pluta");
    }
    if let Some(rule) = pragrhya(left, l, ctx) {
        return pause(left, right, rule, "pragrhya");
    }

    let (a, b) = (l.key(), r.key());

    if ctx.contains(JunctionContext::AUGMENT_AT) && a == "आ" {
        if let Some(v) = vriddhi_of(b) {
            let op = format!("आट् + {b} → {}", v.concat());
            let seq = fuse(left, right, v, ATAS_CA);
            return junction(seq, Some(ATAS_CA), JunctionKind::Vriddhi, op);
        }
    }
    if ctx.contains(JunctionContext::AMI) && AK.contains(&a) && b == "अ" {
        if let Some(keep) = stored(a) {
            let op = format!("{a} + अम् → {a}म्");
            let seq = fuse(left, right, &[keep], AMI_PURVAH);
            return junction(seq, Some(AMI_PURVAH), JunctionKind::Purvarupa, op);
        }
    }
    if ctx.contains(JunctionContext::NGASI_NGAS) && ENG.contains(&a) && b == "अ" {
        if let Some(keep) = stored(a) {
            let op = format!("{a} + अ → {a}");
            let seq = fuse(left, right, &[keep], NGASINGASOS);
            return junction(seq, Some(NGASINGASOS), JunctionKind::Purvarupa, op);
        }
    }
    if ctx.contains(JunctionContext::PRATHAMAYOH) && AK.contains(&a) {
        let blocked = matches!(a, "अ" | "आ") && b != "अ" && b != "आ";
        if blocked {
            debug!(rule = %NADICI, "prathamayoḥ pūrvasavarṇaḥ blocked");
        } else if let Some(long) = long_of(a) {
            let op = format!("{a} + {b} → {long}");
            let seq = fuse(left, right, &[long], PRATHAMAYOH);
            return junction(seq, Some(PRATHAMAYOH), JunctionKind::PurvaSavarna, op);
        }
    }

    if savarna(a, b) {
        if let Some(long) = long_of(a) {
            let op = format!("{a} + {b} → {long}");
            let seq = fuse(left, right, &[long], AKAH_SAVARNE);
            return junction(seq, Some(AKAH_SAVARNE), JunctionKind::SavarnaDirgha, op);
        }
    }

    if matches!(a, "अ" | "आ") {
        if EC.contains(&b) {
            if let Some(v) = vriddhi_of(b) {
                let op = format!("{a} + {b} → {}", v.concat());
                let seq = fuse(left, right, v, VRDDHIR_ECI);
                return junction(seq, Some(VRDDHIR_ECI), JunctionKind::Vriddhi, op);
            }
        }
        if IK.contains(&b) {
            if let Some(g) = guna_of(b) {
                let op = format!("{a} + {b} → {}", g.concat());
                return junction(fuse(left, right, g, ADGUNAH), Some(ADGUNAH), JunctionKind::Guna, op);
            }
        }
    }

    if ctx.contains(JunctionContext::PADA_BOUNDARY) && ENG.contains(&a) && b == "अ" {
        let mut out = left.clone();
        out.push(Phoneme::of(AVAGRAHA).touched_by(ENGAH_PADANTAD));
        out.extend(right[1..].iter().cloned().collect());
        let op = format!("{a} + अ → {a}ऽ");
        return junction(out, Some(ENGAH_PADANTAD), JunctionKind::Purvarupa, op);
    }

    let yan: Option<&'static str> = match a {
        "इ" | "ई" => Some("य्"),
        "उ" | "ऊ" => Some("व्"),
        "ऋ" | "ॠ" => Some("र्"),
        "ऌ" | "ॡ" => Some("ल्"),
        _ => None,
    };
    if let Some(y) = yan {
        let op = format!("{a} → {y} before {b}");
        let seq = replace_last(left, right, &[y], IKO_YAN_ACI);
        return junction(seq, Some(IKO_YAN_ACI), JunctionKind::Yan, op);
    }

    let ayadi: Option<&'static [&'static str]> = match a {
        "ए" => Some(&["अ", "य्"]),
        "ऐ" => Some(&["आ", "य्"]),
        "ओ" => Some(&["अ", "व्"]),
        "औ" => Some(&["आ", "व्"]),
        _ => None,
    };
    if let Some(g) = ayadi {
        let op = format!("{a} → {} before {b}", g.concat());
        let seq = replace_last(left, right, g, ECO_AYAVAYAVAH);
        return junction(seq, Some(ECO_AYAVAYAVAH), JunctionKind::Ayadi, op);
    }

    concatenation(left, right)
}

const TU: &[&str] = &["त्", "थ्", "द्", "ध्", "न्"];

fn palatal_of(glyph: &str) -> Option<&'static str> {
    Some(match glyph {
        "स्" => "श्",
        "त्" => "च्",
        "थ्" => "छ्",
        "द्" => "ज्",
        "ध्" => "झ्",
        "न्" => "ञ्",
        _ => return None,
    })
}

fn retroflex_of(glyph: &str) -> Option<&'static str> {
    Some(match glyph {
        "स्" => "ष्",
        "त्" => "ट्",
        "थ्" => "ठ्",
        "द्" => "ड्",
        "ध्" => "ढ्",
        "न्" => "ण्",
        _ => return None,
    })
}

/// Rewrite every s/tu next to a trigger until nothing changes.
fn assimilate(
    word: &PhonemeSequence,
    target: fn(&str) -> Option<&'static str>,
    triggers: &[&str],
    blocked: fn(&PhonemeSequence, usize) -> bool,
    rule: RuleAddress,
) -> (PhonemeSequence, bool) {
    let mut out = word.clone();
    let mut changed = false;
    loop {
        let touches = |out: &PhonemeSequence, i: usize| {
            let before = i.checked_sub(1).and_then(|j| out.get(j)).is_some_and(|p| p.is_any(triggers));
            let after = out.get(i + 1).is_some_and(|p| p.is_any(triggers));
            before || after
        };
        let site = (0..out.len())
            .find_map(|i| target(out[i].key()).filter(|_| touches(&out, i) && !blocked(&out, i)).map(|g| (i, g)));
        let Some((i, glyph)) = site else { break };
        debug!(%rule, index = i, from = out[i].glyph(), to = glyph, "assimilate");
        out.substitute(i, glyph, rule);
        changed = true;
    }
    (out, changed)
}

/// 8.4.40 stoḥ ścunā ścuḥ, with 8.4.44 śāt.
pub fn palatalize(word: &PhonemeSequence) -> (PhonemeSequence, bool) {
    assimilate(
        word,
        palatal_of,
        &["श्", "च्", "छ्", "ज्", "झ्", "ञ्"],
        |w, i| w[i].is_any(TU) && i > 0 && w[i - 1].is("श्"),
        STOH_SHCUNA,
    )
}

/// 8.4.41 ṣṭunā ṣṭuḥ, with 8.4.43 toḥ ṣi.
pub fn retroflex(word: &PhonemeSequence) -> (PhonemeSequence, bool) {
    assimilate(
        word,
        retroflex_of,
        &["ष्", "ट्", "ठ्", "ड्", "ढ्", "ण्"],
        |w, i| w[i].is_any(TU) && w.get(i + 1).is_some_and(|p| p.is("ष्")),
        SHTUNA_SHTUH,
    )
}

/// Palatal then retroflex assimilation. Idempotent.
pub fn join_consonants(word: &PhonemeSequence) -> PhonemeSequence {
    let (word, _) = palatalize(word);
    let (word, _) = retroflex(&word);
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(l: &str, r: &str, ctx: JunctionContext) -> (String, Option<RuleAddress>) {
        let j = join_vowels(&decompose(l), &decompose(r), ctx);
        (recompose(&j.sequence), j.rule)
    }

    fn plain(l: &str, r: &str) -> String {
        join(l, r, JunctionContext::PADA_BOUNDARY).0
    }

    #[test]
    fn general_ladder() {
        assert_eq!(plain("देव", "आलय"), "देवालय");
        assert_eq!(plain("मुनि", "इन्द्र"), "मुनीन्द्र");
        assert_eq!(plain("देव", "इन्द्र"), "देवेन्द्र");
        assert_eq!(plain("महा", "ऋषि"), "महर्षि");
        assert_eq!(plain("सदा", "एव"), "सदैव");
        assert_eq!(plain("इति", "आदि"), "इत्यादि");
        assert_eq!(plain("गुरु", "आदेश"), "गुर्वादेश");
        assert_eq!(plain("ने", "अन"), "नेऽन");
        assert_eq!(plain("पौ", "अक"), "पावक");
    }

    #[test]
    fn irregular_forms_take_priority() {
        let (out, rule) = join("प्र", "ऊह", JunctionContext::empty());
        assert_eq!(out, "प्रौह");
        assert_eq!(rule, Some(ETYEDHATYUTHSU));
        assert_eq!(join("शक", "अन्धु", JunctionContext::empty()).0, "शकन्धु");
        let j = join_vowels(&decompose("सीमन्"), &decompose("अन्त"), JunctionContext::empty());
        assert!(j.sequence.iter().all(|p| p.tags.contains(Tags::IRREGULAR)));
    }

    #[test]
    fn pluta_and_pragrhya_keep_a_pause() {
        assert_eq!(join("देवदत्त३", "अत्र", JunctionContext::empty()), ("देवदत्त३ अत्र".into(), Some(PLUTA_PRAGRHYA)));
        assert_eq!(join("हरी", "एतौ", JunctionContext::DUAL_LEFT), ("हरी एतौ".into(), Some(IDUDED_DVIVACANAM)));
        assert_eq!(join("अहो", "ईशाः", JunctionContext::empty()).0, "अहो ईशाः");
        assert_eq!(join("इ", "इन्द्रः", JunctionContext::INDECLINABLE_LEFT).1, Some(NIPATA_EKAJ));
    }

    #[test]
    fn protracted_initial_vowel_still_joins() {
        let (out, rule) = join("देव", "अ३", JunctionContext::PADA_BOUNDARY);
        assert_eq!(rule, Some(AKAH_SAVARNE));
        assert!(!out.contains(' '), "{out}");
    }

    #[test]
    fn inflection_boundary_cases() {
        assert_eq!(join("हरि", "अम्", JunctionContext::AMI | JunctionContext::PRATHAMAYOH).0, "हरिम्");
        assert_eq!(join("हरे", "अस्", JunctionContext::NGASI_NGAS).0, "हरेस्");
        assert_eq!(join("हरि", "औ", JunctionContext::PRATHAMAYOH), ("हरी".into(), Some(PRATHAMAYOH)));
        assert_eq!(join("राम", "अस्", JunctionContext::PRATHAMAYOH).0, "रामास्");
        // nādici
        assert_eq!(join("राम", "औ", JunctionContext::PRATHAMAYOH), ("रामौ".into(), Some(VRDDHIR_ECI)));
    }

    #[test]
    fn augment_and_suffix_boundaries() {
        assert_eq!(join("आ", "इच्छत्", JunctionContext::AUGMENT_AT).0, "ऐच्छत्");
        assert_eq!(join("भौ", "य", JunctionContext::SUFFIX_BOUNDARY), ("भाव्य".into(), Some(VANTO_YI)));
        assert_eq!(join("वाक्", "अर्थ", JunctionContext::PADA_BOUNDARY).1, None);
    }

    #[test]
    fn junction_traces_touched_phonemes() {
        let j = join_vowels(&decompose("देव"), &decompose("इन्द्र"), JunctionContext::empty());
        assert!(j.sequence[3].is("ए"));
        assert_eq!(j.sequence[3].trace, vec![ADGUNAH]);
        assert!(j.sequence[1].trace.is_empty());
    }

    #[test]
    fn consonant_assimilation() {
        let run = |s: &str| recompose(&join_consonants(&decompose(s)));
        assert_eq!(run("सत्चित्"), "सच्चित्");
        assert_eq!(run("तत्टीका"), "तट्टीका");
        assert_eq!(run("रामस्शेते"), "रामश्शेते");
        assert_eq!(run("प्रश्न"), "प्रश्न");
        assert_eq!(run("सन्षष्ठः"), "सन्षष्ठः");
    }

    #[test]
    fn join_consonants_is_idempotent() {
        for s in ["सत्चित्", "तत्टीका", "यज्न", "उद्डीन", "राम"] {
            let once = join_consonants(&decompose(s));
            assert_eq!(join_consonants(&once), once, "{s}");
        }
    }
}
