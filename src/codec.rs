//! Phonological codec: Devanagari text <-> [`PhonemeSequence`].
//!
//! Tokenization is a single regex whose alternatives are classified into a
//! fixed table of [`TokenRule`]s, applied left to right. Anything the table
//! does not recognise passes through as an accessory, so decomposition never
//! fails.
//!
//! `recompose(decompose(x)) == x` holds for text built from unit glyphs. The
//! `ॐ` ligature is split into `ओ` + `म्`, both tagged [`Tags::LIGATURE`], and
//! is written back as `ॐ` while the pair survives untouched.

use crate::phoneme::{
    self, ANUSVARA, CANDRABINDU, Manner, PROTRACTION, Phoneme, PhonemeSequence, Pitch, Places, Tags, VIRAMA,
};
use regex::Captures;
use tracing::trace;

/// The tokenizer's rule table, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    OmLigature,
    ProtractedVowel,
    IndependentVowel,
    ConsonantVirama,
    ConsonantSignProtracted,
    ConsonantSign,
    ConsonantInherentProtracted,
    ConsonantInherent,
    Anusvara,
    Visarga,
    Chandrabindu,
    Avagraha,
    FallingPitch,
    CircumflexPitch,
    NasalBeforeStop,
    Passthrough,
}

impl TokenRule {
    pub const ALL: [TokenRule; 16] = [
        TokenRule::OmLigature,
        TokenRule::ProtractedVowel,
        TokenRule::IndependentVowel,
        TokenRule::ConsonantVirama,
        TokenRule::ConsonantSignProtracted,
        TokenRule::ConsonantSign,
        TokenRule::ConsonantInherentProtracted,
        TokenRule::ConsonantInherent,
        TokenRule::Anusvara,
        TokenRule::Visarga,
        TokenRule::Chandrabindu,
        TokenRule::Avagraha,
        TokenRule::FallingPitch,
        TokenRule::CircumflexPitch,
        TokenRule::NasalBeforeStop,
        TokenRule::Passthrough,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenRule::OmLigature => "om ligature",
            TokenRule::ProtractedVowel => "protracted vowel",
            TokenRule::IndependentVowel => "independent vowel",
            TokenRule::ConsonantVirama => "consonant + virama",
            TokenRule::ConsonantSignProtracted => "consonant + sign + protraction",
            TokenRule::ConsonantSign => "consonant + sign",
            TokenRule::ConsonantInherentProtracted => "consonant + protraction",
            TokenRule::ConsonantInherent => "bare consonant",
            TokenRule::Anusvara => "anusvara",
            TokenRule::Visarga => "visarga",
            TokenRule::Chandrabindu => "candrabindu",
            TokenRule::Avagraha => "avagraha",
            TokenRule::FallingPitch => "anudatta mark",
            TokenRule::CircumflexPitch => "svarita mark",
            TokenRule::NasalBeforeStop => "nasal before stop",
            TokenRule::Passthrough => "passthrough",
        }
    }

    fn classify(caps: &Captures<'_>) -> TokenRule {
        if caps.name("om").is_some() {
            TokenRule::OmLigature
        } else if caps.name("vowel").is_some() {
            if caps.name("vpluta").is_some() { TokenRule::ProtractedVowel } else { TokenRule::IndependentVowel }
        } else if caps.name("cons").is_some() {
            if caps.name("virama").is_some() {
                TokenRule::ConsonantVirama
            } else if caps.name("sign").is_some() {
                if caps.name("spluta").is_some() {
                    TokenRule::ConsonantSignProtracted
                } else {
                    TokenRule::ConsonantSign
                }
            } else if caps.name("ipluta").is_some() {
                TokenRule::ConsonantInherentProtracted
            } else {
                TokenRule::ConsonantInherent
            }
        } else if caps.name("anusvara").is_some() {
            TokenRule::Anusvara
        } else if caps.name("visarga").is_some() {
            TokenRule::Visarga
        } else if caps.name("candra").is_some() {
            TokenRule::Chandrabindu
        } else if caps.name("avagraha").is_some() {
            TokenRule::Avagraha
        } else if caps.name("anudatta").is_some() {
            TokenRule::FallingPitch
        } else if caps.name("svarita").is_some() {
            TokenRule::CircumflexPitch
        } else {
            TokenRule::Passthrough
        }
    }
}

fn owned(s: &str) -> Phoneme {
    match Phoneme::new(s.to_string()) {
        Some(p) => p,
        None => Phoneme::of(" "),
    }
}

fn consonant_of(caps: &Captures<'_>) -> Phoneme {
    let base = caps.name("cons").map(|m| m.as_str()).unwrap_or_default();
    let glyph = format!("{base}{VIRAMA}");
    match phoneme::letter(&glyph) {
        Some(l) => Phoneme::of(l.glyph),
        None => owned(&glyph),
    }
}

fn vowel_of(glyph: &str, protracted: bool) -> Phoneme {
    match (phoneme::letter(glyph), protracted) {
        (Some(l), false) => Phoneme::of(l.glyph),
        (Some(l), true) => owned(&format!("{}{PROTRACTION}", l.glyph)),
        (None, _) => owned(glyph),
    }
}

fn set_pitch(out: &mut PhonemeSequence, pitch: Pitch, mark: &str) {
    match out.last_mut() {
        Some(last) if last.is_vowel() && last.pitch == Pitch::Rising => last.pitch = pitch,
        _ => out.push(owned(mark)),
    }
}

/// Split Devanagari text into phonemes.
pub fn decompose(text: &str) -> PhonemeSequence {
    let re = regex!(
        r"(?xs)
        (?P<om>ॐ)
        | (?P<vowel>[अआइईउऊऋऌएऐओऔॠॡ])(?P<vpluta>३)?
        | (?P<cons>[क-ह\x{0958}-\x{095F}])
          (?:(?P<virama>्) | (?P<sign>[ािीुूृॄॢॣेैोौ])(?P<spluta>३)? | (?P<ipluta>३))?
        | (?P<anusvara>ं)
        | (?P<visarga>ः)
        | (?P<candra>ँ)
        | (?P<avagraha>ऽ)
        | (?P<anudatta>॒)
        | (?P<svarita>॑)
        | (?P<other>.)"
    );

    let mut out = PhonemeSequence::new();
    for caps in re.captures_iter(text) {
        let rule = TokenRule::classify(&caps);
        let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        trace!(rule = rule.name(), token = matched, "tokenize");

        match rule {
            TokenRule::OmLigature => {
                for glyph in ["ओ", "म्"] {
                    let mut p = Phoneme::of(glyph);
                    p.tags |= Tags::LIGATURE;
                    out.push(p);
                }
            }
            TokenRule::ProtractedVowel | TokenRule::IndependentVowel => {
                let v = caps.name("vowel").map(|m| m.as_str()).unwrap_or_default();
                out.push(vowel_of(v, rule == TokenRule::ProtractedVowel));
            }
            TokenRule::ConsonantVirama => out.push(consonant_of(&caps)),
            TokenRule::ConsonantSign | TokenRule::ConsonantSignProtracted => {
                out.push(consonant_of(&caps));
                let sign = caps.name("sign").map(|m| m.as_str()).unwrap_or_default();
                match phoneme::letter_for_sign(sign) {
                    Some(l) => out.push(vowel_of(l.glyph, rule == TokenRule::ConsonantSignProtracted)),
                    None => out.push(owned(sign)),
                }
            }
            TokenRule::ConsonantInherent | TokenRule::ConsonantInherentProtracted => {
                out.push(consonant_of(&caps));
                out.push(vowel_of("अ", rule == TokenRule::ConsonantInherentProtracted));
            }
            TokenRule::Chandrabindu => {
                if let Some(last) = out.last_mut().filter(|p| p.is_vowel()) {
                    last.nasalized = true;
                }
                out.push(Phoneme::of(CANDRABINDU));
            }
            TokenRule::Anusvara | TokenRule::Visarga | TokenRule::Avagraha => out.push(owned(matched)),
            TokenRule::FallingPitch => set_pitch(&mut out, Pitch::Falling, matched),
            TokenRule::CircumflexPitch => set_pitch(&mut out, Pitch::Circumflex, matched),
            TokenRule::NasalBeforeStop | TokenRule::Passthrough => out.push(owned(matched)),
        }
    }

    normalize_nasals(&mut out);
    out
}

/// Anusvara before a stop takes the stop's place. Only attributes change, the
/// glyph stays `ं`, so recomposition is unaffected.
fn normalize_nasals(seq: &mut PhonemeSequence) {
    let places: Vec<Option<Places>> = (0..seq.len())
        .map(|i| {
            let next = seq.get(i + 1)?;
            (seq[i].is(ANUSVARA) && matches!(next.manner, Manner::Stop { .. } | Manner::Nasal))
                .then_some(next.places.difference(Places::NASIKA))
        })
        .collect();

    for (i, place) in places.into_iter().enumerate() {
        if let (Some(place), Some(p)) = (place, seq.get_mut(i)) {
            trace!(rule = TokenRule::NasalBeforeStop.name(), index = i, "normalize");
            p.places = place | Places::NASIKA;
        }
    }
}

fn push_pitch(out: &mut String, p: &Phoneme) {
    if let Some(mark) = p.pitch.mark() {
        out.push_str(mark);
    }
}

fn is_om_ligature(rest: &[Phoneme]) -> bool {
    match rest {
        [o, m, ..] => {
            o.is("ओ") && m.is("म्") && o.tags.contains(Tags::LIGATURE) && m.tags.contains(Tags::LIGATURE)
        }
        _ => false,
    }
}

/// Render phonemes back into Devanagari text.
pub fn recompose(seq: &[Phoneme]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < seq.len() {
        let p = &seq[i];
        if is_om_ligature(&seq[i..]) {
            out.push('ॐ');
            i += 2;
            continue;
        }
        if p.is_consonant() {
            let glyph = p.glyph();
            match seq.get(i + 1).filter(|n| n.is_vowel()) {
                Some(v) => {
                    out.push_str(glyph.strip_suffix(VIRAMA).unwrap_or(glyph));
                    out.push_str(v.sign());
                    if v.is_protracted() {
                        out.push(PROTRACTION);
                    }
                    push_pitch(&mut out, v);
                    i += 2;
                    continue;
                }
                None => out.push_str(glyph),
            }
        } else {
            out.push_str(p.glyph());
            if p.is_vowel() {
                push_pitch(&mut out, p);
            }
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_consonant_vowel_units() {
        let seq = decompose("रामः");
        assert_eq!(seq.glyphs(), vec!["र्", "आ", "म्", "अ", "ः"]);
        assert!(seq[4].is_accessory());
    }

    #[test]
    fn splits_conjuncts_into_members() {
        assert_eq!(decompose("कृष्ण").glyphs(), vec!["क्", "ऋ", "ष्", "ण्", "अ"]);
        assert_eq!(decompose("क्ष्म").glyphs(), vec!["क्", "ष्", "म्", "अ"]);
    }

    #[test]
    fn protraction_stays_on_one_phoneme() {
        let seq = decompose("हे राम३");
        let last = seq.last().unwrap();
        assert_eq!(last.glyph(), "अ३");
        assert!(last.is_protracted());
        assert_eq!(decompose("ओ३म्").glyphs(), vec!["ओ३", "म्"]);
    }

    #[test]
    fn pitch_marks_attach_to_vowels() {
        let seq = decompose("अ॒ग्निः");
        assert_eq!(seq[0].pitch, Pitch::Falling);
        assert_eq!(recompose(&seq), "अ॒ग्निः");

        let seq = decompose("दे॑व");
        assert_eq!(seq[1].pitch, Pitch::Circumflex);
    }

    #[test]
    fn anusvara_takes_place_of_following_stop() {
        let seq = decompose("संकल्प");
        assert_eq!(seq[2].glyph(), "ं");
        assert_eq!(seq[2].places, Places::KANTHA | Places::NASIKA);
        assert_eq!(recompose(&seq), "संकल्प");
    }

    #[test]
    fn nukta_letters_tokenize_as_consonants() {
        assert!(decompose("").is_empty());
        let seq = decompose("क़लम");
        assert_eq!(seq.len(), 6);
        assert_eq!(seq[1].glyph(), "अ");
        assert_eq!(seq.glyphs()[2..], ["ल्", "अ", "म्", "अ"]);
    }

    #[test]
    fn candrabindu_nasalizes_the_vowel() {
        let seq = decompose("पठँ");
        assert_eq!(seq.glyphs(), vec!["प्", "अ", "ठ्", "अ", "ँ"]);
        assert!(seq[3].nasalized);
    }

    #[test]
    fn round_trip_holds_for_unit_glyph_text() {
        for text in [
            "",
            "रामः",
            "हरये",
            "कृष्णः",
            "गच्छति",
            "सत्यमेव जयते",
            "अग्निमीळे पुरोहितं",
            "पठँ",
            "ओ३म्",
            "डुकृञ्",
            "शिवोऽहम्",
            "ॡ",
            "abc 123",
            "ॐ",
            "ॐ नमः शिवाय",
        ] {
            assert_eq!(recompose(&decompose(text)), text, "round trip of {text:?}");
        }
    }

    #[test]
    fn om_ligature_is_split_but_written_back_whole() {
        let seq = decompose("ॐ");
        assert_eq!(seq.glyphs(), vec!["ओ", "म्"]);
        assert!(seq.iter().all(|p| p.tags.contains(Tags::LIGATURE)));
        assert_eq!(recompose(&seq), "ॐ");

        // Spelled out, the same phonemes stay spelled out.
        assert_eq!(recompose(&decompose("ओम्")), "ओम्");
    }

    #[test]
    fn empty_input_gives_empty_sequence() {
        assert!(decompose("").is_empty());
    }

    #[test]
    fn table_has_sixteen_rules() {
        assert_eq!(TokenRule::ALL.len(), 16);
        assert_eq!(TokenRule::ALL[15], TokenRule::Passthrough);
    }
}
