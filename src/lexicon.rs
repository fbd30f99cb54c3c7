//! Reference tables: dhatus, nominal stems, sup and krt suffixes, and sutra
//! texts for the trace report.
//!
//! The tables are immutable process state. They are built exactly once, either
//! explicitly through [`ensure_loaded`] or on first touch by a lookup.

use crate::engine::TermTags;
use crate::error::Error;
use crate::phoneme::Tags;
use crate::scope::RuleAddress;
use bitflags::bitflags;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Masculine => "m",
            Gender::Feminine => "f",
            Gender::Neuter => "n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gana {
    Bhvadi,
    Adadi,
    Juhotyadi,
    Divadi,
    Svadi,
    Tudadi,
    Rudhadi,
    Tanadi,
    Kryadi,
    Curadi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Voice {
    Parasmaipada,
    Atmanepada,
    Ubhayapada,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RootTags: u8 {
        /// Takes the iṭ augment (7.2.35).
        const SET = 1 << 0;
        /// Has an anudātta vowel in upadesha (7.2.10 ekāca upadeśe 'nudāttāt).
        const ANIT = 1 << 1;
        /// Nasal-final root listed with anudātta (6.4.37).
        const ANUDATTOPADESHA = 1 << 2;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRecord {
    pub upadesha: &'static str,
    /// Form after marker deletion, used as the lookup key.
    pub canonical: &'static str,
    pub gana: Gana,
    pub voice: Voice,
    pub tags: RootTags,
    pub meaning: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemRecord {
    pub stem: &'static str,
    pub gender: Gender,
    pub meaning: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupSuffix {
    pub upadesha: &'static str,
    pub case: u8,
    pub number: u8,
    /// Term tags the ending is introduced with. `SARVANAMASTHANA` marks the
    /// suṭ endings; a neuter stem drops it (1.1.43 suḍ anapuṃsakasya).
    pub tags: TermTags,
}

impl SupSuffix {
    /// Vocative singular (2.3.49 ekavacanaṃ sambuddhiḥ).
    pub fn is_sambuddhi(&self) -> bool {
        self.tags.contains(TermTags::SAMBUDDHI)
    }
}

fn sup_tags(case: u8, number: u8) -> TermTags {
    let mut tags = TermTags::SUP | TermTags::PRATYAYA;
    // su au jas am auṭ, and the vocative which borrows the nominative row.
    if matches!((case, number), (1, _) | (2, 1) | (2, 2) | (8, _)) {
        tags |= TermTags::SARVANAMASTHANA;
    }
    if (case, number) == (8, 1) {
        tags |= TermTags::SAMBUDDHI;
    }
    tags
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KrtTags: u8 {
        /// Forms an indeclinable (1.1.39 ktvātosuṅkasunaḥ, 1.1.40).
        const AVYAYA = 1 << 0;
        const ARDHADHATUKA = 1 << 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrtRecord {
    pub upadesha: &'static str,
    /// Conventional name without the nasal marker (`तुमुन्`).
    pub name: &'static str,
    pub tags: KrtTags,
    pub meaning: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleText {
    pub id: RuleAddress,
    pub text: &'static str,
    pub note: &'static str,
}

#[derive(Debug)]
pub struct ReferenceTables {
    roots: Vec<RootRecord>,
    stems: HashMap<&'static str, StemRecord>,
    sup: Vec<SupSuffix>,
    krt: Vec<KrtRecord>,
    rules: HashMap<RuleAddress, RuleText>,
}

static TABLES: OnceCell<ReferenceTables> = OnceCell::new();

/// Build the tables if needed and return them.
pub fn ensure_loaded() -> &'static ReferenceTables {
    TABLES.get_or_init(|| {
        let tables = ReferenceTables::build();
        debug!(
            roots = tables.roots.len(),
            stems = tables.stems.len(),
            krt = tables.krt.len(),
            rules = tables.rules.len(),
            "reference tables loaded"
        );
        tables
    })
}

/// Tables without implicit loading.
pub fn try_tables() -> Result<&'static ReferenceTables, Error> {
    TABLES.get().ok_or(Error::UninitializedReferenceTable)
}

pub fn is_loaded() -> bool {
    TABLES.get().is_some()
}

pub fn lookup_root(canonical: &str) -> Option<&'static RootRecord> {
    ensure_loaded().root(canonical)
}

pub fn lookup_stem(stem: &str) -> Option<&'static StemRecord> {
    ensure_loaded().stems.get(stem)
}

pub fn lookup_suffix(case: u8, number: u8) -> Option<SupSuffix> {
    ensure_loaded().sup.iter().find(|s| s.case == case && s.number == number).cloned()
}

pub fn lookup_krt(name: &str) -> Option<&'static KrtRecord> {
    ensure_loaded().krt.iter().find(|k| k.upadesha == name || k.name == name)
}

pub fn lookup_rule_text(id: RuleAddress) -> Option<&'static RuleText> {
    ensure_loaded().rules.get(&id)
}

/// All nominal stems, in a stable order.
pub fn stems() -> Vec<&'static StemRecord> {
    let mut all: Vec<_> = ensure_loaded().stems.values().collect();
    all.sort_by_key(|s| s.stem);
    all
}

impl ReferenceTables {
    pub fn root(&self, key: &str) -> Option<&RootRecord> {
        self.roots.iter().find(|r| r.canonical == key || r.upadesha == key)
    }

    fn build() -> Self {
        use Gana::*;
        use Voice::*;

        let root = |upadesha, canonical, gana, voice, tags, meaning| RootRecord {
            upadesha,
            canonical,
            gana,
            voice,
            tags,
            meaning,
        };
        let roots = vec![
            root("भू", "भू", Bhvadi, Parasmaipada, RootTags::SET, "to be"),
            root("डुकृञ्", "कृ", Tanadi, Ubhayapada, RootTags::ANIT, "to do"),
            root("पठँ", "पठ्", Bhvadi, Parasmaipada, RootTags::SET, "to read"),
            root("गमॢँ", "गम्", Bhvadi, Parasmaipada, RootTags::ANIT | RootTags::ANUDATTOPADESHA, "to go"),
            root("णीञ्", "नी", Bhvadi, Ubhayapada, RootTags::ANIT, "to lead"),
            root("हृञ्", "हृ", Bhvadi, Ubhayapada, RootTags::ANIT, "to carry"),
            root("डुपचँष्", "पच्", Bhvadi, Ubhayapada, RootTags::ANIT, "to cook"),
            root("श्रिञ्", "श्रि", Bhvadi, Ubhayapada, RootTags::SET, "to resort to"),
            root("यमँ", "यम्", Bhvadi, Parasmaipada, RootTags::ANIT | RootTags::ANUDATTOPADESHA, "to restrain"),
            root("वदँ", "वद्", Bhvadi, Parasmaipada, RootTags::SET, "to speak"),
            root("लिखँ", "लिख्", Tudadi, Parasmaipada, RootTags::SET, "to write"),
            root("चिञ्", "चि", Svadi, Ubhayapada, RootTags::ANIT, "to collect"),
            root("जि", "जि", Bhvadi, Parasmaipada, RootTags::ANIT, "to conquer"),
        ];

        let stems = [
            ("राम", Gender::Masculine, "Rama"),
            ("देव", Gender::Masculine, "god"),
            ("बाल", Gender::Masculine, "boy"),
            ("हरि", Gender::Masculine, "Hari"),
            ("कवि", Gender::Masculine, "poet"),
            ("मुनि", Gender::Masculine, "sage"),
            ("गुरु", Gender::Masculine, "teacher"),
            ("भानु", Gender::Masculine, "sun"),
            ("वायु", Gender::Masculine, "wind"),
            ("मति", Gender::Feminine, "thought"),
            ("रुचि", Gender::Feminine, "light"),
            ("धेनु", Gender::Feminine, "cow"),
            ("वन", Gender::Neuter, "forest"),
            ("फल", Gender::Neuter, "fruit"),
            ("अहन्", Gender::Neuter, "day"),
            ("गिर्", Gender::Feminine, "speech"),
            ("मरुत्", Gender::Masculine, "wind god"),
        ]
        .into_iter()
        .map(|(stem, gender, meaning)| (stem, StemRecord { stem, gender, meaning }))
        .collect();

        const SUP: [[&str; 3]; 8] = [
            ["सुँ", "औ", "जस्"],
            ["अम्", "औट्", "शस्"],
            ["टा", "भ्याम्", "भिस्"],
            ["ङे", "भ्याम्", "भ्यस्"],
            ["ङसिँ", "भ्याम्", "भ्यस्"],
            ["ङस्", "ओस्", "आम्"],
            ["ङि", "ओस्", "सुप्"],
            ["सुँ", "औ", "जस्"],
        ];
        let sup = SUP
            .iter()
            .enumerate()
            .flat_map(|(c, row)| {
                row.iter().enumerate().map(move |(n, &upadesha)| {
                    let (case, number) = (c as u8 + 1, n as u8 + 1);
                    SupSuffix { upadesha, case, number, tags: sup_tags(case, number) }
                })
            })
            .collect();

        let ard = KrtTags::ARDHADHATUKA;
        let krt = |upadesha, name, tags, meaning| KrtRecord { upadesha, name, tags, meaning };
        let krt = vec![
            krt("क्त", "क्त", ard, "past participle"),
            krt("क्तवतुँ", "क्तवतु", ard, "active past participle"),
            krt("तृच्", "तृच्", ard, "agent"),
            krt("तव्यत्", "तव्यत्", ard, "gerundive"),
            krt("अनीयर्", "अनीयर्", ard, "gerundive"),
            krt("ण्यत्", "ण्यत्", ard, "gerundive"),
            krt("यत्", "यत्", ard, "gerundive"),
            krt("ल्युट्", "ल्युट्", ard, "action noun"),
            krt("ण्वुल्", "ण्वुल्", ard, "agent"),
            krt("घञ्", "घञ्", ard, "action noun"),
            krt("तुमुँन्", "तुमुन्", ard | KrtTags::AVYAYA, "infinitive"),
            krt("क्त्वा", "क्त्वा", ard | KrtTags::AVYAYA, "absolutive"),
        ];

        let rule = |a, p, s, text, note| {
            let id = RuleAddress::new(a, p, s);
            (id, RuleText { id, text, note })
        };
        let rules = [
            rule(1, 1, 11, "ईदूदेद्द्विवचनं प्रगृह्यम्", "dual ī ū e are pragṛhya"),
            rule(1, 1, 14, "निपात एकाजनाङ्", "single-vowel particles are pragṛhya"),
            rule(1, 1, 15, "ओत्", "o-final particles are pragṛhya"),
            rule(1, 3, 2, "उपदेशेऽजनुनासिक इत्", "nasalized vowel is a marker"),
            rule(1, 3, 3, "हलन्त्यम्", "final consonant is a marker"),
            rule(1, 3, 5, "आदिर्ञिटुडवः", "initial ñi ṭu ḍu of a root are markers"),
            rule(1, 3, 6, "षः प्रत्ययस्य", "initial ṣ of a suffix is a marker"),
            rule(1, 3, 7, "चुटू", "initial palatal or retroflex of a suffix is a marker"),
            rule(1, 3, 8, "लशक्वतद्धिते", "initial l ś or velar of a non-taddhita suffix is a marker"),
            rule(1, 3, 9, "तस्य लोपः", "markers are deleted"),
            rule(1, 4, 13, "यस्मात्प्रत्ययविधिस्तदादि प्रत्ययेऽङ्गम्", "what precedes a suffix is its aṅga"),
            rule(1, 4, 14, "सुप्तिङन्तं पदम्", "a form ending in sup or tiṅ is a pada"),
            rule(1, 4, 17, "स्वादिष्वसर्वनामस्थाने", "stem is pada before consonant-initial weak endings"),
            rule(3, 1, 91, "धातोः", "krt suffixes follow a root"),
            rule(
                4,
                1,
                2,
                "स्वौजसमौट्छष्टाभ्याम्भिस्ङेभ्याम्भ्यस्ङसिभ्याम्भ्यस्ङसोसाम्ङ्योस्सुप्",
                "the 21 sup endings",
            ),
            rule(6, 1, 64, "धात्वादेः षः सः", "root-initial ṣ becomes s"),
            rule(6, 1, 65, "णो नः", "root-initial ṇ becomes n"),
            rule(6, 1, 68, "हल्ङ्याब्भ्यो दीर्घात् सुतिस्यपृक्तं हल्", "single-consonant su is dropped"),
            rule(6, 1, 69, "एङ्ह्रस्वात् सम्बुद्धेः", "vocative s is dropped"),
            rule(6, 1, 77, "इको यणचि", "ik becomes semivowel before a vowel"),
            rule(6, 1, 78, "एचोऽयवायावः", "ec becomes ay av āy āv before a vowel"),
            rule(6, 1, 79, "वान्तो यि प्रत्यये", "o au become av āv before a y-suffix"),
            rule(6, 1, 87, "आद्गुणः", "a + ik becomes guna"),
            rule(6, 1, 88, "वृद्धिरेचि", "a + ec becomes vriddhi"),
            rule(6, 1, 89, "एत्येधत्यूठ्सु", "vriddhi in pra + ūha and listed forms"),
            rule(6, 1, 90, "आटश्च", "āṭ + vowel becomes vriddhi"),
            rule(6, 1, 94, "शकन्ध्वादिषु पररूपं वाच्यम्", "śakandhu and listed forms take the second vowel"),
            rule(6, 1, 101, "अकः सवर्णे दीर्घः", "like vowels merge long"),
            rule(6, 1, 102, "प्रथमयोः पूर्वसवर्णः", "first two cases take the long of the stem vowel"),
            rule(6, 1, 103, "तस्माच्छसो नः पुंसि", "masculine accusative plural s becomes n"),
            rule(6, 1, 104, "नादिचि", "no pūrvasavarṇa after a before ic"),
            rule(6, 1, 107, "अमि पूर्वः", "stem vowel absorbs the a of am"),
            rule(6, 1, 109, "एङः पदान्तादति", "final e o absorb a following a"),
            rule(6, 1, 110, "ङसिङसोश्च", "e o absorb the a of ṅasi ṅas"),
            rule(6, 1, 125, "प्लुतप्रगृह्या अचि नित्यम्", "protracted and pragṛhya vowels stay apart"),
            rule(6, 4, 3, "नामि", "stem vowel is lengthened before nām"),
            rule(6, 4, 8, "सर्वनामस्थाने चासम्बुद्धौ", "penultimate of an n-stem is lengthened"),
            rule(6, 4, 37, "अनुदात्तोपदेशवनतितनोत्यादीनामनुनासिकलोपो झलि क्ङिति", "nasal drops before kit jhal"),
            rule(7, 1, 1, "युवोरनाकौ", "yu vu become ana aka"),
            rule(7, 1, 9, "अतो भिस ऐस्", "bhis becomes ais after a"),
            rule(7, 1, 12, "टाङसिङसामिनात्स्याः", "ṭā ṅasi ṅas become ina āt sya after a"),
            rule(7, 1, 13, "ङेर्यः", "ṅe becomes ya after a"),
            rule(7, 1, 19, "नपुंसकाच्च", "neuter au becomes śī"),
            rule(7, 1, 20, "जश्शसोः शिः", "neuter jas śas become śi"),
            rule(7, 1, 23, "स्वमोर्नपुंसकात्", "neuter su am are dropped"),
            rule(7, 1, 24, "अतोऽम्", "neuter su am become am after a"),
            rule(7, 1, 54, "ह्रस्वनद्यापो नुट्", "nuṭ before ām after a short vowel"),
            rule(7, 1, 72, "नपुंसकस्य झलचः", "neuter stems take num before sarvanāmasthāna"),
            rule(7, 2, 11, "श्र्युकः किति", "no iṭ before kit after śri and uk roots"),
            rule(7, 2, 35, "आर्धधातुकस्येड् वलादेः", "iṭ before val-initial ārdhadhātuka"),
            rule(7, 2, 115, "अचो ञ्णिति", "vowel-final stem takes vriddhi before ñit ṇit"),
            rule(7, 2, 116, "अत उपधायाः", "penultimate a takes vriddhi before ñit ṇit"),
            rule(7, 3, 52, "चजोः कु घिण्ण्यतोः", "c j become velar before ghit and ṇyat"),
            rule(7, 3, 84, "सार्वधातुकार्धधातुकयोः", "final ik takes guna"),
            rule(7, 3, 86, "पुगन्तलघूपधस्य च", "light penultimate ik takes guna"),
            rule(7, 3, 102, "सुपि च", "a becomes ā before yañ-initial sup"),
            rule(7, 3, 103, "बहुवचने झल्येत्", "a becomes e before plural jhal-initial sup"),
            rule(7, 3, 104, "ओसि च", "a becomes e before os"),
            rule(7, 3, 108, "ह्रस्वस्य गुणः", "short final takes guna in the vocative"),
            rule(7, 3, 109, "जसि च", "short final takes guna before jas"),
            rule(7, 3, 111, "घेर्ङिति", "ghi takes guna before ṅit"),
            rule(7, 3, 119, "अच्च घेः", "ghi becomes a and ṅi becomes au"),
            rule(7, 3, 120, "आङो नाऽस्त्रियाम्", "ṭā becomes nā after non-feminine ghi"),
            rule(8, 2, 39, "झलां जशोऽन्ते", "pada-final jhal becomes jaś"),
            rule(8, 2, 66, "ससजुषो रुः", "pada-final s becomes ru"),
            rule(8, 2, 68, "अहन्", "ahan becomes ru when pada"),
            rule(8, 2, 76, "र्वोरुपधाया दीर्घ इकः", "ik before final r v is lengthened"),
            rule(8, 3, 15, "खरवसानयोर्विसर्जनीयः", "final r becomes visarga"),
            rule(8, 3, 24, "नश्चापदान्तस्य झलि", "internal n m become anusvara before jhal"),
            rule(8, 3, 59, "आदेशप्रत्यययोः", "suffix s becomes ṣ after iṇ and ku"),
            rule(8, 4, 2, "अट्कुप्वाङ्नुम्व्यवायेऽपि", "n becomes ṇ after r ṣ across aṭ ku pu āṅ num"),
            rule(8, 4, 40, "स्तोः श्चुना श्चुः", "s and dentals become palatal next to palatals"),
            rule(8, 4, 41, "ष्टुना ष्टुः", "s and dentals become retroflex next to retroflexes"),
            rule(8, 4, 55, "खरि च", "jhal becomes car before khar"),
            rule(8, 4, 56, "वाऽवसाने", "final jhal optionally becomes car"),
            rule(8, 4, 58, "अनुस्वारस्य ययि परसवर्णः", "anusvara takes the following stop's nasal"),
        ]
        .into_iter()
        .collect();

        ReferenceTables { roots, stems, sup, krt, rules }
    }
}

/// Whether `tags` mark an ārdhadhātuka suffix that is kit or ṅit (1.1.5).
pub fn is_weak_grade(tags: Tags) -> bool {
    tags.intersects(Tags::KIT | Tags::NGIT | Tags::GIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sup_table_covers_all_cells() {
        for case in 1..=8 {
            for number in 1..=3 {
                assert!(lookup_suffix(case, number).is_some(), "{case}.{number}");
            }
        }
        assert!(lookup_suffix(9, 1).is_none());
        assert!(lookup_suffix(1, 0).is_none());
        assert_eq!(lookup_suffix(3, 3).unwrap().upadesha, "भिस्");
        assert!(lookup_suffix(8, 1).unwrap().is_sambuddhi());
        assert!(!lookup_suffix(1, 1).unwrap().is_sambuddhi());
    }

    #[test]
    fn sup_cells_carry_their_tags() {
        let strong = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (8, 1), (8, 2), (8, 3)];
        for case in 1..=8 {
            for number in 1..=3 {
                let sup = lookup_suffix(case, number).unwrap();
                assert!(sup.tags.contains(TermTags::SUP | TermTags::PRATYAYA));
                assert_eq!(
                    sup.tags.contains(TermTags::SARVANAMASTHANA),
                    strong.contains(&(case, number)),
                    "{case}.{number}"
                );
            }
        }
        assert_eq!(lookup_suffix(2, 3).unwrap().tags, TermTags::SUP | TermTags::PRATYAYA);
    }

    #[test]
    fn roots_resolve_by_canonical_and_upadesha() {
        assert_eq!(lookup_root("कृ").unwrap().upadesha, "डुकृञ्");
        assert_eq!(lookup_root("डुकृञ्").unwrap().canonical, "कृ");
        assert!(lookup_root("भू").unwrap().tags.contains(RootTags::SET));
        assert!(lookup_root("अस्").is_none());
    }

    #[test]
    fn krt_aliases() {
        assert_eq!(lookup_krt("तुमुन्").unwrap().upadesha, "तुमुँन्");
        assert!(lookup_krt("क्त्वा").unwrap().tags.contains(KrtTags::AVYAYA));
        assert!(!lookup_krt("क्त").unwrap().tags.contains(KrtTags::AVYAYA));
    }

    #[test]
    fn explicit_loading_makes_strict_access_succeed() {
        ensure_loaded();
        assert!(is_loaded());
        assert!(try_tables().is_ok());
        assert_eq!(lookup_rule_text(RuleAddress::new(6, 1, 87)).unwrap().text, "आद्गुणः");
        assert!(lookup_rule_text(RuleAddress::new(1, 1, 1)).is_none());
        assert_eq!(lookup_stem("मति").unwrap().gender, Gender::Feminine);
    }
}
