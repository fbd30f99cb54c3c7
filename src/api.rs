use crate::codec::{decompose, recompose};
use crate::engine::{self, RunMetrics, Step};
use crate::error::Error;
use crate::lexicon::{self, Gender};
use crate::pratyahara;
use crate::sandhi::{self, JunctionContext};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};

/// Options that affect derivation behavior.
#[derive(Debug, Clone)]
pub struct Options {
    /// Apply 8.4.56 vāvasāne (pada-final stops become unvoiced).
    pub final_devoicing: bool,
    /// Passes a single registry phase may take before the derivation is
    /// abandoned with [`Error::RuleRegistryCycle`].
    pub max_passes: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { final_devoicing: true, max_passes: 20 }
    }
}

/// What to derive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Request {
    Inflection { stem: String, case: u8, number: u8 },
    Derivative { root: String, suffix: String },
}

impl Request {
    pub fn inflection(stem: impl Into<String>, case: u8, number: u8) -> Self {
        Request::Inflection { stem: stem.into(), case, number }
    }

    pub fn derivative(root: impl Into<String>, suffix: impl Into<String>) -> Self {
        Request::Derivative { root: root.into(), suffix: suffix.into() }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Inflection { stem, case, number } => write!(f, "{stem} {case}.{number}"),
            Request::Derivative { root, suffix } => write!(f, "{root} + {suffix}"),
        }
    }
}

/// Result of [`derive_inflection`] and [`derive_derivative`].
#[derive(Debug, Clone)]
pub struct Derivation {
    pub input: Request,
    /// Final surface form.
    pub surface: String,
    /// Every recorded step, in order.
    pub steps: Vec<Step>,
    /// Total elapsed time.
    pub elapsed: Duration,
    pub metrics: RunMetrics,
}

/// One reading of a form found by [`reverse_lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub stem: &'static str,
    pub gender: Gender,
    pub case: u8,
    pub number: u8,
}

/// Inflect `stem` for `case` (1-8, 8 = vocative) and `number` (1-3) with
/// default [`Options`].
///
/// # Example
/// ```
/// use vyakarana::derive_inflection;
///
/// let out = derive_inflection("राम", 1, 1).unwrap();
/// assert_eq!(out.surface, "रामः");
/// ```
pub fn derive_inflection(stem: &str, case: u8, number: u8) -> Result<Derivation, Error> {
    derive_inflection_with(stem, case, number, &Options::default())
}

pub fn derive_inflection_with(stem: &str, case: u8, number: u8, options: &Options) -> Result<Derivation, Error> {
    let started = Instant::now();
    let (state, metrics) = engine::derive_inflection(stem, case, number, options)?;
    Ok(Derivation {
        input: Request::inflection(stem, case, number),
        surface: state.surface(),
        steps: state.history,
        elapsed: started.elapsed(),
        metrics,
    })
}

/// Derive `root` + krt `suffix`. The root may be given in its listed form
/// (`डुकृञ्`) or its bare form (`कृ`); the suffix by its listed form (`तुमुँन्`)
/// or conventional name (`तुमुन्`).
pub fn derive_derivative(root: &str, suffix: &str) -> Result<Derivation, Error> {
    derive_derivative_with(root, suffix, &Options::default())
}

pub fn derive_derivative_with(root: &str, suffix: &str, options: &Options) -> Result<Derivation, Error> {
    let started = Instant::now();
    let (state, metrics) = engine::derive_derivative(root, suffix, options)?;
    Ok(Derivation {
        input: Request::derivative(root, suffix),
        surface: state.surface(),
        steps: state.history,
        elapsed: started.elapsed(),
        metrics,
    })
}

/// Members of a named pratyahara such as `अच्` or `झल्`.
pub fn resolve_pratyahara(name: &str) -> Result<BTreeSet<&'static str>, Error> {
    pratyahara::resolve_name(name)
}

/// All 24 cells of a stem, case-major.
pub fn decline(stem: &str) -> Result<Vec<Derivation>, Error> {
    decline_with(stem, &Options::default())
}

pub fn decline_with(stem: &str, options: &Options) -> Result<Vec<Derivation>, Error> {
    let cells: Vec<(u8, u8)> = (1..=8).flat_map(|c| (1..=3).map(move |n| (c, n))).collect();
    cells.par_iter().map(|&(case, number)| derive_inflection_with(stem, case, number, options)).collect()
}

/// Run independent requests in parallel. A failure stays in its own slot.
pub fn derive_batch(requests: &[Request]) -> Vec<Result<Derivation, Error>> {
    derive_batch_with(requests, &Options::default())
}

pub fn derive_batch_with(requests: &[Request], options: &Options) -> Vec<Result<Derivation, Error>> {
    requests
        .par_iter()
        .map(|request| match request {
            Request::Inflection { stem, case, number } => derive_inflection_with(stem, *case, *number, options),
            Request::Derivative { root, suffix } => derive_derivative_with(root, suffix, options),
        })
        .collect()
}

/// Every listed stem and cell whose surface is `form`.
pub fn reverse_lookup(form: &str) -> Vec<Analysis> {
    let form = form.trim();
    let options = Options::default();
    let mut found: Vec<Analysis> = lexicon::stems()
        .par_iter()
        .flat_map_iter(|record| {
            let cells = decline_with(record.stem, &options).unwrap_or_default();
            cells
                .into_iter()
                .filter(|d| d.surface == form)
                .filter_map(|d| match d.input {
                    Request::Inflection { case, number, .. } => {
                        Some(Analysis { stem: record.stem, gender: record.gender, case, number })
                    }
                    Request::Derivative { .. } => None,
                })
                .collect::<Vec<_>>()
        })
        .collect();
    found.sort_by_key(|a| (a.stem, a.case, a.number));
    found
}

/// Join two words across a word boundary.
///
/// # Example
/// ```
/// assert_eq!(vyakarana::join_words("देव", "इन्द्र"), "देवेन्द्र");
/// ```
pub fn join_words(left: &str, right: &str) -> String {
    join_words_with(left, right, JunctionContext::empty())
}

/// Same as [`join_words`], with extra facts about the left word such as
/// [`JunctionContext::DUAL_LEFT`] (1.1.11) or
/// [`JunctionContext::INDECLINABLE_LEFT`] (1.1.14, 1.1.15).
///
/// # Example
/// ```
/// use vyakarana::sandhi::JunctionContext;
///
/// assert_eq!(vyakarana::join_words_with("हरी", "एतौ", JunctionContext::DUAL_LEFT), "हरी एतौ");
/// ```
pub fn join_words_with(left: &str, right: &str, ctx: JunctionContext) -> String {
    let junction = sandhi::join_vowels(&decompose(left), &decompose(right), ctx | JunctionContext::PADA_BOUNDARY);
    recompose(&sandhi::join_consonants(&junction.sequence))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_inflection_returns_surface_and_steps() {
        let out = derive_inflection("राम", 3, 1).unwrap();
        assert_eq!(out.surface, "रामेण");
        assert_eq!(out.input, Request::inflection("राम", 3, 1));
        assert!(out.steps.iter().any(|s| s.rule.map(|r| r.to_string()) == Some("7.1.12".into())));
        assert!(out.steps.windows(2).all(|w| w[0].index + 1 == w[1].index));
        assert!(out.metrics.rules_fired() > 0);
    }

    #[test]
    fn malformed_requests_are_rejected() {
        assert!(matches!(derive_inflection("", 1, 1), Err(Error::MalformedInput(_))));
        assert!(matches!(derive_inflection("राम", 9, 1), Err(Error::UnknownSuffixAddress { case: 9, number: 1 })));
        assert!(matches!(derive_derivative("भू", "xyz"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn pass_cap_aborts_only_that_derivation() {
        let options = Options { max_passes: 0, ..Options::default() };
        assert!(matches!(derive_inflection_with("राम", 3, 1, &options), Err(Error::RuleRegistryCycle { .. })));
        assert!(derive_inflection("राम", 3, 1).is_ok());
    }

    #[test]
    fn decline_fills_every_cell() {
        let cells = decline("राम").unwrap();
        assert_eq!(cells.len(), 24);
        assert_eq!(cells[0].surface, "रामः");
        assert_eq!(cells[5].surface, "रामान्");
        assert_eq!(cells[23].surface, "रामाः");
    }

    #[test]
    fn batch_keeps_failures_in_place() {
        let requests = [
            Request::inflection("हरि", 1, 3),
            Request::inflection("हरि", 0, 3),
            Request::derivative("कृ", "तृच्"),
        ];
        let out = derive_batch(&requests);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].as_ref().unwrap().surface, "हरयः");
        assert!(out[1].is_err());
        assert_eq!(out[2].as_ref().unwrap().surface, "कर्तृ");
    }

    #[test]
    fn reverse_lookup_finds_every_reading() {
        let found = reverse_lookup("रामौ");
        let cells: Vec<(u8, u8)> = found.iter().filter(|a| a.stem == "राम").map(|a| (a.case, a.number)).collect();
        assert_eq!(cells, vec![(1, 2), (2, 2), (8, 2)]);
        assert!(reverse_lookup("xyz").is_empty());
    }

    #[test]
    fn pratyahara_by_name() {
        let ac = resolve_pratyahara("अच्").unwrap();
        assert!(["अ", "इ", "उ", "ऋ", "ऌ", "ए", "ओ", "ऐ", "औ"].iter().all(|v| ac.contains(v)));
    }

    #[test]
    fn requests_display_compactly() {
        assert_eq!(Request::inflection("राम", 1, 1).to_string(), "राम 1.1");
        assert_eq!(Request::derivative("भू", "क्त").to_string(), "भू + क्त");
    }

    #[test]
    fn join_words_with_left_word_facts() {
        assert_eq!(join_words("हरी", "एतौ"), "हर्येतौ");
        assert_eq!(join_words_with("हरी", "एतौ", JunctionContext::DUAL_LEFT), "हरी एतौ");
        assert_eq!(join_words_with("इ", "इन्द्रः", JunctionContext::INDECLINABLE_LEFT), "इ इन्द्रः");
        assert_eq!(join_words_with("देव", "इन्द्र", JunctionContext::empty()), join_words("देव", "इन्द्र"));
    }
}
