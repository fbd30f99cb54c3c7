//! Rule-based derivation of Sanskrit word forms.
//!
//! A stem or root and a suffix are decomposed into phonemes, stripped of their
//! it-markers and pushed through a registry of Paninian rules: morphology on
//! the separate terms, the junction (sandhi), then the tripadi. Every change is
//! recorded so a derivation can be replayed step by step.
//!
//! ```
//! let out = vyakarana::derive_inflection("हरि", 1, 3).unwrap();
//! assert_eq!(out.surface, "हरयः");
//!
//! let out = vyakarana::derive_derivative("कृ", "ण्वुल्").unwrap();
//! assert_eq!(out.surface, "कारक");
//! ```

extern crate self as vyakarana;

#[macro_use]
mod macros;

pub mod api;
pub mod codec;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod markers;
pub mod phoneme;
pub mod pratyahara;
mod rules;
pub mod sandhi;
pub mod scope;
pub mod tripadi;

pub use api::{
    Analysis, Derivation, Options, Request, decline, decline_with, derive_batch, derive_batch_with,
    derive_derivative, derive_derivative_with, derive_inflection, derive_inflection_with, join_words,
    join_words_with, resolve_pratyahara, reverse_lookup,
};
pub use error::Error;
pub use lexicon::{ensure_loaded, lookup_rule_text};
pub use rules::catalogue;
