//! Runs in its own process, so nothing has touched the reference tables yet.
//! Keep this file to a single test.

use vyakarana::{derive_derivative, derive_inflection};

#[test]
fn first_derivation_loads_the_tables() {
    assert!(!vyakarana::lexicon::is_loaded());

    let inflected = derive_inflection("राम", 1, 1).unwrap();
    assert_eq!(inflected.surface, "रामः");
    assert!(vyakarana::lexicon::is_loaded());

    let derived = derive_derivative("कृ", "तृच्").unwrap();
    assert_eq!(derived.surface, "कर्तृ");
}
