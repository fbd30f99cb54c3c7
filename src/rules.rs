//! Rule registries. Each catalogue is built once and shared across threads.

use crate::engine::RuleRecord;
use crate::tripadi::Stage;
use once_cell::sync::Lazy;

#[path = "rules/helpers.rs"]
pub(crate) mod helpers;
#[path = "rules/krdanta.rs"]
mod krdanta;
#[path = "rules/predicates.rs"]
pub(crate) mod predicates;
#[path = "rules/samhita.rs"]
mod samhita;
#[path = "rules/subanta.rs"]
mod subanta;
#[path = "rules/tripadi.rs"]
mod tripadi;

#[cfg(test)]
#[path = "rules/tests.rs"]
mod tests;

pub(crate) static SUBANTA: Lazy<Vec<RuleRecord>> = Lazy::new(subanta::rules);
pub(crate) static DHATU: Lazy<Vec<RuleRecord>> = Lazy::new(krdanta::dhatu_rules);
pub(crate) static KRDANTA: Lazy<Vec<RuleRecord>> = Lazy::new(krdanta::rules);
pub(crate) static SAMHITA: Lazy<Vec<RuleRecord>> = Lazy::new(samhita::rules);
static TRIPADI: Lazy<Vec<(Stage, RuleRecord)>> = Lazy::new(tripadi::rules);

/// Records evaluated by one tripadi stage, in order.
pub(crate) fn tripadi_stage(stage: Stage) -> impl Iterator<Item = &'static RuleRecord> {
    TRIPADI.iter().filter(move |(s, _)| *s == stage).map(|(_, r)| r)
}

/// Every registered record, catalogue by catalogue.
pub fn catalogue() -> impl Iterator<Item = &'static RuleRecord> {
    SUBANTA
        .iter()
        .chain(DHATU.iter())
        .chain(KRDANTA.iter())
        .chain(SAMHITA.iter())
        .chain(TRIPADI.iter().map(|(_, r)| r))
}
