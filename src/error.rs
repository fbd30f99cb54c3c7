use crate::scope::RuleAddress;

/// Errors surfaced by derivations and reference-table lookups.
///
/// Decomposition never fails; everything that can go wrong happens once a
/// derivation starts pulling suffixes, roots or rules out of the tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("no sup suffix for case {case}, number {number}")]
    UnknownSuffixAddress { case: u8, number: u8 },
    #[error("pratyahara {start}..{terminator} has no terminator occurrence #{occurrence}")]
    AmbiguousPratyahara { start: String, terminator: String, occurrence: usize },
    #[error("rule registry did not settle after {passes} passes (last rule {last})")]
    RuleRegistryCycle { passes: usize, last: RuleAddress },
    #[error("reference tables were read before they were loaded")]
    UninitializedReferenceTable,
    #[error("invalid rule address: {0:?}")]
    InvalidRuleAddress(String),
}
