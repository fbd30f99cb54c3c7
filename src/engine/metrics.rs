//! Derivation run metrics.
//!
//! Every derivation is split into phases (marker deletion, each registry run,
//! the junction, the tripadi). A registry phase also keeps one entry per
//! interpreter pass, which is what the trace report prints.

use crate::scope::RuleAddress;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time of the derivation.
    pub total: Duration,
    pub phases: Vec<PhaseMetrics>,
}

impl RunMetrics {
    /// Number of rule applications across all phases.
    pub fn rules_fired(&self) -> usize {
        self.phases.iter().flat_map(|p| &p.passes).filter(|p| p.fired.is_some()).count()
    }
}

#[derive(Debug, Default, Clone)]
pub struct PhaseMetrics {
    pub name: &'static str,
    pub duration: Duration,
    pub passes: Vec<PassMetrics>,
}

/// One interpreter pass.
#[derive(Debug, Default, Clone)]
pub struct PassMetrics {
    pub duration: Duration,
    /// Rules whose condition held on this pass.
    pub candidates: usize,
    /// The rule that won and was applied.
    pub fired: Option<RuleAddress>,
}
