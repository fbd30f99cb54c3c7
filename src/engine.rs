//! Derivation engine.
//!
//! The engine applies a registry of [`RuleRecord`]s to a [`DerivationState`]
//! and records every change in the state's history. Rules are data: each
//! record carries its address, its precedence and an optional adhikara
//! heading, plus a `condition` that locates a site and an `apply` that
//! rewrites the state.
//!
//! ## How the parts work together
//!
//! ```text
//! stem / root ─┐
//!              │  codec::decompose + markers::strip_markers
//! sup / krt  ──┘             │
//!                            v
//!               Term assembly (orchestrator.rs)
//!                            │
//!                            v
//!               interpreter::saturate            (interpreter.rs)
//!                 - collect applicable rules
//!                 - fold scope::resolve_conflict
//!                 - apply winner, log Step
//!                 - repeat to fixpoint (capped)
//!                            │
//!                            v
//!               sandhi::join_vowels / join_consonants
//!                            │
//!                            v
//!               post-junction registry, tripadi::run
//!                            │
//!                            v
//!                     codec::recompose
//! ```
//!
//! ## Responsibilities by module
//!
//! - `state.rs`: terms, flags, history.
//! - `registry.rs`: the `RuleRecord` shape shared by every rule catalogue.
//! - `interpreter.rs`: the single fixpoint loop with uniform trace logging.
//! - `orchestrator.rs`: the inflection and derivative pipelines.
//! - `metrics.rs`: per-phase timing.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=vyakarana=debug` to see candidate sets, conflict
//! resolution and every rule application.

#[path = "engine/interpreter.rs"]
mod interpreter;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/orchestrator.rs"]
mod orchestrator;
#[path = "engine/registry.rs"]
mod registry;
#[path = "engine/state.rs"]
mod state;

pub use metrics::{PassMetrics, PhaseMetrics, RunMetrics};
pub(crate) use orchestrator::{derive_derivative, derive_inflection};
pub use registry::{RuleKind, RuleRecord};
pub use state::{DerivationState, Site, StateFlags, Step, Subject, Term, TermTags};
