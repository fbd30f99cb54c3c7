use super::state::{DerivationState, Site};
use crate::scope::{Adhikara, Precedence, Ranked, RuleAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Samjna: assigns a designation.
    Definition,
    /// Paribhasha: governs how other rules are read.
    GeneralPrinciple,
    /// Vidhi: changes the form.
    Operational,
    /// Atidesha: extends properties.
    Extension,
    /// Resolves a conflict between other rules.
    MetaConflict,
}

pub type Condition = Box<dyn Fn(&DerivationState) -> Option<Site> + Send + Sync>;
pub type Apply = Box<dyn Fn(DerivationState, &Site) -> DerivationState + Send + Sync>;

/// A rule as data. Built with the `rule!` macro.
pub struct RuleRecord {
    pub id: RuleAddress,
    pub name: &'static str,
    pub kind: RuleKind,
    pub precedence: Precedence,
    pub heading: Option<Adhikara>,
    /// Locates the site this rule would rewrite, if any.
    pub condition: Condition,
    pub apply: Apply,
}

impl Ranked for RuleRecord {
    fn address(&self) -> RuleAddress {
        self.id
    }

    fn precedence(&self) -> Precedence {
        self.precedence
    }
}

impl std::fmt::Debug for RuleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRecord")
            .field("id", &self.id.to_string())
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("precedence", &self.precedence)
            .field("heading", &self.heading)
            .field("condition", &"<function>")
            .field("apply", &"<function>")
            .finish()
    }
}
