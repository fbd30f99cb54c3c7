use crate::engine::{RuleRecord, Site, StateFlags, Subject};
use crate::lexicon::Gender;
use crate::rules::helpers::substitute;
use crate::scope::{Adhikara, RuleAddress};

/// Rules that look at the joined word but still belong before the tripadi.
pub(crate) fn rules() -> Vec<RuleRecord> {
    vec![rule! {
        id: (6, 1, 103),
        name: "tasmāc chaso naḥ puṃsi",
        heading: Adhikara::Samhitayam,
        when: |st| {
            let accusative_plural = matches!(
                st.subject,
                Subject::Inflection { case: 2, number: 3, gender: Gender::Masculine, .. }
            );
            let word = &st.terms.first()?.sequence;
            let applies = st.flags.contains(StateFlags::PURVASAVARNA)
                && accusative_plural
                && st.terms.len() == 1
                && word.last().is_some_and(|p| p.is("स्"));
            applies.then(|| Site::new(0, word.len() - 1))
        },
        apply: |st, site| { substitute(st, site, "न्", RuleAddress::new(6, 1, 103)) }
    }]
}
