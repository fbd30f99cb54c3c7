#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __or {
    ($value:expr; $default:expr) => {
        $value
    };
    (; $default:expr) => {
        $default
    };
}

/// Build a [`RuleRecord`](crate::engine::RuleRecord).
///
/// `when` receives the current state and returns the site the rule would
/// rewrite, `apply` takes the state by value and hands back the rewritten one.
/// `kind`, `precedence` and `heading` are optional.
#[macro_export]
macro_rules! rule {
    (
        id: ($chapter:expr, $quarter:expr, $sutra:expr),
        name: $name:expr
        $(, kind: $kind:expr)?
        $(, precedence: $precedence:expr)?
        $(, heading: $heading:expr)?
        , when: |$when_state:ident| $when_body:block
        , apply: |$apply_state:ident, $site:ident| $apply_body:block
        $(,)?
    ) => {{
        $crate::engine::RuleRecord {
            id: $crate::scope::RuleAddress::new($chapter, $quarter, $sutra),
            name: $name,
            kind: $crate::__or!($($kind)?; $crate::engine::RuleKind::Operational),
            precedence: $crate::__or!($($precedence)?; $crate::scope::Precedence::General),
            heading: $crate::__or!($(Some($heading))?; None),
            condition: Box::new(
                move |$when_state: &$crate::engine::DerivationState| -> Option<$crate::engine::Site> { $when_body },
            ),
            apply: Box::new(
                move |$apply_state: $crate::engine::DerivationState,
                      $site: &$crate::engine::Site|
                      -> $crate::engine::DerivationState {
                    #[allow(unused_mut)]
                    let mut $apply_state = $apply_state;
                    let _ = $site;
                    $apply_body
                },
            ),
        }
    }};
}
