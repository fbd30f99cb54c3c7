//! Rule addresses, adhikara headings and conflict resolution.
//!
//! An adhikara ("heading") is a governing rule whose scope extends over an
//! inclusive range of later rules. A heading can be switched off by the
//! derivation state: `angasya` rules need an anga, `padasya` rules need a pada,
//! and `samhitayam` rules are off across a pause.

use crate::engine::StateFlags;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Three-part sutra address `adhyaya.pada.sutra`. Ordering is the textual
/// order of the Ashtadhyayi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleAddress {
    pub chapter: u8,
    pub quarter: u8,
    pub sutra: u16,
}

impl RuleAddress {
    pub const fn new(chapter: u8, quarter: u8, sutra: u16) -> Self {
        Self { chapter, quarter, sutra }
    }
}

impl fmt::Display for RuleAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.chapter, self.quarter, self.sutra)
    }
}

impl FromStr for RuleAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRuleAddress(s.to_string());
        let mut parts = s.trim().split('.');
        let (Some(a), Some(p), Some(n), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let chapter: u8 = a.parse().map_err(|_| invalid())?;
        let quarter: u8 = p.parse().map_err(|_| invalid())?;
        let sutra: u16 = n.parse().map_err(|_| invalid())?;
        if !(1..=8).contains(&chapter) || !(1..=4).contains(&quarter) || sutra == 0 {
            return Err(invalid());
        }
        Ok(Self { chapter, quarter, sutra })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precedence {
    /// Apavada: a specific rule that pre-empts the general one it carves out of.
    Exception,
    General,
}

/// Anything that can take part in a rule conflict.
pub trait Ranked {
    fn address(&self) -> RuleAddress;
    fn precedence(&self) -> Precedence;
}

impl Ranked for (RuleAddress, Precedence) {
    fn address(&self) -> RuleAddress {
        self.0
    }

    fn precedence(&self) -> Precedence {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    ExceptionOverGeneral,
    /// 1.4.2 vipratiṣedhe paraṃ kāryam.
    LaterAddress,
    Tie,
}

/// Pick the winner of two applicable rules.
///
/// An exception beats a general rule; otherwise the later address wins. Equal
/// addresses return `a`.
pub fn resolve_conflict<'r, R: Ranked + ?Sized>(a: &'r R, b: &'r R) -> (&'r R, ConflictReason) {
    let (winner, reason) = match (a.precedence(), b.precedence()) {
        (Precedence::Exception, Precedence::General) => (a, ConflictReason::ExceptionOverGeneral),
        (Precedence::General, Precedence::Exception) => (b, ConflictReason::ExceptionOverGeneral),
        _ => match a.address().cmp(&b.address()) {
            std::cmp::Ordering::Less => (b, ConflictReason::LaterAddress),
            std::cmp::Ordering::Greater => (a, ConflictReason::LaterAddress),
            std::cmp::Ordering::Equal => (a, ConflictReason::Tie),
        },
    };
    debug!(a = %a.address(), b = %b.address(), winner = %winner.address(), ?reason, "conflict");
    (winner, reason)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adhikara {
    /// 6.4.1 aṅgasya
    Angasya,
    /// 6.1.72 saṃhitāyām
    Samhitayam,
    /// 8.2.1 pūrvatrāsiddham
    Purvatrasiddham,
    /// 8.1.16 padasya
    Padasya,
    /// 8.3.55 apadāntasya mūrdhanyaḥ
    ApadantasyaMurdhanyah,
}

impl Adhikara {
    pub const ALL: [Adhikara; 5] = [
        Adhikara::Angasya,
        Adhikara::Samhitayam,
        Adhikara::Purvatrasiddham,
        Adhikara::Padasya,
        Adhikara::ApadantasyaMurdhanyah,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Adhikara::Angasya => "angasya",
            Adhikara::Samhitayam => "samhitayam",
            Adhikara::Purvatrasiddham => "purvatrasiddham",
            Adhikara::Padasya => "padasya",
            Adhikara::ApadantasyaMurdhanyah => "apadantasya murdhanyah",
        }
    }

    /// Inclusive range of addresses governed by the heading.
    pub fn range(self) -> (RuleAddress, RuleAddress) {
        match self {
            Adhikara::Angasya => (RuleAddress::new(6, 4, 1), RuleAddress::new(7, 4, 97)),
            Adhikara::Samhitayam => (RuleAddress::new(6, 1, 72), RuleAddress::new(6, 1, 157)),
            Adhikara::Purvatrasiddham => (RuleAddress::new(8, 2, 1), RuleAddress::new(8, 4, 68)),
            Adhikara::Padasya => (RuleAddress::new(8, 1, 16), RuleAddress::new(8, 3, 54)),
            Adhikara::ApadantasyaMurdhanyah => (RuleAddress::new(8, 3, 55), RuleAddress::new(8, 3, 119)),
        }
    }

    fn requires(self) -> StateFlags {
        match self {
            Adhikara::Angasya => StateFlags::ANGA,
            Adhikara::Padasya => StateFlags::PADA,
            _ => StateFlags::empty(),
        }
    }

    fn blocked_by(self) -> StateFlags {
        match self {
            Adhikara::Samhitayam => StateFlags::PAUSE,
            _ => StateFlags::empty(),
        }
    }

    pub fn from_name(name: &str) -> Option<Adhikara> {
        Adhikara::ALL.into_iter().find(|h| h.name() == name)
    }
}

pub fn is_in_scope(address: RuleAddress, heading: Adhikara) -> bool {
    let (start, end) = heading.range();
    start <= address && address <= end
}

/// Whether the heading's own condition fails for the current state.
pub fn is_deactivated(heading: Adhikara, flags: StateFlags) -> bool {
    !flags.contains(heading.requires()) || flags.intersects(heading.blocked_by())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_order_textually() {
        let a: RuleAddress = "6.1.87".parse().unwrap();
        let b: RuleAddress = "6.1.101".parse().unwrap();
        let c: RuleAddress = "7.1.9".parse().unwrap();
        assert!(a < b && b < c);
        assert_eq!(c.to_string(), "7.1.9");
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for s in ["", "6.1", "6.1.x", "9.1.1", "6.5.1", "6.1.0", "6.1.1.1"] {
            assert!(matches!(s.parse::<RuleAddress>(), Err(Error::InvalidRuleAddress(_))), "{s}");
        }
    }

    #[test]
    fn exception_beats_general_regardless_of_order() {
        let general = (RuleAddress::new(7, 3, 103), Precedence::General);
        let exception = (RuleAddress::new(7, 1, 9), Precedence::Exception);

        let (w1, r1) = resolve_conflict(&general, &exception);
        let (w2, r2) = resolve_conflict(&exception, &general);
        assert_eq!(w1.0, exception.0);
        assert_eq!(w2.0, exception.0);
        assert_eq!(r1, ConflictReason::ExceptionOverGeneral);
        assert_eq!(r1, r2);
    }

    #[test]
    fn later_address_wins_between_equals() {
        let a = (RuleAddress::new(7, 3, 102), Precedence::General);
        let b = (RuleAddress::new(7, 3, 103), Precedence::General);
        assert_eq!(resolve_conflict(&a, &b).0.0, b.0);
        assert_eq!(resolve_conflict(&b, &a).0.0, b.0);
        assert_eq!(resolve_conflict(&a, &b).1, ConflictReason::LaterAddress);
    }

    #[test]
    fn tie_returns_first_argument() {
        let a = (RuleAddress::new(6, 1, 101), Precedence::General);
        let b = (RuleAddress::new(6, 1, 101), Precedence::General);
        let (w, reason) = resolve_conflict(&a, &b);
        assert!(std::ptr::eq(w, &a));
        assert_eq!(reason, ConflictReason::Tie);
    }

    #[test]
    fn headings_cover_inclusive_ranges() {
        assert!(is_in_scope(RuleAddress::new(6, 4, 1), Adhikara::Angasya));
        assert!(is_in_scope(RuleAddress::new(7, 4, 97), Adhikara::Angasya));
        assert!(!is_in_scope(RuleAddress::new(6, 1, 101), Adhikara::Angasya));
        assert!(is_in_scope(RuleAddress::new(8, 2, 39), Adhikara::Padasya));
        assert!(is_in_scope(RuleAddress::new(8, 3, 59), Adhikara::ApadantasyaMurdhanyah));
        assert!(!is_in_scope(RuleAddress::new(8, 3, 59), Adhikara::Padasya));
    }

    #[test]
    fn headings_switch_off_with_state() {
        assert!(is_deactivated(Adhikara::Angasya, StateFlags::empty()));
        assert!(!is_deactivated(Adhikara::Angasya, StateFlags::ANGA));
        assert!(is_deactivated(Adhikara::Padasya, StateFlags::ANGA));
        assert!(is_deactivated(Adhikara::Samhitayam, StateFlags::PAUSE));
        assert!(!is_deactivated(Adhikara::Samhitayam, StateFlags::empty()));
        assert_eq!(Adhikara::from_name("padasya"), Some(Adhikara::Padasya));
    }
}
