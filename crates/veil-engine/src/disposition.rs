use serde::{Deserialize, Serialize};
use std::fmt;

use veil_cred::Policy;

// ---------------------------------------------------------------------------
// Disposition — the single minimization action chosen for one field
// ---------------------------------------------------------------------------

/// Mutually exclusive outcome of resolving one field against a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    /// Value passes through byte-identical.
    Allowed,
    /// Value coarsened to a range representative.
    Generalized,
    /// Value perturbed with randomness.
    Noised,
    /// Precision lowered deterministically.
    Reduced,
    /// Value replaced with a sentinel. The default for any field the
    /// policy does not mention.
    Suppressed,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Allowed => write!(f, "allowed"),
            Disposition::Generalized => write!(f, "generalized"),
            Disposition::Noised => write!(f, "noised"),
            Disposition::Reduced => write!(f, "reduced"),
            Disposition::Suppressed => write!(f, "suppressed"),
        }
    }
}

/// Resolve the disposition governing `field_name` under `policy`.
///
/// Pure and total. First match wins, so a field listed in several sets
/// gets the most information-preserving category; a field listed in
/// none gets maximal protection.
pub fn resolve(field_name: &str, policy: &Policy) -> Disposition {
    if policy.allowed.contains(field_name) {
        Disposition::Allowed
    } else if policy.generalized.contains(field_name) {
        Disposition::Generalized
    } else if policy.noised.contains(field_name) {
        Disposition::Noised
    } else if policy.reduced.contains(field_name) {
        Disposition::Reduced
    } else {
        Disposition::Suppressed
    }
}
