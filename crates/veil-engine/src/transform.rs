//! Minimization transforms: one function family per disposition, split
//! by field kind. All functions are pure except the noising transforms,
//! which take the random source as a parameter so callers control
//! determinism.
//!
//! Integer math uses floor division (`div_euclid`) so negative values
//! reduce toward minus infinity: `reduce_int(-5) == -1`.

use rand::Rng;

use veil_core::{CoreResult, Field, FieldValue};

use crate::disposition::Disposition;

/// Sentinel written in place of a suppressed integer.
pub const SUPPRESSED_INT: i64 = -1;

// ---------------------------------------------------------------------------
// Suppression
// ---------------------------------------------------------------------------

/// Replace an integer with the `-1` sentinel.
pub fn suppress_int(_value: i64) -> i64 {
    SUPPRESSED_INT
}

/// Replace a string with the empty string.
pub fn suppress_str(_value: &str) -> String {
    String::new()
}

// ---------------------------------------------------------------------------
// Generalization
// ---------------------------------------------------------------------------

/// Coarsen an integer to the lower end of its range of ten, offset by
/// one: 135 -> 131, 130 -> 131, 0 -> 1. Arithmetic saturates at the
/// i64 bounds.
pub fn generalize_int(value: i64) -> i64 {
    value.div_euclid(10).saturating_mul(10).saturating_add(1)
}

/// Keep only the first character. Empty input stays empty.
pub fn generalize_str(value: &str) -> String {
    value.chars().take(1).collect()
}

// ---------------------------------------------------------------------------
// Noising
// ---------------------------------------------------------------------------

/// Perturb a positive integer with two independent uniform draws from
/// `[0, value)`. Non-positive values are returned unchanged, since the
/// draw bound would be empty. Arithmetic saturates at the i64 bounds.
pub fn noise_int<R: Rng + ?Sized>(value: i64, rng: &mut R) -> i64 {
    if value <= 0 {
        return value;
    }
    let down = rng.gen_range(0..value);
    let up = rng.gen_range(0..value);
    value.saturating_sub(down).saturating_add(up)
}

/// String noising is a placeholder: every input maps to the empty
/// string, pending a real perturbation scheme.
pub fn noise_str(_value: &str) -> String {
    String::new()
}

// ---------------------------------------------------------------------------
// Reduction
// ---------------------------------------------------------------------------

/// Scale an integer down by a factor of ten, flooring: 135 -> 13,
/// -5 -> -1.
pub fn reduce_int(value: i64) -> i64 {
    value.div_euclid(10)
}

/// Keep the first three characters. Strings shorter than three are
/// returned unchanged.
pub fn reduce_str(value: &str) -> String {
    if value.chars().count() < 3 {
        return value.to_string();
    }
    value.chars().take(3).collect()
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Apply the transform for `disposition` to a field, in place.
///
/// Fields of kinds other than int and string are left untouched
/// regardless of disposition; the written value always carries the
/// field's declared kind.
pub fn apply<R: Rng + ?Sized>(
    field: &mut Field,
    disposition: Disposition,
    rng: &mut R,
) -> CoreResult<()> {
    if disposition == Disposition::Allowed {
        return Ok(());
    }

    let minimized = match field.value() {
        FieldValue::Int(value) => Some(FieldValue::Int(match disposition {
            Disposition::Generalized => generalize_int(*value),
            Disposition::Noised => noise_int(*value, rng),
            Disposition::Reduced => reduce_int(*value),
            Disposition::Suppressed => suppress_int(*value),
            Disposition::Allowed => unreachable!(),
        })),
        FieldValue::Str(value) => Some(FieldValue::Str(match disposition {
            Disposition::Generalized => generalize_str(value),
            Disposition::Noised => noise_str(value),
            Disposition::Reduced => reduce_str(value),
            Disposition::Suppressed => suppress_str(value),
            Disposition::Allowed => unreachable!(),
        })),
        _ => None,
    };

    if let Some(value) = minimized {
        field.set(value)?;
    }
    Ok(())
}
