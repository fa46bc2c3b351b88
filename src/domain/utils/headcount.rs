//! Normalisation of headcount and target values.
//!
//! Spreadsheet cells are untyped, so every headcount passes through here once
//! at load time. The rule is total: anything that is not a finite number
//! becomes 0, fractional values are truncated towards zero and negative
//! values are clamped to 0. A headcount of 0 never matches a positive target,
//! and a slot target of 0 means the slot is skipped.

/// Number of people in a booking, or required by a slot.
pub type Headcount = u32;

pub fn from_int(value: i64) -> Headcount {
    value.clamp(0, Headcount::MAX as i64) as Headcount
}

pub fn from_float(value: f64) -> Headcount {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value >= Headcount::MAX as f64 {
        return Headcount::MAX;
    }
    value.trunc() as Headcount
}

pub fn from_text(value: &str) -> Headcount {
    let trimmed = value.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return from_int(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) => from_float(f),
        Err(_) => 0,
    }
}

pub fn from_bool(value: bool) -> Headcount {
    if value { 1 } else { 0 }
}
