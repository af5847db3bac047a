//! Safe numeric conversion helpers for pixel coordinates.

use crate::{Error, Result};

/// Safely convert u32 to i32 with overflow checking
///
/// # Errors
///
/// Returns an error if the value exceeds `i32::MAX`
pub fn u32_to_i32(value: u32) -> Result<i32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} too large to fit in i32")))
}

/// Safely convert f64 to i32 with bounds checking
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Clamp and convert f64 to i32 for pixel coordinates, truncating toward
/// zero
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i32_clamp(value: f64, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(f64::from(min), f64::from(max));
    (clamped as i32).clamp(min, max)
}
