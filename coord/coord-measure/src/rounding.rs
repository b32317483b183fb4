//! Fixed-decimal rounding for reported measurements.
//!
//! Every rounded value in this crate goes through [`round_to_places`], which
//! uses round-half-away-from-zero on the value scaled by `10^places`. The
//! rule is fixed so results are reproducible across platforms.

use crate::{MeasureError, MeasureResult};

/// Number of fractional digits used when a caller has no preference.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Largest number of fractional digits accepted.
///
/// An `f64` carries roughly 15-17 significant decimal digits, so asking for
/// more than this cannot change the result.
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Rounds `value` to `places` fractional digits, halves away from zero.
///
/// Non-finite values are returned unchanged. Values whose magnitude is too
/// large to scale without overflow are already integral at this precision
/// and are also returned unchanged.
///
/// # Errors
///
/// Returns [`MeasureError::DecimalPlacesOutOfRange`] if `places` exceeds
/// [`MAX_DECIMAL_PLACES`].
///
/// # Example
///
/// ```
/// use coord_measure::round_to_places;
///
/// assert_eq!(round_to_places(1.23456, 2).unwrap(), 1.23);
/// assert_eq!(round_to_places(2.5, 0).unwrap(), 3.0);
/// assert_eq!(round_to_places(-2.5, 0).unwrap(), -3.0);
/// ```
pub fn round_to_places(value: f64, places: u32) -> MeasureResult<f64> {
    let exponent = checked_exponent(places)?;
    if !value.is_finite() {
        return Ok(value);
    }

    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return Ok(value);
    }

    Ok(scaled.round() / factor)
}

/// Formats `value` as a fixed-point string with exactly `places` digits.
///
/// The digits are produced from [`round_to_places`], so the string never uses
/// scientific notation and always agrees with the numeric rounding.
///
/// # Errors
///
/// Returns [`MeasureError::DecimalPlacesOutOfRange`] if `places` exceeds
/// [`MAX_DECIMAL_PLACES`].
///
/// # Example
///
/// ```
/// use coord_measure::format_fixed;
///
/// assert_eq!(format_fixed(1.0 / 3.0, 2).unwrap(), "0.33");
/// assert_eq!(format_fixed(5.0, 3).unwrap(), "5.000");
/// assert_eq!(format_fixed(1.0e-7, 2).unwrap(), "0.00");
/// ```
pub fn format_fixed(value: f64, places: u32) -> MeasureResult<String> {
    let rounded = round_to_places(value, places)?;
    let precision = places as usize;
    Ok(format!("{rounded:.precision$}"))
}

fn checked_exponent(places: u32) -> MeasureResult<i32> {
    let out_of_range = MeasureError::DecimalPlacesOutOfRange {
        requested: places,
        max: MAX_DECIMAL_PLACES,
    };
    if places > MAX_DECIMAL_PLACES {
        return Err(out_of_range);
    }
    i32::try_from(places).map_err(|_| out_of_range)
}
