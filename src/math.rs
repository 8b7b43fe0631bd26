//! Integer wrap-around and angle arithmetic shared by the scale model and the wheel.

/// Returns the integer division and remainder with `numer` being an `i32` and `denom` being an `u32`.
///
/// The resulting remainder is a *positive* number between 0 and `denom-1` with `result.0 * denom + result.1 = numer`.
///
/// # Panics
///
/// Panics if `numer == i32::MIN` or `denom == 0`.
///
/// # Examples
///
/// ```
/// # use scale_wheel::math;
/// assert_eq!(math::div_mod_i32(6, 7), (0, 6));
/// assert_eq!(math::div_mod_i32(7, 7), (1, 0));
/// assert_eq!(math::div_mod_i32(-1, 7), (-1, 6));
/// assert_eq!(math::div_mod_i32(-7, 7), (-1, 0));
/// assert_eq!(math::div_mod_i32(-8, 7), (-2, 6));
/// ```
pub fn div_mod_i32(numer: i32, denom: u32) -> (i32, u32) {
    if numer >= 0 {
        let pos_numer = numer as u32;
        let division = (pos_numer / denom) as i32;
        let remainder = pos_numer % denom;
        (division, remainder)
    } else {
        let neg_numer = -numer as u32;
        let division = (neg_numer / denom) as i32;
        let remainder = neg_numer % denom;
        if remainder != 0 {
            (-division - 1, denom - remainder)
        } else {
            (-division, 0)
        }
    }
}

/// Wraps an angle difference into the half-open range (-180°, 180°].
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use scale_wheel::math;
/// assert_approx_eq!(math::unwrap_degrees(10.0), 10.0);
/// assert_approx_eq!(math::unwrap_degrees(350.0), -10.0);
/// assert_approx_eq!(math::unwrap_degrees(-350.0), 10.0);
/// assert_approx_eq!(math::unwrap_degrees(-180.0), 180.0);
/// assert_approx_eq!(math::unwrap_degrees(180.0), 180.0);
/// ```
pub fn unwrap_degrees(delta: f64) -> f64 {
    let wrapped = (delta + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}
