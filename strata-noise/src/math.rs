//! Numeric helpers shared by every noise module.
//!
//! All evaluation happens in `f32`. Transcendental functions are computed in `f64`
//! and narrowed afterwards so results stay stable across platforms.

use std::f32::consts;

/// `π` in single precision.
pub const PI: f32 = consts::PI;
/// `√2` in single precision.
pub const SQRT_2: f32 = consts::SQRT_2;
/// `√3` in single precision.
#[allow(clippy::excessive_precision, reason = "kept as a literal for clarity")]
pub const SQRT_3: f32 = 1.732_050_807_568_877_293_5;
/// `√5` in single precision.
#[allow(clippy::excessive_precision, reason = "kept as a literal for clarity")]
pub const SQRT_5: f32 = 2.236_067_977_499_789_696_4;
/// Degrees to radians.
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// Radians to degrees.
pub const RAD_TO_DEG: f32 = 1.0 / DEG_TO_RAD;

/// Linear interpolation: `a + t * (b - a)`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Linear interpolation between two bytes, treated as normalized `[0, 1]` channels.
#[inline]
#[must_use]
pub fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let c0 = f32::from(a) / 255.0;
    let c1 = f32::from(b) / 255.0;
    ((c0 + t * (c1 - c0)) * 255.0) as u8
}

/// Cubic interpolation between `n1` and `n2` using the outer samples `n0` and `n3`.
///
/// Returns `n1` at `a = 0` and `n2` at `a = 1`.
#[inline]
#[must_use]
pub fn cerp(n0: f32, n1: f32, n2: f32, n3: f32, a: f32) -> f32 {
    let p = (n3 - n2) - (n0 - n1);
    let q = (n0 - n1) - p;
    let r = n2 - n0;
    let s = n1;
    p * a * a * a + q * a * a + r * a + s
}

/// Cubic S-curve `t²(3 − 2t)`. First derivative is zero at both ends.
#[inline]
#[must_use]
pub fn s_curve3(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Quintic S-curve `t³(6t² − 15t + 10)`. First and second derivatives are zero at both ends.
#[inline]
#[must_use]
pub fn s_curve5(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Saturates `value` into `[lower, upper]`.
///
/// Unlike [`f32::clamp`] this never panics when the bounds are inverted; the lower
/// bound wins in that case.
#[inline]
#[must_use]
pub fn clamp(value: f32, lower: f32, upper: f32) -> f32 {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

/// Saturates `value` into `[0, 1]`.
#[inline]
#[must_use]
pub fn clamp01(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Integer variant of [`clamp`].
#[inline]
#[must_use]
pub const fn clamp_i32(value: i32, lower: i32, upper: i32) -> i32 {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

/// Floor to the lattice cell: `x >= 0 ? trunc(x) : trunc(x) - 1`.
///
/// Truncation rounds toward zero, so negative inputs need the extra step. Note that
/// negative integers land one cell lower than `f32::floor` would put them; every
/// lattice generator relies on this exact convention.
#[inline]
#[must_use]
pub const fn fast_floor(x: f32) -> i32 {
    if x >= 0.0 { x as i32 } else { x as i32 - 1 }
}

/// Folds a value into the signed 32-bit integer range so lattice coordinates
/// computed from it cannot overflow.
#[must_use]
pub fn to_int32_range(value: f64) -> f64 {
    const RANGE: f64 = 1_073_741_824.0;
    if value >= RANGE {
        2.0 * ieee_remainder(value, RANGE) - RANGE
    } else if value <= -RANGE {
        2.0 * ieee_remainder(value, RANGE) + RANGE
    } else {
        value
    }
}

/// IEEE 754 remainder: `x - y * round_half_even(x / y)`.
fn ieee_remainder(x: f64, y: f64) -> f64 {
    let quotient = x / y;
    let mut rounded = quotient.round();
    // `round` goes away from zero on ties; IEEE wants the even neighbour.
    if (quotient - quotient.trunc()).abs() == 0.5 {
        rounded = 2.0 * (quotient / 2.0).round();
    }
    x - y * rounded
}

/// Converts latitude/longitude in degrees to a point on the unit sphere.
#[must_use]
pub fn lat_lon_to_xyz(lat: f32, lon: f32) -> [f32; 3] {
    let lat = f64::from(DEG_TO_RAD * lat);
    let lon = f64::from(DEG_TO_RAD * lon);
    let r = lat.cos() as f32;
    [
        r * lon.cos() as f32,
        lat.sin() as f32,
        r * lon.sin() as f32,
    ]
}
