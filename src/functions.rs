//! Scientific function library.
//!
//! Pure numeric operations that the evaluator dispatches to. Each operation checks its
//! domain before delegating to floating-point math and rejects exactly the documented
//! conditions; everything else (NaN, infinities, negative bases with fractional
//! exponents) follows IEEE-754 behavior.
//!
//! Trigonometric functions take their angle in degrees.
//!
//! With the default `libm` feature the transcendental functions come from the `libm`
//! crate; without it, from the `f64` inherent methods.

#[cfg(feature = "libm")]
use libm::{
    cos as libm_cos, exp as libm_exp, log as libm_ln, log10 as libm_log10, pow as libm_pow,
    sin as libm_sin, sqrt as libm_sqrt, tan as libm_tan,
};

#[cfg(not(feature = "libm"))]
mod std_math {
    pub fn libm_cos(x: f64) -> f64 {
        x.cos()
    }
    pub fn libm_exp(x: f64) -> f64 {
        x.exp()
    }
    pub fn libm_ln(x: f64) -> f64 {
        x.ln()
    }
    pub fn libm_log10(x: f64) -> f64 {
        x.log10()
    }
    pub fn libm_pow(x: f64, y: f64) -> f64 {
        x.powf(y)
    }
    pub fn libm_sin(x: f64) -> f64 {
        x.sin()
    }
    pub fn libm_sqrt(x: f64) -> f64 {
        x.sqrt()
    }
    pub fn libm_tan(x: f64) -> f64 {
        x.tan()
    }
}
#[cfg(not(feature = "libm"))]
use std_math::*;

use crate::constants::TANGENT_TOLERANCE;
use crate::error::{EvalError, Result};

/// Adds two values.
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Subtracts the second value from the first.
pub fn sub(a: f64, b: f64) -> f64 {
    a - b
}

/// Multiplies two values.
pub fn mul(a: f64, b: f64) -> f64 {
    a * b
}

/// Divides the first value by the second.
///
/// # Errors
///
/// [`EvalError::DivisionByZero`] when `b` is zero (`0.0` or `-0.0`).
pub fn div(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(a / b)
}

/// Sine of an angle given in degrees.
pub fn sin(angle: f64) -> f64 {
    libm_sin(deg_to_rad(angle))
}

/// Cosine of an angle given in degrees.
pub fn cos(angle: f64) -> f64 {
    libm_cos(deg_to_rad(angle))
}

/// Tangent of an angle given in degrees.
///
/// The angle is reduced with a truncating remainder (`angle % 180`, sign of the
/// dividend), so 90, 270 and -270 are rejected while -90 is not.
///
/// # Errors
///
/// [`EvalError::UndefinedTangent`] when the reduced angle is within
/// [`TANGENT_TOLERANCE`] of 90.
pub fn tan(angle: f64) -> Result<f64> {
    let reduced = angle % 180.0;
    if (reduced - 90.0).abs() < TANGENT_TOLERANCE {
        return Err(EvalError::UndefinedTangent { angle });
    }
    Ok(libm_tan(deg_to_rad(angle)))
}

/// Raises `base` to `exponent`. Never fails; a negative base with a fractional
/// exponent yields NaN.
pub fn pow(base: f64, exponent: f64) -> f64 {
    libm_pow(base, exponent)
}

/// Square root.
///
/// # Errors
///
/// [`EvalError::NegativeRadicand`] when `x < 0`.
pub fn sqrt(x: f64) -> Result<f64> {
    if x < 0.0 {
        return Err(EvalError::NegativeRadicand { value: x });
    }
    Ok(libm_sqrt(x))
}

/// The `n`-th root of `x`, computed as `x^(1/n)`.
///
/// Only a root index that is exactly even under floating-point remainder is
/// rejected for a negative `x`; odd roots of negative numbers go through `pow` and
/// produce NaN.
///
/// # Errors
///
/// [`EvalError::NegativeEvenRoot`] when `x < 0` and `n % 2 == 0`.
pub fn nth_root(x: f64, n: f64) -> Result<f64> {
    if x < 0.0 && n % 2.0 == 0.0 {
        return Err(EvalError::NegativeEvenRoot {
            value: x,
            degree: n,
        });
    }
    Ok(libm_pow(x, 1.0 / n))
}

/// Base-10 logarithm.
///
/// # Errors
///
/// [`EvalError::NonPositiveLogArgument`] when `x <= 0`.
pub fn log(x: f64) -> Result<f64> {
    if x <= 0.0 {
        return Err(EvalError::NonPositiveLogArgument { value: x });
    }
    Ok(libm_log10(x))
}

/// Natural logarithm.
///
/// # Errors
///
/// [`EvalError::NonPositiveLogArgument`] when `x <= 0`.
pub fn ln(x: f64) -> Result<f64> {
    if x <= 0.0 {
        return Err(EvalError::NonPositiveLogArgument { value: x });
    }
    Ok(libm_ln(x))
}

/// `e` raised to `x`.
pub fn exp(x: f64) -> f64 {
    libm_exp(x)
}

/// Converts degrees to radians.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}
