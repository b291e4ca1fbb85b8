//! Variate generators.
//!
//! Each generator validates its parameters and the sample size before the
//! first draw, then consumes the [`RandomSource`] sequentially and returns
//! exactly `n` values.
//!
//! | Family | Method |
//! |--------|--------|
//! | Uniform | direct linear transform `a + (b - a) u` |
//! | Exponential | inverse CDF `-ln(u) / lambda`, u in (0, 1) |
//! | Poisson | Knuth's multiplicative method |
//! | Normal | Box-Muller, two variates per pair of draws |

use std::f64::consts::TAU;

use crate::error::Result;
use crate::params::{
    validate_normal, validate_poisson, validate_rate, validate_sample_size, validate_uniform,
};
use crate::rng::{draw_open_unit, RandomSource};

/// Generates `n` uniform variates in [a, b).
///
/// # Examples
///
/// ```rust
/// use variate_core::generators::generate_uniform;
/// use variate_core::rng::SeededSource;
///
/// let mut rng = SeededSource::from_seed(42);
/// let xs = generate_uniform(2.0, 4.0, 100, &mut rng).unwrap();
/// assert!(xs.iter().all(|&x| (2.0..4.0).contains(&x)));
/// ```
pub fn generate_uniform<R: RandomSource + ?Sized>(
    a: f64,
    b: f64,
    n: usize,
    source: &mut R,
) -> Result<Vec<f64>> {
    validate_uniform(a, b)?;
    validate_sample_size(n)?;

    let span = b - a;
    let values = (0..n)
        .map(|_| {
            let x = a + span * source.next_uniform();
            // a + span * u can round up to b for u just below 1
            if x >= b {
                prev_float(b)
            } else {
                x
            }
        })
        .collect();
    Ok(values)
}

/// Generates `n` exponential variates with rate `lambda`.
///
/// Inverse-CDF method. `1 - U` and `U` are identically distributed, so the
/// transform is applied as `-ln(u) / lambda` with `u` drawn from the open
/// interval (0, 1), which keeps the logarithm finite.
pub fn generate_exponential<R: RandomSource + ?Sized>(
    lambda: f64,
    n: usize,
    source: &mut R,
) -> Result<Vec<f64>> {
    validate_rate("lambda", lambda)?;
    validate_sample_size(n)?;

    let values = (0..n)
        .map(|_| -draw_open_unit(source).ln() / lambda)
        .collect();
    Ok(values)
}

/// Generates `n` Poisson variates with rate `lambda` (Knuth).
///
/// Per variate: multiply uniforms into a running product until it falls to
/// `e^(-lambda)` or below; the number of factors minus one is the variate.
/// Expected cost per variate is `lambda + 1` draws, so large rates are slow.
pub fn generate_poisson<R: RandomSource + ?Sized>(
    lambda: f64,
    n: usize,
    source: &mut R,
) -> Result<Vec<u64>> {
    validate_poisson(lambda)?;
    validate_sample_size(n)?;

    let threshold = (-lambda).exp();
    let values = (0..n)
        .map(|_| {
            let mut k: u64 = 0;
            let mut p = 1.0;
            while p > threshold {
                k += 1;
                p *= source.next_uniform();
            }
            k - 1
        })
        .collect();
    Ok(values)
}

/// Generates `n` normal variates with mean `mu` and standard deviation `sigma`.
///
/// Box-Muller: each pair `(u1, u2)` yields
/// `r cos(2 pi u2)` and `r sin(2 pi u2)` with `r = sqrt(-2 ln u1)`.
/// For odd `n` the sine half of the final pair is discarded.
pub fn generate_normal<R: RandomSource + ?Sized>(
    mu: f64,
    sigma: f64,
    n: usize,
    source: &mut R,
) -> Result<Vec<f64>> {
    validate_normal(mu, sigma)?;
    validate_sample_size(n)?;

    let mut values = Vec::with_capacity(n);
    while values.len() < n {
        let u1 = draw_open_unit(source);
        let u2 = source.next_uniform();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = TAU * u2;

        values.push(mu + sigma * radius * angle.cos());
        if values.len() < n {
            values.push(mu + sigma * radius * angle.sin());
        }
    }
    Ok(values)
}

/// Largest `f64` strictly below a finite `x`.
fn prev_float(x: f64) -> f64 {
    if x == 0.0 {
        return -f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}
