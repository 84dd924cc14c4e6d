//! Small numerically-stable helpers used by the interaction model.

/// Stable sigmoid: `1 / (1 + exp(-x))`.
///
/// Single `exp(-|x|)`, so neither tail overflows. `sigmoid(-inf) == 0.0`
/// and `sigmoid(inf) == 1.0` exactly.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let abs_x = x.abs();
    let e = (-abs_x).exp();
    let recip = 1.0 / (1.0 + e);
    // x >= 0: sigmoid = 1/(1+exp(-x)) = recip
    // x <  0: sigmoid = exp(x)/(1+exp(x)) = e/(1+e) = e*recip
    if x >= 0.0 { recip } else { e * recip }
}

/// Hill-type logistic `u^gamma / (1 + u^gamma)` for `u >= 0`.
///
/// Evaluated as `sigmoid(gamma * ln u)`, which stays finite where `u^gamma`
/// overflows. `u == 0` gives exactly 0.
#[inline]
pub fn hill(u: f64, gamma: f64) -> f64 {
    sigmoid(gamma * u.ln())
}
