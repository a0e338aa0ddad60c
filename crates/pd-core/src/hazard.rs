//! Demographic hazard curves and the small numerical helpers they need.
//!
//! All rates here are *annual*: callers scale them by the step's year
//! fraction (`Clock::year_fraction`) before drawing against them.
//!
//! | Curve                  | Form                                                  |
//! |------------------------|-------------------------------------------------------|
//! | [`Gompertz`]           | `0` below onset, else `floor + a·exp(b(x − onset))`   |
//! | [`PartneringHazard`]   | `a·exp(−α(x − μ) − exp(−λ(x − μ)))`                   |
//! | [`Hadwiger`]           | `a·(b/c)·(c/x)^1.5·exp(−b²(c/x + x/c − 2))`           |
//! | [`SubsequentFertility`]| `a·exp(−b(t − μ)²)`, `t` = years since last birth     |
//! | [`Fecundity`]          | `a − b(x − μ) − c(x − μ)²`                            |

/// Largest value [`Gompertz::rate`] returns, so a single step can never make
/// death certain.
pub const MAX_MORTALITY: f64 = 1.0 - 1e-9;

// ── Mortality ─────────────────────────────────────────────────────────────────

/// Gompertz-type annual mortality hazard.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gompertz {
    pub a:     f64,
    pub b:     f64,
    pub floor: f64,
    pub onset: f64,
}

impl Gompertz {
    /// Annual probability of death at `age` years.  Exactly `0` strictly
    /// below the onset age, otherwise in `[0, 1)`.
    pub fn rate(&self, age: f64) -> f64 {
        if age < self.onset {
            return 0.0;
        }
        (self.floor + self.a * (self.b * (age - self.onset)).exp()).clamp(0.0, MAX_MORTALITY)
    }

    /// `1 / Π(1 − rate(a))` for each age `a` in `0..ages`: the factor by which
    /// the survivors of a birth cohort undercount its original size.
    pub fn survival_inflators(&self, ages: usize) -> Vec<f64> {
        let mut survival = 1.0;
        (0..ages)
            .map(|age| {
                survival *= 1.0 - self.rate(age as f64);
                1.0 / survival
            })
            .collect()
    }
}

// ── Partnering ────────────────────────────────────────────────────────────────

/// Annual hazard of entering the marriage market.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PartneringHazard {
    pub a:      f64,
    pub alpha:  f64,
    pub mu:     f64,
    pub lambda: f64,
}

impl PartneringHazard {
    pub fn rate(&self, age: f64) -> f64 {
        let x = age - self.mu;
        self.a * (-self.alpha * x - (-self.lambda * x).exp()).exp()
    }
}

// ── Fertility ─────────────────────────────────────────────────────────────────

/// Hadwiger baseline fertility schedule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hadwiger {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Hadwiger {
    /// Annual birth rate at `age` years.  Zero for non-positive ages.
    pub fn rate(&self, age: f64) -> f64 {
        if age <= 0.0 {
            return 0.0;
        }
        let Hadwiger { a, b, c } = *self;
        a * (b / c) * (c / age).powf(1.5) * (-b * b * (c / age + age / c - 2.0)).exp()
    }
}

/// Rate of a further birth as a function of years since the previous one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SubsequentFertility {
    pub a:  f64,
    pub b:  f64,
    pub mu: f64,
}

impl SubsequentFertility {
    pub fn rate(&self, years_since_birth: f64) -> f64 {
        self.a * (-self.b * (years_since_birth - self.mu).powi(2)).exp()
    }
}

/// Age-dependent fecundity.  A quadratic, so it goes negative far from `mu`;
/// a negative value simply never passes a uniform draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fecundity {
    pub a:  f64,
    pub b:  f64,
    pub c:  f64,
    pub mu: f64,
}

impl Fecundity {
    pub fn rate(&self, age: f64) -> f64 {
        let x = age - self.mu;
        self.a - self.b * x - self.c * x * x
    }
}

// ── Numerical helpers ─────────────────────────────────────────────────────────

#[inline]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Unnormalised Gaussian-shaped weight `exp(−d² / var)`.
#[inline]
pub fn gaussian_kernel(distance: f64, var: f64) -> f64 {
    (-(distance * distance) / var).exp()
}

/// Standard normal CDF Φ(x).
///
/// Uses the complementary error function approximation of Numerical Recipes
/// (`erfc` via Chebyshev fit, |error| < 1.2e-7).
pub fn normal_cdf(x: f64) -> f64 {
    let z = x.abs() / std::f64::consts::SQRT_2;
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let erfc = t * poly.exp();
    if x >= 0.0 { 1.0 - 0.5 * erfc } else { 0.5 * erfc }
}

/// Inverse standard normal CDF Φ⁻¹(p) (Acklam's rational approximation,
/// relative error < 1.2e-9).  Returns ±∞ at the ends of `[0, 1]`.
pub fn probit(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}
