// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Easing curve applied to linear animation progress.
///
/// Every curve maps `0.0` to `0.0` and `1.0` to `1.0`. Input outside `[0, 1]`
/// is clamped before evaluation. Some curves (such as [`Easing::Overshoot`])
/// leave `[0, 1]` in between.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// Identity curve.
    Linear,
    /// Exponential decay `1 - e^(-k t)`, normalized so that it reaches exactly
    /// `1.0` at `t = 1`.
    ///
    /// Larger `sharpness` values front-load more of the motion. Non-positive
    /// sharpness degrades to [`Easing::Linear`].
    ExpDecay {
        /// The decay constant `k`.
        sharpness: f64,
    },
    /// Anticipating curve `t³((T + 1) t - T)`: pulls back slightly before
    /// accelerating towards the end.
    Overshoot {
        /// The tension `T`; `0.0` gives a plain cubic ease-in.
        tension: f64,
    },
    /// Ease-out quadratic `1 - (1 - t)²`.
    EaseOutQuad,
    /// Symmetric cubic ease-in-out.
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Default decay curve for scroll settling.
    pub const SCROLL: Self = Self::ExpDecay { sharpness: 5.0 };

    /// Evaluates the curve at `t`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::ExpDecay { sharpness } => {
                if sharpness <= 0.0 {
                    return t;
                }
                let norm = 1.0 - libm::exp(-sharpness);
                (1.0 - libm::exp(-sharpness * t)) / norm
            }
            Self::Overshoot { tension } => t * t * t * ((tension + 1.0) * t - tension),
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::SCROLL,
        Easing::Overshoot { tension: 1.0 },
        Easing::EaseOutQuad,
        Easing::EaseInOutCubic,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-12, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-3.0), easing.apply(0.0));
            assert_eq!(easing.apply(7.0), easing.apply(1.0));
            assert_eq!(easing.apply(f64::NAN), easing.apply(0.0));
        }
    }

    #[test]
    fn exp_decay_front_loads_motion() {
        let half = Easing::SCROLL.apply(0.5);
        assert!(half > 0.5, "decay should be past halfway at t=0.5, got {half}");
        assert!(half < 1.0);
    }

    #[test]
    fn exp_decay_without_sharpness_is_linear() {
        let flat = Easing::ExpDecay { sharpness: 0.0 };
        assert_eq!(flat.apply(0.25), 0.25);
    }

    #[test]
    fn overshoot_dips_below_zero_first() {
        let curve = Easing::Overshoot { tension: 1.0 };
        // t^3 (2t - 1) is negative for t < 0.5.
        assert!(curve.apply(0.25) < 0.0);
        assert!(curve.apply(0.75) > 0.0);
    }

    #[test]
    fn ease_out_quad_matches_formula() {
        assert!((Easing::EaseOutQuad.apply(0.5) - 0.75).abs() < 1e-12);
    }
}
