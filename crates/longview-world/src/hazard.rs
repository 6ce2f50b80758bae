//! Annual hazard rates that grow over time.
//!
//! A [`HazardCurve`] starts at `base_rate` in the catalog's reference year
//! and doubles every `doubling_years` (or stays flat when no doubling
//! period is given). The acceleration multiplier scales the whole curve,
//! and the family cap bounds it:
//!
//! ```text
//! rate(year) = clamp(acceleration * base_rate * 2^((year - reference) / doubling), 0, cap)
//! ```

use serde::Deserialize;

/// An exponentially growing annual event probability.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HazardCurve {
    /// Annual probability of the event in the reference year.
    pub base_rate: f64,

    /// Years for the rate to double; `None` keeps the rate constant.
    #[serde(default)]
    pub doubling_years: Option<f64>,
}

impl HazardCurve {
    /// A curve that never changes.
    pub const fn constant(base_rate: f64) -> Self {
        Self {
            base_rate,
            doubling_years: None,
        }
    }

    /// A curve that doubles every `doubling_years`.
    pub const fn doubling(base_rate: f64, doubling_years: f64) -> Self {
        Self {
            base_rate,
            doubling_years: Some(doubling_years),
        }
    }

    /// Growth factor relative to the reference year.
    pub fn growth(&self, year: i32, reference_year: i32) -> f64 {
        self.doubling_years.map_or(1.0, |doubling| {
            let elapsed = f64::from(year) - f64::from(reference_year);
            (elapsed / doubling).exp2()
        })
    }

    /// The annual event probability in `year`, scaled and capped.
    ///
    /// Never negative; a `NaN` product reads as 0.
    pub fn rate(&self, year: i32, reference_year: i32, acceleration: f64, cap: f64) -> f64 {
        let raw = acceleration * self.base_rate * self.growth(year, reference_year);
        raw.max(0.0).min(cap)
    }

    /// Describe the first out-of-range parameter, if any.
    pub(crate) fn problem(&self) -> Option<String> {
        if !(0.0..=1.0).contains(&self.base_rate) {
            return Some(format!("base rate {} is outside [0, 1]", self.base_rate));
        }
        match self.doubling_years {
            Some(doubling) if !doubling.is_finite() || doubling <= 0.0 => Some(format!(
                "doubling period {doubling} must be finite and positive"
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_curve_ignores_year() {
        let curve = HazardCurve::constant(0.004);
        let early = curve.rate(2022, 2022, 1.0, 1.0);
        let late = curve.rate(2100, 2022, 1.0, 1.0);
        assert!((early - 0.004).abs() < 1e-15);
        assert!((late - 0.004).abs() < 1e-15);
    }

    #[test]
    fn doubling_curve_doubles_on_schedule() {
        let curve = HazardCurve::doubling(0.01, 10.0);
        assert!((curve.rate(2022, 2022, 1.0, 1.0) - 0.01).abs() < 1e-15);
        assert!((curve.rate(2032, 2022, 1.0, 1.0) - 0.02).abs() < 1e-12);
        assert!((curve.rate(2012, 2022, 1.0, 1.0) - 0.005).abs() < 1e-12);
    }

    #[test]
    fn acceleration_scales_and_cap_bounds() {
        let curve = HazardCurve::doubling(0.02, 5.0);
        assert!((curve.rate(2022, 2022, 1.5, 1.0) - 0.03).abs() < 1e-12);
        assert!((curve.rate(2200, 2022, 1.0, 0.9) - 0.9).abs() < f64::EPSILON);
        assert!(curve.rate(2022, 2022, 0.0, 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn problem_flags_bad_parameters() {
        assert!(HazardCurve::constant(0.5).problem().is_none());
        assert!(HazardCurve::constant(1.5).problem().is_some());
        assert!(HazardCurve::constant(f64::NAN).problem().is_some());
        assert!(HazardCurve::doubling(0.1, 0.0).problem().is_some());
        assert!(HazardCurve::doubling(0.1, f64::INFINITY).problem().is_some());
    }
}
