use serde::{Deserialize, Serialize};

/// How to pick the upper end of the color scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmaxRule {
    /// A fixed value.
    Fixed(f64),
    /// The largest value.
    Max,
    /// The smallest value among the largest `fraction` of values.
    TopFraction(f64),
}

impl Default for VmaxRule {
    fn default() -> Self { VmaxRule::TopFraction(0.1) }
}

/// How to pick the lower end of the color scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VminRule {
    #[default]
    Zero,
    /// The smallest among the smallest `fraction` of values, i.e. the minimum
    /// as long as that fraction covers at least one value.
    BottomFraction(f64),
}

/// Normalization bounds for mapping values onto a colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormBounds {
    pub vmin: f64,
    pub vmax: f64,
}

impl NormBounds {
    /// Compute bounds for `values`. Percentages always scale over `[0, 1]`.
    ///
    /// Returns `None` if a rule needs values that are not there: an empty input, or a
    /// fraction that rounds down to zero values.
    pub fn compute(values: &[f64], vmax: VmaxRule, vmin: VminRule, percentage: bool) -> Option<Self> {
        if percentage {
            return Some(Self { vmin: 0.0, vmax: 1.0 });
        }

        let count = |fraction: f64| (fraction * values.len() as f64) as usize;

        let vmax = match vmax {
            VmaxRule::Fixed(v) => v,
            VmaxRule::Max => values.iter().copied().max_by(f64::total_cmp)?,
            VmaxRule::TopFraction(fraction) => {
                let n = count(fraction);
                if n == 0 { return None }
                let mut sorted = values.to_vec();
                sorted.sort_unstable_by(|a, b| b.total_cmp(a));
                *sorted.get(n - 1)?
            }
        };

        let vmin = match vmin {
            VminRule::Zero => 0.0,
            VminRule::BottomFraction(fraction) => {
                if count(fraction) == 0 { return None }
                values.iter().copied().min_by(f64::total_cmp)?
            }
        };

        Some(Self { vmin, vmax })
    }

    /// Map `value` into `[0, 1]`, clipping values outside the bounds.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.vmax == self.vmin { return 0.0 }
        ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_values() -> Vec<f64> {
        (1..=20).map(|v| v as f64).collect()
    }

    #[test]
    fn top_fraction_picks_nth_largest() {
        // 10% of 20 values = 2 -> second largest
        let bounds = NormBounds::compute(&make_values(), VmaxRule::TopFraction(0.1), VminRule::Zero, false).unwrap();
        assert_eq!(bounds, NormBounds { vmin: 0.0, vmax: 19.0 });
    }

    #[test]
    fn max_and_fixed_rules() {
        let values = make_values();
        assert_eq!(NormBounds::compute(&values, VmaxRule::Max, VminRule::Zero, false).unwrap().vmax, 20.0);
        assert_eq!(NormBounds::compute(&values, VmaxRule::Fixed(7.5), VminRule::Zero, false).unwrap().vmax, 7.5);
    }

    #[test]
    fn bottom_fraction_is_minimum() {
        let bounds = NormBounds::compute(&make_values(), VmaxRule::Max, VminRule::BottomFraction(0.5), false).unwrap();
        assert_eq!(bounds.vmin, 1.0);
    }

    #[test]
    fn percentage_forces_unit_range() {
        let bounds = NormBounds::compute(&[], VmaxRule::Max, VminRule::Zero, true).unwrap();
        assert_eq!(bounds, NormBounds { vmin: 0.0, vmax: 1.0 });
    }

    #[test]
    fn empty_selection_has_no_bounds() {
        assert!(NormBounds::compute(&[], VmaxRule::Max, VminRule::Zero, false).is_none());
        assert!(NormBounds::compute(&[1.0, 2.0], VmaxRule::TopFraction(0.1), VminRule::Zero, false).is_none());
        assert!(NormBounds::compute(&[1.0, 2.0], VmaxRule::Max, VminRule::BottomFraction(0.1), false).is_none());
    }

    #[test]
    fn normalize_clips() {
        let bounds = NormBounds { vmin: 0.0, vmax: 10.0 };
        assert_eq!(bounds.normalize(5.0), 0.5);
        assert_eq!(bounds.normalize(50.0), 1.0);
        assert_eq!(bounds.normalize(-1.0), 0.0);
    }
}
