//! Aggregation of packed volume and weight.

/// Raw sums over a list of placements.
///
/// Volume is in mm³; weight is in whatever unit the producing strategy
/// accumulates in, and is converted by that strategy once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// Number of placements folded in.
    pub count: usize,
    /// Sum of occupied volumes, mm³.
    pub volume_mm3: f64,
    /// Sum of weights.
    pub weight: f64,
}

impl Totals {
    /// Adds one placement.
    pub fn add(self, volume_mm3: f64, weight: f64) -> Self {
        Self {
            count: self.count + 1,
            volume_mm3: self.volume_mm3 + volume_mm3,
            weight: self.weight + weight,
        }
    }
}

impl FromIterator<(f64, f64)> for Totals {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Totals::default(), |acc, (volume, weight)| acc.add(volume, weight))
    }
}

/// Percentage of `capacity` consumed by `used`.
///
/// Returns 0 when the capacity is zero (or not a positive number).
pub fn utilization_percent(used: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        used / capacity * 100.0
    } else {
        0.0
    }
}
