//! Performance classification of a consumption variance against a tolerance.

use serde::{Deserialize, Serialize};

/// How a fill's consumption rate compares to the vehicle's norm.
///
/// | Variance                     | Status    |
/// |------------------------------|-----------|
/// | within ±tolerance (incl.)    | normal    |
/// | below −tolerance             | poor      |
/// | above +tolerance             | excellent |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceStatus {
    Normal,
    Poor,
    Excellent,
}

impl PerformanceStatus {
    /// Any excursion outside tolerance, in either direction, requires a
    /// driver debrief.
    pub fn requires_debrief(self) -> bool {
        self != PerformanceStatus::Normal
    }
}

/// Classifies a variance percentage. The boundary is inclusive: a variance
/// of exactly ±tolerance is still normal.
pub fn classify(variance_pct: f64, tolerance_pct: f64) -> PerformanceStatus {
    if variance_pct.abs() <= tolerance_pct {
        PerformanceStatus::Normal
    } else if variance_pct < -tolerance_pct {
        PerformanceStatus::Poor
    } else {
        PerformanceStatus::Excellent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.0, 10.0), PerformanceStatus::Normal);
        assert_eq!(classify(10.0, 10.0), PerformanceStatus::Normal);
        assert_eq!(classify(-10.0, 10.0), PerformanceStatus::Normal);
        assert_eq!(classify(10.1, 10.0), PerformanceStatus::Excellent);
        assert_eq!(classify(-10.1, 10.0), PerformanceStatus::Poor);
        assert_eq!(classify(-25.0, 10.0), PerformanceStatus::Poor);
        assert_eq!(classify(30.0, 10.0), PerformanceStatus::Excellent);
    }

    #[test]
    fn test_debrief_required_outside_tolerance_both_directions() {
        assert!(!classify(-10.0, 10.0).requires_debrief());
        assert!(classify(-10.1, 10.0).requires_debrief());
        assert!(classify(11.1, 10.0).requires_debrief());
    }
}
