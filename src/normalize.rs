/// Logarithmic scaling onto [0, 100]. Raw platform counters are long-tailed,
/// so the log compresses outliers while still rewarding growth at low counts.
pub fn normalize_value(value: f64, max_value: f64) -> u32 {
    if value <= 0.0 || max_value <= 0.0 {
        return 0;
    }
    if value >= max_value {
        return 100;
    }
    (100.0 * (value + 1.0).ln() / (max_value + 1.0).ln()).round() as u32
}

/// Proportional scaling onto [0, 100], for rate-like or already-bounded
/// quantities where proportionality beats log compression.
pub fn linear_normalize(value: f64, max_value: f64) -> u32 {
    if value <= 0.0 || max_value <= 0.0 {
        return 0;
    }
    (100.0 * value / max_value).round().min(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_scale_caps_at_the_ceiling() {
        assert_eq!(normalize_value(1000.0, 1000.0), 100);
        assert_eq!(normalize_value(5000.0, 1000.0), 100);
    }

    #[test]
    fn log_scale_floors_at_zero() {
        assert_eq!(normalize_value(0.0, 1000.0), 0);
        assert_eq!(normalize_value(-5.0, 1000.0), 0);
    }

    #[test]
    fn log_scale_compresses_the_tail() {
        let low = normalize_value(10.0, 1000.0);
        let mid = normalize_value(100.0, 1000.0);
        let high = normalize_value(900.0, 1000.0);
        assert!(low < mid && mid < high);
        // Growth at low counts is worth more than the same growth near the cap.
        assert!(mid - low > high - mid);
    }

    #[test]
    fn linear_scale_caps_and_floors() {
        assert_eq!(linear_normalize(50.0, 50.0), 100);
        assert_eq!(linear_normalize(120.0, 50.0), 100);
        assert_eq!(linear_normalize(0.0, 50.0), 0);
        assert_eq!(linear_normalize(25.0, 50.0), 50);
    }

    #[test]
    fn results_stay_within_bounds() {
        for v in [0.0, 1.0, 7.0, 499.0, 500.0, 501.0, 1_000_000.0] {
            assert!(normalize_value(v, 500.0) <= 100);
            assert!(linear_normalize(v, 500.0) <= 100);
        }
    }
}
