/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of an accumulated Kelvin sum, converted to Celsius and rounded.
/// Returns `None` when nothing was accumulated.
pub fn average_celsius(sum_kelvin: f64, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some(round2(sum_kelvin / count as f64 - KELVIN_OFFSET))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(26.850000000000023), 26.85);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(12.0), 12.0);
    }

    #[test]
    fn test_average_celsius_empty() {
        assert_eq!(average_celsius(0.0, 0), None);
    }

    #[test]
    fn test_average_celsius() {
        assert_eq!(average_celsius(602.0, 2), Some(27.85));
        assert_eq!(average_celsius(273.15, 1), Some(0.0));
    }
}
