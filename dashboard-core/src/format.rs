//! Number formatting used by the dashboard.
//!
//! The summary and the stat cards read the same UV source value but round it
//! differently. Both policies live here as separate functions so neither can
//! quietly absorb the other.

/// Display rounding: one decimal place, e.g. `7.84` becomes `"7.8"`.
///
/// Values sitting exactly halfway between two tenths round away from zero
/// (`6.25` becomes `"6.3"`); everything else rounds to the nearest tenth.
pub fn fixed_one_decimal(value: f64) -> String {
    if is_exact_half_tenth(value) {
        // value * 10 is exact here, so round() sees the true tie
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{value:.1}")
}

/// True when `value` is exactly `k / 20` for odd `k`, i.e. ends in `.x5` with
/// no representation error.
fn is_exact_half_tenth(value: f64) -> bool {
    if !value.is_finite() {
        return false;
    }
    let twentieths = value * 20.0;
    twentieths.fract() == 0.0
        && twentieths % 2.0 != 0.0
        && value.mul_add(20.0, -twentieths) == 0.0
}

/// UV index as quoted in the summary text.
///
/// The value is first formatted to one decimal and then only its integer part
/// is kept, so `6.7` reads as `6` and `5.9` as `5`. Returns `None` for
/// non-finite input.
pub fn summary_uv_index(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }

    let fixed = fixed_one_decimal(value);
    let integer_part = fixed.split('.').next()?;
    integer_part.parse().ok()
}

/// Shortest textual form of a number (`35`, `12.3`), as used in prose.
pub fn plain_number(value: f64) -> String {
    // avoid "-0"
    if value == 0.0 { "0".to_string() } else { value.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_one_decimal_rounds() {
        assert_eq!(fixed_one_decimal(7.84), "7.8");
        assert_eq!(fixed_one_decimal(7.86), "7.9");
        assert_eq!(fixed_one_decimal(6.0), "6.0");
        assert_eq!(fixed_one_decimal(-3.04), "-3.0");
        assert_eq!(fixed_one_decimal(6.25), "6.3");
        assert_eq!(fixed_one_decimal(0.25), "0.3");
        assert_eq!(fixed_one_decimal(21.25), "21.3");
        assert_eq!(fixed_one_decimal(6.75), "6.8");
        assert_eq!(fixed_one_decimal(0.05), "0.1");
        assert_eq!(fixed_one_decimal(-6.25), "-6.3");
    }

    #[test]
    fn inexact_halves_follow_their_binary_value() {
        // 1.15 is stored as 1.149999..., 2.35 as 2.350000...1
        assert_eq!(fixed_one_decimal(1.15), "1.1");
        assert_eq!(fixed_one_decimal(2.35), "2.4");
    }

    #[test]
    fn summary_uv_index_keeps_integer_part() {
        assert_eq!(summary_uv_index(6.7), Some(6));
        assert_eq!(summary_uv_index(5.9), Some(5));
        assert_eq!(summary_uv_index(6.0), Some(6));
        assert_eq!(summary_uv_index(7.8), Some(7));
        assert_eq!(summary_uv_index(0.0), Some(0));
    }

    #[test]
    fn summary_uv_index_truncates_after_one_decimal_rounding() {
        // 5.96 is "6.0" at one decimal
        assert_eq!(summary_uv_index(5.96), Some(6));
        assert_eq!(summary_uv_index(5.94), Some(5));
        assert_eq!(summary_uv_index(6.25), Some(6));
        assert_eq!(summary_uv_index(0.25), Some(0));
    }

    #[test]
    fn summary_uv_index_rejects_non_finite() {
        assert_eq!(summary_uv_index(f64::NAN), None);
        assert_eq!(summary_uv_index(f64::INFINITY), None);
    }

    #[test]
    fn policies_disagree_on_the_same_value() {
        assert_eq!(fixed_one_decimal(6.7), "6.7");
        assert_eq!(summary_uv_index(6.7), Some(6));
    }

    #[test]
    fn plain_number_uses_shortest_form() {
        assert_eq!(plain_number(35.0), "35");
        assert_eq!(plain_number(12.3), "12.3");
        assert_eq!(plain_number(-0.0), "0");
    }
}
