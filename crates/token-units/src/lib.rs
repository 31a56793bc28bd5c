//! Conversions between on-chain integer amounts and human-readable decimal
//! strings.
//!
//! All arithmetic is done on [U256]; floating point is never involved, so the
//! conversions are exact for any amount that fits the coin's decimal count.

use alloy_primitives::U256;

/// Decimal count of the gwei denomination (1 gwei = 10^9 wei).
pub const GWEI_DECIMALS: u8 = 9;

/// Amounts below this floor are displayed as a bounded lower-bound string.
pub const DISPLAY_FLOOR: &str = "< 0.001";

/// Amounts above 10^15 are displayed as a bounded upper-bound string.
pub const DISPLAY_CAP: &str = "> 1000T";

/// Maximum number of fractional digits kept when formatting for display.
const MAX_DISPLAY_DECIMALS: usize = 5;

/// Converts a decimal amount string into its smallest-unit representation.
///
/// Accepts plain integers ("12") and decimal fractions ("2.5"). Returns
/// `None` for malformed input or when the fraction has more digits than
/// `decimals` allows.
pub fn to_smallest_unit(amount: &str, decimals: u8) -> Option<U256> {
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if frac_part.len() > decimals as usize {
        return None;
    }

    let int = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10).ok()?
    };

    let scale = U256::from(10u8).pow(U256::from(decimals));
    let mut result = int.checked_mul(scale)?;

    if !frac_part.is_empty() {
        let frac = U256::from_str_radix(frac_part, 10).ok()?;
        let frac_scale = U256::from(10u8).pow(U256::from(decimals as usize - frac_part.len()));
        result = result.checked_add(frac * frac_scale)?;
    }

    Some(result)
}

/// Converts a smallest-unit amount into a decimal string, trimming trailing
/// fractional zeros.
pub fn from_smallest_unit(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10u8).pow(U256::from(decimals));
    let int = amount / scale;
    let rem = amount % scale;

    if rem.is_zero() {
        return int.to_string();
    }

    let mut frac = format!("{:0>width$}", rem.to_string(), width = decimals as usize);
    while frac.ends_with('0') {
        frac.pop();
    }

    format!("{int}.{frac}")
}

/// Converts a decimal gwei string into wei.
pub fn gwei_to_wei(amount: &str) -> Option<U256> {
    to_smallest_unit(amount, GWEI_DECIMALS)
}

/// Converts a wei amount into a decimal gwei string.
pub fn wei_to_gwei(wei: U256) -> String {
    from_smallest_unit(wei, GWEI_DECIMALS)
}

/// Formats a decimal amount string for display.
///
/// Exact zero renders as "0"; positive amounts below 0.001 render as the
/// bounded [DISPLAY_FLOOR]; amounts above 10^15 render as the bounded
/// [DISPLAY_CAP]. Everything else keeps at most five fractional digits.
/// Malformed input is returned unchanged.
pub fn format_amount(amount: &str) -> String {
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    let int = if int_part.is_empty() {
        U256::ZERO
    } else {
        match U256::from_str_radix(int_part, 10) {
            Ok(v) => v,
            Err(_) => return amount.to_string(),
        }
    };
    if !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return amount.to_string();
    }

    let frac_is_zero = frac_part.chars().all(|c| c == '0');
    if int.is_zero() && frac_is_zero {
        return "0".to_string();
    }

    if int.is_zero() && frac_part.chars().take(3).all(|c| c == '0') {
        return DISPLAY_FLOOR.to_string();
    }

    if int > U256::from(10u8).pow(U256::from(15u8)) {
        return DISPLAY_CAP.to_string();
    }

    if frac_is_zero {
        return int.to_string();
    }

    let mut frac: String = frac_part.chars().take(MAX_DISPLAY_DECIMALS).collect();
    while frac.ends_with('0') {
        frac.pop();
    }
    if frac.is_empty() {
        return int.to_string();
    }

    format!("{int}.{frac}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn converts_gwei_to_wei() {
        assert_eq!(gwei_to_wei("1"), Some(U256::from(1_000_000_000u64)));
        assert_eq!(gwei_to_wei("2.5"), Some(U256::from(2_500_000_000u64)));
        assert_eq!(gwei_to_wei("0"), Some(U256::ZERO));
        assert_eq!(gwei_to_wei(""), None);
        assert_eq!(gwei_to_wei("1.0000000001"), None); // more than 9 fractional digits
        assert_eq!(gwei_to_wei("abc"), None);
    }

    #[test]
    fn converts_wei_to_gwei() {
        assert_eq!(wei_to_gwei(U256::from(1_000_000_000u64)), "1");
        assert_eq!(wei_to_gwei(U256::from(2_500_000_000u64)), "2.5");
        assert_eq!(wei_to_gwei(U256::from(1u64)), "0.000000001");
    }

    #[test]
    fn converts_smallest_unit_to_decimal() {
        let one_eth = U256::from(10u8).pow(U256::from(18u8));
        assert_eq!(from_smallest_unit(one_eth, 18), "1");
        assert_eq!(from_smallest_unit(one_eth / U256::from(2u8), 18), "0.5");
        assert_eq!(from_smallest_unit(U256::from(1u8), 18), "0.000000000000000001");
        assert_eq!(from_smallest_unit(U256::ZERO, 18), "0");
    }

    #[test]
    fn round_trips_through_smallest_unit() {
        let wei = to_smallest_unit("1.23", 18).unwrap();
        assert_eq!(from_smallest_unit(wei, 18), "1.23");
    }

    #[test]
    fn formats_small_amounts_with_floor() {
        assert_eq!(format_amount("0.0001"), DISPLAY_FLOOR);
        assert_eq!(format_amount("0.000999"), DISPLAY_FLOOR);
        assert_eq!(format_amount("0.001"), "0.001");
        assert_eq!(format_amount("0"), "0");
        assert_eq!(format_amount("0.000"), "0");
    }

    #[test]
    fn formats_large_amounts_with_cap() {
        assert_eq!(format_amount("1000000000000001"), DISPLAY_CAP);
        assert_eq!(format_amount("42"), "42");
    }

    #[test]
    fn truncates_display_decimals() {
        assert_eq!(format_amount("1.23456789"), "1.23456");
        assert_eq!(format_amount("1.50000"), "1.5");
        assert_eq!(format_amount("1.000001"), "1");
    }

    #[test]
    fn leaves_malformed_input_unchanged() {
        assert_eq!(format_amount("not-a-number"), "not-a-number");
    }
}
