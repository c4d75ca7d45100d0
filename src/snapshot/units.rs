use alloy::primitives::U256;

/// Render a raw token amount as a human-readable decimal string.
///
/// The amount is divided by `10^decimals` without rounding. Trailing zeros of
/// the fractional part are dropped but one digit is always kept, so whole
/// amounts read `"1000000.0"`. With zero decimals the raw integer is returned
/// unchanged.
///
/// Works on the decimal digit string rather than on `10^decimals`, which
/// overflows 256 bits beyond 77 decimals.
pub fn format_units(raw: U256, decimals: u8) -> String {
    let digits = raw.to_string();
    if decimals == 0 {
        return digits;
    }

    let scale = decimals as usize;
    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - scale);
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    format!("{}.{}", whole, fraction)
}
