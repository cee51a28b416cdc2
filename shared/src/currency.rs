pub const CURRENCY_SYMBOL: &str = "₹";

/// Formats an amount with thousands separators and two decimals, e.g. `₹1,234,567.89`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{CURRENCY_SYMBOL}{amount}");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" would be odd on a price tag
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{CURRENCY_SYMBOL}{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(1_234_567.891), "₹1,234,567.89");
        assert_eq!(format_currency(999.0), "₹999.00");
        assert_eq!(format_currency(1000.0), "₹1,000.00");
        assert_eq!(format_currency(100_000.0), "₹100,000.00");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_currency(0.004), "₹0.00");
        assert_eq!(format_currency(12.5), "₹12.50");
        assert_eq!(format_currency(999_999.999), "₹1,000,000.00");
    }

    #[test]
    fn negative_amounts_keep_sign_after_symbol() {
        assert_eq!(format_currency(-1234.5), "₹-1,234.50");
        assert_eq!(format_currency(-0.001), "₹0.00");
    }
}
