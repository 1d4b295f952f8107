//! Number formatting for reports and the interactive form

/// Insert thousand separators into a string of digits
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format an amount with thousand separators and two decimals
///
/// Example: `format_amount(1234567.891)` -> `"1,234,567.89"`
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(whole), fraction)
}

/// Format an amount prefixed with a currency symbol, sign before the symbol
///
/// Example: `format_money("$", -1500.0)` -> `"-$1,500.00"`
pub fn format_money(symbol: &str, amount: f64) -> String {
    let formatted = format_amount(amount);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-{}{}", symbol, rest),
        None => format!("{}{}", symbol, formatted),
    }
}

/// Percentages drop a trailing `.0`: `30` -> `"30%"`, `2.5` -> `"2.5%"`
pub fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{:.0}%", percent)
    } else {
        format!("{}%", percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(123.0), "123.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(671673.6), "671,673.60");
        assert_eq!(format_amount(1234567890.126), "1,234,567,890.13");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-1500.0), "-1,500.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("$", 671673.6), "$671,673.60");
        assert_eq!(format_money("€", -42.0), "-€42.00");
        assert_eq!(format_money("د.إ", 1000.0), "د.إ1,000.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(30.0), "30%");
        assert_eq!(format_percent(2.5), "2.5%");
        assert_eq!(format_percent(0.0), "0%");
    }
}
