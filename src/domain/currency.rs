/// Symbol for a currency code (case-insensitive). Unknown codes fall back to `$`.
pub fn currency_symbol(code: &str) -> &'static str {
    match code.trim().to_ascii_uppercase().as_str() {
        "CAD" => "C$",
        "INR" => "₹",
        _ => "$",
    }
}

/// Formats an amount as `<symbol><thousands-separated value with 2 decimals>`,
/// e.g. `$7,500.00` or `-C$1,234.50`.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    let rounded = format!("{:.2}", amount.abs());
    let (integer_part, fraction_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (idx, digit) in integer_part.chars().enumerate() {
        if idx > 0 && (integer_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{fraction_part}")
}
