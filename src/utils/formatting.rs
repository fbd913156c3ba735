/// Format an amount with two decimals, thousands separated by spaces,
/// followed by the currency code.
pub fn format_money(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02} {}", sign, grouped, frac, currency)
}

/// Worked minutes as a compact "Xh Ym" label.
pub fn mins2readable(mins: i64) -> String {
    format!("{}h {:02}m", mins / 60, mins.abs() % 60)
}
