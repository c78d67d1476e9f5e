//! Kina display formatting: a single-letter currency prefix and
//! comma-grouped digits, e.g. `K2,850`.

/// Comma-group the digits of a non-negative number, e.g. `5000` → `5,000`.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_kina(amount: i64) -> String {
    let grouped = group_digits(amount.unsigned_abs());
    if amount < 0 {
        format!("-K{grouped}")
    } else {
        format!("K{grouped}")
    }
}
