//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Full English month name for 1-12, `"Month N"` otherwise.
pub fn month_name(month: u32) -> String {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    match month {
        1..=12 => NAMES[(month - 1) as usize].to_string(),
        other => format!("Month {}", other),
    }
}

/// Price with thousands separators and two decimals, e.g. `28,000.00`.
pub fn format_price(value: f64) -> String {
    let raw = format!("{:.2}", value.abs());
    let (int_part, dec_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, dec_part)
}

/// Horizontal bar proportional to `value / max`, at most `width` cells.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round().clamp(0.0, width as f64) as usize;
    "█".repeat(cells)
}
