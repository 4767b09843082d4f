/// Mean of `samples`, summed newest first.
pub fn trailing_mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        let sum = samples.iter().rev().fold(0.0, |sum, value| sum + value);
        Some(sum / samples.len() as f64)
    }
}

pub fn format_decimal(mut value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_sign_negative() && value.abs() < f64::EPSILON {
        value = 0.0;
    }
    let mut out = format!("{:.8}", value);
    while out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
    if out.is_empty() || out == "-0" {
        "0".to_string()
    } else {
        out
    }
}

/// Compact volume label for chart axes: `1.5B`, `2.3M`, `4.0K`, or the plain number.
pub fn format_volume(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format_decimal(value)
    }
}

pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 && format!("{:.2}", value.abs()) != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(value.abs()))
}

/// `value` is already in percent units, so `12.345` renders as `12.35%`.
pub fn format_percentage(value: f64) -> String {
    let sign = if value < 0.0 && format!("{:.2}", value.abs()) != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{}%", group_thousands(value.abs()))
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{frac}")
}
