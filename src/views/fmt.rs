//! Number and label formatting shared by the views.

use chrono::{NaiveDate, NaiveDateTime};

/// Placeholder for an absent value.
pub const MISSING: &str = "-";

/// Group digits with commas and keep at most three fraction digits
/// (`12345.6789` -> `12,345.679`, `1200` -> `1,200`).
pub fn thousands(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let rounded = format!("{:.3}", v.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = v < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

pub fn thousands_opt(v: Option<f64>) -> String {
    v.map(thousands).unwrap_or_else(|| MISSING.to_string())
}

pub fn count_opt(v: Option<u64>) -> String {
    v.map(|n| thousands(n as f64)).unwrap_or_else(|| MISSING.to_string())
}

/// Shortest round-trip representation (`18.2`, `7`).
pub fn plain_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x}")).unwrap_or_else(|| MISSING.to_string())
}

/// Fixed decimals, `fallback` when absent.
pub fn fixed_or(v: Option<f64>, decimals: usize, fallback: &str) -> String {
    match v {
        Some(x) => format!("{x:.decimals$}"),
        None => fallback.to_string(),
    }
}

pub fn fixed(v: Option<f64>, decimals: usize) -> String {
    fixed_or(v, decimals, MISSING)
}

/// Round half away from zero and clamp at zero, for bar heights.
pub fn bar_value(v: Option<f64>) -> u64 {
    match v {
        Some(x) if x.is_finite() && x > 0.0 => x.round() as u64,
        _ => 0,
    }
}

/// Drop the first `Wayne ` prefix from a division/department name.
pub fn strip_company(name: &str) -> String {
    name.replacen("Wayne ", "", 1)
}

/// `2024-01-31` -> `Jan 24`. Unparseable keys are returned unchanged.
pub fn month_label(key: &str) -> String {
    let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok().or_else(|| {
        NaiveDateTime::parse_from_str(key, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|dt| dt.date())
    });
    match date {
        Some(d) => d.format("%b %y").to_string(),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_groups_and_trims() {
        assert_eq!(thousands(12345.67), "12,345.67");
        assert_eq!(thousands(1200.0), "1,200");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1234567.8912), "1,234,567.891");
        assert_eq!(thousands(-4500.5), "-4,500.5");
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(-0.0001), "0");
    }

    #[test]
    fn absent_values_render_as_placeholder() {
        assert_eq!(thousands_opt(None), "-");
        assert_eq!(plain_opt(None), "-");
        assert_eq!(fixed_or(None, 1, "N/A"), "N/A");
        assert_eq!(plain_opt(Some(18.2)), "18.2");
        assert_eq!(plain_opt(Some(7.0)), "7");
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_label("2024-01-31"), "Jan 24");
        assert_eq!(month_label("2023-12-01T00:00:00"), "Dec 23");
        assert_eq!(month_label("2024 Q1"), "2024 Q1");
    }

    #[test]
    fn bar_values_round_and_clamp() {
        assert_eq!(bar_value(Some(87.5)), 88);
        assert_eq!(bar_value(Some(-3.0)), 0);
        assert_eq!(bar_value(None), 0);
    }

    #[test]
    fn company_prefix_is_stripped_once() {
        assert_eq!(strip_company("Wayne Aerospace"), "Aerospace");
        assert_eq!(strip_company("Applied Sciences"), "Applied Sciences");
    }
}
