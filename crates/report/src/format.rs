// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Human-readable number formatting for chart axes and bar labels.

/// Format a large magnitude with a `K` or `M` suffix.
///
/// Values of one million and above use millions, with one decimal unless
/// evenly divisible. Smaller values are floored to whole thousands.
pub fn magnitude(value: f64) -> String {
    if value >= 1_000_000.0 {
        if value % 1_000_000.0 == 0.0 {
            return format!("{}M", (value / 1_000_000.0) as i64);
        }
        return format!("{:.1}M", value / 1_000_000.0);
    }
    format!("{}K", (value / 1000.0).floor() as i64)
}

/// Plain tick label: up to two decimals, trailing zeros dropped.
pub fn plain(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        return "0".to_string();
    }
    text.to_string()
}

/// Fixed-precision value with a unit suffix, e.g. `12.35ms`.
pub fn fixed(value: f64, decimals: usize, unit: &str) -> String {
    format!("{:.*}{}", decimals, value, unit)
}
