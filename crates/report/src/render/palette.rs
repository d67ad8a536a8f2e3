// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Evenly spaced rainbow palette.

use serde::Serialize;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Color of single-series charts.
pub const DEFAULT_COLOR: Rgb = Rgb(31, 119, 180);

/// Sample the rainbow colormap at `t` in `[0, 1]`, purple to red.
pub fn rainbow(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let r = (2.0 * t - 0.5).abs();
    let g = (t * std::f64::consts::PI).sin();
    let b = (t * std::f64::consts::FRAC_PI_2).cos();
    Rgb(channel(r), channel(g), channel(b))
}

fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `n` colors evenly spaced across the rainbow.
pub fn evenly_spaced(n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![rainbow(0.0)],
        _ => (0..n).map(|i| rainbow(i as f64 / (n - 1) as f64)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(rainbow(0.0), Rgb(128, 0, 255));
        assert_eq!(rainbow(1.0), Rgb(255, 0, 0));
    }

    #[test]
    fn test_evenly_spaced_sizes() {
        assert!(evenly_spaced(0).is_empty());
        assert_eq!(evenly_spaced(1), vec![rainbow(0.0)]);

        let colors = evenly_spaced(4);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], rainbow(0.0));
        assert_eq!(colors[3], rainbow(1.0));
    }

    #[test]
    fn test_evenly_spaced_unique() {
        let colors = evenly_spaced(6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
