// Copyright 2025 Benchplot Contributors
// SPDX-License-Identifier: Apache-2.0

//! PNG backend built on `plotters`.

use super::{BarSpec, Chart, ChartBackend, ChartKind, LineSpec};
use crate::error::{ReportError, Result};
use crate::render::palette::Rgb;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

const FONT: &str = "sans-serif";
const CAPTION_SIZE: f64 = 24.0;
const LABEL_SIZE: f64 = 14.0;
const ANNOTATION_SIZE: f64 = 11.0;

type DrawResult = std::result::Result<(), Box<dyn Error>>;

/// Draws charts into PNG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngBackend {
    width: u32,
    height: u32,
}

impl PngBackend {
    /// Create a backend producing images of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for PngBackend {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

impl ChartBackend for PngBackend {
    fn render(&mut self, chart: &Chart, path: &Path) -> Result<()> {
        let drawn = match &chart.kind {
            ChartKind::Bar(bars) => self.draw_bars(chart, bars, path),
            ChartKind::Line(lines) => self.draw_lines(chart, lines, path),
        };

        drawn.map_err(|e| ReportError::Render {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn headroom(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

impl PngBackend {
    fn draw_bars(&self, chart: &Chart, bars: &[BarSpec], path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let segments = bars.len().max(1) as u32;
        let y_max = headroom(bars.iter().map(|b| b.value).fold(0.0, f64::max));

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title.as_str(), (FONT, CAPTION_SIZE).into_font())
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..segments).into_segmented(), 0f64..y_max)?;

        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        let x_format = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).map(|l| l.to_string()).unwrap_or_default(),
            _ => String::new(),
        };
        let y_format = |v: &f64| chart.y_axis.format.tick(*v);

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len() + 1)
            .x_desc(chart.x_axis.label.as_str())
            .y_desc(chart.y_axis.label.as_str())
            .x_label_formatter(&x_format)
            .y_label_formatter(&y_format)
            .label_style((FONT, LABEL_SIZE).into_font())
            .draw()?;

        for (i, bar) in bars.iter().enumerate() {
            let fill = color(bar.color);
            let x = i as u32;
            let mut rect = Rectangle::new(
                [(SegmentValue::Exact(x), 0.0), (SegmentValue::Exact(x + 1), bar.value)],
                fill.filled(),
            );
            rect.set_margin(0, 0, 8, 8);

            ctx.draw_series(std::iter::once(rect))?
                .label(bar.label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], fill.filled()));

            if let Some(text) = &bar.annotation {
                let style = (FONT, ANNOTATION_SIZE)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Bottom));
                ctx.draw_series(std::iter::once(Text::new(
                    text.clone(),
                    (SegmentValue::CenterOf(x), bar.value),
                    style,
                )))?;
            }
        }

        if chart.legend {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_lines(&self, chart: &Chart, lines: &[LineSpec], path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let points = || lines.iter().flat_map(|l| l.points.iter());
        let x_min = points().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let x_max = points().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let (x_min, x_max) = if x_min.is_finite() && x_max > x_min {
            (x_min, x_max)
        } else if x_min.is_finite() {
            (x_min, x_min + 1.0)
        } else {
            (0.0, 1.0)
        };
        let y_max = headroom(points().map(|p| p.1).fold(0.0, f64::max));

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title.as_str(), (FONT, CAPTION_SIZE).into_font())
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        let x_format = |v: &f64| chart.x_axis.format.tick(*v);
        let y_format = |v: &f64| chart.y_axis.format.tick(*v);

        ctx.configure_mesh()
            .x_desc(chart.x_axis.label.as_str())
            .y_desc(chart.y_axis.label.as_str())
            .x_label_formatter(&x_format)
            .y_label_formatter(&y_format)
            .label_style((FONT, LABEL_SIZE).into_font())
            .draw()?;

        for line in lines {
            let stroke = color(line.color);
            ctx.draw_series(LineSeries::new(line.points.iter().copied(), stroke.stroke_width(2)))?
                .label(line.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke.stroke_width(2)));
        }

        if chart.legend {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}
