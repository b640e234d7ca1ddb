//! Pie chart of spending by category.
//!
//! A `PieChart` is built from the category totals of a `Tracker`. It can be rendered as text for
//! the terminal (proportional bars and a summary) or as a standalone SVG document.

use crate::model::{Amount, Tracker};
use crate::utils;
use anyhow::{bail, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt::Write;
use std::path::Path;

pub const TITLE: &str = "Expenses by Category";

const BAR_WIDTH: usize = 30;
const SVG_SIZE: f64 = 800.0;
const CENTER_X: f64 = 400.0;
const CENTER_Y: f64 = 380.0;
const RADIUS: f64 = 260.0;
const START_ANGLE: f64 = 140.0;
const PCT_DISTANCE: f64 = 0.6;
const LABEL_DISTANCE: f64 = 1.1;
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// One category's share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    category: String,
    amount: Amount,
    percent: f64,
}

impl Slice {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Share of the total in the range `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// The `%1.1f%%` label drawn inside the wedge.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    slices: Vec<Slice>,
    total: Amount,
}

impl PieChart {
    /// Groups the expenses by category and computes each category's share.
    ///
    /// # Errors
    /// - Returns an error if there are no expenses.
    /// - Returns an error if every amount is zero, since no share can be computed.
    /// - Returns an error if the amounts are too large to sum.
    pub fn new(tracker: &Tracker) -> Result<Self> {
        if tracker.is_empty() {
            bail!("No expenses to display in chart.");
        }
        let total = tracker.total()?;
        if total.is_zero() {
            bail!("Cannot chart expenses that total zero.");
        }
        let slices = tracker
            .category_totals()?
            .into_iter()
            .map(|(category, amount)| {
                let share = amount.value() / total.value() * Decimal::ONE_HUNDRED;
                Slice {
                    category,
                    amount,
                    percent: share.to_f64().unwrap_or_default(),
                }
            })
            .collect();
        Ok(Self { slices, total })
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// One `Category: $amount` line per slice.
    pub fn summary(&self) -> String {
        self.slices
            .iter()
            .map(|s| format!("{}: {}", s.category, s.amount.dollars()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the chart for a terminal: a bar per category followed by the summary.
    pub fn render_text(&self) -> String {
        let label_width = self
            .slices
            .iter()
            .map(|s| s.category.chars().count())
            .max()
            .unwrap_or(0);
        let mut out = format!("{TITLE}\n\n");
        for slice in &self.slices {
            let _ = writeln!(
                out,
                "{:<label_width$}  {}  {:>6}",
                slice.category,
                ascii_bar(slice.percent, BAR_WIDTH),
                slice.percent_label(),
            );
        }
        out.push('\n');
        out.push_str(&self.summary());
        out
    }

    /// Renders the chart as an SVG document: wedges starting at 140 degrees and running
    /// counter-clockwise, percentage labels inside the wedges, category labels outside and the
    /// summary in the lower right corner.
    pub fn render_svg(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SVG_SIZE}" height="{SVG_SIZE}" viewBox="0 0 {SVG_SIZE} {SVG_SIZE}" font-family="sans-serif">"#
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="white"/>"#
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{CENTER_X}" y="60" font-size="24" text-anchor="middle">{}</text>"#,
            escape(TITLE)
        );

        let mut start = START_ANGLE;
        for (ix, slice) in self.slices.iter().enumerate() {
            let sweep = slice.percent / 100.0 * 360.0;
            let end = start + sweep;
            // A zero share has no wedge but keeps its labels.
            if sweep > 0.0 {
                let color = PALETTE[ix % PALETTE.len()];
                let _ = writeln!(svg, "  {}", wedge(start, end, color));
            }

            let mid = start + sweep / 2.0;
            let (px, py) = polar(mid, RADIUS * PCT_DISTANCE);
            let _ = writeln!(
                svg,
                r#"  <text x="{px:.2}" y="{py:.2}" font-size="14" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                escape(&slice.percent_label())
            );
            let (lx, ly) = polar(mid, RADIUS * LABEL_DISTANCE);
            let anchor = if mid.to_radians().cos() >= 0.0 {
                "start"
            } else {
                "end"
            };
            let _ = writeln!(
                svg,
                r#"  <text x="{lx:.2}" y="{ly:.2}" font-size="16" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
                escape(&slice.category)
            );
            start = end;
        }

        let line_height = 16.0;
        let mut y = SVG_SIZE - 20.0 - line_height * (self.slices.len() as f64 - 1.0);
        for line in self.summary().lines() {
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{y:.2}" font-size="12" text-anchor="end">{}</text>"#,
                SVG_SIZE - 40.0,
                escape(line)
            );
            y += line_height;
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Writes `render_svg` to `path`.
    pub fn write_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        utils::write(path, self.render_svg())
    }
}

/// Returns a bar like `████████░░░░░░░░` whose filled part is `percent` of `width`.
fn ascii_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// The point at `angle` degrees (counter-clockwise from 3 o'clock) and `radius` from the center.
/// SVG's y axis points down, hence the subtraction.
fn polar(angle: f64, radius: f64) -> (f64, f64) {
    let rad = angle * PI / 180.0;
    (CENTER_X + radius * rad.cos(), CENTER_Y - radius * rad.sin())
}

fn wedge(start: f64, end: f64, color: &str) -> String {
    if end - start >= 360.0 - f64::EPSILON {
        return format!(
            r#"<circle cx="{CENTER_X}" cy="{CENTER_Y}" r="{RADIUS}" fill="{color}" stroke="white"/>"#
        );
    }
    let (x1, y1) = polar(start, RADIUS);
    let (x2, y2) = polar(end, RADIUS);
    let large_arc = u8::from(end - start > 180.0);
    // sweep-flag 0 draws the arc counter-clockwise on screen
    format!(
        r#"<path d="M {CENTER_X} {CENTER_Y} L {x1:.2} {y1:.2} A {RADIUS} {RADIUS} 0 {large_arc} 0 {x2:.2} {y2:.2} Z" fill="{color}" stroke="white"/>"#
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
