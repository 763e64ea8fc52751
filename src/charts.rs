//! Chart rendering.
//!
//! All charts are written as SVG. The pie and bar charts share the fixed
//! category colors defined on [`Category`].

use crate::data::Dataset;
use crate::model::{Category, Metric, PerCategory};
use crate::stats::Accumulator;
use anyhow::{Context, Result, bail};
use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::{collections::BTreeMap, path::Path};

const FONT: &str = "sans-serif";

const PIE_SIZE: (u32, u32) = (800, 800);
const PIE_START_ANGLE: f64 = 140.0;
const PIE_ARC_POINTS: usize = 100;

const TREND_SIZE: (u32, u32) = (1200, 800);
const TREND_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

const BAR_SIZE: (u32, u32) = (800, 600);

/// Pie chart of the mean expense share of each category.
///
/// Slices run counter-clockwise from a fixed start angle and carry one-decimal
/// percentage labels.
pub fn render_pie_chart(file: &Path, shares: &PerCategory) -> Result<()> {
    let total = shares.sum();
    if !(total.is_finite() && total > 0.0) || shares.iter().any(|(_, share)| share < 0.0) {
        bail!("expense shares must be non-negative with a positive sum, but are {shares:?}");
    }

    let root = SVGBackend::new(file, PIE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled("Expense Share of Each Category", (FONT, 28))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = 0.36 * width.min(height) as f64;

    let centered = Pos::new(HPos::Center, VPos::Center);
    let label_style = TextStyle::from((FONT, 18).into_font()).pos(centered);
    let pct_style = TextStyle::from((FONT, 16).into_font()).pos(centered);

    let mut start_angle = PIE_START_ANGLE;
    for (cat, share) in shares.iter() {
        let frac = share / total;
        let sweep_angle = 360.0 * frac;

        let mut points = vec![center];
        for i_point in 0..=PIE_ARC_POINTS {
            let angle = start_angle + sweep_angle * i_point as f64 / PIE_ARC_POINTS as f64;
            points.push(polar(center, radius, angle));
        }
        area.draw(&Polygon::new(points, cat.color().filled()))?;

        let mid_angle = start_angle + sweep_angle / 2.0;
        area.draw_text(cat.label(), &label_style, polar(center, 1.15 * radius, mid_angle))?;
        area.draw_text(
            &format!("{:.1}%", 100.0 * frac),
            &pct_style,
            polar(center, 0.6 * radius, mid_angle),
        )?;

        start_angle += sweep_angle;
    }

    root.present().with_context(|| format!("failed to write {file:?}"))?;
    Ok(())
}

/// Screen position at `angle` degrees counter-clockwise from the positive x axis.
fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    let rad = angle.to_radians();
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

/// Line chart of the six monetary columns over time; Profit is dashed.
///
/// Points are sorted by date and records sharing a date are averaged.
pub fn render_trend_chart(file: &Path, dataset: &Dataset) -> Result<()> {
    let series: Vec<(Metric, Vec<(NaiveDate, f64)>)> = Metric::ALL
        .iter()
        .map(|&metric| (metric, daily_means(dataset, metric)))
        .collect();

    let (first_date, last_date) = date_bounds(dataset)?;
    let (y_min, y_max) = value_bounds(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));

    let root = SVGBackend::new(file, TREND_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Financial Metrics Trend Over Time", (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(first_date..last_date, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Amount (€)")
        .x_label_formatter(&|date| date.format("%Y-%m-%d").to_string())
        .y_label_formatter(&|val| format!("{val:.0}"))
        .axis_desc_style((FONT, 18))
        .draw()?;

    for (i_series, (metric, points)) in series.into_iter().enumerate() {
        let color = TREND_COLORS[i_series % TREND_COLORS.len()];
        let style = color.stroke_width(2);
        let anno = if metric == Metric::Profit {
            chart.draw_series(DashedLineSeries::new(points, 10, 6, style))?
        } else {
            chart.draw_series(LineSeries::new(points, style))?
        };
        anno.label(metric.label()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
        });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, 16))
        .draw()?;

    root.present().with_context(|| format!("failed to write {file:?}"))?;
    Ok(())
}

fn daily_means(dataset: &Dataset, metric: Metric) -> Vec<(NaiveDate, f64)> {
    let mut by_date: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for rec in dataset.records() {
        by_date.entry(rec.date).or_default().add(rec.metric(metric));
    }
    by_date
        .into_iter()
        .map(|(date, acc)| (date, acc.mean()))
        .collect()
}

fn date_bounds(dataset: &Dataset) -> Result<(NaiveDate, NaiveDate)> {
    let dates = dataset.records().iter().map(|rec| rec.date);
    let first = dates.clone().min().context("dataset contains no dates")?;
    let last = dates.max().context("dataset contains no dates")?;
    if first == last {
        let last = first
            .checked_add_days(Days::new(1))
            .context("date range overflow")?;
        return Ok((first, last));
    }
    Ok((first, last))
}

/// Axis bounds covering zero and every value, padded away from zero.
fn value_bounds<I: Iterator<Item = f64>>(vals: I) -> (f64, f64) {
    let (lo, hi) = vals.fold((0.0f64, 0.0f64), |(lo, hi), val| (lo.min(val), hi.max(val)));
    let pad = 0.05 * (hi - lo);
    if pad <= 0.0 {
        return (lo, lo + 1.0);
    }
    (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
}

/// Bar chart of the mean amount spent on each category.
pub fn render_bar_chart(file: &Path, means: &PerCategory) -> Result<()> {
    let (y_min, y_max) = value_bounds(means.iter().map(|(_, mean)| mean));
    let n_bars = Category::ALL.len() as f64;

    let root = SVGBackend::new(file, BAR_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Expenses Breakdown", (FONT, 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5f64..n_bars - 0.5, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(Category::ALL.len())
        .x_label_formatter(&|x| bar_label(*x))
        .y_desc("Amount (€)")
        .y_label_formatter(&|val| format!("{val:.0}"))
        .axis_desc_style((FONT, 18))
        .draw()?;

    chart.draw_series(means.iter().enumerate().map(|(i_bar, (cat, mean))| {
        let x = i_bar as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, mean)], cat.color().filled())
    }))?;

    root.present().with_context(|| format!("failed to write {file:?}"))?;
    Ok(())
}

fn bar_label(x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    Category::ALL
        .get(idx as usize)
        .map(|cat| cat.label().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use std::fs;

    fn dataset() -> Dataset {
        let rec = |day, revenue, profit| Record {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            revenue,
            cost: 10.0,
            marketing_spend: 20.0,
            employee_salary: 30.0,
            operational_expense: 40.0,
            profit,
        };
        Dataset::new(vec![
            rec(3, 300.0, 200.0),
            rec(1, 100.0, 0.0),
            rec(3, 500.0, -50.0),
        ])
        .unwrap()
    }

    #[test]
    fn daily_means_sort_and_merge_dates() {
        let points = daily_means(&dataset(), Metric::Revenue);
        assert_eq!(
            points,
            [
                (NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), 100.0),
                (NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(), 400.0),
            ]
        );
    }

    #[test]
    fn single_date_gets_nonempty_range() {
        let rec = dataset().records()[0].clone();
        let single = Dataset::new(vec![rec]).unwrap();
        let (first, last) = date_bounds(&single).unwrap();
        assert!(first < last);
    }

    #[test]
    fn value_bounds_include_zero_and_negatives() {
        let (lo, hi) = value_bounds([-50.0, 200.0].into_iter());
        assert!(lo < -50.0 && hi > 200.0);
        assert_eq!(value_bounds(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn bar_labels_sit_on_integer_ticks() {
        assert_eq!(bar_label(0.0), "Cost");
        assert_eq!(bar_label(3.0), "Operational Expense");
        assert_eq!(bar_label(0.5), "");
        assert_eq!(bar_label(4.0), "");
    }

    fn assert_has_category_colors(svg: &str) {
        let svg = svg.to_lowercase();
        for hex in ["#fa8072", "#add8e6", "#90ee90", "#ffff00"] {
            assert!(svg.contains(hex), "missing fill {hex}");
        }
    }

    #[test]
    fn pie_chart_labels_every_slice() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pie.svg");
        render_pie_chart(&file, &PerCategory([10.0, 20.0, 30.0, 40.0])).unwrap();

        let svg = fs::read_to_string(&file).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Expense Share of Each Category"));
        for cat in Category::ALL {
            assert!(svg.contains(cat.label()), "missing label {:?}", cat.label());
        }
        for pct in ["10.0%", "20.0%", "30.0%", "40.0%"] {
            assert!(svg.contains(pct), "missing percentage {pct}");
        }
        assert_has_category_colors(&svg);
    }

    #[test]
    fn trend_chart_draws_every_series_with_legend() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("trend.svg");
        render_trend_chart(&file, &dataset()).unwrap();

        let svg = fs::read_to_string(&file).unwrap();
        assert!(svg.contains("Financial Metrics Trend Over Time"));
        assert!(svg.contains("Amount (€)"));
        for metric in Metric::ALL {
            assert!(svg.contains(metric.label()), "missing series {:?}", metric.label());
        }
        let svg_lower = svg.to_lowercase();
        for color in TREND_COLORS {
            let hex = format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2);
            assert!(svg_lower.contains(&hex), "missing stroke {hex}");
        }
    }

    #[test]
    fn bar_chart_labels_every_category() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bar.svg");
        render_bar_chart(&file, &PerCategory([10.0, 20.0, 30.0, 40.0])).unwrap();

        let svg = fs::read_to_string(&file).unwrap();
        assert!(svg.contains("Average Expenses Breakdown"));
        for cat in Category::ALL {
            assert!(svg.contains(cat.label()), "missing bar label {:?}", cat.label());
        }
        assert_has_category_colors(&svg);
    }

    #[test]
    fn degenerate_pie_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pie.svg");
        assert!(render_pie_chart(&file, &PerCategory::default()).is_err());
        assert!(!file.exists());
    }
}
