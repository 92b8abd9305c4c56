//! Chart assembly and SVG output, one file per facet.

use crate::data::{AxisScale, DataError, MeasurementTable, Quantity, Strategy};
use crate::facet::{Facet, Facets};
use crate::series::{render_series, Series};
use crate::style::{DashedLine, LINE_WIDTH, MARKER_RADIUS, SERIES_ALPHA};
use anyhow::{Context, Result};
use num_format::{Locale, ToFormattedString};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1000, 600);
/// Height of the chart proper; the rest holds the host caption
const PLOT_HEIGHT: i32 = 570;

const TITLE_FONT_SIZE: u32 = 24;
const AXIS_LABEL_FONT_SIZE: u32 = 18;
const TICK_LABEL_FONT_SIZE: u32 = 14;
const LEGEND_FONT_SIZE: u32 = 14;
const CAPTION_FONT_SIZE: u32 = 12;

/// Padding around the data on linear axes, as a fraction of the data span
const LINEAR_MARGIN: f64 = 0.05;
/// Padding factor around the data on log axes
const LOG_MARGIN: f64 = 1.25;

/// Length of the line sample drawn in each legend entry
const LEGEND_LINE_LENGTH: i32 = 24;

/// Output file name: `<Quantity>_vs_<FreeVariable>_<FixedTag><value>.svg`
pub fn chart_file_name(facet: &Facet) -> String {
    format!(
        "{}_vs_{}_{}{}.svg",
        facet.spec.file_stem,
        facet.free().file_name(),
        facet.fixed().facet_tag(),
        facet.value
    )
}

pub fn chart_title(facet: &Facet) -> String {
    format!(
        "{} vs {} ({})",
        facet.spec.title,
        facet.free().display_name(),
        facet.fixed().describe(facet.value)
    )
}

/// File names a run over `quantities` writes, in processing order
pub fn planned_files(quantities: &[Quantity]) -> Vec<String> {
    quantities
        .iter()
        .flat_map(|q| Facets::new(q.spec()))
        .map(|facet| chart_file_name(&facet))
        .collect()
}

/// Format an axis tick value
pub fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        "0".to_string()
    } else if magnitude >= 1000.0 {
        (value.round() as i64).to_formatted_string(&Locale::en)
    } else if magnitude < 0.01 {
        format!("{:.1e}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Everything needed to draw one facet's chart
#[derive(Debug, Clone)]
pub struct Figure<'a> {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_scale: AxisScale,
    pub caption: &'a str,
    pub file_name: String,
    pub series: Vec<Series>,
}

impl<'a> Figure<'a> {
    pub fn assemble(facet: &Facet, series: Vec<Series>, caption: &'a str) -> Self {
        Self {
            title: chart_title(facet),
            x_label: facet.free().axis_label(),
            y_label: facet.spec.y_label,
            x_scale: facet.spec.x_scale,
            caption,
            file_name: chart_file_name(facet),
            series,
        }
    }

    /// Draw one line per strategy from `table`
    pub fn build(
        table: &MeasurementTable,
        facet: &Facet,
        caption: &'a str,
    ) -> Result<Self, DataError> {
        let series = Strategy::ALL
            .iter()
            .map(|&strategy| {
                let samples = table.series(strategy, facet.value)?;
                Ok(render_series(facet, strategy, samples))
            })
            .collect::<Result<Vec<_>, DataError>>()?;
        Ok(Self::assemble(facet, series, caption))
    }

    fn bounds(&self, axis: impl Fn(&(f64, f64)) -> f64) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(axis)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Visible x range, padded according to the axis scale
    pub fn x_range(&self) -> (f64, f64) {
        let (lo, hi) = self.bounds(|p| p.0).unwrap_or((1.0, 10.0));
        match self.x_scale {
            AxisScale::Linear => pad_linear(lo, hi),
            AxisScale::Log => {
                let lo = lo.max(f64::MIN_POSITIVE);
                (lo / LOG_MARGIN, hi.max(lo) * LOG_MARGIN)
            }
        }
    }

    /// Visible y range; the y axis is always linear
    pub fn y_range(&self) -> (f64, f64) {
        let (lo, hi) = self.bounds(|p| p.1).unwrap_or((0.0, 1.0));
        pad_linear(lo, hi)
    }

    /// Whether the legend belongs in the upper-left corner, i.e. the lines
    /// mostly rise from left to right and leave the upper right crowded
    pub fn legend_on_left(&self) -> bool {
        let (first, last) = self
            .series
            .iter()
            .filter_map(|s| Some((s.points.first()?.1, s.points.last()?.1)))
            .fold((0.0, 0.0), |(f, l), (a, b)| (f + a, l + b));
        last > first
    }

    /// Render to `<output_dir>/<file_name>`, returning the written path
    pub fn write(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(&self.file_name);

        // The backend borrows `path`; it is flushed and dropped with this block
        {
            let root = SVGBackend::new(&path, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE)?;

            let (plot_area, _) = root.split_vertically(PLOT_HEIGHT);
            let (x_min, x_max) = self.x_range();
            let (y_min, y_max) = self.y_range();

            let mut builder = ChartBuilder::on(&plot_area);
            builder
                .caption(&self.title, ("sans-serif", TITLE_FONT_SIZE))
                .margin(15)
                .x_label_area_size(50)
                .y_label_area_size(100);

            match self.x_scale {
                AxisScale::Linear => {
                    let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;
                    self.draw_chart(&root, &mut chart)?;
                }
                AxisScale::Log => {
                    let x_axis = (x_min..x_max).log_scale();
                    let mut chart = builder.build_cartesian_2d(x_axis, y_min..y_max)?;
                    self.draw_chart(&root, &mut chart)?;
                }
            }

            root.draw(&Text::new(
                self.caption,
                ((CHART_SIZE.0 / 2) as i32, CHART_SIZE.1 as i32 - 8),
                ("sans-serif", CAPTION_FONT_SIZE)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Bottom)),
            ))?;

            root.present()
                .with_context(|| format!("Failed to write chart: {}", path.display()))?;
        }

        Ok(path)
    }

    fn draw_chart<'b, X>(
        &self,
        root: &DrawingArea<SVGBackend<'b>, Shift>,
        chart: &mut ChartContext<'b, SVGBackend<'b>, Cartesian2d<X, RangedCoordf64>>,
    ) -> Result<()>
    where
        X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    {
        chart
            .configure_mesh()
            .x_desc(self.x_label)
            .y_desc(self.y_label)
            .x_label_formatter(&|x| format_tick(*x))
            .y_label_formatter(&|y| format_tick(*y))
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(BLACK.mix(0.06))
            .draw()?;

        // Dash patterns are laid out in pixel space so they look the same on
        // linear and log axes
        for series in &self.series {
            let stroke = series.style.color.mix(SERIES_ALPHA).stroke_width(LINE_WIDTH);
            let pixels: Vec<(i32, i32)> =
                series.points.iter().map(|p| chart.backend_coord(p)).collect();
            root.draw(&DashedLine::new(&pixels, series.pattern.dashes(), stroke))?;
        }

        for series in &self.series {
            let marker = series.style.marker;
            let fill = series.style.color.mix(SERIES_ALPHA).filled();
            let stroke = series.style.color.mix(SERIES_ALPHA).stroke_width(LINE_WIDTH);
            let dashes = series.pattern.dashes();
            chart
                .draw_series(series.points.iter().map(|&point| {
                    let outline = marker.outline((0, 0), MARKER_RADIUS);
                    EmptyElement::at(point) + Polygon::new(outline, fill)
                }))?
                .label(series.label())
                .legend(move |(x, y)| {
                    let middle = LEGEND_LINE_LENGTH / 2;
                    EmptyElement::at((x, y))
                        + DashedLine::new(&[(0, 0), (LEGEND_LINE_LENGTH, 0)], dashes, stroke)
                        + Polygon::new(marker.outline((middle, 0), MARKER_RADIUS + 1), fill)
                });
        }

        let position = if self.legend_on_left() {
            SeriesLabelPosition::UpperLeft
        } else {
            SeriesLabelPosition::UpperRight
        };

        chart
            .configure_series_labels()
            .position(position)
            .legend_area_size(LEGEND_LINE_LENGTH + 6)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", LEGEND_FONT_SIZE))
            .draw()?;

        Ok(())
    }
}

fn pad_linear(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * LINEAR_MARGIN
    } else if lo != 0.0 {
        lo.abs() * LINEAR_MARGIN
    } else {
        1.0
    };
    (lo - pad, hi + pad)
}

/// Render every facet of `table` into `output_dir`, returning the written
/// paths in facet order. Stops at the first failure; earlier files remain.
pub fn generate_charts(
    table: &MeasurementTable,
    caption: &str,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for facet in Facets::new(table.spec()) {
        let figure = Figure::build(table, &facet, caption)?;
        written.push(figure.write(output_dir)?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{load_all, Variable};
    use std::collections::HashSet;
    use std::fs;

    const CAPTION: &str = "System: Linux-6.1.0-x86_64 | CPU: Test CPU | Cores: 8";

    fn facet(quantity: Quantity, value: u32) -> Facet {
        Facets::new(quantity.spec())
            .find(|f| f.value == value)
            .expect("value is in the canonical set")
    }

    fn figure(quantity: Quantity, value: u32) -> Figure<'static> {
        let table = MeasurementTable::load(quantity.spec()).unwrap();
        Figure::build(&table, &facet(quantity, value), CAPTION).unwrap()
    }

    #[test]
    fn file_names_are_unique_across_all_charts() {
        let names = planned_files(&Quantity::ALL);
        assert_eq!(names.len(), 16);
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), 16);

        assert!(names.contains(&"Latency_vs_Thread_Count_MSG512.svg".to_string()));
        assert!(names.contains(&"Throughput_vs_Message_Size_T8.svg".to_string()));
        assert!(names.contains(&"CPU_Cycles_per_Byte_vs_Message_Size_T4.svg".to_string()));
        assert!(names.contains(&"Cache_Misses_vs_Message_Size_T1.svg".to_string()));
    }

    #[test]
    fn latency_at_512_bytes() {
        let figure = figure(Quantity::Latency, 512);
        assert_eq!(figure.title, "Latency vs Thread Count (Message Size = 512 bytes)");
        assert_eq!(figure.x_label, "Thread Count");
        assert_eq!(figure.y_label, "Latency (µs)");
        assert_eq!(figure.x_scale, AxisScale::Linear);
        assert!(figure.file_name.contains("512"));

        let two_copy = &figure.series[0];
        assert_eq!(two_copy.strategy, Strategy::TwoCopy);
        let ys: Vec<f64> = two_copy.points.iter().map(|p| p.1).collect();
        assert_eq!(ys, [995608.632, 498985.451, 249426.998, 124491.427]);
    }

    #[test]
    fn throughput_uses_log_x_axis() {
        let figure = figure(Quantity::Throughput, 8);
        assert_eq!(figure.title, "Throughput vs Message Size (Threads = 8)");
        assert_eq!(figure.x_label, "Message Size (bytes)");
        assert_eq!(figure.x_scale, AxisScale::Log);
        let strategies: Vec<Strategy> = figure.series.iter().map(|s| s.strategy).collect();
        assert_eq!(strategies, Strategy::ALL);
    }

    #[test]
    fn x_scale_never_varies_by_facet() {
        for table in load_all(Quantity::ALL.map(Quantity::spec)).unwrap() {
            let spec = table.spec();
            for facet in Facets::new(spec) {
                let figure = Figure::build(&table, &facet, CAPTION).unwrap();
                assert_eq!(figure.x_scale, spec.x_scale);
                assert_eq!(figure.caption, CAPTION);
            }
        }
    }

    #[test]
    fn ranges_cover_all_points() {
        let cases = [
            (Quantity::Latency, 128),
            (Quantity::Throughput, 1),
            (Quantity::CacheMisses, 4),
        ];
        for (quantity, value) in cases {
            let figure = figure(quantity, value);
            let (x_min, x_max) = figure.x_range();
            let (y_min, y_max) = figure.y_range();
            assert!(x_min > 0.0 || figure.x_scale == AxisScale::Linear);
            for series in &figure.series {
                for &(x, y) in &series.points {
                    assert!(x_min < x && x < x_max);
                    assert!(y_min < y && y < y_max);
                }
            }
        }
    }

    #[test]
    fn flat_data_still_gets_a_range() {
        assert_eq!(pad_linear(0.0, 0.0), (-1.0, 1.0));
        let (lo, hi) = pad_linear(10.0, 10.0);
        assert!(lo < 10.0 && hi > 10.0);
    }

    #[test]
    fn legend_avoids_rising_lines() {
        assert!(figure(Quantity::Throughput, 2).legend_on_left());
        assert!(!figure(Quantity::Latency, 1024).legend_on_left());
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(15334655.465625), "15,334,655");
        assert_eq!(format_tick(1000.0), "1,000");
        assert_eq!(format_tick(4.0), "4");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(0.000239), "2.4e-4");
    }

    #[test]
    fn writes_one_svg_per_facet() {
        let dir = tempfile::tempdir().unwrap();
        let table = MeasurementTable::load(Quantity::Latency.spec()).unwrap();

        let written = generate_charts(&table, CAPTION, dir.path()).unwrap();
        assert_eq!(written.len(), Variable::MessageSize.values().len());
        for path in &written {
            assert!(path.is_file(), "{} missing", path.display());
        }

        let svg =
            fs::read_to_string(dir.path().join("Latency_vs_Thread_Count_MSG512.svg")).unwrap();
        assert!(svg.contains("Latency vs Thread Count (Message Size = 512 bytes)"));
        assert!(svg.contains("TwoCopy"));
        assert!(svg.contains("Test CPU"));
    }

    #[test]
    fn rewriting_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let figure = figure(Quantity::CpuCyclesPerByte, 2);

        let path = figure.write(dir.path()).unwrap();
        let first = fs::read(&path).unwrap();
        figure.write(dir.path()).unwrap();
        assert_eq!(first, fs::read(&path).unwrap());
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does").join("not").join("exist");
        let err = figure(Quantity::CacheMisses, 8).write(&missing).unwrap_err();
        assert!(format!("{:#}", err).contains("Cache_Misses_vs_Message_Size_T8.svg"));
    }

    #[test]
    fn failed_write_keeps_earlier_charts_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the third facet's file name
        fs::create_dir(dir.path().join("Latency_vs_Thread_Count_MSG1024.svg")).unwrap();
        let table = MeasurementTable::load(Quantity::Latency.spec()).unwrap();

        let err = generate_charts(&table, CAPTION, dir.path()).unwrap_err();

        assert!(format!("{:#}", err).contains("Latency_vs_Thread_Count_MSG1024.svg"));
        assert!(dir.path().join("Latency_vs_Thread_Count_MSG128.svg").is_file());
        assert!(dir.path().join("Latency_vs_Thread_Count_MSG512.svg").is_file());
        assert!(!dir.path().join("Latency_vs_Thread_Count_MSG4096.svg").exists());
    }
}
