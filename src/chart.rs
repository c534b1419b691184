use crate::aggregate::{MeasurementIndex, SizeData};
use crate::canvas::{Bar, Canvas};
use crate::catalog::AlgorithmOrder;
use crate::layout::{ChartLayout, BAR_WIDTH, VALUE_AXIS_LABEL};
use crate::palette::PaletteMode;
use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::{Path, PathBuf};

// Font sizes
const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const LEGEND_FONT_SIZE: u32 = 16;

// 10x6 inches at 100 dpi
const CHART_SIZE: (u32, u32) = (1000, 600);

// Layout tuning
const DEFAULT_MARGIN: u32 = 20;
const DEFAULT_X_LABEL_AREA_SIZE: u32 = 50;
// Wide enough for an 11-column wrapped distribution name.
const CATEGORY_LABEL_AREA_SIZE: u32 = 130;
// Distance between the category axis and the center of its labels.
const CATEGORY_LABEL_OFFSET: i32 = 62;
const LINE_HEIGHT: i32 = TICK_LABEL_FONT_SIZE as i32 + 2;
// Headroom past the longest bar, as a fraction of it.
const VALUE_AXIS_HEADROOM: f64 = 1.1;

/// Turns the measurements of one input size into drawing calls.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    order: AlgorithmOrder,
    palette: PaletteMode,
}

impl ChartRenderer {
    pub fn new(order: AlgorithmOrder, palette: PaletteMode) -> Self {
        Self { order, palette }
    }

    /// Draw, present and clear the chart for `size`.
    ///
    /// Nothing is drawn if `data` fails validation.
    pub fn render<C: Canvas>(&self, canvas: &mut C, size: u64, data: &SizeData) -> Result<()> {
        let layout = ChartLayout::compute(size, data, &self.order, self.palette)?;
        draw_layout(canvas, &layout);
        canvas.present()?;
        canvas.clear();
        Ok(())
    }
}

/// Issue the drawing calls for a validated layout.
///
/// Bars are drawn one algorithm at a time across all distributions so every
/// series shares one color.
pub fn draw_layout<C: Canvas>(canvas: &mut C, layout: &ChartLayout) {
    for series in &layout.series {
        for geometry in &series.bars {
            canvas.bar(Bar {
                position: geometry.position,
                length: geometry.stats.median,
                thickness: BAR_WIDTH,
                error: geometry.stats.std_dev,
                color: series.color,
                label: series.algorithm.clone(),
            });
        }
    }

    for tick in &layout.ticks {
        canvas.category_tick(tick.position, &tick.lines);
    }

    let (low, high) = layout.category_limits;
    canvas.set_category_limits(low, high, true);
    canvas.set_value_label(VALUE_AXIS_LABEL);
    canvas.set_value_limit(layout.max_value);
    canvas.set_title(&layout.title);

    for series in &layout.series {
        canvas.legend_entry(&series.algorithm, series.color);
    }
}

/// Render one chart per input size, smallest size first.
///
/// `chart_path` picks the file each size is written to.
pub fn generate_charts<C: Canvas>(
    index: &MeasurementIndex,
    renderer: &ChartRenderer,
    canvas: &mut C,
    chart_path: impl Fn(u64) -> PathBuf,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(index.len());
    for (size, data) in index.iter() {
        let path = chart_path(size);
        canvas.set_target(&path);
        renderer
            .render(canvas, size, data)
            .with_context(|| format!("Failed to render chart for size {}", size))?;
        written.push(path);
    }
    Ok(written)
}

/// Category axis as laid out on the plotters y axis.
///
/// plotters draws increasing y upwards; a reversed axis negates positions to
/// put the lowest one at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CategoryAxis {
    low: f64,
    high: f64,
    reversed: bool,
}

impl CategoryAxis {
    fn map(&self, position: f64) -> f64 {
        if self.reversed {
            -position
        } else {
            position
        }
    }

    fn range(&self) -> Range<f64> {
        if self.reversed {
            -self.high..-self.low
        } else {
            self.low..self.high
        }
    }
}

/// End of the value axis for bars reaching at most `max`
fn value_axis_end(max: f64) -> f64 {
    max.max(1.0) * VALUE_AXIS_HEADROOM
}

/// Left and right ends of the error whisker of `bar`, never below zero.
fn whisker_span(bar: &Bar) -> Option<(f64, f64)> {
    if bar.error > 0.0 {
        Some(((bar.length - bar.error).max(0.0), bar.length + bar.error))
    } else {
        None
    }
}

/// Legend corner away from the first categories, which tend to hold the
/// longest bars.
fn legend_position(reversed: bool) -> SeriesLabelPosition {
    if reversed {
        SeriesLabelPosition::LowerRight
    } else {
        SeriesLabelPosition::UpperRight
    }
}

/// Canvas backed by plotters, writing one SVG file per chart.
///
/// Drawing calls are buffered; the chart is laid out and written on `present`
/// once the axis ranges are known.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    target: Option<PathBuf>,
    title: String,
    value_label: String,
    value_limit: Option<f64>,
    category_axis: Option<CategoryAxis>,
    ticks: Vec<(f64, Vec<String>)>,
    bars: Vec<Bar>,
    legend: Vec<(String, RGBColor)>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for SvgCanvas {
    fn set_target(&mut self, path: &Path) {
        self.target = Some(path.to_path_buf());
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_value_label(&mut self, label: &str) {
        self.value_label = label.to_string();
    }

    fn set_value_limit(&mut self, max: f64) {
        self.value_limit = Some(max);
    }

    fn set_category_limits(&mut self, low: f64, high: f64, reversed: bool) {
        self.category_axis = Some(CategoryAxis {
            low,
            high,
            reversed,
        });
    }

    fn category_tick(&mut self, position: f64, lines: &[String]) {
        self.ticks.push((position, lines.to_vec()));
    }

    fn bar(&mut self, bar: Bar) {
        self.bars.push(bar);
    }

    fn legend_entry(&mut self, label: &str, color: RGBColor) {
        self.legend.push((label.to_string(), color));
    }

    fn present(&mut self) -> Result<()> {
        let path = self
            .target
            .clone()
            .context("No output file set for chart")?;
        let axis = self
            .category_axis
            .context("No category limits set for chart")?;
        let max_value = value_axis_end(self.value_limit.context("No value limit set for chart")?);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create output directory")?;
        }

        let root = SVGBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", TITLE_FONT_SIZE))
            .margin(DEFAULT_MARGIN)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(CATEGORY_LABEL_AREA_SIZE)
            .build_cartesian_2d(0.0..max_value, axis.range())?;

        // Category labels are drawn by hand below: no tick marks, no values.
        chart
            .configure_mesh()
            .disable_y_mesh()
            .set_tick_mark_size(LabelAreaPosition::Left, 0)
            .y_label_formatter(&|_: &f64| String::new())
            .x_desc(self.value_label.as_str())
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        for bar in &self.bars {
            let top = axis.map(bar.position - bar.thickness / 2.0);
            let bottom = axis.map(bar.position + bar.thickness / 2.0);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(0.0, top), (bar.length, bottom)],
                bar.color.filled(),
            )))?;

            if let Some((left, right)) = whisker_span(bar) {
                let y = axis.map(bar.position);
                let cap = bar.thickness / 4.0;
                chart.draw_series(
                    [
                        vec![(left, y), (right, y)],
                        vec![
                            (left, axis.map(bar.position - cap)),
                            (left, axis.map(bar.position + cap)),
                        ],
                        vec![
                            (right, axis.map(bar.position - cap)),
                            (right, axis.map(bar.position + cap)),
                        ],
                    ]
                    .into_iter()
                    .map(|points| PathElement::new(points, BLACK.stroke_width(1))),
                )?;
            }
        }

        let label_style = ("sans-serif", TICK_LABEL_FONT_SIZE)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (position, lines) in &self.ticks {
            let (axis_x, axis_y) = chart.backend_coord(&(0.0, axis.map(*position)));
            let x = axis_x - CATEGORY_LABEL_OFFSET;
            let first_y = axis_y - (lines.len() as i32 - 1) * LINE_HEIGHT / 2;
            for (line_idx, line) in lines.iter().enumerate() {
                root.draw(&Text::new(
                    line.clone(),
                    (x, first_y + line_idx as i32 * LINE_HEIGHT),
                    label_style.clone(),
                ))?;
            }
        }

        for (label, color) in &self.legend {
            let color = *color;
            chart
                .draw_series(std::iter::once(Circle::new(
                    (0.0, axis.range().start),
                    0,
                    color.filled(),
                )))?
                .label(label.clone())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
        }

        if !self.legend.is_empty() {
            chart
                .configure_series_labels()
                .position(legend_position(axis.reversed))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", LEGEND_FONT_SIZE))
                .draw()?;
        }

        root.present()?;
        println!("Generated: {}", path.display());
        Ok(())
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
