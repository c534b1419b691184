use crate::aggregate::SizeData;
use crate::catalog::{AlgorithmOrder, Distribution};
use crate::error::PlotError;
use crate::palette::PaletteMode;
use crate::stats::MeasurementStats;
use plotters::style::RGBColor;

/// Thickness of one bar along the category axis
pub const BAR_WIDTH: f64 = 0.6;
/// Gap between two distribution groups
pub const GROUP_SPACING: f64 = 1.0;
/// Padding added past the outermost bars on the category axis
pub const CATEGORY_PADDING: f64 = 1.0;
/// Column width distribution labels are wrapped to
pub const LABEL_WRAP_WIDTH: usize = 11;

pub const VALUE_AXIS_LABEL: &str = "Cycles per element";

/// Extent of one distribution group along the category axis
pub fn group_width(group_size: usize) -> f64 {
    group_size as f64 * BAR_WIDTH + GROUP_SPACING
}

/// Center of the bar for algorithm `algo_idx` in distribution `dist_idx`
pub fn bar_position(algo_idx: usize, dist_idx: usize, group_size: usize) -> f64 {
    BAR_WIDTH * algo_idx as f64 + group_width(group_size) * dist_idx as f64
}

/// Where the label of distribution `dist_idx` sits on the category axis
pub fn tick_position(dist_idx: usize, group_size: usize) -> f64 {
    BAR_WIDTH * group_size as f64 / 2.0 + group_width(group_size) * dist_idx as f64
}

/// Rounded power of ten shown in the title.
///
/// Sizes that are not powers of ten still get the nearest exponent.
pub fn size_exponent(size: u64) -> i32 {
    (size as f64).log10().round() as i32
}

pub fn chart_title(size: u64) -> String {
    format!("Sorting 10^{} elements", size_exponent(size))
}

/// Greedy word wrap to `width` columns.
///
/// Words longer than `width` are split across lines.
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let current_len = current.chars().count();
            let needed = if current.is_empty() {
                word.len()
            } else {
                current_len + 1 + word.len()
            };

            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                continue;
            }

            // Word alone is too long for a line: cut it.
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Summary of one algorithm under one distribution, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub distribution: Distribution,
    pub position: f64,
    pub stats: MeasurementStats,
}

/// All bars of one algorithm, one per distribution
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub algorithm: String,
    pub color: RGBColor,
    pub bars: Vec<BarGeometry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub lines: Vec<String>,
}

/// Fully validated geometry of the chart for one input size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub size: u64,
    pub title: String,
    /// Series in canonical algorithm order
    pub series: Vec<Series>,
    /// One tick per distribution, in canonical order
    pub ticks: Vec<Tick>,
    /// Category axis range, drawn reversed
    pub category_limits: (f64, f64),
    /// Largest bar end including its error whisker
    pub max_value: f64,
}

impl ChartLayout {
    /// Validate `data` and compute where everything goes.
    ///
    /// The algorithm set is read from the Shuffled distribution and assumed to
    /// hold for every other distribution of this size.
    pub fn compute(
        size: u64,
        data: &SizeData,
        order: &AlgorithmOrder,
        palette: PaletteMode,
    ) -> Result<Self, PlotError> {
        for distribution in Distribution::all() {
            if !data.contains_key(distribution) {
                return Err(PlotError::MissingDistribution {
                    size,
                    distribution: distribution.display_name(),
                });
            }
        }

        let reference = &data[&Distribution::Shuffled];
        let algorithms = order.sort(reference.keys().map(String::as_str))?;

        let group_size = algorithms.len();
        let colors = palette.colors(group_size);

        let mut series = Vec::with_capacity(group_size);
        let mut max_value = 0.0_f64;

        for (algo_idx, algorithm) in algorithms.iter().enumerate() {
            let mut bars = Vec::with_capacity(Distribution::all().len());
            for (dist_idx, distribution) in Distribution::all().iter().enumerate() {
                let measurements = data[distribution].get(*algorithm).ok_or_else(|| {
                    PlotError::MissingAlgorithm {
                        size,
                        distribution: distribution.display_name(),
                        algorithm: algorithm.to_string(),
                    }
                })?;

                let stats = MeasurementStats::of(measurements);
                max_value = max_value.max(stats.median + stats.std_dev);
                bars.push(BarGeometry {
                    distribution: *distribution,
                    position: bar_position(algo_idx, dist_idx, group_size),
                    stats,
                });
            }

            series.push(Series {
                algorithm: algorithm.to_string(),
                color: colors[algo_idx],
                bars,
            });
        }

        let ticks = Distribution::all()
            .iter()
            .enumerate()
            .map(|(dist_idx, distribution)| Tick {
                position: tick_position(dist_idx, group_size),
                lines: wrap_label(distribution.display_name(), LABEL_WRAP_WIDTH),
            })
            .collect();

        let last_dist = Distribution::all().len() - 1;
        let last_algo = group_size.saturating_sub(1);
        let category_limits = (
            bar_position(0, 0, group_size) - BAR_WIDTH / 2.0 - CATEGORY_PADDING,
            bar_position(last_algo, last_dist, group_size) + BAR_WIDTH / 2.0 + CATEGORY_PADDING,
        );

        Ok(Self {
            size,
            title: chart_title(size),
            series,
            ticks,
            category_limits,
            max_value,
        })
    }

    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.algorithm.as_str())
    }
}
