use anyhow::Result;
use plotters::style::RGBColor;
use std::path::Path;

/// One horizontal bar, in chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Center of the bar along the category axis
    pub position: f64,
    /// Bar length along the value axis
    pub length: f64,
    /// Extent of the bar along the category axis
    pub thickness: f64,
    /// Half-length of the error whisker drawn at the end of the bar
    pub error: f64,
    pub color: RGBColor,
    /// Series the bar belongs to
    pub label: String,
}

/// Drawing surface a chart is rendered onto.
///
/// Calls describe one chart; `present` finishes it and `clear` resets the
/// surface so the next chart starts empty.
pub trait Canvas {
    /// Where the next presented chart goes, for backends that persist charts.
    fn set_target(&mut self, _path: &Path) {}

    fn set_title(&mut self, title: &str);

    fn set_value_label(&mut self, label: &str);

    /// Largest value that must fit on the value axis, whiskers included.
    fn set_value_limit(&mut self, max: f64);

    /// Visible range of the category axis. When `reversed` the lowest
    /// position is drawn at the top.
    fn set_category_limits(&mut self, low: f64, high: f64, reversed: bool);

    /// Label a position of the category axis; `lines` are drawn stacked.
    fn category_tick(&mut self, position: f64, lines: &[String]);

    fn bar(&mut self, bar: Bar);

    fn legend_entry(&mut self, label: &str, color: RGBColor);

    /// Render everything issued since the last `clear`.
    fn present(&mut self) -> Result<()>;

    fn clear(&mut self);
}
