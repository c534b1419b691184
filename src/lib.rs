pub mod aggregate;
pub mod canvas;
pub mod catalog;
pub mod chart;
pub mod error;
pub mod layout;
pub mod palette;
pub mod stats;

pub use aggregate::{Aggregator, MeasurementIndex};
pub use canvas::Canvas;
pub use chart::{ChartRenderer, SvgCanvas};
pub use error::PlotError;
