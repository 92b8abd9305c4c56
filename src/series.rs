//! Conversion of table samples into styled chart lines.

use crate::data::{Sample, Strategy};
use crate::facet::Facet;
use crate::style::{LinePattern, StrategyStyle};

/// A strategy's line within one facet, ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub strategy: Strategy,
    pub style: StrategyStyle,
    pub pattern: LinePattern,
    /// (free-variable value, sample) in free-variable order
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn label(&self) -> &'static str {
        self.strategy.name()
    }
}

/// Build the line for `strategy` in `facet`. Samples are plotted as given.
pub fn render_series(facet: &Facet, strategy: Strategy, samples: &[Sample]) -> Series {
    Series {
        strategy,
        style: StrategyStyle::of(strategy),
        pattern: LinePattern::at(facet.position),
        points: samples
            .iter()
            .map(|s| (f64::from(s.x), s.value))
            .collect(),
    }
}
