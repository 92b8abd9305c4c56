//! Embedded benchmark results and the validated tables built from them.

pub mod quantity;
pub mod tables;

pub use quantity::{AxisScale, Quantity, QuantitySpec};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Raw embedded rows: strategy -> (fixed value, samples in free-variable order)
pub type RawTable = &'static [(Strategy, &'static [(u32, &'static [f64])])];

/// Thread counts exercised by the benchmark, ascending
pub const THREAD_COUNTS: [u32; 4] = [1, 2, 4, 8];

/// Message sizes in bytes exercised by the benchmark, ascending
pub const MESSAGE_SIZES: [u32; 4] = [128, 512, 1024, 4096];

/// Inter-process data transfer strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strategy {
    TwoCopy,
    OneCopy,
    ZeroCopy,
}

impl Strategy {
    /// All strategies in drawing order
    pub const ALL: [Strategy; 3] = [Strategy::TwoCopy, Strategy::OneCopy, Strategy::ZeroCopy];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::TwoCopy => "TwoCopy",
            Strategy::OneCopy => "OneCopy",
            Strategy::ZeroCopy => "ZeroCopy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Independent benchmark variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    ThreadCount,
    MessageSize,
}

impl Variable {
    /// Canonical ordered values
    pub fn values(self) -> &'static [u32] {
        match self {
            Variable::ThreadCount => &THREAD_COUNTS,
            Variable::MessageSize => &MESSAGE_SIZES,
        }
    }

    pub fn other(self) -> Variable {
        match self {
            Variable::ThreadCount => Variable::MessageSize,
            Variable::MessageSize => Variable::ThreadCount,
        }
    }

    /// Position of `value` in the canonical ordering
    pub fn position(self, value: u32) -> Option<usize> {
        self.values().iter().position(|&v| v == value)
    }

    /// Name used in chart titles
    pub fn display_name(self) -> &'static str {
        match self {
            Variable::ThreadCount => "Thread Count",
            Variable::MessageSize => "Message Size",
        }
    }

    /// Name used in output file names
    pub fn file_name(self) -> &'static str {
        match self {
            Variable::ThreadCount => "Thread_Count",
            Variable::MessageSize => "Message_Size",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Variable::ThreadCount => "Thread Count",
            Variable::MessageSize => "Message Size (bytes)",
        }
    }

    /// Prefix of the fixed value in output file names
    pub fn facet_tag(self) -> &'static str {
        match self {
            Variable::ThreadCount => "T",
            Variable::MessageSize => "MSG",
        }
    }

    /// Title clause describing a fixed value, e.g. "Threads = 8"
    pub fn describe(self, value: u32) -> String {
        match self {
            Variable::ThreadCount => format!("Threads = {}", value),
            Variable::MessageSize => format!("Message Size = {} bytes", value),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One measurement paired with the free-variable value it was taken at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: u32,
    pub value: f64,
}

/// Defects in the embedded result tables
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("{quantity}: no samples for {strategy} at {variable} = {value}")]
    MissingSeries {
        quantity: Quantity,
        strategy: Strategy,
        variable: Variable,
        value: u32,
    },

    #[error(
        "{quantity}: {strategy} at {variable} = {value} has {found} samples, expected {expected}"
    )]
    LengthMismatch {
        quantity: Quantity,
        strategy: Strategy,
        variable: Variable,
        value: u32,
        expected: usize,
        found: usize,
    },

    #[error("{quantity}: {strategy} lists {variable} = {value}, which was not benchmarked")]
    UnknownFixedValue {
        quantity: Quantity,
        strategy: Strategy,
        variable: Variable,
        value: u32,
    },

    #[error("{quantity}: {strategy} at {variable} = {value} is listed more than once")]
    DuplicateSeries {
        quantity: Quantity,
        strategy: Strategy,
        variable: Variable,
        value: u32,
    },

    #[error("{quantity}: {strategy} at {variable} = {value} has a non-finite sample at x = {x}")]
    NonFiniteSample {
        quantity: Quantity,
        strategy: Strategy,
        variable: Variable,
        value: u32,
        x: u32,
    },
}

/// Validated, read-only results for one quantity.
///
/// Every (strategy, fixed value) pair of the canonical sets is present and
/// carries exactly one sample per free-variable value, paired with that value.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    spec: &'static QuantitySpec,
    series: BTreeMap<(Strategy, u32), Vec<Sample>>,
}

impl MeasurementTable {
    /// Validate the quantity's embedded rows
    pub fn load(spec: &'static QuantitySpec) -> Result<Self, DataError> {
        Self::from_raw(spec, spec.raw)
    }

    /// Validate arbitrary rows against the quantity's variable sets
    pub fn from_raw(spec: &'static QuantitySpec, raw: RawTable) -> Result<Self, DataError> {
        let quantity = spec.quantity;
        let variable = spec.fixed;
        let free_values = spec.free().values();
        let mut series = BTreeMap::new();

        for &(strategy, rows) in raw {
            for &(value, samples) in rows {
                if variable.position(value).is_none() {
                    return Err(DataError::UnknownFixedValue {
                        quantity,
                        strategy,
                        variable,
                        value,
                    });
                }
                if samples.len() != free_values.len() {
                    return Err(DataError::LengthMismatch {
                        quantity,
                        strategy,
                        variable,
                        value,
                        expected: free_values.len(),
                        found: samples.len(),
                    });
                }

                let mut paired = Vec::with_capacity(samples.len());
                for (&x, &sample) in free_values.iter().zip(samples) {
                    if !sample.is_finite() {
                        return Err(DataError::NonFiniteSample {
                            quantity,
                            strategy,
                            variable,
                            value,
                            x,
                        });
                    }
                    paired.push(Sample { x, value: sample });
                }

                if series.insert((strategy, value), paired).is_some() {
                    return Err(DataError::DuplicateSeries { quantity, strategy, variable, value });
                }
            }
        }

        for strategy in Strategy::ALL {
            for &value in variable.values() {
                if !series.contains_key(&(strategy, value)) {
                    return Err(DataError::MissingSeries { quantity, strategy, variable, value });
                }
            }
        }

        Ok(Self { spec, series })
    }

    pub fn spec(&self) -> &'static QuantitySpec {
        self.spec
    }

    /// Samples for one strategy at one fixed value, in free-variable order
    pub fn series(&self, strategy: Strategy, fixed_value: u32) -> Result<&[Sample], DataError> {
        self.series
            .get(&(strategy, fixed_value))
            .map(Vec::as_slice)
            .ok_or(DataError::MissingSeries {
                quantity: self.spec.quantity,
                strategy,
                variable: self.spec.fixed,
                value: fixed_value,
            })
    }

    /// Serializable view of the whole table, strategies then fixed values in order
    pub fn export(&self) -> TableExport {
        let series = Strategy::ALL
            .iter()
            .flat_map(|&strategy| {
                self.spec.fixed.values().iter().map(move |&fixed_value| (strategy, fixed_value))
            })
            .filter_map(|(strategy, fixed_value)| {
                self.series.get(&(strategy, fixed_value)).map(|samples| SeriesExport {
                    strategy,
                    fixed_value,
                    samples: samples.clone(),
                })
            })
            .collect();

        TableExport {
            quantity: self.spec.quantity,
            fixed: self.spec.fixed,
            free: self.spec.free(),
            series,
        }
    }
}

/// JSON form of a [`MeasurementTable`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableExport {
    pub quantity: Quantity,
    pub fixed: Variable,
    pub free: Variable,
    pub series: Vec<SeriesExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesExport {
    pub strategy: Strategy,
    pub fixed_value: u32,
    pub samples: Vec<Sample>,
}

/// Load and validate the tables for `specs`, failing on the first defect
pub fn load_all<I>(specs: I) -> Result<Vec<MeasurementTable>, DataError>
where
    I: IntoIterator<Item = &'static QuantitySpec>,
{
    specs.into_iter().map(MeasurementTable::load).collect()
}
