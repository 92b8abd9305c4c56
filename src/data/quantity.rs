//! Measured quantities and the per-quantity chart policy.

use super::tables;
use super::{RawTable, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale mode of the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    Linear,
    Log,
}

/// A measured quantity
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    #[value(name = "cycles-per-byte")]
    CpuCyclesPerByte,
    CacheMisses,
    Latency,
    Throughput,
}

impl Quantity {
    /// All quantities in processing order
    pub const ALL: [Quantity; 4] = [
        Quantity::CpuCyclesPerByte,
        Quantity::CacheMisses,
        Quantity::Latency,
        Quantity::Throughput,
    ];

    pub fn spec(self) -> &'static QuantitySpec {
        match self {
            Quantity::CpuCyclesPerByte => &QUANTITIES[0],
            Quantity::CacheMisses => &QUANTITIES[1],
            Quantity::Latency => &QUANTITIES[2],
            Quantity::Throughput => &QUANTITIES[3],
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().title)
    }
}

/// Everything that distinguishes one quantity's charts from another's.
#[derive(Debug)]
pub struct QuantitySpec {
    pub quantity: Quantity,
    /// Leading part of every chart title
    pub title: &'static str,
    /// Leading part of every output file name
    pub file_stem: &'static str,
    pub y_label: &'static str,
    /// Variable iterated to produce one chart per value
    pub fixed: Variable,
    pub x_scale: AxisScale,
    pub raw: RawTable,
}

impl QuantitySpec {
    /// Variable plotted along the x axis
    pub fn free(&self) -> Variable {
        self.fixed.other()
    }
}

pub static QUANTITIES: [QuantitySpec; 4] = [
    QuantitySpec {
        quantity: Quantity::CpuCyclesPerByte,
        title: "CPU Cycles per Byte",
        file_stem: "CPU_Cycles_per_Byte",
        y_label: "CPU Cycles per Byte",
        fixed: Variable::ThreadCount,
        x_scale: AxisScale::Log,
        raw: tables::CYCLES_PER_BYTE,
    },
    QuantitySpec {
        quantity: Quantity::CacheMisses,
        title: "Cache Misses",
        file_stem: "Cache_Misses",
        y_label: "Cache Misses",
        fixed: Variable::ThreadCount,
        x_scale: AxisScale::Log,
        raw: tables::CACHE_MISSES,
    },
    QuantitySpec {
        quantity: Quantity::Latency,
        title: "Latency",
        file_stem: "Latency",
        y_label: "Latency (µs)",
        fixed: Variable::MessageSize,
        x_scale: AxisScale::Linear,
        raw: tables::LATENCY_US,
    },
    QuantitySpec {
        quantity: Quantity::Throughput,
        title: "Throughput",
        file_stem: "Throughput",
        y_label: "Throughput (Gbps)",
        fixed: Variable::ThreadCount,
        x_scale: AxisScale::Log,
        raw: tables::THROUGHPUT_GBPS,
    },
];
