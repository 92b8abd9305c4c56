//! copyplot - comparison charts for two-copy, one-copy and zero-copy IPC.
//!
//! Renders one SVG per (measured quantity, fixed thread count or message
//! size), plotting each strategy's results against the other variable.

mod data;
mod facet;
mod plot;
mod series;
mod style;
mod sysinfo;

use anyhow::{Context, Result};
use clap::Parser;
use data::{Quantity, QuantitySpec, TableExport};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use sysinfo::{ProcCpuInfo, SystemIdentity};

/// Comparison charts for IPC copy-strategy benchmarks
#[derive(Parser, Debug)]
#[command(name = "copyplot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to write charts into (created if missing)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Only chart these quantities (repeatable; default: all)
    #[arg(short, long, value_enum)]
    quantity: Vec<Quantity>,

    /// Print the chart file names a run would write, then exit
    #[arg(long)]
    list: bool,

    /// Write the validated result tables to a JSON file
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Suppress progress messages
    #[arg(long)]
    quiet: bool,
}

impl Args {
    fn quantities(&self) -> Vec<Quantity> {
        if self.quantity.is_empty() {
            Quantity::ALL.to_vec()
        } else {
            let mut selected = self.quantity.clone();
            selected.sort();
            selected.dedup();
            selected
        }
    }
}

fn export_tables(path: &Path, tables: &[data::MeasurementTable]) -> Result<()> {
    let exports: Vec<TableExport> = tables.iter().map(|t| t.export()).collect();
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &exports)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    Ok(())
}

/// Validate every table in `specs`, then chart them into the output
/// directory. Nothing is written unless all tables are sound.
fn run(args: &Args, specs: &[&'static QuantitySpec], caption: &str) -> Result<usize> {
    let tables = data::load_all(specs.iter().copied())
        .context("Embedded benchmark results are inconsistent")?;

    if let Some(ref path) = args.export_json {
        export_tables(path, &tables)?;
        if !args.quiet {
            eprintln!("Result tables exported to: {}", path.display());
        }
    }

    let output_dir = &args.output_dir;
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    if !args.quiet {
        eprintln!("Generating charts in: {}", output_dir.display());
        eprintln!("{}", caption);
    }

    let mut generated = 0;
    for table in &tables {
        let written = plot::generate_charts(table, caption, output_dir)
            .with_context(|| format!("Failed to chart {}", table.spec().quantity))?;
        if !args.quiet {
            for path in &written {
                eprintln!("  • {}", path.display());
            }
        }
        generated += written.len();
    }

    Ok(generated)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let quantities = args.quantities();

    if args.list {
        for name in plot::planned_files(&quantities) {
            println!("{}", args.output_dir.join(name).display());
        }
        return Ok(());
    }

    let specs: Vec<&'static QuantitySpec> = quantities.iter().map(|q| q.spec()).collect();
    let caption = SystemIdentity::probe(&ProcCpuInfo).to_string();
    let generated = run(&args, &specs, &caption)?;

    if !args.quiet {
        eprintln!("\nGenerated {} charts", generated);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_chart_everything_into_cwd() {
        let args = Args::try_parse_from(["copyplot"]).unwrap();
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.quantities(), Quantity::ALL);
        assert!(!args.list);
    }

    #[test]
    fn quantity_filter_is_ordered_and_deduplicated() {
        let args = Args::try_parse_from([
            "copyplot",
            "-q",
            "throughput",
            "--quantity",
            "cycles-per-byte",
            "-q",
            "throughput",
        ])
        .unwrap();
        assert_eq!(args.quantities(), [Quantity::CpuCyclesPerByte, Quantity::Throughput]);
    }

    #[test]
    fn unknown_quantity_is_rejected() {
        assert!(Args::try_parse_from(["copyplot", "-q", "bandwidth"]).is_err());
    }

    #[test]
    fn export_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        let tables =
            data::load_all([Quantity::Latency.spec(), Quantity::CacheMisses.spec()]).unwrap();

        export_tables(&path, &tables).unwrap();

        let exports: Vec<TableExport> =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].quantity, Quantity::Latency);
        assert_eq!(exports[1].quantity, Quantity::CacheMisses);
        let two_copy_512 = exports[0]
            .series
            .iter()
            .find(|s| s.strategy == data::Strategy::TwoCopy && s.fixed_value == 512)
            .unwrap();
        assert_eq!(two_copy_512.samples[0].value, 995608.632);
        assert_eq!(two_copy_512.samples[3].x, 8);
    }

    const CAPTION: &str = "System: Linux-6.1.0-x86_64 | CPU: Test CPU | Cores: 8";

    #[test]
    fn run_writes_every_facet_of_each_quantity() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let args =
            Args::try_parse_from(["copyplot", "--quiet", "-o", out.to_str().unwrap()]).unwrap();
        let specs = [Quantity::Latency.spec(), Quantity::Throughput.spec()];

        assert_eq!(run(&args, &specs, CAPTION).unwrap(), 8);
        assert!(out.join("Latency_vs_Thread_Count_MSG4096.svg").is_file());
        assert!(out.join("Throughput_vs_Message_Size_T8.svg").is_file());
    }

    #[test]
    fn inconsistent_table_writes_no_charts() {
        const SHORT_ROW: data::RawTable = &[(
            data::Strategy::TwoCopy,
            &[(512, &[1.0, 2.0, 3.0])],
        )];
        static BROKEN: QuantitySpec = QuantitySpec {
            quantity: Quantity::Latency,
            title: "Latency",
            file_stem: "Broken_Latency",
            y_label: "Latency (µs)",
            fixed: data::Variable::MessageSize,
            x_scale: data::AxisScale::Linear,
            raw: SHORT_ROW,
        };

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let json = dir.path().join("tables.json");
        let args = Args::try_parse_from([
            "copyplot",
            "--quiet",
            "-o",
            out.to_str().unwrap(),
            "--export-json",
            json.to_str().unwrap(),
        ])
        .unwrap();

        // The sound table comes first, so nothing may be drawn before validation
        let err = run(&args, &[Quantity::Throughput.spec(), &BROKEN], CAPTION).unwrap_err();

        assert!(format!("{:#}", err).contains("has 3 samples, expected 4"));
        assert!(!out.exists());
        assert!(!json.exists());
    }
}
