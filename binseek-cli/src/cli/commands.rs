//! Command implementations and argument parsing for the binseek CLI.

use std::io::{self, Write};
use std::num::{NonZeroUsize, ParseFloatError};
use std::path::PathBuf;

use binseek_core::{
    BinseekError, Direction, GridExtent, LinearCalibration, SortedGrid, closest_index,
};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::input::read_grid;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "binseek", about = "Resolve values to their closest grid bins.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Resolve query values against a grid file.
    Lookup(LookupCommand),
    /// Print the mid-bin values of a linear calibration.
    Calibrate(CalibrateCommand),
}

/// Options accepted by the `lookup` command.
#[derive(Debug, Args, Clone)]
pub struct LookupCommand {
    /// Text file with one grid value per line.
    #[arg(long)]
    pub grid: PathBuf,

    /// Value to resolve; repeat for several queries.
    #[arg(long = "query", allow_negative_numbers = true)]
    pub queries: Vec<f64>,

    /// Reject grids that are empty, non-finite or not monotonic.
    #[arg(long)]
    pub strict: bool,
}

/// Options accepted by the `calibrate` command.
#[derive(Debug, Args, Clone)]
pub struct CalibrateCommand {
    /// Calibrated value of bin zero.
    #[arg(long, allow_negative_numbers = true)]
    pub offset: f64,

    /// Step between neighbouring bins.
    #[arg(long, allow_negative_numbers = true)]
    pub slope: f64,

    /// How far the grid extends.
    #[command(flatten)]
    pub extent: ExtentArgs,
}

/// Mutually exclusive grid extents.
#[derive(Debug, Args, Clone, Default)]
#[group(required = true, multiple = false)]
pub struct ExtentArgs {
    /// Number of bins to generate.
    #[arg(long)]
    pub bins: Option<NonZeroUsize>,

    /// Generate bins until the last one covers this value.
    #[arg(long, allow_negative_numbers = true)]
    pub covering: Option<f64>,
}

impl ExtentArgs {
    fn resolve(&self) -> Result<GridExtent, CliError> {
        match (self.bins, self.covering) {
            (Some(bins), None) => Ok(GridExtent::Bins(bins)),
            (None, Some(max)) => Ok(GridExtent::Covering(max)),
            _ => Err(CliError::Extent),
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the grid file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A grid file line was not a number.
    #[error("`{path}` line {line}: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Underlying parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// Neither or both of `--bins` and `--covering` were given.
    #[error("exactly one of `--bins` or `--covering` is required")]
    Extent,
    /// The core library rejected the input.
    #[error(transparent)]
    Core(#[from] BinseekError),
}

/// One resolved query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupMatch {
    /// Value supplied on the command line.
    pub query: f64,
    /// Index of the closest grid value.
    pub index: usize,
    /// The closest grid value.
    pub value: f64,
}

/// Outcome of the `lookup` command.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupSummary {
    /// Grid file the queries were resolved against.
    pub grid: PathBuf,
    /// Number of values in the grid.
    pub len: usize,
    /// Grid order, known only for strict lookups.
    pub direction: Option<Direction>,
    /// One entry per query, in command-line order.
    pub matches: Vec<LookupMatch>,
}

/// Outcome of the `calibrate` command.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSummary {
    /// The validated calibration.
    pub calibration: LinearCalibration,
    /// Generated mid-bin values.
    pub values: Vec<f64>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Result of `lookup`.
    Lookup(LookupSummary),
    /// Result of `calibrate`.
    Calibrate(CalibrationSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading input or the core library fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use binseek_cli::cli::{Cli, Command, ExecutionSummary, LookupCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0\n1\n2\n3\n")?;
/// let cli = Cli {
///     command: Command::Lookup(LookupCommand {
///         grid: file.path().to_path_buf(),
///         queries: vec![2.2, -7.0],
///         strict: true,
///     }),
/// };
/// let ExecutionSummary::Lookup(summary) = run_cli(cli)? else {
///     unreachable!("lookup produces a lookup summary");
/// };
/// let indices: Vec<usize> = summary.matches.iter().map(|found| found.index).collect();
/// assert_eq!(indices, vec![2, 0]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Lookup(lookup) => {
            span.record("command", field::display("lookup"));
            run_lookup(lookup).map(ExecutionSummary::Lookup)
        }
        Command::Calibrate(calibrate) => {
            span.record("command", field::display("calibrate"));
            run_calibrate(&calibrate).map(ExecutionSummary::Calibrate)
        }
    }
}

#[instrument(
    name = "cli.lookup",
    err,
    skip(command),
    fields(queries = command.queries.len(), strict = command.strict),
)]
pub(super) fn run_lookup(command: LookupCommand) -> Result<LookupSummary, CliError> {
    let LookupCommand {
        grid: path,
        queries,
        strict,
    } = command;
    let values = read_grid(&path)?;

    let (direction, matches) = if strict {
        let grid = SortedGrid::new(&values).map_err(BinseekError::from)?;
        let matches = queries
            .iter()
            .zip(grid.closest_indices(&queries))
            .map(|(&query, index)| LookupMatch {
                query,
                index,
                value: grid[index],
            })
            .collect();
        (Some(grid.direction()), matches)
    } else {
        let matches = queries
            .iter()
            .map(|&query| {
                let index = closest_index(&values, query).map_err(BinseekError::from)?;
                Ok(LookupMatch {
                    query,
                    index,
                    value: values[index],
                })
            })
            .collect::<Result<Vec<_>, CliError>>()?;
        (None, matches)
    };

    info!(grid_len = values.len(), resolved = matches.len(), "lookup completed");
    Ok(LookupSummary {
        grid: path,
        len: values.len(),
        direction,
        matches,
    })
}

#[instrument(
    name = "cli.calibrate",
    err,
    skip(command),
    fields(offset = command.offset, slope = command.slope, bins = field::Empty),
)]
pub(super) fn run_calibrate(command: &CalibrateCommand) -> Result<CalibrationSummary, CliError> {
    let extent = command.extent.resolve()?;
    let calibration =
        LinearCalibration::new(command.offset, command.slope).map_err(BinseekError::from)?;
    let values = calibration.grid(extent).map_err(BinseekError::from)?;
    Span::current().record("bins", values.len());
    Ok(CalibrationSummary {
        calibration,
        values,
    })
}

/// Renders `summary` to `writer` as a header line followed by tab-separated
/// records.
///
/// Lookups print `query`, `index` and `value` per query. Calibrations print
/// `index` and `value` per bin.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use binseek_cli::cli::{CalibrationSummary, ExecutionSummary, render_summary};
/// # use binseek_core::LinearCalibration;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Calibrate(CalibrationSummary {
///     calibration: LinearCalibration::new(10.0, 20.0)?,
///     values: vec![10.0, 30.0],
/// });
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "calibration: offset 10, slope 20, 2 bins\n0\t10\n1\t30\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Lookup(lookup) => {
            let order = match lookup.direction {
                Some(Direction::Ascending) => "ascending",
                Some(Direction::Descending) => "descending",
                Some(Direction::Constant) => "constant",
                None => "unchecked",
            };
            writeln!(
                writer,
                "grid: {} ({} values, {order})",
                lookup.grid.display(),
                lookup.len,
            )?;
            for found in &lookup.matches {
                writeln!(writer, "{}\t{}\t{}", found.query, found.index, found.value)?;
            }
        }
        ExecutionSummary::Calibrate(calibrate) => {
            writeln!(
                writer,
                "calibration: offset {}, slope {}, {} bins",
                calibrate.calibration.offset(),
                calibrate.calibration.slope(),
                calibrate.values.len(),
            )?;
            for (index, value) in calibrate.values.iter().enumerate() {
                writeln!(writer, "{index}\t{value}")?;
            }
        }
    }
    Ok(())
}
