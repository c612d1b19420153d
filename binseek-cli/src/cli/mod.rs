//! Command-line interface for grid lookups and calibration grids.
//!
//! `lookup` resolves query values against a grid read from a text file and
//! `calibrate` prints the mid-bin values of a linear calibration.

mod commands;
mod input;

pub use commands::{
    CalibrateCommand, CalibrationSummary, Cli, CliError, Command, ExecutionSummary, ExtentArgs,
    LookupCommand, LookupMatch, LookupSummary, render_summary, run_cli,
};
pub use input::read_grid;

#[cfg(test)]
mod test_helpers;
