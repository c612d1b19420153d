//! Grid files: one number per line, blank lines and `#` comments ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{Span, debug, field, instrument};

use super::commands::CliError;

/// Reads the grid stored at `path`.
///
/// Surrounding whitespace is trimmed before parsing. Order is not checked
/// here; that is up to the command consuming the values.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read and
/// [`CliError::Parse`] for the first line that is not a number.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use binseek_cli::cli::read_grid;
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "# energies\n10\n\n 20.5 \n")?;
/// assert_eq!(read_grid(file.path())?, vec![10.0, 20.5]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.read_grid", err, fields(path = field::Empty, values = field::Empty))]
pub fn read_grid(path: &Path) -> Result<Vec<f64>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values = parse_grid(path, BufReader::new(file))?;
    span.record("values", values.len());
    Ok(values)
}

pub(super) fn parse_grid(path: &Path, reader: impl BufRead) -> Result<Vec<f64>, CliError> {
    let mut values = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let value = trimmed.parse::<f64>().map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            line: number + 1,
            source,
        })?;
        values.push(value);
    }
    debug!(values = values.len(), "parsed grid file");
    Ok(values)
}
