//! Plain edge-list files.
//!
//! The format is a header line holding the file name, then one `u v` pair per
//! line with one-based vertex numbers, terminated by a `0 0` line.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::error::{HarnessError, Result};

/// Writes zero-based `edges` to `path` in edge-list format.
///
/// # Errors
/// Returns [`HarnessError::EdgeListIo`] when the file cannot be written.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use gauntlet_core::write_edge_list;
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("triangle.txt");
/// write_edge_list(&path, &[(0, 1), (1, 2), (2, 0)])?;
/// let text = std::fs::read_to_string(&path)?;
/// assert!(text.ends_with("2 3\n3 1\n0 0\n"));
/// # Ok(())
/// # }
/// ```
pub fn write_edge_list(path: &Path, edges: &[(usize, usize)]) -> Result<()> {
    let io_error = |source| HarnessError::EdgeListIo {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let header = path.file_name().unwrap_or(path.as_os_str());
    writeln!(writer, "{}", header.to_string_lossy()).map_err(io_error)?;
    for &(u, v) in edges {
        writeln!(writer, "{} {}", u + 1, v + 1).map_err(io_error)?;
    }
    writeln!(writer, "0 0").map_err(io_error)?;
    writer.flush().map_err(io_error)
}

/// Reads an edge-list file back into zero-based pairs.
///
/// Reading stops at the `0 0` terminator.
///
/// # Errors
/// Returns [`HarnessError::EdgeListIo`] when the file cannot be read and
/// [`HarnessError::EdgeListFormat`] when a line is not a valid pair or the
/// terminator is missing.
pub fn read_edge_list(path: &Path) -> Result<Vec<(usize, usize)>> {
    let io_error = |source| HarnessError::EdgeListIo {
        path: path.to_path_buf(),
        source,
    };
    let format_error = |line: usize, reason: &str| HarnessError::EdgeListFormat {
        path: path.to_path_buf(),
        line,
        reason: reason.to_owned(),
    };

    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    let mut edges = Vec::new();
    // The first line is the header.
    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line.map_err(io_error)?;
        let number = index + 1;
        let mut fields = line.split_whitespace().map(str::parse::<usize>);
        let (Some(Ok(u)), Some(Ok(v)), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(format_error(number, "expected two vertex numbers"));
        };
        match (u, v) {
            (0, 0) => return Ok(edges),
            (0, _) | (_, 0) => return Err(format_error(number, "vertex numbers start at 1")),
            _ => edges.push((u - 1, v - 1)),
        }
    }
    Err(format_error(edges.len() + 2, "missing `0 0` terminator"))
}
