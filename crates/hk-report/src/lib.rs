//! Small helpers shared by every action's `dump()` implementation.
//!
//! The external interface is a fixed set of plain-text files, not a
//! structured format like CSV, so this crate is just a thin, buffered line
//! writer plus a couple of formatting helpers used across every report
//! file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use hk_core::HkResult;

/// A buffered plain-text report file, one line at a time.
pub struct LineWriter {
    inner: BufWriter<File>,
}

impl LineWriter {
    /// Truncate-and-write: the file starts empty regardless of what a prior
    /// run left there.
    pub fn create(path: &Path) -> HkResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            inner: BufWriter::new(File::create(path)?),
        })
    }

    /// Append-or-create: prior runs' lines are preserved. Used by report
    /// files that accumulate across repeated `dump()` calls on the same
    /// output directory.
    pub fn append(path: &Path) -> HkResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            inner: BufWriter::new(OpenOptions::new().create(true).append(true).open(path)?),
        })
    }

    /// Write `fields` as one whitespace-separated line.
    pub fn row(&mut self, fields: &[&dyn std::fmt::Display]) -> HkResult<()> {
        let line = fields
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.inner, "{line}")?;
        Ok(())
    }

    /// Write a preformatted line verbatim.
    pub fn line(&mut self, text: &str) -> HkResult<()> {
        writeln!(self.inner, "{text}")?;
        Ok(())
    }

    pub fn flush(&mut self) -> HkResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// `100 * numerator / denominator`, or `0.0` when `denominator` is zero —
/// every percentage column in every report file goes through this so an
/// empty run produces `0.00%` instead of `NaN`.
pub fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        100.0 * numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_zero_denominator_is_zero() {
        assert_eq!(percent(5, 0), 0.0);
    }

    #[test]
    fn percent_basic() {
        assert!((percent(1, 4) - 25.0).abs() < 1e-9);
    }
}
