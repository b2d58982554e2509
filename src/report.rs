//! Plain-text report writer
//!
//! Renders ranked statistics as one block per entity: identity line,
//! descriptive line, two numeric lines, blank separator. Generic over the
//! destination so callers can target a file, a buffer, or stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::analysis::stats::{DriverStats, TeamStats};

/// Write one block per ranked driver.
pub fn write_driver_report<W: Write>(out: &mut W, ranked: &[DriverStats]) -> io::Result<()> {
    for item in ranked {
        writeln!(out, "Driver: {}", item.driver.full_name)?;
        writeln!(
            out,
            "DOB: {}, Nationality: {}",
            item.driver.dob, item.driver.nationality
        )?;
        writeln!(
            out,
            "Max Points: {:.2}, Min Points: {:.2}",
            item.summary.max, item.summary.min
        )?;
        writeln!(
            out,
            "Average Points: {:.2}, Std. Deviation of Points: {:.2}",
            item.summary.mean, item.summary.std_dev
        )?;
        writeln!(out)?;
    }
    Ok(())
}

/// Write one block per ranked team.
pub fn write_team_report<W: Write>(out: &mut W, ranked: &[TeamStats]) -> io::Result<()> {
    for item in ranked {
        writeln!(out, "Team: {}", item.team.name)?;
        writeln!(out, "Nationality: {}", item.team.nationality)?;
        writeln!(
            out,
            "Max Points: {:.2}, Min Points: {:.2}",
            item.summary.max, item.summary.min
        )?;
        writeln!(
            out,
            "Average Points: {:.2}, Std. Deviation of Points: {:.2}",
            item.summary.mean, item.summary.std_dev
        )?;
        writeln!(out)?;
    }
    Ok(())
}

/// Save a driver report to a file.
pub fn save_driver_report<P: AsRef<Path>>(path: P, ranked: &[DriverStats]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_driver_report(&mut out, ranked)?;
    out.flush()
}

/// Save a team report to a file.
pub fn save_team_report<P: AsRef<Path>>(path: P, ranked: &[TeamStats]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_team_report(&mut out, ranked)?;
    out.flush()
}
