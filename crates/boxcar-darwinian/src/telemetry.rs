//! Population log writer
//!
//! Writes one [`CandidateTelemetry`] row per evaluated car under the fixed
//! population header.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use boxcar_common::{population_headers, CandidateTelemetry, Result, MAX_ROUND_DIGITS};
use boxcar_settings::{Resolver, BOXCAR_CONTROLLER};
use tracing::debug;

/// Appending CSV writer for per-candidate telemetry
pub struct PopulationLog {
    path: PathBuf,
    writer: BufWriter<File>,
    /// Decimal places kept for floating-point cells
    digits: u32,
}

impl PopulationLog {
    /// Open `path`, writing the header if the file is new
    pub fn open(path: impl AsRef<Path>, digits: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let is_new = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = BufWriter::new(file);
        if is_new {
            writer.write_all(population_headers().as_bytes())?;
            debug!(path = %path.display(), "Created population log");
        }
        Ok(Self {
            path,
            writer,
            digits,
        })
    }

    /// Open with the rounding taken from `round_length_vertices_coordinates`
    pub fn open_with_settings(path: impl AsRef<Path>, resolver: &mut Resolver) -> Result<Self> {
        let digits = resolver.resolve_i64(BOXCAR_CONTROLLER, "round_length_vertices_coordinates")?;
        Self::open(path, digits.clamp(0, MAX_ROUND_DIGITS as i64) as u32)
    }

    pub fn append(&mut self, row: &CandidateTelemetry) -> Result<()> {
        self.writer.write_all(row.to_csv_row(self.digits).as_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxcar_settings::default_store;

    #[test]
    fn test_header_then_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("population.csv");
        let mut resolver = Resolver::new(default_store());

        let mut log = PopulationLog::open_with_settings(&path, &mut resolver).unwrap();
        log.append(&CandidateTelemetry {
            generation: 1,
            id: 4,
            fitness: 2.5,
            ..Default::default()
        })
        .unwrap();
        log.flush().unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(Some(population_headers().trim_end()), lines.next());
        assert!(lines.next().unwrap().starts_with("1,4,2.5,0,0,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_reopen_does_not_repeat_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("population.csv");

        for id in 0..2 {
            let mut log = PopulationLog::open(&path, 6).unwrap();
            log.append(&CandidateTelemetry {
                id,
                ..Default::default()
            })
            .unwrap();
            log.flush().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert_eq!(contents.matches("generation").count(), 1);
    }
}
