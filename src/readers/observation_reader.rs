use crate::error::{ProcessingError, Result};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads fixed-width observation files, one record per line.
pub struct ObservationReader {
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read every record in the file, skipping blank lines.
    pub fn read_records(&self, path: &Path) -> Result<Vec<String>> {
        if self.use_mmap {
            self.read_records_mmap(path)
        } else {
            self.read_records_buffered(path)
        }
    }

    /// Read records using buffered I/O
    fn read_records_buffered(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut records = Vec::new();

        for line_result in reader.lines() {
            let line = line_result?;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            records.push(line);
        }

        Ok(records)
    }

    /// Read records using memory-mapped I/O for large files
    fn read_records_mmap(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let content = std::str::from_utf8(&mmap).map_err(|e| {
            ProcessingError::InvalidFormat(format!("Invalid UTF-8 in {}: {}", path.display(), e))
        })?;

        let mut records = Vec::new();

        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }

            records.push(line.to_string());
        }

        Ok(records)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
