use crate::error::Result;
use crate::readers::observation_reader::ObservationReader;
use crate::utils::progress::ScanProgress;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads a dataset directory of observation files, reading files in
/// parallel, and discovers year-numbered subdirectories for the driver
/// loop.
pub struct DatasetReader {
    reader: ObservationReader,
}

impl DatasetReader {
    pub fn new() -> Self {
        Self {
            reader: ObservationReader::new(),
        }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self {
            reader: ObservationReader::with_mmap(use_mmap),
        }
    }

    /// Regular files directly under `dir`, sorted by name.
    pub fn observation_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Year-numbered subdirectories of `root` within `[start, end]`, sorted
    /// ascending. Empty when `root` has no year layout, in which case the
    /// root itself is the dataset.
    pub fn year_directories(
        &self,
        root: &Path,
        start: u16,
        end: u16,
    ) -> Result<Vec<(u16, PathBuf)>> {
        let mut years = Vec::new();

        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if let Ok(year) = name.parse::<u16>() {
                    if (start..=end).contains(&year) {
                        years.push((year, path));
                    }
                }
            }
        }

        years.sort();
        Ok(years)
    }

    /// Reads every file in `dir` into one record collection. Returns the
    /// records and the number of files read.
    pub fn read_dataset(
        &self,
        dir: &Path,
        progress: Option<&ScanProgress>,
    ) -> Result<(Vec<String>, usize)> {
        let files = self.observation_files(dir)?;
        let records = self.read_files(&files, progress)?;
        Ok((records, files.len()))
    }

    /// Reads the given files in parallel, advancing `progress` one tick per
    /// file, and flattens their records in file order.
    pub fn read_files(
        &self,
        files: &[PathBuf],
        progress: Option<&ScanProgress>,
    ) -> Result<Vec<String>> {
        let per_file: Result<Vec<Vec<String>>> = files
            .par_iter()
            .map(|path| {
                let records = self.reader.read_records(path);
                if let Some(p) = progress {
                    p.increment(1);
                }
                records
            })
            .collect();

        let records: Vec<String> = per_file?.into_iter().flatten().collect();
        debug!(
            "loaded {} records from {} files",
            records.len(),
            files.len()
        );

        Ok(records)
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}
