use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress over the files of one dataset scan, silenced by `--quiet`.
pub struct ScanProgress {
    progress_bar: Option<ProgressBar>,
}

impl ScanProgress {
    /// A bar over `total_files`, advanced once per file read, or an inert
    /// reporter when `silent` is set.
    pub fn new(total_files: u64, message: &str, silent: bool) -> Self {
        if silent {
            return Self { progress_bar: None };
        }

        let pb = ProgressBar::new(total_files);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ScanProgress {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increments_accumulate_per_file() {
        let progress = ScanProgress::new(4, "Reading dataset 1980", false);
        progress.increment(1);
        progress.increment(2);

        let pb = progress.progress_bar.as_ref().unwrap();
        assert_eq!(pb.position(), 3);
        assert_eq!(pb.length(), Some(4));
    }

    #[test]
    fn test_silent_reporter_draws_nothing() {
        let progress = ScanProgress::new(4, "Reading dataset 1980", true);
        progress.increment(1);
        progress.finish_with_message("done");
        assert!(progress.progress_bar.is_none());
    }
}
