use crate::utils::constants::{DEFAULT_YEAR_END, DEFAULT_YEAR_START};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "isd-aggregator")]
#[command(about = "High-performance aggregator for NOAA ISD weather records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute min/max/mean statistics for every tracked field
    Summarize {
        #[arg(
            short,
            long,
            help = "Directory of observation files, or of year subdirectories"
        )]
        input: PathBuf,

        #[arg(long, default_value_t = DEFAULT_YEAR_START, help = "First year directory to include")]
        year_start: u16,

        #[arg(long, default_value_t = DEFAULT_YEAR_END, help = "Last year directory to include")]
        year_end: u16,

        #[arg(
            short,
            long,
            help = "Run an additional pass restricted to this month and day (MM-DD)"
        )]
        date: Option<String>,

        #[arg(short, long, default_value = "table", help = "Output format: table or json")]
        format: String,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Memory-map input files")]
        mmap: bool,
    },

    /// Audit record structure and quality codes without computing statistics
    Validate {
        #[arg(
            short,
            long,
            help = "Directory of observation files, or of year subdirectories"
        )]
        input: PathBuf,

        #[arg(long, default_value_t = DEFAULT_YEAR_START, help = "First year directory to include")]
        year_start: u16,

        #[arg(long, default_value_t = DEFAULT_YEAR_END, help = "Last year directory to include")]
        year_end: u16,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Memory-map input files")]
        mmap: bool,
    },
}
