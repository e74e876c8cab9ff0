use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::models::{DatasetReport, FieldKind, FieldReport, RestrictedReport};
use crate::processors::{MonthDay, StatPipeline};
use crate::readers::DatasetReader;
use crate::utils::progress::ScanProgress;

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Summarize {
            input,
            year_start,
            year_end,
            date,
            format,
            max_workers,
            mmap,
        } => {
            let restriction = match date {
                Some(ref raw) => Some(MonthDay::parse(raw)?),
                None => None,
            };
            let format = OutputFormat::parse(&format)?;
            configure_worker_pool(max_workers)?;

            summarize(
                &input,
                year_start,
                year_end,
                restriction,
                format,
                mmap,
                cli.quiet,
            )
            .await
        }

        Commands::Validate {
            input,
            year_start,
            year_end,
            max_workers,
            mmap,
        } => {
            configure_worker_pool(max_workers)?;
            validate(&input, year_start, year_end, mmap, cli.quiet).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("isd_aggregator={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();
}

fn configure_worker_pool(max_workers: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(max_workers)
        .build_global()
        .map_err(|e| ProcessingError::Config(e.to_string()))
}

enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(ProcessingError::Config(format!(
                "Unknown output format: {}",
                other
            ))),
        }
    }
}

/// Year subdirectories in range, or the input directory itself as a single
/// dataset when no year layout is present.
fn discover_datasets(
    reader: &DatasetReader,
    input: &Path,
    year_start: u16,
    year_end: u16,
) -> Result<Vec<(String, PathBuf)>> {
    let years = reader.year_directories(input, year_start, year_end)?;

    if years.is_empty() {
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("dataset")
            .to_string();
        return Ok(vec![(name, input.to_path_buf())]);
    }

    Ok(years
        .into_iter()
        .map(|(year, path)| (year.to_string(), path))
        .collect())
}

async fn summarize(
    input: &Path,
    year_start: u16,
    year_end: u16,
    restriction: Option<MonthDay>,
    format: OutputFormat,
    mmap: bool,
    quiet: bool,
) -> Result<()> {
    let reader = DatasetReader::with_mmap(mmap);
    let datasets = discover_datasets(&reader, input, year_start, year_end)?;
    info!(
        "summarizing {} dataset(s) under {}",
        datasets.len(),
        input.display()
    );

    let total = Instant::now();
    let mut reports = Vec::with_capacity(datasets.len());

    for (name, dir) in &datasets {
        let report = process_dataset(&reader, name, dir, restriction, quiet).await?;
        if matches!(format, OutputFormat::Table) {
            print_dataset_report(&report);
        }
        reports.push(report);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Table => println!(
            "\nProcessed {} dataset(s) in {:.1}s",
            reports.len(),
            total.elapsed().as_secs_f64()
        ),
    }

    Ok(())
}

async fn process_dataset(
    reader: &DatasetReader,
    name: &str,
    dir: &Path,
    restriction: Option<MonthDay>,
    quiet: bool,
) -> Result<DatasetReport> {
    let started = Instant::now();

    let files = reader.observation_files(dir)?;
    let progress = ScanProgress::new(
        files.len() as u64,
        &format!("Reading dataset {}", name),
        quiet,
    );
    let records = reader.read_files(&files, Some(&progress))?;
    progress.finish_with_message(&format!(
        "Dataset {}: {} records from {} files",
        name,
        records.len(),
        files.len()
    ));

    let file_count = files.len();
    let records = Arc::new(records);

    // Full pass over every record
    let fields = run_field_passes(&records, StatPipeline::new()).await?;

    // Date-restricted pass, same quality rules over the matching subset
    let restricted = match restriction {
        Some(month_day) => {
            let pipeline = StatPipeline::new().with_restriction(month_day);
            let fields = run_field_passes(&records, pipeline).await?;
            Some(RestrictedReport {
                date: month_day.to_string(),
                fields,
            })
        }
        None => None,
    };

    Ok(DatasetReport {
        dataset: name.to_string(),
        files: file_count,
        records: records.len(),
        elapsed_ms: started.elapsed().as_millis() as u64,
        fields,
        restricted,
    })
}

/// Runs one pipeline pass per tracked field concurrently over a shared
/// record collection.
async fn run_field_passes(
    records: &Arc<Vec<String>>,
    pipeline: StatPipeline,
) -> Result<Vec<FieldReport>> {
    let records_temperature = records.clone();
    let records_pressure = records.clone();
    let records_wind = records.clone();

    let pipeline_temperature = pipeline.clone();
    let pipeline_pressure = pipeline.clone();
    let pipeline_wind = pipeline;

    let temperature: JoinHandle<Result<FieldReport>> = tokio::spawn(async move {
        pipeline_temperature.run(FieldKind::AirTemperature, &records_temperature)
    });

    let pressure: JoinHandle<Result<FieldReport>> = tokio::spawn(async move {
        pipeline_pressure.run(FieldKind::AirPressure, &records_pressure)
    });

    let wind: JoinHandle<Result<FieldReport>> =
        tokio::spawn(async move { pipeline_wind.run(FieldKind::WindSpeed, &records_wind) });

    // Wait for all passes to complete
    let (temperature, pressure, wind) = tokio::try_join!(temperature, pressure, wind)?;

    Ok(vec![temperature?, pressure?, wind?])
}

fn print_dataset_report(report: &DatasetReport) {
    println!(
        "\nDataset {} - {} records from {} files in {} ms",
        report.dataset, report.records, report.files, report.elapsed_ms
    );

    print_field_reports(&report.fields, "  ");

    if let Some(ref restricted) = report.restricted {
        println!("  Restricted to {}:", restricted.date);
        print_field_reports(&restricted.fields, "    ");
    }
}

fn print_field_reports(fields: &[FieldReport], indent: &str) {
    for report in fields {
        let unit = report.field.unit();

        match report.summary {
            Some(ref summary) => println!(
                "{}{}: min={:.1}{} max={:.1}{} mean={:.1}{} ({} samples)",
                indent,
                report.field.name(),
                summary.min_scaled(),
                unit,
                summary.max_scaled(),
                unit,
                summary.mean_scaled(),
                unit,
                summary.count
            ),
            None => println!("{}{}: no admissible samples", indent, report.field.name()),
        }

        if report.malformed > 0 {
            println!(
                "{}  ⚠️  {} of {} records too short for this field",
                indent, report.malformed, report.scanned
            );
        }
    }
}

async fn validate(
    input: &Path,
    year_start: u16,
    year_end: u16,
    mmap: bool,
    quiet: bool,
) -> Result<()> {
    let reader = DatasetReader::with_mmap(mmap);
    let datasets = discover_datasets(&reader, input, year_start, year_end)?;
    info!(
        "validating {} dataset(s) under {}",
        datasets.len(),
        input.display()
    );

    let total = Instant::now();
    let mut unparseable_total: u64 = 0;
    let mut malformed_total: u64 = 0;

    for (name, dir) in &datasets {
        let files = reader.observation_files(dir)?;
        let progress = ScanProgress::new(
            files.len() as u64,
            &format!("Reading dataset {}", name),
            quiet,
        );
        let records = reader.read_files(&files, Some(&progress))?;
        progress.finish_with_message(&format!(
            "Dataset {}: {} records from {} files",
            name,
            records.len(),
            files.len()
        ));

        println!("\nDataset {} - {} records", name, records.len());

        let pipeline = StatPipeline::new();
        for field in FieldKind::ALL {
            let audit = pipeline.audit(field, &records);
            println!(
                "  {}: {} scanned, {} malformed, {} inadmissible, {} admissible, {} unparseable",
                field.name(),
                audit.scanned,
                audit.malformed,
                audit.inadmissible,
                audit.admissible,
                audit.unparseable
            );
            unparseable_total += audit.unparseable;
            malformed_total += audit.malformed;
        }
    }

    println!(
        "\nValidated {} dataset(s) in {:.1}s",
        datasets.len(),
        total.elapsed().as_secs_f64()
    );

    if unparseable_total == 0 && malformed_total == 0 {
        println!("✅ All records passed structural and quality checks");
    } else {
        println!(
            "⚠️  Found {} unparseable values and {} structurally short records",
            unparseable_total, malformed_total
        );
    }

    Ok(())
}
