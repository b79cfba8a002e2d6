use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flight_planner::{
    ExportConfig, ExportError, FlightPlanExporter, PlanRequest, RecordCollector, SpreadsheetLayout,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    TripSummary,
    FlightOptions,
    FlightOptionsLegacy,
}

impl From<LayoutArg> for SpreadsheetLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::TripSummary => SpreadsheetLayout::TripSummary,
            LayoutArg::FlightOptions => SpreadsheetLayout::FlightOptions,
            LayoutArg::FlightOptionsLegacy => SpreadsheetLayout::FlightOptionsLegacy,
        }
    }
}

/// Generate flight search summaries, copyable option text and Excel sheets
#[derive(Parser, Debug)]
#[command(name = "flight-planner", version)]
struct Args {
    /// Trip and flight options as JSON
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Export configuration as JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Spreadsheet variant (overrides the config file)
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Directory the workbook is written to (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not print the flight search links
    #[arg(long)]
    no_links: bool,
}

fn load_config(args: &Args) -> Result<ExportConfig> {
    let mut config = match &args.config {
        Some(path) => ExportConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ExportConfig::default(),
    };
    if let Some(layout) = args.layout {
        config.layout = layout.into();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.no_links {
        config.include_links = false;
    }
    Ok(config)
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    tracing::debug!(?config, "configuration loaded");

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let request = PlanRequest::from_json_str(&raw)?;
    let collector = RecordCollector::from_request(request);

    let output_dir = config.output_dir.clone();
    let exporter = FlightPlanExporter::new(config);
    let bundle = match exporter.export(collector.trip(), collector.options()) {
        Ok(bundle) => bundle,
        Err(e @ ExportError::MissingRequiredField(_)) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e).context("export failed"),
    };

    println!("{}", bundle.summary_text);
    if let Some(links) = &bundle.links_markdown {
        println!("Quick Flight Search Links\n{}", links);
    }
    println!("{}", bundle.copy_text);

    let path = bundle
        .spreadsheet
        .write_to(&output_dir)
        .context("failed to write workbook")?;
    println!(
        "Saved {} ({})",
        path.display(),
        bundle.spreadsheet.mime_type
    );

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flight_planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
