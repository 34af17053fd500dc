pub mod aggregate;
pub mod cli;
pub mod correlation;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod models;
pub mod parser;
pub mod report;
pub mod sidebar_image;

use anyhow::{Context, Result};
use cli::{Args, Cli, Commands, OutputFormat};
use parser::DatasetParser;
use report::Report;
use sidebar_image::SidebarImage;

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Show(args)) => show_report(args).await,
        Some(Commands::Dashboard {
            data,
            offline,
            tick_ms,
        }) => {
            let report = build_report(&data, true, offline).await?;
            dashboard::run_dashboard(report, std::time::Duration::from_millis(tick_ms))
        }
        None => show_report(Args::default()).await,
    }
}

pub async fn show_report(args: Args) -> Result<()> {
    let report = build_report(&args.data, args.quiet, args.offline).await?;

    match args.format {
        OutputFormat::Table => {
            print!("{}", formatters::format_table(&report));
        }
        OutputFormat::Json => {
            println!("{}", formatters::format_json(&report)?);
        }
        OutputFormat::Markdown => {
            print!("{}", formatters::format_markdown(&report));
        }
    }

    Ok(())
}

/// Load the dataset and compute every panel. Nothing is rendered until this
/// returns, so any failure aborts the whole report.
pub async fn build_report(data_path: &str, quiet: bool, offline: bool) -> Result<Report> {
    let mut parser = DatasetParser::new(data_path);
    if quiet {
        parser = parser.quiet();
    }
    let dataset = parser
        .parse()
        .with_context(|| format!("Failed to load dataset from {}", data_path))?;

    let image = if offline {
        SidebarImage::unchecked()
    } else {
        SidebarImage::probe().await
    };

    let report = Report::build(&dataset, image).context("Failed to compute the report")?;
    Ok(report)
}
