// Entry point and high-level CLI flow.
//
// `generate` runs the whole pipeline once and writes every artifact.
// `interactive` keeps one `ReportSession` alive so a file can be loaded,
// re-loaded and exported from a small menu.
use ads_report::chart::{ChartRenderer, ChartSpec, TextBarChart};
use ads_report::config::ReportConfig;
use ads_report::convert::records_to_json;
use ads_report::demographics::gender_age_breakdown;
use ads_report::export::{export_report, report_region_lines, ExportControl, PdfExporter, Snapshot};
use ads_report::loader::load_csv;
use ads_report::output::{self, markdown_table};
use ads_report::session::ReportSession;
use ads_report::types::Report;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ads_report")]
#[command(about = "Build a campaign report from a Facebook Ads CSV export", long_about = None)]
struct Cli {
    /// JSON file overriding the built-in report configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the report, print it and write the table, summary and PDF
    Generate {
        #[arg(value_name = "CSV_FILE")]
        input: PathBuf,

        /// Skip the PDF export
        #[arg(long, default_value_t = false)]
        no_pdf: bool,
    },
    /// Summarise an ad-set export by gender and age
    Demographics {
        #[arg(value_name = "CSV_FILE")]
        input: PathBuf,

        /// Output JSON file (defaults to the configured name)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert a CSV export to a JSON array of records
    Convert {
        #[arg(value_name = "CSV_FILE")]
        input: PathBuf,

        #[arg(short, long, default_value = "ads_data.json")]
        output: String,
    },
    /// Menu-driven session: load, re-load and export reports
    Interactive,
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn print_report(report: &Report, chart: &ChartSpec, generated_on: &str) {
    println!("{}", output::render_report_text(report, generated_on));
    println!("Reach vs Clicks");
    for line in TextBarChart::default().render(chart) {
        println!("{}", line);
    }
    println!();
}

fn export_pdf(session: &mut ReportSession, config: &ReportConfig, generated_on: &str) -> Result<()> {
    let (Some(report), Some(chart)) = (session.report(), session.chart()) else {
        println!("Error: No report generated yet. Please load a CSV file first (option 1).\n");
        return Ok(());
    };
    let snapshot = Snapshot::capture(
        report_region_lines(report, chart, generated_on),
        config.capture_scale,
    );
    let exporter = PdfExporter::new(config.page);
    println!("{}", ExportControl::BUSY_LABEL);
    let path = export_report(
        &mut session.export_control,
        &exporter,
        &snapshot,
        Path::new(&config.pdf_file),
    )?;
    println!("Report exported to {}\n", path.display());
    Ok(())
}

fn handle_generate(config: &ReportConfig, input: &Path, no_pdf: bool) -> Result<()> {
    let mut session = ReportSession::new();
    let generated_on = today();

    if let Err(e) = session.run(input, config) {
        eprintln!("{}", e);
        return Err(e.into());
    }
    let (Some(report), Some(chart)) = (session.report(), session.chart()) else {
        return Ok(());
    };
    print_report(report, chart, &generated_on);

    output::write_csv(&config.table_csv_file, &output::table_rows(report))?;
    output::write_json(&config.summary_json_file, &output::summary(report, &generated_on))?;
    println!(
        "(Table exported to {}, summary to {})",
        config.table_csv_file, config.summary_json_file
    );

    if !no_pdf {
        export_pdf(&mut session, config, &generated_on)?;
    }
    Ok(())
}

fn handle_demographics(config: &ReportConfig, input: &Path, out: Option<String>) -> Result<()> {
    let table = load_csv(input)?;
    let rows = gender_age_breakdown(&table)?;
    let path = out.unwrap_or_else(|| config.demographics_json_file.clone());
    output::write_json(&path, &rows)?;
    println!("{}\n", markdown_table(&rows));
    println!("Successfully processed '{}' and saved the data to '{}'", input.display(), path);
    Ok(())
}

fn handle_convert(input: &Path, out: &str) -> Result<()> {
    let table = load_csv(input)?;
    output::write_json(out, &records_to_json(&table))?;
    println!("Successfully converted '{}' to '{}'", input.display(), out);
    Ok(())
}

/// Print `prompt` and read one trimmed line.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to menu (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn run_interactive(config: &ReportConfig) -> Result<()> {
    let mut session = ReportSession::new();
    let generated_on = today();

    loop {
        println!("Facebook Ads Report");
        println!("[1] Load a CSV file and generate the report");
        println!("[2] {}\n", session.export_control.label());
        match read_line("Enter choice: ").as_str() {
            "1" => {
                let path = read_line("CSV file: ");
                if path.is_empty() {
                    println!("Please select a CSV file to upload.\n");
                    continue;
                }
                let outcome = session.run(Path::new(&path), config).map(|_| ());
                match outcome {
                    Ok(()) => {
                        if let (Some(report), Some(chart)) = (session.report(), session.chart()) {
                            print_report(report, chart, &generated_on);
                        }
                    }
                    Err(_) => {
                        println!("{}\n", session.message().unwrap_or_default());
                    }
                }
            }
            "2" => {
                if let Err(e) = export_pdf(&mut session, config, &generated_on) {
                    error!(error = %e, "Export failed");
                    println!("{}\n", e);
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
                continue;
            }
        }
        if !prompt_back_to_menu() {
            println!("Exiting the program.");
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ReportConfig::load(cli.config.as_deref())?;
    info!(schema = ?config.required_columns.columns(), "Configuration ready");

    match cli.command {
        Commands::Generate { input, no_pdf } => handle_generate(&config, &input, no_pdf)?,
        Commands::Demographics { input, output } => handle_demographics(&config, &input, output)?,
        Commands::Convert { input, output } => handle_convert(&input, &output)?,
        Commands::Interactive => run_interactive(&config)?,
    }
    Ok(())
}
