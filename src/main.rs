use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use core_update_analyzer::analysis::{analyze, AnalysisResult};
use core_update_analyzer::config::{Config, ConfigOverrides};
use core_update_analyzer::input::{load_inputs, InputFiles};
use core_update_analyzer::output::csv::{flagged_pages_to_csv, write_export};
use core_update_analyzer::output::json::{render_json, render_result_json};
use core_update_analyzer::output::table::{render_pages_table, render_summary_table};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "core-update-analyzer",
    about = "Explain traffic changes after a search core update from analytics and search console exports",
    version
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Correlate before/after exports and classify every page
    Analyze {
        #[arg(long = "ga-before")]
        ga_before: Option<PathBuf>,
        #[arg(long = "ga-after")]
        ga_after: Option<PathBuf>,
        #[arg(long = "sc-before")]
        sc_before: Option<PathBuf>,
        #[arg(long = "sc-after")]
        sc_after: Option<PathBuf>,
        /// Write the flagged pages to core-update-analysis-<date>.csv
        #[arg(long)]
        export: bool,
        #[arg(long = "export-dir")]
        export_dir: Option<String>,
        /// Pages shown in the table output
        #[arg(long)]
        top: Option<usize>,
        /// Include pages without problems in the table output
        #[arg(long)]
        all: bool,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;

    match cli.command {
        Commands::Config { init, show } => handle_config_command(init, show, &config, &config_path),
        Commands::Analyze {
            ga_before,
            ga_after,
            sc_before,
            sc_after,
            export,
            export_dir,
            top,
            all,
        } => {
            config.apply_overrides(ConfigOverrides {
                top_pages: top,
                show_unflagged: all.then_some(true),
                export_directory: export_dir,
            });
            let files = InputFiles {
                ga_before,
                ga_after,
                sc_before,
                sc_after,
            };
            let inputs = load_inputs(&files).await?;
            let result = analyze(&inputs)?;
            print_result(&result, &config, cli.output)?;
            if export {
                let path = write_export(
                    &result,
                    &config.resolved_export_dir(),
                    Local::now().date_naive(),
                )?;
                info!(path = %path.display(), flagged = result.flagged_count(), "wrote CSV export");
                eprintln!("Exported {} flagged pages to {}", result.flagged_count(), path.display());
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(init: bool, show: bool, config: &Config, config_path: &Path) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn print_result(result: &AnalysisResult, config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_summary_table(result));
            println!("{}", render_pages_table(result, config.table_options()));
        }
        OutputFormat::Json => println!("{}", render_result_json(result)?),
        OutputFormat::Csv => print!("{}", flagged_pages_to_csv(result)?),
    }
    Ok(())
}
