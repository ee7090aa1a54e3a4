use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use pixel_cleaner::config::Config;
use pixel_cleaner::logging;
use pixel_cleaner::pipeline::{Pipeline, PipelineConfig, SchemaVariant};

#[derive(Parser)]
#[command(name = "pixel_cleaner")]
#[command(about = "Deduplicate and normalize contact exports into one row per person")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean an input CSV into a deduplicated output CSV
    Clean {
        /// Input CSV export
        input: PathBuf,
        /// Output CSV (not created when no people are found)
        output: PathBuf,
        /// Output schema: profile, engagement or wide (overrides the config file)
        #[arg(long)]
        variant: Option<SchemaVariant>,
        /// Path to a TOML config file
        #[arg(long, env = "PIXEL_CLEANER_CONFIG")]
        config: Option<PathBuf>,
        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Show how each input column would be treated
    Columns {
        /// Input CSV export
        input: PathBuf,
        /// Path to a TOML config file
        #[arg(long, env = "PIXEL_CLEANER_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    Config::load_or_default(path.map(PathBuf::as_path)).context("Failed to load configuration")
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config_path = match &cli.command {
        Commands::Clean { config, .. } | Commands::Columns { config, .. } => config.clone(),
    };
    let mut config = load_config(config_path.as_ref())?;
    let _guard = logging::init_logging(&config.logging);

    match cli.command {
        Commands::Clean {
            input,
            output,
            variant,
            json,
            ..
        } => {
            if let Some(variant) = variant {
                config.variant = variant;
            }
            let pipeline_config = PipelineConfig::from_config(&config);
            info!("🧹 Cleaning with {} schema", pipeline_config.variant);

            let summary = Pipeline::run(&input, &output, &pipeline_config)
                .with_context(|| format!("Failed to clean {}", input.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("\n📊 Results:");
                println!("   Rows read: {}", summary.stats.rows_read);
                println!("   Rows skipped: {}", summary.stats.rows_skipped);
                println!("   Unique people: {}", summary.unique_people);
                match &summary.output {
                    Some(path) => println!("   Output file: {} ({} rows)", path, summary.rows_written),
                    None => println!("   ⚠️  Nothing to write; no output file created"),
                }
            }
        }
        Commands::Columns { input, .. } => {
            let columns = Pipeline::inspect_columns(&input, &config.columns).map_err(|e| {
                error!("Failed to read header of {}: {}", input.display(), e);
                e
            })?;

            println!("📋 {} columns in {}", columns.len(), input.display());
            for column in columns {
                println!("   {:>3}  {:<32} {}", column.index, column.name, column.role);
            }
        }
    }

    Ok(())
}
