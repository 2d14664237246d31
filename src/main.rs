use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::{error, info};

use gt_catalog_etl::config::Config;
use gt_catalog_etl::db::SqliteSink;
use gt_catalog_etl::logging;
use gt_catalog_etl::pipeline::Pipeline;
use gt_catalog_etl::source::HttpCatalogSource;
use gt_catalog_etl::types::NormalizedRow;

#[derive(Parser)]
#[command(name = "gt_catalog_etl")]
#[command(about = "Georgia Tech course catalog ETL")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a term's catalog and load the normalized schedule into SQLite
    Run {
        /// Term code to fetch, e.g. 202502
        #[arg(long)]
        term: String,
        /// SQLite database path (overrides config)
        #[arg(long)]
        database: Option<String>,
        /// Destination table name (overrides config)
        #[arg(long)]
        table: Option<String>,
    },
    /// Fetch and normalize a term without loading it
    Preview {
        /// Term code to fetch, e.g. 202502
        #[arg(long)]
        term: String,
        /// Maximum number of rows to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load()?;
    let source = HttpCatalogSource::new(
        &config.source.base_url,
        Duration::from_secs(config.source.timeout_seconds),
    )?;

    match cli.command {
        Commands::Run {
            term,
            database,
            table,
        } => {
            let database = database.unwrap_or(config.database.path);
            let table = table.unwrap_or(config.database.table);
            println!("🔄 Running catalog ETL for term {term}...");

            let sink = SqliteSink::new(&database);
            match Pipeline::run(&source, &sink, &term, &table).await {
                Ok(result) => {
                    info!("Pipeline finished");
                    println!("\n📊 ETL results for term {term}:");
                    println!("   Courses: {}", result.courses);
                    println!("   Sections flattened: {}", result.sections);
                    println!("   Rows loaded: {}", result.rows_loaded);
                    println!("   Rows dropped (no time window): {}", result.rows_dropped);
                    println!("   Destination: {} (table {})", database, result.table);
                    println!("✅ Load completed");
                }
                Err(e) => {
                    error!("Pipeline failed: {e}");
                    println!("❌ Pipeline failed: {e}");
                    return Err(e.into());
                }
            }
        }
        Commands::Preview { term, limit } => {
            println!("🔎 Previewing normalized schedule for term {term}...");

            let (courses, outcome) = Pipeline::transform(&source, &term).await?;
            for row in outcome.rows.iter().take(limit) {
                println!(
                    "   {} {} sec {} | {} - {} {} | {}",
                    row.course_id,
                    row.crn,
                    row.section_id,
                    row.start_time,
                    row.end_time,
                    day_summary(row),
                    row.building.as_deref().unwrap_or("-"),
                );
            }
            println!(
                "\n📊 {} courses, {} rows ({} dropped)",
                courses,
                outcome.rows.len(),
                outcome.dropped
            );
        }
    }
    Ok(())
}

fn day_summary(row: &NormalizedRow) -> String {
    let mut days = String::new();
    for (flag, code) in [
        (row.monday, 'M'),
        (row.tuesday, 'T'),
        (row.wednesday, 'W'),
        (row.thursday, 'R'),
        (row.friday, 'F'),
    ] {
        if flag {
            days.push(code);
        }
    }
    days
}
