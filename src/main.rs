use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod aggregate;
mod extract;
mod ingest;
mod models;
mod segments;

use models::Model;

#[derive(Parser)]
#[command(name = "hero-segments")]
#[command(about = "Compress per-level hero stat observations into piecewise-linear growth segments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a stat-comparison CSV into a segments JSON model
    Convert {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "hero-levels.segments.json")]
        out: PathBuf,
        /// Merge tolerance between consecutive deltas, in percentage points
        #[arg(long, default_value_t = segments::DEFAULT_TOL)]
        tol: f64,
    },
    /// Parse and aggregate only; print per-hero level coverage
    Inspect {
        #[arg(long)]
        csv: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { csv, out, tol } => {
            let observations = ingest::read_observations(&csv)?;
            let model = Model::from_observations(&observations, tol);
            let json = serde_json::to_string_pretty(&model)?;
            std::fs::write(&out, json)?;
            println!(
                "wrote {} | heroes={} | levels {}..{}",
                out.display(),
                model.heroes.len(),
                model.levels_min,
                model.levels_max
            );
        }
        Commands::Inspect { csv } => {
            let observations = ingest::read_observations(&csv)?;
            let aggregation = aggregate::aggregate(&observations);

            if aggregation.series.is_empty() {
                println!("No usable observations found.");
                return Ok(());
            }

            for (hero, points) in aggregation.series.iter() {
                let first = points[0].0;
                let last = points[points.len() - 1].0;
                println!("- {}: {} levels ({first}..{last})", hero, points.len());
            }
            println!(
                "{} heroes | levels {}..{}",
                aggregation.series.len(),
                aggregation.levels.first().copied().unwrap_or(0),
                aggregation.levels.last().copied().unwrap_or(0)
            );
        }
    }

    Ok(())
}
