mod cli;
mod history;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crop_dashboard::export::to_csv;
use crop_dashboard::external::ApiClient;
use crop_dashboard::{rank_top, ChartStyle, DashboardConfig};

use cli::{ChartChoice, Cli, Commands};
use history::load_history;
use output::{crunch_snapshot, read_snapshot, write_snapshot, FileDownloader};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn default_counts_path() -> PathBuf {
    workspace_root().join("web/src/crop_counts.toml")
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::load(path).context("Failed to load dashboard config"),
        None => Ok(DashboardConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .try_init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Crunch { history, output } => {
            let output = output.unwrap_or_else(default_counts_path);
            println!("🚀 Crunching prediction history from {}", history.display());

            let records = load_history(&history, cli.verbose)?;
            let snapshot = crunch_snapshot(&records);
            write_snapshot(&snapshot, &output)?;

            println!("📈 Processed {} predictions", snapshot.total_predictions);
            println!("🌾 Distinct crops: {}", snapshot.crop_counts.len());
            println!("✅ Crunched crop counts written to {}", output.display());
        }
        Commands::Rank { input, top } => {
            let input = input.unwrap_or_else(default_counts_path);
            let snapshot = read_snapshot(&input)?;
            let limit = top.unwrap_or(config.top_crops);

            let ranked = rank_top(&snapshot.crop_counts, limit);
            if ranked.is_empty() {
                println!("📭 No predictions recorded yet");
            }
            for (index, entry) in ranked.iter().enumerate() {
                println!("#{:<3} {:<20} {}", index + 1, entry.name, entry.count);
            }
        }
        Commands::Chart { input, kind } => {
            let input = input.unwrap_or_else(default_counts_path);
            let snapshot = read_snapshot(&input)?;
            let style = ChartStyle::from_config(&config);

            let mut charts = Vec::new();
            if matches!(kind, ChartChoice::Pie | ChartChoice::Both) {
                charts.push(style.pie_config(&snapshot.crop_counts));
            }
            if matches!(kind, ChartChoice::Bar | ChartChoice::Both) {
                charts.push(style.bar_config(&snapshot.crop_counts));
            }
            println!("{}", serde_json::to_string_pretty(&charts)?);
        }
        Commands::Export {
            history,
            out_dir,
            filename,
        } => {
            let filename = filename.unwrap_or_else(|| config.csv_filename.clone());
            let records = load_history(&history, cli.verbose)?;

            to_csv(&FileDownloader::new(&out_dir), &records, &filename)
                .context("Failed to export CSV")?;
            println!(
                "💾 Exported {} predictions to {}",
                records.len(),
                out_dir.join(&filename).display()
            );
        }
        Commands::Fetch { base_url, output } => {
            let base_url = base_url
                .or_else(|| std::env::var("SMARTCROP_API_URL").ok())
                .unwrap_or_else(|| config.api_base_url.clone());
            if base_url.is_empty() {
                return Err(anyhow::anyhow!(
                    "No application URL. Pass --base-url, set SMARTCROP_API_URL, or set api_base_url in the config."
                ));
            }

            println!("📥 Fetching prediction history from {}...", base_url);
            let client = ApiClient::new(base_url);
            let records = client
                .fetch_history()
                .await
                .context("Failed to fetch prediction history")?;
            info!(count = records.len(), "fetched prediction history");

            let json = serde_json::to_string_pretty(&records)?;
            std::fs::write(&output, json)
                .with_context(|| format!("Failed to write {:?}", output))?;
            println!("📊 Saved {} predictions to {}", records.len(), output.display());
        }
    }

    Ok(())
}
