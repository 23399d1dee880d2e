use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show detailed progress information
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dashboard config file (TOML); built-in defaults when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count predicted crops in history exports and write the dashboard data file
    Crunch {
        /// History JSON file, or a directory of them
        #[arg(long)]
        history: PathBuf,
        /// Where to write the crop counts (defaults to web/src/crop_counts.toml)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the most predicted crops
    Rank {
        /// Crop counts file produced by `crunch`
        #[arg(long)]
        input: Option<PathBuf>,
        /// How many crops to show (defaults to the configured top crops)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the Chart.js configuration for the dashboard charts
    Chart {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ChartChoice::Both)]
        kind: ChartChoice,
    },
    /// Export prediction history as CSV
    Export {
        /// History JSON file, or a directory of them
        #[arg(long)]
        history: PathBuf,
        /// Output directory for the CSV file
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// File name (defaults to the configured CSV file name)
        #[arg(long)]
        filename: Option<String>,
    },
    /// Download prediction history from the running application
    Fetch {
        /// Application base URL (falls back to SMARTCROP_API_URL, then the config)
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long, default_value = "prediction-history.json")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartChoice {
    Pie,
    Bar,
    Both,
}
