use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tablebot")]
#[command(author, version, about = "Telegram bot that analyzes CSV/Excel files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the bot (webhook mode when RAILWAY_STATIC_URL is set, polling otherwise)
    Run,

    /// Print basic statistics for a CSV/Excel file
    Stats {
        /// File to analyze
        path: PathBuf,
    },

    /// Render a bar chart of a CSV/Excel file to PNG
    Plot {
        /// File to plot
        path: PathBuf,

        /// Output PNG path
        #[arg(short, long, default_value = "plot.png")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
