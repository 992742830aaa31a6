use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "turbo")]
#[command(
    author,
    version,
    about = "Run Overpass API queries and explain what came back"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a query to an Overpass API instance and diagnose the result
    Run {
        /// File containing the query (Overpass QL or XML)
        query_file: Option<String>,

        /// Query text given inline instead of a file
        #[clap(short = 'e', long, conflicts_with = "query_file")]
        query: Option<String>,

        /// Overpass API base URL (overrides the configuration file)
        #[clap(short, long)]
        server: Option<String>,

        /// Configuration file path (defaults to the per-user turbo.toml)
        #[clap(short, long)]
        config: Option<String>,

        /// Print the report as JSON instead of a table
        #[clap(long, default_value_t = false)]
        json: bool,

        /// Process huge responses without asking for confirmation
        #[clap(short, long, default_value_t = false)]
        yes: bool,

        /// Save the raw response body to this file
        #[clap(short, long)]
        output: Option<String>,

        /// Enable verbose output with additional information
        #[clap(short, long, default_value_t = false)]
        verbose: bool,
    },

    /// Classify a saved response body without contacting any server
    Classify {
        /// File containing the response body
        body_file: String,

        /// HTTP status the response was received with
        #[clap(long, default_value_t = 200)]
        status: u16,

        /// Content-Type header the response was received with
        #[clap(long)]
        content_type: Option<String>,

        /// Number of features a renderer produced, if already known
        #[clap(long)]
        features: Option<usize>,

        /// Print the report as JSON instead of a table
        #[clap(long, default_value_t = false)]
        json: bool,

        /// Enable verbose output with additional information
        #[clap(short, long, default_value_t = false)]
        verbose: bool,
    },

    /// Write a default configuration file
    Init {
        /// Configuration file path (defaults to the per-user turbo.toml)
        #[clap(short, long)]
        config: Option<String>,

        /// Overwrite an existing configuration file
        #[clap(long, default_value_t = false)]
        force: bool,
    },
}
