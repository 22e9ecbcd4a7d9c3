use clap::{Parser, Subcommand};

mod commands {
    pub mod catalog;
    pub mod generate;
    pub mod validate;
}
mod render;
mod util;

use commands::catalog::CatalogArgs;
use commands::generate::GenerateArgs;

#[derive(Parser)]
#[command(
    name = "fitplan",
    version,
    about = "fitplan CLI: rule-based workout plans with periodization and plan validation"
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a training plan from a profile
    Generate(GenerateArgs),
    /// Validate a plan JSON file (use '-' for stdin)
    Validate {
        /// Plan file path
        file: String,
    },
    /// List the exercise catalog
    Catalog(CatalogArgs),
}

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    util::init_tracing(cli.log_json);

    let code = match cli.command {
        Commands::Generate(args) => commands::generate::run(args).await,
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Catalog(args) => commands::catalog::run(args),
    };

    std::process::exit(code);
}
