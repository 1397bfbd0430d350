//! dimlaw CLI: dimensional-analysis law discovery.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use dimlaw::config::EngineConfig;
use dimlaw::engine::Engine;
use dimlaw::request::RelationshipRequest;

#[derive(Parser)]
#[command(name = "dimlaw", version, about = "Dimensional-analysis law discovery")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test whether an output quantity is a power law of the inputs.
    Discover {
        /// Target quantity name.
        #[arg(long)]
        output: String,

        /// Input quantities (comma-separated, e.g. "mass,velocity").
        #[arg(long)]
        inputs: String,

        /// Extra constants (comma-separated).
        #[arg(long)]
        constants: Option<String>,

        /// Retry with suggested constants when the hypothesis fails.
        #[arg(long)]
        auto_search: bool,

        /// Log every auto-search attempt at info level.
        #[arg(long)]
        verbose: bool,

        /// Print the response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List catalog quantities, optionally filtered by substring.
    Quantities {
        /// Case-insensitive filter over name, symbol and description.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show a single catalog quantity.
    Show {
        /// Quantity name.
        name: String,
    },

    /// Run a JSON array of requests and print a JSON array of responses.
    Batch {
        /// Path to JSON file with requests.
        #[arg(long)]
        file: PathBuf,
    },

    /// Show engine info.
    Info,
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::new(config)?;
    engine.initialize();

    match cli.command {
        Commands::Discover {
            output,
            inputs,
            constants,
            auto_search,
            verbose,
            json,
        } => {
            let mut request = RelationshipRequest::new(output, split_names(&inputs))
                .with_auto_search(auto_search)
                .with_verbose(verbose);
            if let Some(constants) = constants {
                request = request.with_constants(split_names(&constants));
            }

            let response = engine.discover(&request);
            if json {
                let json = serde_json::to_string_pretty(&response).into_diagnostic()?;
                println!("{json}");
            } else {
                print!("{response}");
            }
        }

        Commands::Quantities { filter } => {
            let Some(catalog) = engine.catalog() else {
                miette::bail!("engine not initialized");
            };
            let quantities = match filter.as_deref() {
                Some(filter) => catalog.search(filter),
                None => catalog.iter().collect(),
            };
            if quantities.is_empty() {
                println!("No quantities match.");
            } else {
                println!("Quantities ({}):", quantities.len());
                for quantity in &quantities {
                    println!(
                        "  {:<28} {:<6} [{}]",
                        quantity.name(),
                        quantity.symbol(),
                        quantity.dimensions()
                    );
                }
            }
        }

        Commands::Show { name } => {
            let Some(catalog) = engine.catalog() else {
                miette::bail!("engine not initialized");
            };
            let quantity = catalog.lookup(&name)?;
            println!("Quantity: \"{}\"", quantity.name());
            println!("  symbol:      {}", quantity.symbol());
            println!("  dimensions:  {}", quantity.dimensions());
            if !quantity.description().is_empty() {
                println!("  description: {}", quantity.description());
            }
        }

        Commands::Batch { file } => {
            let content = std::fs::read_to_string(&file).into_diagnostic()?;
            let requests: Vec<RelationshipRequest> =
                serde_json::from_str(&content).into_diagnostic()?;

            let responses: Vec<_> = requests.iter().map(|r| engine.discover(r)).collect();
            let solved = responses.iter().filter(|r| r.success).count();
            tracing::info!(total = responses.len(), solved, "batch complete");

            let json = serde_json::to_string_pretty(&responses).into_diagnostic()?;
            println!("{json}");
        }

        Commands::Info => {
            print!("{}", engine.info());
        }
    }

    Ok(())
}
