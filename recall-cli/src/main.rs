//! recall — one-shot graph explorations from the command line.
//!
//! A thin host around `recall-core` for debugging retrievals: seeds come in
//! as explicit `node_id:score` pairs (normally produced by the upstream
//! vector search), results stream back as they finish and are printed as
//! JSON in the chosen formatter view.
//!
//! # Subcommands
//! - `explore --seed N3204:0.87 [--seed …] [--tag …] [--format llm|viz|cypher]`
//! - `status` — check graph store connectivity

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use recall_core::{db, format, GraphRetriever, RecallConfig, RecallError, SeedInput};

#[derive(Debug, Parser)]
#[command(name = "recall", version, about = "Activation-energy memory graph retrieval")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, env = "RECALL_CONFIG", default_value = "recall.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Explore the graph from explicit seeds and print one JSON document
    /// per finished exploration
    Explore {
        /// Seed as a node_id:score pair, e.g. N3204:0.87 (repeatable)
        #[arg(short, long = "seed", required = true)]
        seed: Vec<String>,

        /// Query tag for edge tag similarity (repeatable)
        #[arg(short, long = "tag")]
        tag: Vec<String>,

        /// Which formatter view to print
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Llm)]
        format: OutputFormat,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Check graph store connectivity
    Status,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Paths and attributes for LLM prompts
    Llm,
    /// Node/edge graph for a force-directed renderer
    Viz,
    /// Cypher reconstructions of the retrieved paths
    Cypher,
}

/// Parse a `node_id:score` seed argument.
fn parse_seed(raw: &str) -> anyhow::Result<SeedInput> {
    let (node_id, score) = raw
        .rsplit_once(':')
        .ok_or_else(|| anyhow::anyhow!("seed must be node_id:score, got {raw:?}"))?;
    anyhow::ensure!(!node_id.is_empty(), "seed node id is empty in {raw:?}");
    let score: f64 = score
        .parse()
        .map_err(|_| anyhow::anyhow!("seed score is not a number in {raw:?}"))?;
    anyhow::ensure!(
        score.is_finite() && score > 0.0 && score <= 1.0,
        "seed score must be in (0, 1], got {score}"
    );
    Ok(SeedInput {
        node_id: node_id.to_string(),
        score,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match RecallConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("recall: failed to load config from {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };

    let graph = match db::create_graph(&config.store).await {
        Ok(g) => g,
        Err(e) => {
            eprintln!("recall: failed to connect to graph store: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Status => {
            db::health_check(&graph).await?;
            println!("graph store reachable at {}", config.store.uri);
            println!("database: {}", config.store.database);
        }
        Commands::Explore {
            seed,
            tag,
            format,
            pretty,
        } => {
            let seeds = seed
                .iter()
                .map(|s| parse_seed(s))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let retriever = GraphRetriever::with_graph(graph, config.retrieval.clone());
            let mut results = retriever.explore(seeds, tag)?;

            let mut failures = 0usize;
            while let Some(outcome) = results.recv().await {
                match outcome {
                    Ok(result) => {
                        let value = match format {
                            OutputFormat::Llm => format::to_llm_context(&result),
                            OutputFormat::Viz => format::to_visualization(&result),
                            OutputFormat::Cypher => {
                                serde_json::to_value(format::to_debug_queries(&result))?
                            }
                        };
                        let rendered = if pretty {
                            serde_json::to_string_pretty(&value)?
                        } else {
                            serde_json::to_string(&value)?
                        };
                        println!("{rendered}");
                    }
                    Err(RecallError::Exploration { seed_id, source }) => {
                        eprintln!("recall: exploration from seed {seed_id} failed: {source}");
                        failures += 1;
                    }
                    Err(e) => {
                        eprintln!("recall: exploration failed: {e}");
                        failures += 1;
                    }
                }
            }

            if failures > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
