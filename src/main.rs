use clap::{Parser, Subcommand};
use setbench::SetBenchError;
use setbench::config::{parse_count, HarnessConfig, SuiteConfig};
use setbench::memory_usage::run_memory_workload;
use setbench::workload::{run_collision_suite, run_presence_suite, run_similarity_suite};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static ALLOC: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser)]
#[command(name = "setbench")]
#[command(about = "Micro-benchmarks for in-memory set and map containers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert keys at several collision rates
    Collision,
    /// Jaccard similarity of random key sets per container
    Similarity,
    /// Membership checks against a prebuilt population
    Presence,
    /// Memory used by a large set of unique keys
    Memory {
        /// Number of keys to generate (defaults to 100000)
        #[arg(allow_hyphen_values = true)]
        count: Option<String>,
    },
    /// Run the collision, similarity and presence suites
    All,
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn main() -> Result<(), SetBenchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let suite = SuiteConfig::default();
    let harness = HarnessConfig::from_env();

    match cli.command.unwrap_or(Commands::All) {
        Commands::Collision => print_lines(run_collision_suite(&suite, &harness).summary_lines()),
        Commands::Similarity => print_lines(run_similarity_suite(&suite, &harness).summary_lines()),
        Commands::Presence => print_lines(run_presence_suite(&suite, &harness).summary_lines()),
        Commands::Memory { count } => {
            let count = parse_count(count.as_deref(), suite.memory_default_count);
            run_memory_workload(count, suite.memory_key_length, suite.memory_seed)?;
        }
        Commands::All => {
            print_lines(run_collision_suite(&suite, &harness).summary_lines());
            println!();
            print_lines(run_similarity_suite(&suite, &harness).summary_lines());
            println!();
            print_lines(run_presence_suite(&suite, &harness).summary_lines());
        }
    }

    Ok(())
}
