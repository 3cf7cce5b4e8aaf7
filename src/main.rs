use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use dag_expression::render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "dag-expr")]
#[command(about = "Compile workflow expressions into stage DAGs", long_about = None)]
struct Cli {
    /// Log parser decisions to stderr (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Expression given inline or read from a file.
#[derive(clap::Args)]
struct Input {
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    expr: Option<String>,

    #[arg(long)]
    file: Option<String>,
}

impl Input {
    fn read(self) -> Result<String> {
        match (self.expr, self.file) {
            (Some(expr), _) => Ok(expr),
            (None, Some(path)) => {
                std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))
            }
            (None, None) => anyhow::bail!("an expression or --file is required"),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Edges,
    Json,
    Order,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an expression and print the resulting graph.
    Parse {
        #[command(flatten)]
        input: Input,

        #[arg(long, value_enum, default_value = "edges")]
        format: Format,
    },
    /// Print the letter-canonicalized form of an expression.
    Thumb {
        #[command(flatten)]
        input: Input,
    },
    /// Validate an expression and print a one-line summary.
    Check {
        #[command(flatten)]
        input: Input,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dag_expression=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Parse { input, format } => {
            let expression = input.read()?;
            let graph = dag_expression::parse(&expression)?;
            match format {
                Format::Edges => print!("{}", render::render_edges(&graph)),
                Format::Json => println!("{}", render::render_json(&graph)?),
                Format::Order => print!("{}", render::render_order(&graph)),
            }
        }
        Commands::Thumb { input } => {
            println!("{}", dag_expression::thumb(&input.read()?));
        }
        Commands::Check { input } => {
            let graph = dag_expression::parse(&input.read()?)?;
            println!("{}", render::render_summary(&graph));
        }
    }

    Ok(())
}
