use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use furthest1d::{BruteForce, FurthestItems, SearchConfig, Sort1D};

#[derive(Parser, Debug)]
#[command(name = "furthest1d", about = "k-furthest items over a 1-D projection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the k values furthest from a query value.
    Query {
        /// File of whitespace-separated numbers, or "-" for stdin
        #[arg(long)]
        values: PathBuf,
        /// Query value
        #[arg(long, allow_hyphen_values = true)]
        query: f64,
        /// Number of results (overrides config)
        #[arg(long)]
        k: Option<usize>,
        /// Approximation parameter in [0, 1] (overrides config)
        #[arg(long)]
        delta: Option<f64>,
        /// Path to config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also run the brute-force engine and compare
        #[arg(long)]
        exact_check: bool,
    },

    /// Measure Sort1D against brute force on seeded random data.
    Bench {
        /// Universe size
        #[arg(long, default_value_t = 100_000)]
        n: usize,
        /// Number of queries
        #[arg(long, default_value_t = 1_000)]
        queries: usize,
        /// Results per query
        #[arg(long, default_value_t = 10)]
        k: usize,
        /// Approximation parameter in [0, 1]
        #[arg(long)]
        delta: Option<f64>,
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query { values, query, k, delta, config, exact_check } => {
            let mut config = match config {
                Some(path) => SearchConfig::from_json_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => SearchConfig::default(),
            };
            if let Some(k) = k {
                config.k = k;
            }
            if delta.is_some() {
                config.delta = delta;
            }
            cmd_query(&values, query, &config, exact_check)?;
        }
        Commands::Bench { n, queries, k, delta, seed } => {
            cmd_bench(n, queries, k, delta, seed)?;
        }
    }

    Ok(())
}

fn read_values(path: &Path) -> anyhow::Result<Vec<f64>> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        io::stdin().read_to_string(&mut text)?;
    } else {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }

    text.split_whitespace()
        .map(|tok| tok.parse::<f64>().with_context(|| format!("Not a number: {tok:?}")))
        .collect()
}

fn cmd_query(
    values_path: &Path,
    query: f64,
    config: &SearchConfig,
    exact_check: bool,
) -> anyhow::Result<()> {
    config.validate()?;
    let values = read_values(values_path)?;

    let engine = Sort1D::with_config(values.iter().copied(), |x: &f64| *x, config)?;
    let result = engine.find(&query, config.k)?;
    for v in result.iter() {
        println!("{v}");
    }

    if exact_check {
        let reference = BruteForce::new(values, |x: &f64| *x)?;
        let expected = reference.top_distances(&query, config.k)?;
        let mut got: Vec<f64> = result.iter().map(|v| (v - query).abs()).collect();
        got.sort_by(|a, b| b.total_cmp(a));
        let agrees = got == expected;
        eprintln!(
            "{} returned {} of {} items; matches {}: {}",
            engine.name(),
            got.len(),
            config.k,
            reference.name(),
            agrees
        );
    }

    Ok(())
}

/// Queries whose returned distances equal the reference distances.
fn count_agreeing(
    engine: &dyn FurthestItems<f64>,
    probes: &[f64],
    expected: &[Vec<f64>],
    k: usize,
) -> anyhow::Result<usize> {
    let mut agreeing = 0usize;
    for (q, want) in probes.iter().zip(expected) {
        let mut got: Vec<f64> = engine.find(q, k)?.iter().map(|v| (v - q).abs()).collect();
        got.sort_by(|a, b| b.total_cmp(a));
        if &got == want {
            agreeing += 1;
        }
    }
    Ok(agreeing)
}

fn cmd_bench(n: usize, queries: usize, k: usize, delta: Option<f64>, seed: u64) -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data: Vec<f64> = (0..n).map(|_| rng.gen_range(-1_000.0..1_000.0)).collect();
    let probes: Vec<f64> = (0..queries).map(|_| rng.gen_range(-1_200.0..1_200.0)).collect();

    let config = SearchConfig { delta, k };
    let engine = Sort1D::with_config(data.iter().copied(), |x: &f64| *x, &config)?;
    let reference = BruteForce::new(data, |x: &f64| *x)?;

    let start = Instant::now();
    let mut total_len = 0usize;
    for q in &probes {
        total_len += engine.find(q, k)?.len();
    }
    let fast = start.elapsed();

    let start = Instant::now();
    let mut expected = Vec::with_capacity(probes.len());
    for q in &probes {
        expected.push(reference.top_distances(q, k)?);
    }
    let slow = start.elapsed();

    let agreeing = count_agreeing(&engine, &probes, &expected, k)?;

    println!("n={n} k={k} queries={queries} delta={delta:?}");
    println!(
        "{}: {:?} total, mean result size {:.2}",
        engine.name(),
        fast,
        total_len as f64 / queries.max(1) as f64
    );
    println!("{}: {:?} total", reference.name(), slow);
    println!("exact agreement: {agreeing}/{queries}");

    Ok(())
}
