//! CLI for chaosperm — how well does a chaotic map shuffle?

mod commands;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chaosperm")]
#[command(about = "chaosperm — evaluate chaos-based permutation generators")]
#[command(version = chaosperm_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Map selection shared by every subcommand that generates permutations.
#[derive(Args, Clone)]
pub struct MapArgs {
    /// Chaotic map
    #[arg(long, default_value = "logistic", value_parser = ["logistic", "tent", "icmic", "logistic_tent", "henon"])]
    map: String,

    /// Comma-separated map parameters, overriding the defaults (e.g. "1.4,0.3" for henon)
    #[arg(long)]
    params: Option<String>,

    /// What to do when a trajectory diverges: reseed (default) or report (fail)
    #[arg(long, default_value = "reseed", value_parser = ["reseed", "report"])]
    divergence: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in chaotic maps and their default parameters
    Maps,

    /// Generate one permutation from a seed
    Generate {
        #[command(flatten)]
        map: MapArgs,

        /// Seed x0
        #[arg(long, default_value = "0.1")]
        x0: f64,

        /// Seed y0
        #[arg(long, default_value = "0.1")]
        y0: f64,

        /// Warm-up iterations discarded before sampling (M)
        #[arg(long, default_value = "1000")]
        warmup: usize,

        /// Permutation size (N)
        #[arg(long, default_value = "100")]
        n: usize,

        /// Print as JSON instead of a plain list
        #[arg(long)]
        json: bool,
    },

    /// Cycle structure and order of the permutation for one seed
    Cycles {
        #[command(flatten)]
        map: MapArgs,

        /// Seed x0
        #[arg(long, default_value = "0.1")]
        x0: f64,

        /// Seed y0
        #[arg(long, default_value = "0.1")]
        y0: f64,

        /// Warm-up iterations discarded before sampling (M)
        #[arg(long, default_value = "1000")]
        warmup: usize,

        /// Permutation size (N)
        #[arg(long, default_value = "100")]
        n: usize,

        /// Also print every cycle
        #[arg(long)]
        show_cycles: bool,
    },

    /// Full evaluation over many random seeds: order, uniformity, sensitivity
    Evaluate {
        /// JSON config file; command-line flags override its values
        #[arg(long)]
        config: Option<String>,

        /// Chaotic map
        #[arg(long, value_parser = ["logistic", "tent", "icmic", "logistic_tent", "henon"])]
        map: Option<String>,

        /// Comma-separated map parameters
        #[arg(long)]
        params: Option<String>,

        /// Divergence policy: reseed or report
        #[arg(long, value_parser = ["reseed", "report"])]
        divergence: Option<String>,

        /// Warm-up iterations (M)
        #[arg(long)]
        warmup: Option<usize>,

        /// Permutation size (N)
        #[arg(long)]
        n: Option<usize>,

        /// Seed-count profile: quick (200), standard (2000), deep (10000)
        #[arg(long, value_parser = ["quick", "standard", "deep"])]
        profile: Option<String>,

        /// Exact number of seeds (overrides --profile)
        #[arg(long)]
        seeds: Option<usize>,

        /// RNG seed for drawing seeds, for reproducible runs
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Seed perturbation for the sensitivity test
        #[arg(long)]
        delta: Option<f64>,

        /// P-value combiner
        #[arg(long, value_parser = ["fisher", "stouffer"])]
        combine: Option<String>,

        /// Write the full report (per-seed records included) as JSON
        #[arg(long)]
        output: Option<String>,

        /// Print one line per seed
        #[arg(long)]
        verbose: bool,
    },

    /// Average order as a function of N (numeric series, no plotting)
    Sweep {
        #[command(flatten)]
        map: MapArgs,

        /// Warm-up iterations (M)
        #[arg(long, default_value = "1000")]
        warmup: usize,

        /// N values: "start:end:step" (inclusive) or a comma-separated list
        #[arg(long, default_value = "20:1000:20")]
        n_values: String,

        /// Number of random seeds per N
        #[arg(long, default_value = "100")]
        seeds: usize,

        /// RNG seed for drawing seeds
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Write the series as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Maps => commands::maps::run(),
        Commands::Generate {
            map,
            x0,
            y0,
            warmup,
            n,
            json,
        } => commands::generate::run(&map, x0, y0, warmup, n, json),
        Commands::Cycles {
            map,
            x0,
            y0,
            warmup,
            n,
            show_cycles,
        } => commands::cycles::run(&map, x0, y0, warmup, n, show_cycles),
        Commands::Evaluate {
            config,
            map,
            params,
            divergence,
            warmup,
            n,
            profile,
            seeds,
            rng_seed,
            delta,
            combine,
            output,
            verbose,
        } => commands::evaluate::run(commands::evaluate::EvaluateCommandConfig {
            config_path: config.as_deref(),
            map: map.as_deref(),
            params: params.as_deref(),
            divergence: divergence.as_deref(),
            warmup,
            n,
            profile: profile.as_deref(),
            seeds,
            rng_seed,
            delta,
            combine: combine.as_deref(),
            output_path: output.as_deref(),
            verbose,
        }),
        Commands::Sweep {
            map,
            warmup,
            n_values,
            seeds,
            rng_seed,
            output,
        } => commands::sweep::run(&map, warmup, &n_values, seeds, rng_seed, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
