//! tumor-ga: evolve a linear breast-tumor classifier from the command line.
//!
//! ```bash
//! tumor-ga --data breast-cancer-wisconsin.data.txt --runs 3 --bias 2 --balance
//! RUST_LOG=debug tumor-ga --population-size 200 --generations 100 --seed 7
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tumor_ga::data::{DataSplit, Dataset, SplitConfig};
use tumor_ga::ga::{GaConfig, GaRunner};
use tumor_ga::random::rng_from_option;
use tumor_ga::report::{describe, Evaluation, ResultRow, ResultsFile};

/// Evolve a linear classifier for benign/malignant tumor records.
#[derive(Parser, Debug)]
#[command(name = "tumor-ga")]
#[command(about = "Genetic-algorithm search for a linear tumor classifier")]
struct Cli {
    /// Data file in the Wisconsin breast-cancer format.
    #[arg(long, default_value = "breast-cancer-wisconsin.data.txt")]
    data: PathBuf,

    /// Chromosomes per generation.
    #[arg(long, default_value_t = 1000)]
    population_size: usize,

    /// Generations per restart.
    #[arg(long, default_value_t = 1000)]
    generations: usize,

    /// Independent restarts per run.
    #[arg(long, default_value_t = 5)]
    restarts: usize,

    /// Complete runs, each with a fresh split.
    #[arg(long, default_value_t = 1)]
    runs: u64,

    /// Records in the training set.
    #[arg(long, default_value_t = 200)]
    training_size: usize,

    /// Keep the malignant fraction of the training set equal to the whole set.
    #[arg(long, default_value_t = false)]
    balance: bool,

    /// Slice the training set without shuffling.
    #[arg(long, default_value_t = false)]
    no_shuffle: bool,

    /// Extra weight of malignant records in the score.
    #[arg(long, default_value_t = 1)]
    bias: u32,

    /// Base random seed; run `i` uses `seed + i`.
    #[arg(long)]
    seed: Option<u64>,

    /// CSV file to append one result row per run to.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Score populations on the rayon thread pool (needs the `parallel` feature).
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.parallel && !cfg!(feature = "parallel") {
        log::warn!("--parallel ignored: built without the `parallel` feature");
    }

    let dataset = Dataset::load(&cli.data)
        .with_context(|| format!("failed to load {}", cli.data.display()))?;
    log::info!(
        "loaded {} records ({} malignant) from {}",
        dataset.len(),
        dataset.malignant_count(),
        cli.data.display()
    );

    let split_config = SplitConfig::default()
        .with_training_size(cli.training_size)
        .with_balance(cli.balance)
        .with_shuffle(!cli.no_shuffle);
    let results = cli.output.as_ref().map(ResultsFile::new);

    for run in 0..cli.runs {
        let seed = cli.seed.map(|s| s.wrapping_add(run));
        let mut rng = rng_from_option(seed);

        let split = DataSplit::new(dataset.clone(), &split_config, &mut rng)
            .context("failed to split the dataset")?;

        let ga_config = GaConfig::default()
            .with_population_size(cli.population_size)
            .with_max_generations(cli.generations)
            .with_restarts(cli.restarts)
            .with_bias_factor(cli.bias)
            .with_parallel(cli.parallel);

        // Split and evolution share one stream so a seed fixes the whole run
        let result = GaRunner::run_with_rng(&split.training, &ga_config, &mut rng)
            .context("genetic algorithm failed")?;
        let best = &result.best;

        let training = Evaluation::of(best, &split.training, cli.bias)?;
        let verification = Evaluation::of(best, &split.verification, cli.bias)?;

        println!("Run {} of {}", run + 1, cli.runs);
        println!("{}", describe(best));
        print_evaluation("Training", split.training.len(), &training);
        print_evaluation("Verification", split.verification.len(), &verification);

        if let Some(file) = &results {
            let row = ResultRow {
                population_size: cli.population_size,
                bias_factor: cli.bias,
                training_size: split.training.len(),
                balanced: cli.balance,
                verification: &verification,
                chromosome: best,
            };
            file.append(&row)
                .with_context(|| format!("failed to write {}", file.path().display()))?;
        }
    }

    Ok(())
}

fn print_evaluation(label: &str, size: usize, eval: &Evaluation) {
    print!(
        "{label} ({size} records): score {}, {:.2}% correct",
        eval.score, eval.percent_correct
    );
    match eval.malignancy_accuracy {
        Some(pct) => println!(", {pct:.2}% of malignant correct"),
        None => println!(", no malignant records"),
    }
}
