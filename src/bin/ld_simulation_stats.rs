use clap::Parser;
use env_logger::Builder;
use ld_simulation::fts::{FtsTask, TaskSpec};
use ld_simulation::label_relation::LabelRelationBackend;
use ld_simulation::relation::FactorRelationBackend;
use ld_simulation::simulation::{
    LdSimulationConfig, compute_incremental_ld_simulation, compute_ld_simulation,
};
use log::LevelFilter;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ld_simulation_stats")]
#[command(about = "Compute the label-dominance simulation of a factored task and print its statistics")]
struct Args {
    /// Path to a JSON task description
    #[arg(value_name = "FILE")]
    file: String,

    /// Storage backend of the per-factor state relations
    #[arg(long, default_value = "dense", require_equals = true)]
    factor_relation: FactorRelationConfig,

    /// Backend of the label relation
    #[arg(long, default_value = "grouped", require_equals = true)]
    label_relation: LabelRelationConfig,

    /// Skip unchanged factors in the label re-verification passes
    #[arg(long)]
    incremental: bool,

    /// Maximum number of fixpoint rounds (0 = unlimited)
    #[arg(long, default_value_t = 0, require_equals = true)]
    max_iterations: usize,

    /// Logging verbosity (use -v for info, or -v=LEVEL for specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum FactorRelationConfig {
    Dense,
    Sparse,
}

#[derive(Clone, clap::ValueEnum)]
enum LabelRelationConfig {
    Dense,
    Grouped,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<FactorRelationConfig> for FactorRelationBackend {
    fn from(value: FactorRelationConfig) -> Self {
        match value {
            FactorRelationConfig::Dense => FactorRelationBackend::Dense,
            FactorRelationConfig::Sparse => FactorRelationBackend::Sparse,
        }
    }
}

impl From<LabelRelationConfig> for LabelRelationBackend {
    fn from(value: LabelRelationConfig) -> Self {
        match value {
            LabelRelationConfig::Dense => LabelRelationBackend::Dense,
            LabelRelationConfig::Grouped => LabelRelationBackend::Grouped,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Configure logging:
    // Handle verbose flag: None = not specified, Some(None) = specified without value (defaults to info), Some(Some(level)) = specified with value
    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info, // --verbose or -v without value
        Some(Some(level)) => level.into(), // --verbose=level or -v level
    };
    Builder::from_default_env().filter_level(log_level).init();

    // Load the task description
    let content = std::fs::read_to_string(&args.file).unwrap_or_else(|e| {
        eprintln!("Failed to read task file {}: {}", args.file, e);
        std::process::exit(1);
    });
    let spec: TaskSpec = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Failed to parse task file {}: {}", args.file, e);
        std::process::exit(1);
    });
    let task = FtsTask::try_from(spec).unwrap_or_else(|e| {
        eprintln!("Invalid task: {}", e);
        std::process::exit(1);
    });

    println!(
        "Loaded task with {} factors and {} labels.",
        task.num_factors(),
        task.num_labels()
    );

    let mut config = LdSimulationConfig::new(Arc::new(task));
    config.factor_backend = args.factor_relation.into();
    config.label_backend = args.label_relation.into();
    if args.max_iterations > 0 {
        config.max_iterations = args.max_iterations;
    }

    let result = if args.incremental {
        compute_incremental_ld_simulation(config)
    } else {
        compute_ld_simulation(config)
    };
    let relation = result.unwrap_or_else(|e| {
        eprintln!("Simulation computation interrupted: {}", e);
        std::process::exit(1);
    });

    println!("Simulations: {}", relation.num_simulations());
    println!("Equivalences: {}", relation.num_equivalences());
    println!("States in the problem: {}", relation.num_states_problem());
    println!("Dominated state pairs: {}", relation.num_st_pairs());
    println!(
        "Simulation ratio: {:.6}",
        relation.percentage_simulations(false)
    );
    println!(
        "Equivalence ratio: {:.6}",
        relation.percentage_equivalences()
    );
}
