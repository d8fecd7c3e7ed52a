use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use optsim::{
    error::{Result, ResultExt},
    problem::knapsack::DEFAULT_CAPACITY_RATIO,
    GaOptions, GeneticSolver, History, Knapsack, Logger, OneMax, OneMaxEnv, Problem,
    ProgressRecord, QLearningSolver, RandomNumberGenerator, RlOptions, SaOptions,
    SimulatedAnnealing, TracingLogger,
};

/// Q-learning scales poorly with problem size; larger requests are capped.
const RL_MAX_SIZE: usize = 12;
const RL_EPISODES: usize = 500;
const DEFAULT_SIZE: usize = 100;
const DEFAULT_RL_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverKind {
    Ga,
    Sa,
    Rl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProblemKind {
    Onemax,
    Knapsack,
}

#[derive(Debug, Parser)]
#[command(name = "optsim", version)]
#[command(about = "Compare GA, SA and Q-learning on binary optimization problems")]
struct Cli {
    /// Solver to use
    #[arg(long, value_enum, default_value_t = SolverKind::Ga)]
    solver: SolverKind,

    /// Problem to solve
    #[arg(long, value_enum, default_value_t = ProblemKind::Onemax)]
    problem: ProblemKind,

    /// Problem size; 0 picks the solver's default
    #[arg(long, default_value_t = 0)]
    size: usize,

    /// Seed for the random source; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write the recorded progress history to this JSON file
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => RandomNumberGenerator::from_seed(seed),
        None => RandomNumberGenerator::new(),
    };

    match cli.solver {
        SolverKind::Ga => run_ga(cli, &mut rng),
        SolverKind::Sa => run_sa(cli, &mut rng),
        SolverKind::Rl => run_rl(cli, &mut rng),
    }
}

fn size_or(cli: &Cli, default: usize) -> usize {
    if cli.size > 0 {
        cli.size
    } else {
        default
    }
}

fn make_problem(
    kind: ProblemKind,
    size: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<Box<dyn Problem>> {
    let problem: Box<dyn Problem> = match kind {
        ProblemKind::Onemax => Box::new(OneMax::new(size)?),
        ProblemKind::Knapsack => Box::new(Knapsack::random(size, DEFAULT_CAPACITY_RATIO, rng)?),
    };
    Ok(problem)
}

/// Forwards every record to `tracing` and keeps it for export.
fn recording_logger<'a>(
    label: &str,
    history: &'a mut History,
) -> impl FnMut(ProgressRecord) + 'a {
    let mut tracer = TracingLogger::new(label);
    move |record: ProgressRecord| {
        tracer.record(record.clone());
        history.record(record);
    }
}

fn run_ga(cli: &Cli, rng: &mut RandomNumberGenerator) -> Result<()> {
    let problem = make_problem(cli.problem, size_or(cli, DEFAULT_SIZE), rng)?;
    let options = GaOptions::new(50, 0.01, 50);
    let mut solver = GeneticSolver::new(problem, options)?;

    let mut history = History::new();
    let result = solver.solve(&mut recording_logger("ga", &mut history), rng)?;

    info!(
        fitness = result.fitness,
        best = %result.individual,
        "Best solution found"
    );
    export_history(cli.history.as_deref(), &history)
}

fn run_sa(cli: &Cli, rng: &mut RandomNumberGenerator) -> Result<()> {
    let problem = make_problem(cli.problem, size_or(cli, DEFAULT_SIZE), rng)?;
    let options = SaOptions::new(100.0, 0.95, 0.01, 500);
    let mut solver = SimulatedAnnealing::new(problem, options)?;

    let mut history = History::new();
    let result = solver.solve(&mut recording_logger("sa", &mut history), rng)?;

    info!(
        fitness = result.best_fitness,
        steps = result.steps,
        accepted_moves = result.accepted_moves,
        best = %result.best,
        "Best solution found"
    );
    export_history(cli.history.as_deref(), &history)
}

fn run_rl(cli: &Cli, rng: &mut RandomNumberGenerator) -> Result<()> {
    if cli.problem != ProblemKind::Onemax {
        warn!("Q-learning currently only supports OneMax");
        return Ok(());
    }

    let mut size = size_or(cli, DEFAULT_RL_SIZE);
    if size > RL_MAX_SIZE {
        warn!(
            requested = size,
            cap = RL_MAX_SIZE,
            "Q-learning scales poorly with problem size, capping"
        );
        size = RL_MAX_SIZE;
    }

    let problem = OneMax::new(size)?;
    let env = OneMaxEnv::new(problem);
    let actions = env.action_space();
    let options = RlOptions::builder().alpha(0.5).gamma(0.9).epsilon(0.2).build();
    let mut solver = QLearningSolver::new(env, actions, options)?;

    let max_steps = size * 2;
    let report = solver.train(RL_EPISODES, max_steps, rng)?;
    info!(
        states = report.states,
        final_epsilon = report.final_epsilon,
        "Q-table trained"
    );

    let rollout = solver.solve(max_steps, rng)?;
    let fitness = solver.env().problem().evaluate(&rollout.final_state);
    info!(
        solution = %rollout.final_state,
        fitness = format_args!("{}/{}", fitness, size),
        steps = rollout.steps(),
        "Greedy rollout finished"
    );
    for state in rollout.path.iter().rev().take(5).rev() {
        info!(state = %state, "path");
    }

    if cli.history.is_some() {
        warn!("Q-learning does not record a progress history; nothing exported");
    }
    Ok(())
}

fn export_history(path: Option<&Path>, history: &History) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), history.records())
        .context(format!("Failed to write history to {}", path.display()))?;
    info!(path = %path.display(), records = history.len(), "History saved");
    Ok(())
}
