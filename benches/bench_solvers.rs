use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use optsim::{
    annealing::{SaOptions, SimulatedAnnealing},
    evolution::{GaOptions, GeneticSolver},
    logger::ProgressRecord,
    problem::{Knapsack, OneMax, Problem},
    rl::{OneMaxEnv, QLearningSolver, RlOptions},
    rng::RandomNumberGenerator,
};

fn discard(_: ProgressRecord) {}

fn bench_genetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("genetic_onemax");
    for size in [20, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut rng = RandomNumberGenerator::from_seed(1);
            b.iter(|| {
                let options = GaOptions::new(50, 0.01, 20);
                let mut solver = GeneticSolver::new(OneMax::new(size).unwrap(), options).unwrap();
                let result = solver.solve(&mut discard, black_box(&mut rng));
                assert!(result.is_ok());
            })
        });
    }
    group.finish();
}

fn bench_annealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("annealing_knapsack");
    for size in [20, 100, 500].iter() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let knapsack = Knapsack::random(*size, 0.5, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &knapsack, |b, knapsack| {
            b.iter(|| {
                let options = SaOptions::new(100.0, 0.95, 0.01, 500);
                let mut solver = SimulatedAnnealing::new(knapsack.clone(), options).unwrap();
                let result = solver.solve(&mut discard, black_box(&mut rng));
                assert!(result.is_ok());
            })
        });
    }
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let problem = OneMax::new(1000).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(3);
    let a = problem.create_individual(&mut rng);
    let b = problem.create_individual(&mut rng);

    c.bench_function("mutate_1000", |bench| {
        bench.iter(|| problem.mutate(black_box(&a), 0.01, &mut rng).unwrap())
    });
    c.bench_function("crossover_1000", |bench| {
        bench.iter(|| problem.crossover(black_box(&a), black_box(&b), &mut rng).unwrap())
    });
}

fn bench_qlearning(c: &mut Criterion) {
    c.bench_function("qlearning_onemax_8_train_100", |b| {
        let mut rng = RandomNumberGenerator::from_seed(4);
        b.iter(|| {
            let env = OneMaxEnv::new(OneMax::new(8).unwrap());
            let actions = env.action_space();
            let options = RlOptions::builder().alpha(0.5).epsilon(0.2).build();
            let mut solver = QLearningSolver::new(env, actions, options).unwrap();
            solver.train(100, 16, black_box(&mut rng)).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_genetic,
    bench_annealing,
    bench_operators,
    bench_qlearning
);
criterion_main!(benches);
