use optsim::{
    annealing::{SaOptions, SimulatedAnnealing},
    error::OptimError,
    logger::History,
    problem::{Knapsack, OneMax, Problem},
    rng::RandomNumberGenerator,
};

#[test]
fn test_onemax_reaches_good_solution() {
    let options = SaOptions::new(2.0, 0.98, 0.01, 1000);
    for seed in [2, 19, 101] {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let mut solver =
            SimulatedAnnealing::new(OneMax::new(20).unwrap(), options.clone()).unwrap();

        let mut history = History::new();
        let result = solver.solve(&mut history, &mut rng).unwrap();

        assert!(
            result.best_fitness >= 16.0,
            "seed {} only reached {}",
            seed,
            result.best_fitness
        );
        assert_eq!(result.steps, history.len());
        assert!(result.final_temperature <= 0.01);
    }
}

#[test]
fn test_best_fitness_never_decreases() {
    let mut rng = RandomNumberGenerator::from_seed(13);
    let mut solver =
        SimulatedAnnealing::new(OneMax::new(24).unwrap(), SaOptions::default()).unwrap();

    let mut history = History::new();
    solver.solve(&mut history, &mut rng).unwrap();

    let best = history.best_fitness_series();
    assert!(best.windows(2).all(|w| w[1] >= w[0]));

    let current = history.secondary_fitness_series();
    assert!(best.iter().zip(&current).all(|(b, c)| b >= c));
}

#[test]
fn test_manual_stepping_matches_solver_state() {
    let mut rng = RandomNumberGenerator::from_seed(6);
    let mut solver =
        SimulatedAnnealing::new(OneMax::new(10).unwrap(), SaOptions::default()).unwrap();

    let mut history = History::new();
    assert!(solver.anneal_step(&mut history, &mut rng).is_err());

    solver.start(&mut rng);
    for _ in 0..5 {
        assert!(solver.anneal_step(&mut history, &mut rng).unwrap());
    }
    assert_eq!(solver.step(), 5);
    assert_eq!(history.len(), 5);

    let best = solver.best_solution().unwrap();
    assert_eq!(solver.best_fitness(), Some(solver.problem().evaluate(best)));
    assert!((solver.temperature() - 100.0 * 0.95f64.powi(5)).abs() < 1e-9);
}

#[test]
fn test_knapsack_best_is_feasible() {
    let mut rng = RandomNumberGenerator::from_seed(21);
    let knapsack = Knapsack::random(15, 0.5, &mut rng).unwrap();
    let capacity = knapsack.capacity();
    let mut solver = SimulatedAnnealing::new(knapsack, SaOptions::default()).unwrap();

    let mut history = History::new();
    let result = solver.solve(&mut history, &mut rng).unwrap();
    if result.best_fitness > 0.0 {
        let (weight, _) = solver.problem().totals(&result.best);
        assert!(weight <= capacity);
    }
}

#[test]
fn test_invalid_schedule() {
    let options = SaOptions::new(1.0, 0.9, 2.0, 100);
    let result = SimulatedAnnealing::new(OneMax::new(4).unwrap(), options);

    match result {
        Err(OptimError::Configuration(msg)) => {
            assert!(msg.contains("Minimum temperature"));
        }
        other => panic!("Expected Configuration error, got {:?}", other),
    }

    let options = SaOptions::builder().cooling_rate(f64::NAN).build();
    assert!(matches!(
        SimulatedAnnealing::new(OneMax::new(4).unwrap(), options),
        Err(OptimError::InvalidNumericValue(_))
    ));
}
