use optsim::{
    individual::Individual,
    problem::{OneMax, Problem},
    rng::RandomNumberGenerator,
};
use proptest::prelude::*;

fn genome(len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=1, len)
}

proptest! {
    #[test]
    fn zero_rate_mutation_is_identity(genes in genome(16), seed in any::<u64>()) {
        let problem = OneMax::new(16).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let individual = Individual::from_genes(genes).unwrap();

        let mutated = problem.mutate(&individual, 0.0, &mut rng).unwrap();
        prop_assert_eq!(mutated, individual);
    }

    #[test]
    fn full_rate_mutation_flips_everything(genes in genome(12), seed in any::<u64>()) {
        let problem = OneMax::new(12).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let individual = Individual::from_genes(genes).unwrap();

        let mutated = problem.mutate(&individual, 1.0, &mut rng).unwrap();
        prop_assert_eq!(problem.evaluate(&mutated), 12.0 - problem.evaluate(&individual));
    }

    #[test]
    fn crossover_children_are_complementary_splices(
        (a, b) in (2usize..32).prop_flat_map(|n| (genome(n), genome(n))),
        seed in any::<u64>(),
    ) {
        let size = a.len();
        let problem = OneMax::new(size).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let p1 = Individual::from_genes(a).unwrap();
        let p2 = Individual::from_genes(b).unwrap();

        let (c1, c2) = problem.crossover(&p1, &p2, &mut rng).unwrap();
        prop_assert_eq!(c1.len(), size);
        prop_assert_eq!(c2.len(), size);

        let cut_matches = (1..size).any(|cut| {
            c1.genes()[..cut] == p1.genes()[..cut]
                && c1.genes()[cut..] == p2.genes()[cut..]
                && c2.genes()[..cut] == p2.genes()[..cut]
                && c2.genes()[cut..] == p1.genes()[cut..]
        });
        prop_assert!(cut_matches);
    }

    #[test]
    fn onemax_fitness_counts_ones(genes in genome(20)) {
        let ones = genes.iter().filter(|&&g| g == 1).count();
        let individual = Individual::from_genes(genes).unwrap();
        prop_assert_eq!(OneMax::new(20).unwrap().evaluate(&individual), ones as f64);
    }
}
