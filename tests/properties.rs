use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_cvrp::constructive::nearest_neighbor_tour;
use u_cvrp::local_search::TourOptimizer;
use u_cvrp::models::{Customer, Instance, SolutionStatus};
use u_cvrp::solver::{solve, SolverConfig};

prop_compose! {
    fn generate_customers(max: usize)
    (sites in prop::collection::vec((-50i32..50, -50i32..50, 1i32..10), 1..max))
    -> Vec<Customer> {
        let mut customers = vec![Customer::depot(0.0, 0.0)];
        for (i, (x, y, demand)) in sites.into_iter().enumerate() {
            customers.push(Customer::new(i + 1, f64::from(x), f64::from(y), demand));
        }
        customers
    }
}

prop_compose! {
    fn generate_instance()
    (customers in generate_customers(16), vehicles in 1usize..5, capacity in 5i32..40)
    -> Instance {
        Instance::new(customers, vehicles, capacity).expect("generated instance is valid")
    }
}

fn fast_config(seed: u64) -> SolverConfig {
    SolverConfig::default()
        .with_seed(seed)
        .with_try_limit(8)
        .with_repair_max_iterations(500)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_customer_served_exactly_once(instance in generate_instance(), seed in 0u64..1000) {
        let solution = solve(&instance, &fast_config(seed)).expect("solves");

        let mut served: Vec<usize> = solution
            .routes()
            .iter()
            .flat_map(|r| r.customer_ids().iter().copied())
            .collect();
        served.sort_unstable();
        let expected: Vec<usize> = instance.customer_ids().collect();

        prop_assert_eq!(served, expected);
        prop_assert_eq!(solution.num_routes(), instance.vehicle_count());
    }

    #[test]
    fn reported_cost_matches_edges(instance in generate_instance(), seed in 0u64..1000) {
        let solution = solve(&instance, &fast_config(seed)).expect("solves");

        let mut total = 0.0;
        for route in solution.routes() {
            let ids = route.customer_ids();
            let mut cost = 0.0;
            let mut prev = 0;
            for &id in ids {
                cost += instance.distance(prev, id);
                prev = id;
            }
            if !ids.is_empty() {
                cost += instance.distance(prev, 0);
            }
            prop_assert!((route.total_distance() - cost).abs() < 1e-6);
            total += cost;
        }
        prop_assert!((solution.total_cost() - total).abs() < 1e-6);
    }

    #[test]
    fn feasible_status_means_loads_fit(instance in generate_instance(), seed in 0u64..1000) {
        let solution = solve(&instance, &fast_config(seed)).expect("solves");

        match solution.status() {
            SolutionStatus::Feasible => {
                for route in solution.routes() {
                    prop_assert!(route.total_load() <= i64::from(instance.capacity()));
                    prop_assert_eq!(route.total_load(), instance.load(route.customer_ids()));
                }
            }
            SolutionStatus::InfeasibleResidual { max_violation, structural } => {
                prop_assert!(*max_violation > 0);
                if *structural {
                    prop_assert!(instance.structural_infeasibility().is_some());
                }
            }
        }
    }

    #[test]
    fn optimizer_not_worse_than_first_greedy(
        customers in generate_customers(12),
        seed in 0u64..1000,
    ) {
        let instance = Instance::new(customers, 1, 1000).expect("valid");
        let route: Vec<usize> = instance.customer_ids().collect();
        let distances = instance.distances();

        let mut first = StdRng::seed_from_u64(seed);
        let greedy = nearest_neighbor_tour(&route, 0, distances, &mut first);
        let greedy_cost = distances.closed_tour_length(&greedy, 0);

        let mut rng = StdRng::seed_from_u64(seed);
        let (order, cost) = TourOptimizer::new(6, 20, 3, 10).optimize(&route, 0, distances, &mut rng);

        prop_assert!(cost <= greedy_cost + 1e-9);
        prop_assert_eq!(order.len(), route.len());
    }

    #[test]
    fn distance_matrix_is_symmetric(customers in generate_customers(16)) {
        let instance = Instance::new(customers, 1, 1000).expect("valid");
        let distances = instance.distances();
        let n = distances.size();

        prop_assert!(distances.is_symmetric(1e-12));
        let mut largest: f64 = 0.0;
        for i in 0..n {
            prop_assert_eq!(distances.get(i, i), 0.0);
            for j in 0..n {
                largest = largest.max(distances.get(i, j));
            }
        }
        prop_assert!((distances.max_pair_distance() - largest).abs() < 1e-12);
    }
}
