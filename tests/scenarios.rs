use u_cvrp::models::{Customer, Instance, SolutionStatus, StructuralInfeasibility};
use u_cvrp::solver::{solve, SolverConfig};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> SolverConfig {
    SolverConfig::default().with_seed(42).with_try_limit(30)
}

/// Shortest closed tour through `ids` and the depot, by enumeration.
fn brute_force_optimum(instance: &Instance, ids: &[usize]) -> f64 {
    fn permute(
        instance: &Instance,
        remaining: &mut Vec<usize>,
        prev: usize,
        acc: f64,
        best: &mut f64,
    ) {
        if remaining.is_empty() {
            *best = best.min(acc + instance.distance(prev, 0));
            return;
        }
        for i in 0..remaining.len() {
            let next = remaining.remove(i);
            permute(instance, remaining, next, acc + instance.distance(prev, next), best);
            remaining.insert(i, next);
        }
    }

    let mut best = f64::INFINITY;
    permute(instance, &mut ids.to_vec(), 0, 0.0, &mut best);
    best
}

#[test]
fn test_square_corners_two_vehicles() {
    init_logger();
    let customers = vec![
        Customer::depot(0.0, 0.0),
        Customer::new(1, 1.0, 1.0, 4),
        Customer::new(2, -1.0, 1.0, 4),
        Customer::new(3, -1.0, -1.0, 4),
        Customer::new(4, 1.0, -1.0, 4),
    ];
    let instance = Instance::new(customers, 2, 10).expect("valid");
    let solution = solve(&instance, &config()).expect("solves");

    assert!(solution.is_feasible());
    assert_eq!(solution.num_served(), 4);
    // two adjacent corners per vehicle: sqrt(2) out, 2 across, sqrt(2) back
    let pair_optimum = 2.0 + 2.0 * 2f64.sqrt();
    for route in solution.routes() {
        assert!(route.total_load() <= 10);
        assert_eq!(route.len(), 2);
        assert!((route.total_distance() - pair_optimum).abs() < 1e-10);
    }
    assert!((solution.total_cost() - (4.0 + 4.0 * 2f64.sqrt())).abs() < 1e-10);
}

#[test]
fn test_single_vehicle_matches_brute_force() {
    init_logger();
    // Depot and customers on one circle, listed out of angular order
    let on_circle = |id: usize, degrees: f64, demand: i32| {
        let r = degrees.to_radians();
        Customer::new(id, 10.0 * r.cos(), 10.0 * r.sin(), demand)
    };
    let customers = vec![
        on_circle(0, 0.0, 0),
        on_circle(1, 200.0, 1),
        on_circle(2, 50.0, 1),
        on_circle(3, 290.0, 1),
        on_circle(4, 120.0, 1),
        on_circle(5, 160.0, 1),
    ];
    let instance = Instance::new(customers, 1, 5).expect("valid");
    let solution = solve(&instance, &config()).expect("solves");

    assert!(solution.is_feasible());
    assert_eq!(solution.num_routes(), 1);
    assert_eq!(solution.routes()[0].len(), 5);

    let optimum = brute_force_optimum(&instance, &[1, 2, 3, 4, 5]);
    assert!((solution.total_cost() - optimum).abs() < 1e-9);
}

#[test]
fn test_oversized_customer_is_reported() {
    init_logger();
    let customers = vec![
        Customer::depot(0.0, 0.0),
        Customer::new(1, 3.0, 0.0, 15),
        Customer::new(2, 0.0, 3.0, 2),
    ];
    let instance = Instance::new(customers, 2, 10).expect("valid");
    assert_eq!(
        instance.structural_infeasibility(),
        Some(StructuralInfeasibility::OversizedCustomer {
            customer_id: 1,
            demand: 15
        })
    );

    let solution = solve(&instance, &config()).expect("solves");
    match solution.status() {
        SolutionStatus::InfeasibleResidual {
            max_violation,
            structural,
        } => {
            assert!(*structural);
            assert!(*max_violation >= 5);
        }
        other => panic!("expected infeasible residual, got {other:?}"),
    }
    assert_eq!(solution.num_served(), 2);
}

#[test]
fn test_oversized_customer_does_not_block_repair() {
    init_logger();
    let mut customers = vec![
        Customer::depot(0.0, 0.0),
        Customer::new(1, 10.0, 0.0, 12),
    ];
    for id in 2..=5 {
        customers.push(Customer::new(id, 0.0, 10.0, 5));
    }
    let instance = Instance::new(customers, 3, 10).expect("valid");
    assert!(instance.structural_infeasibility().is_some());

    let solution = solve(&instance, &config()).expect("solves");
    assert_eq!(solution.num_served(), 5);
    assert_eq!(
        solution.status(),
        &SolutionStatus::InfeasibleResidual {
            max_violation: 2,
            structural: true
        }
    );
    // only the vehicle carrying customer 1 is over capacity
    for route in solution.routes() {
        if route.customer_ids().contains(&1) {
            assert_eq!(route.customer_ids(), &[1]);
        } else {
            assert!(route.total_load() <= 10);
        }
    }
}

#[test]
fn test_fleet_too_small_is_reported() {
    init_logger();
    let customers = (0..=6)
        .map(|i| {
            if i == 0 {
                Customer::depot(0.0, 0.0)
            } else {
                Customer::new(i, i as f64, 1.0, 5)
            }
        })
        .collect();
    let instance = Instance::new(customers, 2, 10).expect("valid");
    assert!(matches!(
        instance.structural_infeasibility(),
        Some(StructuralInfeasibility::FleetTooSmall {
            total_demand: 30,
            fleet_capacity: 20
        })
    ));

    let solution = solve(&instance, &config()).expect("solves");
    assert!(!solution.is_feasible());
    assert!(matches!(
        solution.status(),
        SolutionStatus::InfeasibleResidual {
            structural: true,
            ..
        }
    ));
    assert_eq!(solution.num_served(), 6);
}

#[test]
fn test_colocated_customers_with_spare_vehicles() {
    init_logger();
    let mut customers = vec![Customer::depot(0.0, 0.0)];
    for id in 1..=3 {
        customers.push(Customer::new(id, 2.0, 2.0, 1));
    }
    let instance = Instance::new(customers, 5, 10).expect("valid");
    let solution = solve(&instance, &config()).expect("solves");

    assert!(solution.is_feasible());
    assert_eq!(solution.num_routes(), 5);
    assert_eq!(solution.num_served(), 3);
    for route in solution.routes().iter().filter(|r| r.is_empty()) {
        assert_eq!(route.total_distance(), 0.0);
    }
}
