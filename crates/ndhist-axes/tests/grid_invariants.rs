//! Grid-shape and reduction invariants across the axes container.
//!
//! These tests verify:
//! 1. Sparse grids have full length on their own dimension, 1 elsewhere
//! 2. Broadcasting densifies to the common shape with replicated values
//! 3. Ensemble reductions run over the broadcast stack, not per member

use ndhist_axes::testing::{CategoryAxis, UniformAxis, VariableAxis};
use ndhist_axes::{AxesTuple, Axis, Reduction};
use proptest::prelude::*;

fn make_axes(sizes: &[usize]) -> AxesTuple {
    let axes: Vec<Box<dyn Axis>> = sizes
        .iter()
        .map(|&n| Box::new(UniformAxis::new(n, 0.0, n as f64)) as Box<dyn Axis>)
        .collect();
    AxesTuple::new(axes).expect("uniform axes are always valid")
}

// =============================================================================
// Concrete Two-Axis Scenario
// =============================================================================

#[test]
fn two_axis_scenario() {
    let axes: Vec<Box<dyn Axis>> = vec![
        Box::new(UniformAxis::new(3, 0.0, 3.0).with_flow(false, true)),
        Box::new(UniformAxis::new(2, 0.0, 1.0).with_flow(false, true)),
    ];
    let axes = AxesTuple::new(axes).unwrap();

    assert_eq!(axes.size(), vec![3, 2]);
    assert_eq!(axes.extent(), vec![4, 3]);

    let centers = axes.centers();
    assert_eq!(centers.len(), 2);
    assert_eq!(centers[0].shape(), vec![3, 1]);
    assert_eq!(centers[1].shape(), vec![1, 2]);

    let dense = centers.broadcast();
    assert_eq!(dense[0].shape(), vec![3, 2]);
    assert_eq!(dense[1].shape(), vec![3, 2]);

    let point = axes.value(&[1.0, 0.0]).unwrap();
    assert_eq!(point, vec![axes[0].value(1.0), axes[1].value(0.0)]);
    assert_eq!(point, vec![1.0, 0.0]);
}

#[test]
fn mixed_axis_kinds_share_a_grid() {
    let axes: Vec<Box<dyn Axis>> = vec![
        Box::new(UniformAxis::new(2, -1.0, 1.0)),
        Box::new(VariableAxis::new(vec![0.0, 1.0, 10.0, 100.0])),
        Box::new(CategoryAxis::new(vec!["e".into(), "mu".into()])),
    ];
    let axes = AxesTuple::new(axes).unwrap();

    assert_eq!(axes.size(), vec![2, 3, 2]);
    let widths = axes.widths();
    assert_eq!(widths[0].shape(), vec![2, 1, 1]);
    assert_eq!(widths[1].shape(), vec![1, 3, 1]);
    assert_eq!(widths[2].shape(), vec![1, 1, 2]);
    assert_eq!(widths.broadcast_shape(), &[2, 3, 2]);

    // Edge grids are one longer per dimension.
    assert_eq!(axes.edges().broadcast_shape(), &[3, 4, 3]);
}

// =============================================================================
// Broadcast Values
// =============================================================================

#[test]
fn dense_grid_replicates_sparse_values() {
    let axes = make_axes(&[3, 2]);
    let centers = axes.centers();
    let dense = centers.broadcast();

    let first = axes[0].centers();
    let second = axes[1].centers();
    for i in 0..3 {
        for j in 0..2 {
            assert_eq!(dense[0].view()[[i, j]], first[i]);
            assert_eq!(dense[1].view()[[i, j]], second[j]);
        }
    }
}

#[test]
fn grids_are_rebuilt_per_call() {
    let axes = make_axes(&[2, 2]);
    // Transforming one grid leaves a fresh access unchanged.
    let doubled = axes.centers().map(|x| x * 2.0);
    assert_eq!(doubled[0].view()[[1, 0]], 3.0);
    assert_eq!(axes.centers()[0].view()[[1, 0]], 1.5);
}

// =============================================================================
// Ensemble Reductions
// =============================================================================

#[test]
fn reduction_is_over_the_ensemble_not_per_member() {
    let axes = make_axes(&[2, 3]);
    let centers = axes.centers();

    // Hand-computed: member 0 centers [0.5, 1.5] replicate across 3 columns,
    // member 1 centers [0.5, 1.5, 2.5] replicate across 2 rows.
    let ensemble_sum = (0.5 + 1.5) * 3.0 + (0.5 + 1.5 + 2.5) * 2.0;
    assert_eq!(centers.reduce(Reduction::Sum), ensemble_sum);

    // The per-member interpretation would give 2.0 + 4.5 instead.
    let per_member: f64 = centers
        .iter()
        .map(|m| m.view().iter().sum::<f64>())
        .sum();
    assert_eq!(per_member, 6.5);
    assert_ne!(centers.reduce(Reduction::Sum), per_member);
}

#[test]
fn reduction_matches_manual_dense_fold() {
    let axes = make_axes(&[3, 2, 4]);
    let widths = axes.widths();

    let manual: f64 = widths
        .broadcast()
        .iter()
        .map(|m| m.view().iter().sum::<f64>())
        .sum();
    assert_eq!(widths.reduce(Reduction::Sum), manual);
    assert!(widths.all());
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn sparse_grid_shape_invariant(sizes in prop::collection::vec(1usize..6, 0..4)) {
        let axes = make_axes(&sizes);
        let centers = axes.centers();

        prop_assert_eq!(centers.len(), sizes.len());
        for (i, member) in centers.iter().enumerate() {
            let shape = member.shape();
            prop_assert_eq!(shape.len(), sizes.len());
            for (d, &len) in shape.iter().enumerate() {
                prop_assert_eq!(len, if d == i { sizes[i] } else { 1 });
            }
        }

        let dense = centers.broadcast();
        for member in dense.iter() {
            prop_assert_eq!(member.shape(), sizes.clone());
        }
    }

    #[test]
    fn ensemble_sum_equals_dense_sum(sizes in prop::collection::vec(1usize..5, 1..4)) {
        let axes = make_axes(&sizes);
        let centers = axes.centers();

        let manual: f64 = centers
            .broadcast()
            .iter()
            .map(|m| m.view().iter().sum::<f64>())
            .sum();
        prop_assert!((centers.reduce(Reduction::Sum) - manual).abs() < 1e-9);
    }

    #[test]
    fn lookups_agree_with_single_axes(sizes in prop::collection::vec(1usize..5, 1..4)) {
        let axes = make_axes(&sizes);
        let coords: Vec<f64> = sizes.iter().map(|&n| n as f64 / 2.0).collect();

        let indexes = axes.index(&coords).unwrap();
        for (i, &coord) in coords.iter().enumerate() {
            prop_assert_eq!(indexes[i], axes[i].index(coord));
        }
    }
}
