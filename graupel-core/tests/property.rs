//! Property tests for labelling and label algebra.

mod common;

use common::{flood_fill, same_partition};
use graupel_core::{Labeller, Lattice, clusters, labels_map, labels_prune, labels_rename};
use proptest::prelude::*;

fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..=5, 1..=3)
}

/// A lattice scenario: shape, global periodicity, and a matching mask.
fn scenario_strategy() -> impl Strategy<Value = (Vec<usize>, bool, Vec<bool>)> {
    (shape_strategy(), any::<bool>()).prop_flat_map(|(shape, periodic)| {
        let size = shape.iter().product::<usize>();
        (
            Just(shape),
            Just(periodic),
            prop::collection::vec(any::<bool>(), size),
        )
    })
}

/// A mask scenario plus a shuffled ordering of its active sites.
fn shuffled_scenario_strategy() -> impl Strategy<Value = (Vec<usize>, bool, Vec<bool>, Vec<usize>)>
{
    scenario_strategy().prop_flat_map(|(shape, periodic, mask)| {
        let active: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(index, &on)| on.then_some(index))
            .collect();
        (
            Just(shape),
            Just(periodic),
            Just(mask),
            Just(active).prop_shuffle(),
        )
    })
}

fn label_array_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-6i64..=6, 1..=48)
}

proptest! {
    #[test]
    fn aperiodic_clusters_match_flood_fill((shape, _periodic, mask) in scenario_strategy()) {
        let lattice = Lattice::new(&shape, false).expect("shape is valid");
        let ours = clusters(&lattice, &mask).expect("mask matches shape");
        let reference = flood_fill(&lattice, &mask);
        prop_assert!(same_partition(&ours, &reference));
    }

    #[test]
    fn periodic_clusters_match_flood_fill((shape, _periodic, mask) in scenario_strategy()) {
        let lattice = Lattice::new(&shape, true).expect("shape is valid");
        let ours = clusters(&lattice, &mask).expect("mask matches shape");
        let reference = flood_fill(&lattice, &mask);
        prop_assert!(same_partition(&ours, &reference));
    }

    #[test]
    fn insertion_order_does_not_change_the_partition(
        (shape, periodic, mask, shuffled) in shuffled_scenario_strategy(),
    ) {
        let lattice = Lattice::new(&shape, periodic).expect("shape is valid");

        let mut bulk = Labeller::new(lattice.clone());
        bulk.add_image(&mask).expect("mask matches shape");

        let mut pointwise = Labeller::new(lattice);
        pointwise.add_points(&shuffled).expect("indices in range");

        prop_assert!(same_partition(&bulk.labels(), &pointwise.labels()));
    }

    #[test]
    fn labels_accessor_is_consistent_after_any_growth(
        (shape, periodic, mask, shuffled) in shuffled_scenario_strategy(),
    ) {
        let lattice = Lattice::new(&shape, periodic).expect("shape is valid");
        let mut labeller = Labeller::new(lattice.clone());
        labeller.add_points(&shuffled).expect("indices in range");

        let labels = labeller.labels();
        for (index, &label) in labels.iter().enumerate() {
            // Active sites carry positive labels, inactive sites zero.
            prop_assert_eq!(label > 0, mask[index]);
            // Adjacent active sites always agree; transitivity covers chains.
            if label > 0 {
                for neighbor in lattice.neighbors(index).expect("index in range") {
                    if labels[neighbor] > 0 {
                        prop_assert_eq!(labels[neighbor], label);
                    }
                }
            }
        }
    }

    #[test]
    fn prune_is_idempotent(labels in label_array_strategy()) {
        let once = labels_prune(&labels);
        prop_assert_eq!(labels_prune(&once), once.clone());
    }

    #[test]
    fn prune_preserves_the_partition(labels in label_array_strategy()) {
        let pruned = labels_prune(&labels);
        prop_assert!(same_partition(&labels, &pruned));
    }

    #[test]
    fn map_then_rename_round_trips(labels in label_array_strategy()) {
        // An injective renumbering of the same partition.
        let renamed: Vec<i64> = labels.iter().map(|&l| l * 3 - 7).collect();
        let forward = labels_map(&labels, &renamed).expect("consistent partitions");
        prop_assert_eq!(
            labels_rename(&labels, &forward).expect("table covers every label"),
            renamed.clone(),
        );
        let backward = labels_map(&renamed, &labels).expect("consistent partitions");
        prop_assert_eq!(
            labels_rename(&renamed, &backward).expect("table covers every label"),
            labels.clone(),
        );
    }

    #[test]
    fn pruned_labels_are_gap_free(labels in label_array_strategy()) {
        let pruned = labels_prune(&labels);
        let max = pruned.iter().copied().max().unwrap_or(0);
        for id in 1..=max {
            prop_assert!(pruned.contains(&id));
        }
        prop_assert!(pruned.iter().all(|&l| l >= 0));
    }
}

#[test]
fn add_points_neighbor_consistency_does_not_depend_on_wrap_side() {
    // Direct regression for the wrap: the same component entered from both
    // sides of the periodic seam must converge to one label.
    let lattice = Lattice::new(&[1, 8], true).expect("shape is valid");
    let mut labeller = Labeller::new(lattice);
    labeller.add_points(&[7, 0, 6, 1]).expect("indices in range");
    let labels = labeller.labels();
    assert!(labels[6] == labels[7] && labels[7] == labels[0] && labels[0] == labels[1]);
}
