//! Pure label-identity algebra over already-produced label arrays.
//!
//! These functions never touch lattice geometry: they treat a label array as
//! a flat sequence of integer ids and manipulate the numbering only. Labels
//! may be any integer (including negative values produced by external
//! tooling); 0 is the background and participates like any other id except
//! where noted.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{LabelError, Result};

/// Builds the correspondence table between two labelings of one partition.
///
/// `a` and `b` must label the same partition of the same domain, differing
/// only in numbering. The result holds one `(id_in_a, id_in_b)` row per
/// distinct id in `a`, ascending, including `(0, 0)` when background is
/// present.
///
/// # Errors
/// Returns [`LabelError::LengthMismatch`] when the arrays differ in length
/// and [`LabelError::InconsistentPartition`] when some id in `a` maps to two
/// different ids in `b`.
///
/// # Examples
/// ```
/// use graupel_core::labels_map;
///
/// let a = [1, 1, 0, 2];
/// let b = [-3, -3, 0, 7];
/// assert_eq!(
///     labels_map(&a, &b).expect("arrays label the same partition"),
///     vec![(0, 0), (1, -3), (2, 7)],
/// );
/// ```
pub fn labels_map(a: &[i64], b: &[i64]) -> Result<Vec<(i64, i64)>> {
    if a.len() != b.len() {
        return Err(LabelError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut map: BTreeMap<i64, i64> = BTreeMap::new();
    for (&id_a, &id_b) in a.iter().zip(b) {
        match map.entry(id_a) {
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(id_b);
            }
            std::collections::btree_map::Entry::Occupied(entry) => {
                let seen = *entry.get();
                if seen != id_b {
                    return Err(LabelError::InconsistentPartition {
                        label: id_a,
                        first: seen,
                        second: id_b,
                    });
                }
            }
        }
    }

    Ok(map.into_iter().collect())
}

/// Rewrites every site's label through an explicit old-to-new table.
///
/// # Errors
/// Returns [`LabelError::MissingLabel`] when some label present in `labels`
/// has no entry in `map`.
///
/// # Examples
/// ```
/// use graupel_core::labels_rename;
///
/// let labels = [1, 1, 0, 2];
/// let renamed = labels_rename(&labels, &[(0, 0), (1, 5), (2, -1)])
///     .expect("table covers every label");
/// assert_eq!(renamed, vec![5, 5, 0, -1]);
/// ```
pub fn labels_rename(labels: &[i64], map: &[(i64, i64)]) -> Result<Vec<i64>> {
    let table: HashMap<i64, i64> = map.iter().copied().collect();
    labels
        .iter()
        .map(|&label| {
            table
                .get(&label)
                .copied()
                .ok_or(LabelError::MissingLabel { label })
        })
        .collect()
}

/// Renumbers labels by position in a permutation of the labels present.
///
/// `order` must contain every distinct label of `labels` exactly once; the
/// sites carrying `order[k]` receive the new label `k`. Background is
/// conventionally kept in slot 0 so it stays 0.
///
/// # Errors
/// Returns [`LabelError::ReorderLength`] when `order` does not have one
/// entry per distinct label present, [`LabelError::ReorderUnknownLabel`]
/// when an entry is not present in `labels`, and
/// [`LabelError::ReorderDuplicateLabel`] when an entry repeats.
///
/// # Examples
/// ```
/// use graupel_core::labels_reorder;
///
/// let labels = [1, 0, 2, 0, 3, 0, 4, 0];
/// let reordered = labels_reorder(&labels, &[0, 4, 1, 2, 3])
///     .expect("order is a permutation of the labels present");
/// assert_eq!(reordered, vec![2, 0, 3, 0, 4, 0, 1, 0]);
/// ```
pub fn labels_reorder(labels: &[i64], order: &[i64]) -> Result<Vec<i64>> {
    let present: BTreeSet<i64> = labels.iter().copied().collect();
    if order.len() != present.len() {
        return Err(LabelError::ReorderLength {
            got: order.len(),
            expected: present.len(),
        });
    }

    let mut table: HashMap<i64, i64> = HashMap::with_capacity(order.len());
    for (slot, &label) in order.iter().enumerate() {
        if !present.contains(&label) {
            return Err(LabelError::ReorderUnknownLabel { label });
        }
        if table.insert(label, slot as i64).is_some() {
            return Err(LabelError::ReorderDuplicateLabel { label });
        }
    }

    Ok(labels
        .iter()
        .map(|label| table.get(label).copied().unwrap_or(0))
        .collect())
}

/// Renumbers the surviving nonzero labels to consecutive integers from 1.
///
/// New ids are assigned in ascending order of the original numeric value;
/// 0 stays 0. Idempotent: pruning an already-pruned array is a no-op.
///
/// # Examples
/// ```
/// use graupel_core::labels_prune;
///
/// let labels = [-2, -2, 0, 8, 3, 0, 6, 6];
/// assert_eq!(labels_prune(&labels), vec![1, 1, 0, 4, 2, 0, 3, 3]);
/// ```
#[must_use]
pub fn labels_prune(labels: &[i64]) -> Vec<i64> {
    let survivors: BTreeSet<i64> = labels.iter().copied().filter(|&l| l != 0).collect();
    let table: HashMap<i64, i64> = survivors
        .into_iter()
        .enumerate()
        .map(|(rank, label)| (label, rank as i64 + 1))
        .collect();
    labels
        .iter()
        .map(|label| table.get(label).copied().unwrap_or(0))
        .collect()
}

/// Counts the sites carrying each label present in the array.
///
/// Returns one `(label, count)` row per distinct id, ascending, with 0
/// included like any other label.
///
/// # Examples
/// ```
/// use graupel_core::labels_sizes;
///
/// let labels = [1, 1, 0, 2, 1];
/// assert_eq!(labels_sizes(&labels), vec![(0, 1), (1, 3), (2, 1)]);
/// ```
#[must_use]
pub fn labels_sizes(labels: &[i64]) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Counts the sites carrying each of the requested labels, in request order.
///
/// Labels absent from the array count 0.
///
/// # Examples
/// ```
/// use graupel_core::labels_sizes_of;
///
/// let labels = [1, 1, 0, 2, 1];
/// assert_eq!(labels_sizes_of(&labels, &[2, 1, 9]), vec![1, 3, 0]);
/// ```
#[must_use]
pub fn labels_sizes_of(labels: &[i64], names: &[i64]) -> Vec<usize> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    names
        .iter()
        .map(|name| counts.get(name).copied().unwrap_or(0))
        .collect()
}
