//! Unambiguous nearest-label dilation.
//!
//! Each pass grows every label by one site along the lattice adjacency: a
//! background site whose neighbours carry exactly one distinct nonzero label
//! adopts that label. A background site contested by two or more distinct
//! labels stays background, so growth fronts meet in a fixed boundary
//! instead of being broken by visitation order. Updates are synchronous
//! within a pass: adoption decisions only read the array as it stood when
//! the pass began.

use std::collections::HashMap;

use crate::{
    error::{LabelError, Result},
    lattice::Lattice,
};

/// Grows every label by up to `iterations` passes.
///
/// # Errors
/// Returns [`LabelError::ShapeMismatch`] when `labels` does not have one
/// entry per lattice site.
///
/// # Examples
/// ```
/// use graupel_core::{dilate, Lattice};
///
/// let lattice = Lattice::new(&[1, 6], false).expect("valid shape");
/// let labels = [0, 1, 0, 0, 2, 0];
/// let grown = dilate(&lattice, &labels, 1).expect("labels match shape");
/// assert_eq!(grown, vec![1, 1, 1, 2, 2, 2]);
/// ```
pub fn dilate(lattice: &Lattice, labels: &[i64], iterations: usize) -> Result<Vec<i64>> {
    dilate_impl(lattice, labels, iterations, None)
}

/// Grows each label by its own number of passes.
///
/// `iterations` is indexed by label value and must have `max(label) + 1`
/// entries (slot 0 is ignored). A label stops claiming new sites once its
/// count is exhausted; contested sites are decided among the labels still
/// growing in that pass.
///
/// # Errors
/// Returns [`LabelError::ShapeMismatch`] when `labels` does not have one
/// entry per lattice site, [`LabelError::InvalidLabel`] when a negative
/// label is present, and [`LabelError::IterationsLength`] when the table
/// does not cover every label.
///
/// # Examples
/// ```
/// use graupel_core::{dilate_per_label, Lattice};
///
/// let lattice = Lattice::new(&[1, 7], false).expect("valid shape");
/// let labels = [0, 0, 1, 0, 0, 2, 0];
/// // Label 1 grows two passes, label 2 none.
/// let grown = dilate_per_label(&lattice, &labels, &[0, 2, 0]).expect("table covers labels");
/// assert_eq!(grown, vec![1, 1, 1, 1, 1, 2, 0]);
/// ```
pub fn dilate_per_label(
    lattice: &Lattice,
    labels: &[i64],
    iterations: &[usize],
) -> Result<Vec<i64>> {
    if let Some(&label) = labels.iter().find(|&&label| label < 0) {
        return Err(LabelError::InvalidLabel { label });
    }
    let max_label = labels.iter().copied().max().unwrap_or(0);
    if iterations.len() != (max_label as usize) + 1 {
        return Err(LabelError::IterationsLength {
            got: iterations.len(),
            max_label,
        });
    }
    let max_iterations = iterations.iter().copied().max().unwrap_or(0);
    dilate_impl(lattice, labels, max_iterations, Some(iterations))
}

fn dilate_impl(
    lattice: &Lattice,
    labels: &[i64],
    max_iterations: usize,
    budgets: Option<&[usize]>,
) -> Result<Vec<i64>> {
    if labels.len() != lattice.len() {
        return Err(LabelError::ShapeMismatch {
            got: labels.len(),
            expected: lattice.len(),
        });
    }

    let grows = |label: i64, pass: usize| -> bool {
        budgets.is_none_or(|table| {
            table
                .get(label as usize)
                .is_some_and(|&budget| budget > pass)
        })
    };

    let mut current = labels.to_vec();
    let mut neighbors: Vec<usize> = Vec::with_capacity(2 * lattice.rank());

    for pass in 0..max_iterations {
        let mut next = current.clone();
        let mut changed = false;

        for index in 0..current.len() {
            if current[index] != 0 {
                continue;
            }
            neighbors.clear();
            lattice.push_neighbors(index, &mut neighbors);

            let mut candidate = 0i64;
            let mut contested = false;
            for &neighbor in &neighbors {
                let label = current[neighbor];
                if label == 0 || !grows(label, pass) {
                    continue;
                }
                if candidate == 0 {
                    candidate = label;
                } else if candidate != label {
                    contested = true;
                    break;
                }
            }

            if candidate != 0 && !contested {
                next[index] = candidate;
                changed = true;
            }
        }

        current = next;
        if !changed {
            break;
        }
    }

    Ok(current)
}
