//! Per-label centroids, valid across periodic boundaries.
//!
//! On an aperiodic axis a centroid is the plain (weighted) mean of the
//! member coordinates. On a periodic axis the mean is computed on the unit
//! circle: each coordinate `c` maps to the angle `2*pi*c/extent`, the
//! weighted cosine/sine sums are accumulated, and the mean angle recovered
//! with `atan2` maps back to a coordinate modulo the extent. That makes the
//! centroid of a component straddling the wrap land inside the component
//! instead of on the far side of the box.
//!
//! When the members are spread so evenly around the ring that the resultant
//! vector vanishes, the mean angle carries no information. The fallback is
//! deterministic: the plain arithmetic mean of the member coordinates along
//! that axis. A label with no sites (or zero total weight) reports the
//! origin.

use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::{
    error::{LabelError, Result},
    lattice::Lattice,
};

/// Resultant magnitudes at or below this fraction of the total weight are
/// treated as degenerate.
const DEGENERATE_RESULTANT: f64 = 1e-8;

struct Accumulator {
    weight: f64,
    coord: Vec<f64>,
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl Accumulator {
    fn new(rank: usize) -> Self {
        Self {
            weight: 0.0,
            coord: vec![0.0; rank],
            cos: vec![0.0; rank],
            sin: vec![0.0; rank],
        }
    }
}

/// Computes the centroid of each requested label.
///
/// Returns one row per entry of `names`, in request order; each row holds
/// one coordinate per lattice axis. Background (label 0) is computed like
/// any other label.
///
/// # Errors
/// Returns [`LabelError::ShapeMismatch`] when `labels` does not have one
/// entry per lattice site.
///
/// # Examples
/// ```
/// use graupel_core::{labels_centers, Lattice};
///
/// let lattice = Lattice::new(&[1, 5], false).expect("valid shape");
/// let labels = [0, 1, 1, 1, 0];
/// let centers = labels_centers(&lattice, &labels, &[1]).expect("labels match shape");
/// assert_eq!(centers, vec![vec![0.0, 2.0]]);
/// ```
pub fn labels_centers(lattice: &Lattice, labels: &[i64], names: &[i64]) -> Result<Vec<Vec<f64>>> {
    centers_impl(lattice, labels, None, names)
}

/// Computes the weighted centroid (center of mass) of each requested label.
///
/// Identical to [`labels_centers`] except every site contributes its weight
/// instead of 1.
///
/// # Errors
/// Returns [`LabelError::ShapeMismatch`] when `labels` or `weights` does not
/// have one entry per lattice site.
///
/// # Examples
/// ```
/// use graupel_core::{labels_centers_of_mass, Lattice};
///
/// let lattice = Lattice::new(&[1, 4], false).expect("valid shape");
/// let labels = [1, 1, 0, 0];
/// let weights = [1.0, 3.0, 0.0, 0.0];
/// let centers =
///     labels_centers_of_mass(&lattice, &labels, &weights, &[1]).expect("arrays match shape");
/// assert_eq!(centers, vec![vec![0.0, 0.75]]);
/// ```
pub fn labels_centers_of_mass(
    lattice: &Lattice,
    labels: &[i64],
    weights: &[f64],
    names: &[i64],
) -> Result<Vec<Vec<f64>>> {
    if weights.len() != lattice.len() {
        return Err(LabelError::ShapeMismatch {
            got: weights.len(),
            expected: lattice.len(),
        });
    }
    centers_impl(lattice, labels, Some(weights), names)
}

/// Marks each requested label at the floor of its centroid.
///
/// Returns a dense array that is 0 everywhere except at one site per
/// requested label, which carries the label itself. Labels without any
/// member sites are left unmarked. Downstream consumers use this to seed
/// cluster-collapsed statistics.
///
/// # Errors
/// Returns [`LabelError::ShapeMismatch`] when `labels` does not have one
/// entry per lattice site.
///
/// # Examples
/// ```
/// use graupel_core::{labels_centers_as_array, Lattice};
///
/// let lattice = Lattice::new(&[1, 5], false).expect("valid shape");
/// let labels = [0, 2, 2, 2, 0];
/// let marked = labels_centers_as_array(&lattice, &labels, &[2]).expect("labels match shape");
/// assert_eq!(marked, vec![0, 0, 2, 0, 0]);
/// ```
pub fn labels_centers_as_array(
    lattice: &Lattice,
    labels: &[i64],
    names: &[i64],
) -> Result<Vec<i64>> {
    let centers = labels_centers(lattice, labels, names)?;
    let sizes = crate::algebra::labels_sizes_of(labels, names);

    let mut out = vec![0i64; lattice.len()];
    for ((&name, center), size) in names.iter().zip(&centers).zip(sizes) {
        if size == 0 {
            continue;
        }
        let coords: Vec<usize> = center
            .iter()
            .zip(lattice.shape())
            // The nudge keeps an exactly-integer centroid from flooring one
            // site low when the circular mean carries rounding jitter.
            .map(|(&c, &extent)| ((c + 1e-9).floor() as usize).min(extent - 1))
            .collect();
        let index = lattice.ravel(&coords)?;
        out[index] = name;
    }
    Ok(out)
}

fn centers_impl(
    lattice: &Lattice,
    labels: &[i64],
    weights: Option<&[f64]>,
    names: &[i64],
) -> Result<Vec<Vec<f64>>> {
    if labels.len() != lattice.len() {
        return Err(LabelError::ShapeMismatch {
            got: labels.len(),
            expected: lattice.len(),
        });
    }

    let rank = lattice.rank();
    let shape = lattice.shape();

    let mut rows: HashMap<i64, usize> = HashMap::with_capacity(names.len());
    let mut accumulators: Vec<Accumulator> = Vec::with_capacity(names.len());
    for &name in names {
        rows.entry(name).or_insert_with(|| {
            accumulators.push(Accumulator::new(rank));
            accumulators.len() - 1
        });
    }

    let strides: Vec<usize> = {
        let mut strides = vec![1usize; rank];
        for axis in (0..rank.saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * shape[axis + 1];
        }
        strides
    };

    for (index, &label) in labels.iter().enumerate() {
        let Some(&row) = rows.get(&label) else {
            continue;
        };
        let weight = weights.map_or(1.0, |w| w[index]);
        let acc = &mut accumulators[row];
        acc.weight += weight;
        for axis in 0..rank {
            let coord = ((index / strides[axis]) % shape[axis]) as f64;
            acc.coord[axis] += weight * coord;
            if lattice.periodic()[axis] {
                let angle = TAU * coord / shape[axis] as f64;
                acc.cos[axis] += weight * angle.cos();
                acc.sin[axis] += weight * angle.sin();
            }
        }
    }

    Ok(names
        .iter()
        .map(|name| {
            let acc = &accumulators[rows[name]];
            finalize(lattice, acc)
        })
        .collect())
}

fn finalize(lattice: &Lattice, acc: &Accumulator) -> Vec<f64> {
    let rank = lattice.rank();
    if acc.weight == 0.0 {
        return vec![0.0; rank];
    }

    (0..rank)
        .map(|axis| {
            let extent = lattice.shape()[axis] as f64;
            let mean = acc.coord[axis] / acc.weight;
            if !lattice.periodic()[axis] {
                return mean;
            }
            let resultant = acc.cos[axis].hypot(acc.sin[axis]);
            if resultant <= DEGENERATE_RESULTANT * acc.weight.abs() {
                return mean;
            }
            let angle = acc.sin[axis].atan2(acc.cos[axis]);
            (angle / TAU * extent).rem_euclid(extent)
        })
        .collect()
}
