//! Incremental connected-component labelling over a fixed lattice.
//!
//! The [`Labeller`] owns a dense label array and an active-site bitmap for
//! the shape fixed at construction, and grows the labelling site by site or
//! in bulk. Components that become connected by a new site are merged
//! through a label-identity union-find keyed on the labels themselves, with
//! the smaller numeric label surviving every merge. Merge propagation is
//! lazy: the stored array may carry merged-away labels internally, and the
//! [`Labeller::labels`] accessor resolves every entry to its canonical root,
//! so a read never shows two labels for one connected component.
//!
//! Growth is monotonic: sites only ever transition inactive to active.
//! [`Labeller::prune`] compacts the numeric gaps merges leave behind and
//! resets the union-find to a fresh one-to-one state.

mod union_find;

use tracing::{debug, instrument};

use self::union_find::LabelSet;
use crate::{
    algebra::labels_prune,
    error::{LabelError, LatticeError},
    lattice::Lattice,
};

/// Incremental, periodic-boundary-aware connected-component labeller.
///
/// # Examples
/// ```
/// use graupel_core::{Labeller, Lattice};
///
/// let lattice = Lattice::new(&[4, 4], true).expect("valid shape");
/// let mut labeller = Labeller::new(lattice);
///
/// // Four isolated sites: four singleton clusters.
/// labeller.add_points(&[0, 2, 8, 10]).expect("indices in range");
/// assert_eq!(labeller.cluster_count(), 4);
///
/// // Site 1 bridges the first two; label 2 is absorbed into label 1.
/// labeller.add_points(&[1]).expect("index in range");
/// assert_eq!(labeller.cluster_count(), 3);
/// let labels = labeller.labels();
/// assert_eq!(labels[0], labels[1]);
/// assert_eq!(labels[1], labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct Labeller {
    lattice: Lattice,
    labels: Vec<i64>,
    active: Vec<bool>,
    set: LabelSet,
    clusters: usize,
    neighbor_scratch: Vec<usize>,
    root_scratch: Vec<usize>,
}

impl Labeller {
    /// Creates an all-inactive labeller over `lattice`.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::{Labeller, Lattice};
    ///
    /// let lattice = Lattice::new(&[3, 3], false).expect("valid shape");
    /// let labeller = Labeller::new(lattice);
    /// assert_eq!(labeller.labels(), vec![0; 9]);
    /// assert_eq!(labeller.cluster_count(), 0);
    /// ```
    #[must_use]
    pub fn new(lattice: Lattice) -> Self {
        let size = lattice.len();
        Self {
            lattice,
            labels: vec![0; size],
            active: vec![false; size],
            set: LabelSet::new(),
            clusters: 0,
            neighbor_scratch: Vec::with_capacity(6),
            root_scratch: Vec::with_capacity(6),
        }
    }

    /// Returns the lattice this labeller operates on.
    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Returns the dense label array with every entry resolved to its
    /// canonical label.
    ///
    /// Inactive sites are 0; active sites carry the positive label of their
    /// connected component. Two active sites connected by a chain of
    /// adjacent active sites always read back the identical label.
    #[must_use]
    pub fn labels(&self) -> Vec<i64> {
        self.labels
            .iter()
            .map(|&raw| {
                if raw == 0 {
                    0
                } else {
                    self.set.resolve(raw as usize) as i64
                }
            })
            .collect()
    }

    /// Consumes the labeller and returns the canonicalised label array.
    #[must_use]
    pub fn into_labels(self) -> Vec<i64> {
        self.labels()
    }

    /// Returns the number of distinct clusters currently present.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters
    }

    /// Returns one more than the largest label allocated so far.
    ///
    /// Merged-away labels stay counted until [`Self::prune`] reclaims them.
    #[must_use]
    pub fn num_labels(&self) -> usize {
        self.set.len()
    }

    /// Activates the given sites in order, labelling each as it lands.
    ///
    /// A site with no active neighbours receives a fresh label; a site with
    /// active neighbours in exactly one component adopts that component's
    /// label; a site bridging several components merges them all into the
    /// one with the smallest canonical label. Already-active sites are
    /// skipped.
    ///
    /// All indices are validated before any site is activated, so a failed
    /// call leaves the labelling untouched.
    ///
    /// # Errors
    /// Returns [`LatticeError::IndexOutOfRange`] when any index is outside
    /// the lattice.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::{Labeller, Lattice};
    ///
    /// let lattice = Lattice::new(&[4, 4], true).expect("valid shape");
    /// let mut labeller = Labeller::new(lattice);
    /// labeller.add_points(&[0, 2, 8, 10]).expect("indices in range");
    /// assert_eq!(
    ///     labeller.labels(),
    ///     vec![1, 0, 2, 0, 0, 0, 0, 0, 3, 0, 4, 0, 0, 0, 0, 0],
    /// );
    /// ```
    pub fn add_points(&mut self, indices: &[usize]) -> Result<(), LatticeError> {
        for &index in indices {
            self.lattice.check_index(index)?;
        }
        for &index in indices {
            self.apply_point(index);
        }
        Ok(())
    }

    /// Activates every not-yet-active site where `mask` is true, visiting in
    /// row-major order.
    ///
    /// The final partition is independent of visitation order; the numeric
    /// label identities are not.
    ///
    /// # Errors
    /// Returns a shape-mismatch error when `mask` does not have one entry
    /// per lattice site.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::{Labeller, Lattice};
    ///
    /// let lattice = Lattice::new(&[2, 3], false).expect("valid shape");
    /// let mut labeller = Labeller::new(lattice);
    /// labeller
    ///     .add_image(&[true, true, false, false, false, true])
    ///     .expect("mask matches shape");
    /// assert_eq!(labeller.labels(), vec![1, 1, 0, 0, 0, 2]);
    /// ```
    #[instrument(
        name = "labeller.add_image",
        err,
        skip(self, mask),
        fields(shape = ?self.lattice.shape(), sites = mask.len()),
    )]
    pub fn add_image(&mut self, mask: &[bool]) -> Result<(), LabelError> {
        if mask.len() != self.lattice.len() {
            return Err(LabelError::ShapeMismatch {
                got: mask.len(),
                expected: self.lattice.len(),
            });
        }
        let mut activated = 0usize;
        for (index, &on) in mask.iter().enumerate() {
            if on && !self.active[index] {
                self.apply_point(index);
                activated += 1;
            }
        }
        debug!(activated, clusters = self.clusters, "image ingested");
        Ok(())
    }

    /// Activates the given sites in order and returns checkpoint offsets.
    ///
    /// The labelling after this call is identical to
    /// [`Self::add_points`] applied to the same slice. The returned vector
    /// holds the offsets into `indices` whose application changed the number
    /// of distinct clusters: a fresh label was born, or existing clusters
    /// merged. Adopting an existing neighbour label, or re-adding an
    /// already-active site, is not a checkpoint.
    ///
    /// # Errors
    /// Returns [`LatticeError::IndexOutOfRange`] when any index is outside
    /// the lattice; no site is activated in that case.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::{Labeller, Lattice};
    ///
    /// let lattice = Lattice::new(&[1, 4], false).expect("valid shape");
    /// let mut labeller = Labeller::new(lattice);
    /// // Birth, adopt, birth, merge: checkpoints at 0, 2, and 3.
    /// let offsets = labeller.add_sequence(&[0, 1, 3, 2]).expect("indices in range");
    /// assert_eq!(offsets, vec![0, 2, 3]);
    /// assert_eq!(labeller.cluster_count(), 1);
    /// ```
    #[instrument(
        name = "labeller.add_sequence",
        err,
        skip(self, indices),
        fields(points = indices.len()),
    )]
    pub fn add_sequence(&mut self, indices: &[usize]) -> Result<Vec<usize>, LatticeError> {
        for &index in indices {
            self.lattice.check_index(index)?;
        }
        let mut offsets = Vec::new();
        for (offset, &index) in indices.iter().enumerate() {
            let before = self.clusters;
            self.apply_point(index);
            if self.clusters != before {
                offsets.push(offset);
            }
        }
        debug!(checkpoints = offsets.len(), clusters = self.clusters, "sequence ingested");
        Ok(offsets)
    }

    /// Renumbers the surviving labels to consecutive integers starting at 1,
    /// in ascending order of their current canonical value, and resets the
    /// union-find to a fresh one-to-one state.
    ///
    /// Idempotent: pruning an already-pruned labelling changes nothing.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::{Labeller, Lattice};
    ///
    /// let lattice = Lattice::new(&[1, 5], false).expect("valid shape");
    /// let mut labeller = Labeller::new(lattice);
    /// // Sites 0 and 2 become labels 1 and 2; site 1 merges them, leaving a gap.
    /// labeller.add_points(&[0, 2, 4, 1]).expect("indices in range");
    /// assert_eq!(labeller.labels(), vec![1, 1, 1, 0, 3]);
    /// labeller.prune();
    /// assert_eq!(labeller.labels(), vec![1, 1, 1, 0, 2]);
    /// assert_eq!(labeller.num_labels(), 3);
    /// ```
    #[instrument(name = "labeller.prune", skip(self), fields(labels = self.set.len()))]
    pub fn prune(&mut self) {
        let resolved = self.labels();
        self.labels = labels_prune(&resolved);
        let count = self.labels.iter().max().map_or(0, |&label| label as usize);
        self.set.reinit(count);
        self.clusters = count;
        debug!(clusters = count, "labels compacted");
    }

    /// Clears every site back to the all-inactive initial state.
    ///
    /// The shape and periodicity are retained; the label counter restarts
    /// at 1.
    pub fn reset(&mut self) {
        self.labels.fill(0);
        self.active.fill(false);
        self.set.reset();
        self.clusters = 0;
    }

    /// Activates one already-validated site.
    fn apply_point(&mut self, index: usize) {
        if self.active[index] {
            return;
        }
        self.active[index] = true;

        self.neighbor_scratch.clear();
        self.lattice.push_neighbors(index, &mut self.neighbor_scratch);

        self.root_scratch.clear();
        for i in 0..self.neighbor_scratch.len() {
            let neighbor = self.neighbor_scratch[i];
            if !self.active[neighbor] {
                continue;
            }
            let root = self.set.find(self.labels[neighbor] as usize);
            if !self.root_scratch.contains(&root) {
                self.root_scratch.push(root);
            }
        }

        match self.root_scratch.len() {
            0 => {
                let label = self.set.new_label();
                self.labels[index] = label as i64;
                self.clusters += 1;
            }
            1 => {
                self.labels[index] = self.root_scratch[0] as i64;
            }
            merged => {
                let survivor = self.root_scratch.iter().copied().min().unwrap_or(0);
                for i in 0..self.root_scratch.len() {
                    let root = self.root_scratch[i];
                    if root != survivor {
                        self.set.union(survivor, root);
                    }
                }
                self.labels[index] = survivor as i64;
                self.clusters -= merged - 1;
                debug!(site = index, survivor, merged, "merged neighbouring clusters");
            }
        }
    }
}

/// One-shot connected-component labelling of a boolean image.
///
/// Equivalent to constructing a [`Labeller`], adding the whole image, and
/// pruning: the returned array is gap-free, with labels numbered 1..
/// consecutively, so `max(label)` equals the number of clusters.
///
/// # Errors
/// Returns a shape-mismatch error when `mask` does not have one entry per
/// lattice site.
///
/// # Examples
/// ```
/// use graupel_core::{clusters, Lattice};
///
/// let lattice = Lattice::new(&[4, 4], true).expect("valid shape");
/// let mask = [
///     true, false, false, true, //
///     false, false, false, false, //
///     false, false, true, false, //
///     false, false, false, false,
/// ];
/// // The two corner sites wrap into one component on the periodic lattice.
/// let labels = clusters(&lattice, &mask).expect("mask matches shape");
/// assert_eq!(labels[0], 1);
/// assert_eq!(labels[3], 1);
/// assert_eq!(labels[10], 2);
/// ```
#[instrument(name = "labeller.clusters", err, skip(lattice, mask), fields(sites = mask.len()))]
pub fn clusters(lattice: &Lattice, mask: &[bool]) -> Result<Vec<i64>, LabelError> {
    let mut labeller = Labeller::new(lattice.clone());
    labeller.add_image(mask)?;
    labeller.prune();
    Ok(labeller.into_labels())
}
