//! Lattice geometry: shapes, per-axis periodicity, and axis-aligned adjacency.
//!
//! A [`Lattice`] is validated once at construction so the labelling hot paths
//! never have to re-check extents or periodicity tables. Adjacency is the
//! nearest-neighbour stencil: one step along each axis in each direction,
//! wrapping modulo the extent on periodic axes. An axis of extent 1
//! contributes no neighbours at all, since wrapping would self-reference.

use crate::error::LatticeError;

/// Largest supported rank. The engine covers 1-3D images.
const MAX_RANK: usize = 3;

/// A d-dimensional lattice (d in 1..=3) with per-axis periodic boundaries.
///
/// Sites are addressed by flat row-major indices in `[0, len())`.
///
/// # Examples
/// ```
/// use graupel_core::Lattice;
///
/// let lattice = Lattice::new(&[4, 4], true).expect("valid shape");
/// assert_eq!(lattice.len(), 16);
/// assert_eq!(lattice.rank(), 2);
///
/// // Site 0 wraps to the opposite edge along both axes.
/// let mut neighbours = lattice.neighbors(0).expect("index in range");
/// neighbours.sort_unstable();
/// assert_eq!(neighbours, vec![1, 3, 4, 12]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    shape: Vec<usize>,
    periodic: Vec<bool>,
    strides: Vec<usize>,
    size: usize,
}

impl Lattice {
    /// Creates a lattice with the same periodicity on every axis.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidShape`] when `shape` is empty, has more
    /// than three axes, or contains a zero extent.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::Lattice;
    ///
    /// let lattice = Lattice::new(&[5, 5], false).expect("valid shape");
    /// assert_eq!(lattice.shape(), &[5, 5]);
    /// assert!(!lattice.periodic().iter().any(|&p| p));
    /// ```
    pub fn new(shape: &[usize], periodic: bool) -> Result<Self, LatticeError> {
        Self::with_periodic_axes(shape, &vec![periodic; shape.len()])
    }

    /// Creates a lattice with an explicit periodicity flag per axis.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidShape`] for an invalid shape and
    /// [`LatticeError::PeriodicityMismatch`] when `periodic` does not have one
    /// entry per axis.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::Lattice;
    ///
    /// let lattice = Lattice::with_periodic_axes(&[8, 3], &[true, false]).expect("valid");
    /// assert_eq!(lattice.periodic(), &[true, false]);
    /// ```
    pub fn with_periodic_axes(shape: &[usize], periodic: &[bool]) -> Result<Self, LatticeError> {
        if shape.is_empty() || shape.len() > MAX_RANK || shape.iter().any(|&n| n == 0) {
            return Err(LatticeError::InvalidShape {
                shape: shape.to_vec(),
            });
        }
        if periodic.len() != shape.len() {
            return Err(LatticeError::PeriodicityMismatch {
                axes: periodic.len(),
                rank: shape.len(),
            });
        }

        let mut strides = vec![1usize; shape.len()];
        for axis in (0..shape.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * shape[axis + 1];
        }
        let size = shape.iter().product();

        Ok(Self {
            shape: shape.to_vec(),
            periodic: periodic.to_vec(),
            strides,
            size,
        })
    }

    /// Returns the per-axis extents.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the per-axis periodicity flags.
    #[must_use]
    pub fn periodic(&self) -> &[bool] {
        &self.periodic
    }

    /// Returns the number of axes.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` when the lattice has no sites.
    ///
    /// Extents are validated to be positive, so this is always `false`; it
    /// exists to satisfy the conventional `len`/`is_empty` pairing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Converts a multi-index to a flat row-major index.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidShape`] when `coords` has the wrong
    /// rank and [`LatticeError::IndexOutOfRange`] when any coordinate
    /// exceeds its extent.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::Lattice;
    ///
    /// let lattice = Lattice::new(&[4, 4], true).expect("valid shape");
    /// assert_eq!(lattice.ravel(&[2, 3]).expect("in range"), 11);
    /// ```
    pub fn ravel(&self, coords: &[usize]) -> Result<usize, LatticeError> {
        if coords.len() != self.rank() {
            return Err(LatticeError::InvalidShape {
                shape: coords.to_vec(),
            });
        }
        let mut index = 0;
        for (axis, &coord) in coords.iter().enumerate() {
            if coord >= self.shape[axis] {
                return Err(LatticeError::IndexOutOfRange {
                    index: coord,
                    size: self.shape[axis],
                });
            }
            index += coord * self.strides[axis];
        }
        Ok(index)
    }

    /// Converts a flat row-major index to a multi-index.
    ///
    /// # Errors
    /// Returns [`LatticeError::IndexOutOfRange`] when `index >= len()`.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::Lattice;
    ///
    /// let lattice = Lattice::new(&[4, 4], true).expect("valid shape");
    /// assert_eq!(lattice.unravel(11).expect("in range"), vec![2, 3]);
    /// ```
    pub fn unravel(&self, index: usize) -> Result<Vec<usize>, LatticeError> {
        self.check_index(index)?;
        Ok(self
            .strides
            .iter()
            .zip(&self.shape)
            .map(|(&stride, &extent)| (index / stride) % extent)
            .collect())
    }

    /// Returns the flat indices of the axis-aligned neighbours of `index`.
    ///
    /// Along each axis the sites at distance one in both directions are
    /// returned. On a periodic axis the step wraps modulo the extent; on an
    /// aperiodic axis out-of-range neighbours are omitted. An axis of extent 1
    /// contributes no neighbours. On a periodic axis of extent 2 both
    /// directions reach the same site, which is then reported twice.
    ///
    /// # Errors
    /// Returns [`LatticeError::IndexOutOfRange`] when `index >= len()`.
    ///
    /// # Examples
    /// ```
    /// use graupel_core::Lattice;
    ///
    /// // Corner of an aperiodic lattice: only the two inward neighbours.
    /// let lattice = Lattice::new(&[4, 4], false).expect("valid shape");
    /// let mut neighbours = lattice.neighbors(0).expect("index in range");
    /// neighbours.sort_unstable();
    /// assert_eq!(neighbours, vec![1, 4]);
    /// ```
    pub fn neighbors(&self, index: usize) -> Result<Vec<usize>, LatticeError> {
        self.check_index(index)?;
        let mut out = Vec::with_capacity(2 * self.rank());
        self.push_neighbors(index, &mut out);
        Ok(out)
    }

    /// Validates a flat site index.
    ///
    /// # Errors
    /// Returns [`LatticeError::IndexOutOfRange`] when `index >= len()`.
    pub fn check_index(&self, index: usize) -> Result<(), LatticeError> {
        if index >= self.size {
            return Err(LatticeError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Appends the neighbours of an already-validated `index` to `out`.
    pub(crate) fn push_neighbors(&self, index: usize, out: &mut Vec<usize>) {
        for axis in 0..self.rank() {
            let extent = self.shape[axis];
            if extent == 1 {
                continue;
            }
            let stride = self.strides[axis];
            let coord = (index / stride) % extent;
            let wrap = self.periodic[axis];

            if coord > 0 {
                out.push(index - stride);
            } else if wrap {
                out.push(index + (extent - 1) * stride);
            }

            if coord + 1 < extent {
                out.push(index + stride);
            } else if wrap {
                out.push(index - (extent - 1) * stride);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Lattice;
    use crate::error::LatticeError;

    fn sorted_neighbors(lattice: &Lattice, index: usize) -> Vec<usize> {
        let mut out = lattice.neighbors(index).expect("index must be in range");
        out.sort_unstable();
        out
    }

    // -- construction -------------------------------------------------------

    #[rstest]
    #[case::empty(vec![])]
    #[case::zero_extent(vec![4, 0])]
    #[case::rank_four(vec![2, 2, 2, 2])]
    fn rejects_invalid_shapes(#[case] shape: Vec<usize>) {
        let err = Lattice::new(&shape, true).expect_err("shape must be rejected");
        assert_eq!(err, LatticeError::InvalidShape { shape });
    }

    #[rstest]
    fn rejects_periodicity_table_of_wrong_rank() {
        let err = Lattice::with_periodic_axes(&[4, 4], &[true])
            .expect_err("table length must be rejected");
        assert_eq!(err, LatticeError::PeriodicityMismatch { axes: 1, rank: 2 });
    }

    #[rstest]
    #[case::one_d(vec![7], 7)]
    #[case::two_d(vec![4, 5], 20)]
    #[case::three_d(vec![2, 3, 4], 24)]
    fn size_is_product_of_extents(#[case] shape: Vec<usize>, #[case] expected: usize) {
        let lattice = Lattice::new(&shape, false).expect("shape is valid");
        assert_eq!(lattice.len(), expected);
        assert!(!lattice.is_empty());
    }

    // -- ravel / unravel ----------------------------------------------------

    #[rstest]
    fn ravel_and_unravel_are_inverse() {
        let lattice = Lattice::new(&[3, 4, 5], true).expect("shape is valid");
        for index in 0..lattice.len() {
            let coords = lattice.unravel(index).expect("index in range");
            assert_eq!(lattice.ravel(&coords).expect("coords in range"), index);
        }
    }

    #[rstest]
    fn ravel_rejects_out_of_range_coordinate() {
        let lattice = Lattice::new(&[4, 4], true).expect("shape is valid");
        let err = lattice.ravel(&[4, 0]).expect_err("coordinate must be rejected");
        assert_eq!(err, LatticeError::IndexOutOfRange { index: 4, size: 4 });
    }

    #[rstest]
    fn unravel_rejects_out_of_range_index() {
        let lattice = Lattice::new(&[4, 4], true).expect("shape is valid");
        let err = lattice.unravel(16).expect_err("index must be rejected");
        assert_eq!(err, LatticeError::IndexOutOfRange { index: 16, size: 16 });
    }

    // -- adjacency ----------------------------------------------------------

    #[rstest]
    #[case::interior(5, vec![1, 4, 6, 9])]
    #[case::corner(0, vec![1, 4])]
    #[case::edge(3, vec![2, 7])]
    fn aperiodic_neighbors_omit_out_of_range(#[case] index: usize, #[case] expected: Vec<usize>) {
        let lattice = Lattice::new(&[4, 4], false).expect("shape is valid");
        assert_eq!(sorted_neighbors(&lattice, index), expected);
    }

    #[rstest]
    #[case::corner(0, vec![1, 3, 4, 12])]
    #[case::edge(3, vec![0, 2, 7, 15])]
    fn periodic_neighbors_wrap(#[case] index: usize, #[case] expected: Vec<usize>) {
        let lattice = Lattice::new(&[4, 4], true).expect("shape is valid");
        assert_eq!(sorted_neighbors(&lattice, index), expected);
    }

    #[rstest]
    fn mixed_periodicity_wraps_only_flagged_axis() {
        let lattice = Lattice::with_periodic_axes(&[4, 4], &[true, false]).expect("valid");
        // Top-left corner: row axis wraps to the bottom row, column axis does not.
        assert_eq!(sorted_neighbors(&lattice, 0), vec![1, 4, 12]);
    }

    #[rstest]
    fn one_dimensional_periodic_ring() {
        let lattice = Lattice::new(&[5], true).expect("shape is valid");
        assert_eq!(sorted_neighbors(&lattice, 0), vec![1, 4]);
        assert_eq!(sorted_neighbors(&lattice, 4), vec![0, 3]);
    }

    #[rstest]
    #[case::periodic(true)]
    #[case::aperiodic(false)]
    fn extent_one_axis_contributes_no_neighbors(#[case] periodic: bool) {
        let lattice = Lattice::new(&[1, 4], periodic).expect("shape is valid");
        // Only the second axis contributes; no self-reference from the
        // degenerate first axis.
        let neighbours = sorted_neighbors(&lattice, 0);
        assert!(!neighbours.contains(&0));
        if periodic {
            assert_eq!(neighbours, vec![1, 3]);
        } else {
            assert_eq!(neighbours, vec![1]);
        }
    }

    #[rstest]
    fn single_site_lattice_has_no_neighbors() {
        let lattice = Lattice::new(&[1], true).expect("shape is valid");
        assert!(sorted_neighbors(&lattice, 0).is_empty());
    }

    #[rstest]
    fn neighbors_rejects_out_of_range_index() {
        let lattice = Lattice::new(&[2, 2], true).expect("shape is valid");
        let err = lattice.neighbors(4).expect_err("index must be rejected");
        assert_eq!(err, LatticeError::IndexOutOfRange { index: 4, size: 4 });
    }

    #[rstest]
    fn three_dimensional_interior_has_six_neighbors() {
        let lattice = Lattice::new(&[3, 3, 3], false).expect("shape is valid");
        let centre = lattice.ravel(&[1, 1, 1]).expect("coords in range");
        assert_eq!(sorted_neighbors(&lattice, centre).len(), 6);
    }
}
