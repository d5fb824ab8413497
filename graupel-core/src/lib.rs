//! Graupel core library.
//!
//! Incremental connected-component ("cluster") labelling of 1-3D lattice
//! images with per-axis periodic boundaries, plus the label-identity algebra
//! needed to keep labellings comparable across incremental updates:
//! correspondence mapping, renaming, reordering, gap compaction, per-label
//! sizes and periodic-safe centroids, and unambiguous nearest-label
//! dilation.
//!
//! The [`Labeller`] grows a labelling site by site or in bulk and merges
//! touching components through a label-keyed union-find in which the
//! smaller numeric label always survives, so the output is deterministic
//! for any growth order. The free functions operate on plain `i64` label
//! arrays and are the hand-off surface towards statistical consumers, which
//! may assume a [`labels_prune`]d array is gap-free.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod algebra;
mod centers;
mod dilate;
mod error;
mod labeller;
mod lattice;

pub use crate::{
    algebra::{
        labels_map, labels_prune, labels_rename, labels_reorder, labels_sizes, labels_sizes_of,
    },
    centers::{labels_centers, labels_centers_as_array, labels_centers_of_mass},
    dilate::{dilate, dilate_per_label},
    error::{LabelError, LabelErrorCode, LatticeError, LatticeErrorCode, Result},
    labeller::{Labeller, clusters},
    lattice::Lattice,
};
