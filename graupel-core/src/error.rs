//! Error types for the graupel core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced when constructing or indexing a [`crate::Lattice`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LatticeError {
    /// The shape had no axes, more than three axes, or a zero extent.
    #[error("shape {shape:?} is not a 1-3D lattice with positive extents")]
    InvalidShape {
        /// The rejected shape as supplied by the caller.
        shape: Vec<usize>,
    },
    /// The per-axis periodicity table did not match the shape's rank.
    #[error("periodicity table has {axes} entries but the shape has {rank} axes")]
    PeriodicityMismatch {
        /// Number of periodicity flags supplied.
        axes: usize,
        /// Number of axes in the shape.
        rank: usize,
    },
    /// A flat site index was outside `[0, size)`.
    #[error("index {index} is out of range for a lattice of {size} sites")]
    IndexOutOfRange {
        /// The offending flat index.
        index: usize,
        /// Total number of sites in the lattice.
        size: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LatticeError`] variants.
    enum LatticeErrorCode for LatticeError {
        /// The shape had no axes, more than three axes, or a zero extent.
        InvalidShape => InvalidShape { .. } => "LATTICE_INVALID_SHAPE",
        /// The per-axis periodicity table did not match the shape's rank.
        PeriodicityMismatch => PeriodicityMismatch { .. } => "LATTICE_PERIODICITY_MISMATCH",
        /// A flat site index was outside the lattice.
        IndexOutOfRange => IndexOutOfRange { .. } => "LATTICE_INDEX_OUT_OF_RANGE",
    }
}

/// An error produced by label-array operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LabelError {
    /// A label (or mask, or weight) array did not match the lattice size.
    #[error("array has {got} sites but the lattice has {expected}")]
    ShapeMismatch {
        /// Length of the array supplied by the caller.
        got: usize,
        /// Number of sites the lattice requires.
        expected: usize,
    },
    /// Two label arrays that must describe the same domain had different lengths.
    #[error("label arrays have mismatched lengths: left={left}, right={right}")]
    LengthMismatch {
        /// Length of the left-hand array.
        left: usize,
        /// Length of the right-hand array.
        right: usize,
    },
    /// A label present in the array had no entry in the supplied rename table.
    #[error("label {label} has no entry in the rename table")]
    MissingLabel {
        /// The label without a table entry.
        label: i64,
    },
    /// The reorder table's length did not match the number of distinct labels.
    #[error("reorder table has {got} entries but {expected} distinct labels are present")]
    ReorderLength {
        /// Number of entries in the reorder table.
        got: usize,
        /// Number of distinct labels present in the array.
        expected: usize,
    },
    /// The reorder table named a label that is not present in the array.
    #[error("reorder table names label {label} which is not present")]
    ReorderUnknownLabel {
        /// The label named by the table but absent from the array.
        label: i64,
    },
    /// The reorder table named the same label twice.
    #[error("reorder table names label {label} more than once")]
    ReorderDuplicateLabel {
        /// The label that appears in more than one slot.
        label: i64,
    },
    /// A per-label table (e.g. dilation iteration counts) cannot index a
    /// negative label.
    #[error("label {label} is negative and cannot index a per-label table")]
    InvalidLabel {
        /// The negative label encountered.
        label: i64,
    },
    /// A per-label iteration table did not cover every label present.
    #[error("iteration table has {got} entries but labels run up to {max_label}")]
    IterationsLength {
        /// Number of entries in the iteration table.
        got: usize,
        /// Largest label present in the array.
        max_label: i64,
    },
    /// Two arrays passed to [`crate::labels_map`] do not label the same
    /// partition: one source label maps to two different destination labels.
    #[error("label {label} maps to both {first} and {second}; inputs do not label the same partition")]
    InconsistentPartition {
        /// The source label with conflicting destinations.
        label: i64,
        /// Destination label recorded first.
        first: i64,
        /// Conflicting destination label seen later.
        second: i64,
    },
    /// A lattice operation failed while processing a label array.
    #[error("lattice operation failed: {error}")]
    Lattice {
        /// Underlying lattice error bubbled up by the operation.
        #[from]
        error: LatticeError,
    },
}

define_error_codes! {
    /// Stable codes describing [`LabelError`] variants.
    enum LabelErrorCode for LabelError {
        /// A label (or mask, or weight) array did not match the lattice size.
        ShapeMismatch => ShapeMismatch { .. } => "LABELS_SHAPE_MISMATCH",
        /// Two label arrays that must describe the same domain had different lengths.
        LengthMismatch => LengthMismatch { .. } => "LABELS_LENGTH_MISMATCH",
        /// A label present in the array had no entry in the supplied rename table.
        MissingLabel => MissingLabel { .. } => "LABELS_MISSING_LABEL",
        /// The reorder table's length did not match the number of distinct labels.
        ReorderLength => ReorderLength { .. } => "LABELS_REORDER_LENGTH",
        /// The reorder table named a label that is not present in the array.
        ReorderUnknownLabel => ReorderUnknownLabel { .. } => "LABELS_REORDER_UNKNOWN_LABEL",
        /// The reorder table named the same label twice.
        ReorderDuplicateLabel => ReorderDuplicateLabel { .. } => "LABELS_REORDER_DUPLICATE_LABEL",
        /// A per-label table cannot index a negative label.
        InvalidLabel => InvalidLabel { .. } => "LABELS_INVALID_LABEL",
        /// A per-label iteration table did not cover every label present.
        IterationsLength => IterationsLength { .. } => "LABELS_ITERATIONS_LENGTH",
        /// Two arrays do not label the same partition.
        InconsistentPartition => InconsistentPartition { .. } => "LABELS_INCONSISTENT_PARTITION",
        /// A lattice operation failed while processing a label array.
        LatticeFailure => Lattice { .. } => "LABELS_LATTICE_FAILURE",
    }
}

impl LabelError {
    /// Retrieve the inner [`LatticeErrorCode`] when the error originated in a
    /// [`crate::Lattice`] operation.
    pub const fn lattice_code(&self) -> Option<LatticeErrorCode> {
        match self {
            Self::Lattice { error } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LabelError>;
