//! Broadcastable grid arrays derived from a set of axes.
//!
//! The grid properties of an axes container ([`centers`], [`edges`],
//! [`widths`]) produce one N-dimensional array per axis. Materializing all of
//! them densely costs `O(Π sizes)` memory, so this module keeps each array in
//! a *sparse* form by default: full length along its own axis, singleton
//! everywhere else, at `O(Σ sizes)` total. Densification is explicit and
//! opt-in via [`ArrayTuple::broadcast`].
//!
//! # Overview
//!
//! - [`GridArray`]: one member array, tagged [`Sparse`](GridArray::Sparse) or
//!   [`Dense`](GridArray::Dense)
//! - [`ArrayTuple`]: the ordered collection of mutually broadcast-compatible
//!   members, with element-wise [`map`](ArrayTuple::map) and ensemble
//!   [`reduce`](ArrayTuple::reduce)
//!
//! [`centers`]: crate::axes::AxesTuple::centers
//! [`edges`]: crate::axes::AxesTuple::edges
//! [`widths`]: crate::axes::AxesTuple::widths

use std::ops::Index;
use std::slice;

use ndarray::{Array1, ArrayD, ArrayViewD, IxDyn};

/// Shape errors raised by grid construction and densification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("member {member} has rank {got}, expected {expected}")]
    RankMismatch {
        member: usize,
        got: usize,
        expected: usize,
    },

    #[error(
        "member {member} is not broadcast-compatible: dimension {dim} has length {len}, \
         conflicting with length {expected}"
    )]
    ShapeConflict {
        member: usize,
        dim: usize,
        len: usize,
        expected: usize,
    },

    #[error("cannot broadcast shape {from:?} to {to:?}")]
    BroadcastIncompatible { from: Vec<usize>, to: Vec<usize> },
}

// =============================================================================
// GridArray
// =============================================================================

/// One N-dimensional member of a grid, tagged by representation.
///
/// A `Sparse` array stores only its 1-D values plus the axis they belong to;
/// its logical shape is singleton on every other dimension. A `Dense` array
/// is fully materialized. Both expose the same logical value through
/// [`view`](GridArray::view); only the memory layout differs.
#[derive(Debug, Clone, PartialEq)]
pub enum GridArray {
    /// Rank-`rank` array with `values.len()` on dimension `axis`, 1 elsewhere.
    Sparse {
        values: Array1<f64>,
        axis: usize,
        rank: usize,
    },
    /// Fully materialized array.
    Dense(ArrayD<f64>),
}

impl GridArray {
    /// Create a sparse member for `axis` of a rank-`rank` grid.
    ///
    /// # Example
    ///
    /// ```
    /// use ndarray::array;
    /// use ndhist_axes::GridArray;
    ///
    /// let g = GridArray::sparse(array![0.5, 1.5, 2.5], 0, 2);
    /// assert_eq!(g.shape(), vec![3, 1]);
    /// ```
    pub fn sparse(values: Array1<f64>, axis: usize, rank: usize) -> Self {
        debug_assert!(axis < rank, "sparse axis {axis} out of range for rank {rank}");
        GridArray::Sparse { values, axis, rank }
    }

    /// Wrap a fully materialized array.
    pub fn dense(data: ArrayD<f64>) -> Self {
        GridArray::Dense(data)
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        match self {
            GridArray::Sparse { rank, .. } => *rank,
            GridArray::Dense(data) => data.ndim(),
        }
    }

    /// Logical shape.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            GridArray::Sparse { values, axis, rank } => {
                let mut shape = vec![1; *rank];
                shape[*axis] = values.len();
                shape
            }
            GridArray::Dense(data) => data.shape().to_vec(),
        }
    }

    /// Zero-copy view of the logical array.
    pub fn view(&self) -> ArrayViewD<'_, f64> {
        match self {
            GridArray::Sparse { values, .. } => values
                .view()
                .into_shape_with_order(IxDyn(&self.shape()))
                .expect("contiguous 1-d values always reshape to the singleton grid shape"),
            GridArray::Dense(data) => data.view(),
        }
    }

    /// Materialize this member at the given dense shape.
    ///
    /// Every dimension of `self` must equal the target length or be a
    /// singleton; singleton dimensions are replicated.
    pub fn to_dense(&self, shape: &[usize]) -> Result<ArrayD<f64>, GridError> {
        let view = self.view();
        let broadcast =
            view.broadcast(IxDyn(shape))
                .ok_or_else(|| GridError::BroadcastIncompatible {
                    from: self.shape(),
                    to: shape.to_vec(),
                })?;
        Ok(broadcast.to_owned())
    }

    /// Apply `f` to every element, preserving the representation tag.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> GridArray {
        match self {
            GridArray::Sparse { values, axis, rank } => GridArray::Sparse {
                values: values.mapv(&f),
                axis: *axis,
                rank: *rank,
            },
            GridArray::Dense(data) => GridArray::Dense(data.mapv(&f)),
        }
    }
}

// =============================================================================
// ArrayTuple
// =============================================================================

/// The ensemble reductions supported by [`ArrayTuple::reduce`].
///
/// These operate jointly on the broadcast ensemble of all members, never
/// per member; per-member transforms go through [`ArrayTuple::map`] instead.
/// This split is the fixed precedence of the container: a reduction name
/// always means the ensemble operation, regardless of what a member could
/// compute under the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    Sum,
    Prod,
    Min,
    Max,
    Any,
    All,
}

/// An immutable, ordered, broadcast-compatible collection of grid arrays.
///
/// Member `i` corresponds 1:1 and in-order to axis `i` of the originating
/// axes container. The constructor enforces the invariant that all members
/// share a common broadcast shape: per dimension, every non-singleton extent
/// must agree.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use ndhist_axes::ArrayTuple;
///
/// let grid = ArrayTuple::outer(vec![array![0.5, 1.5, 2.5], array![0.25, 0.75]]);
/// assert_eq!(grid.broadcast_shape(), &[3, 2]);
/// assert_eq!(grid[0].shape(), vec![3, 1]);
/// assert_eq!(grid[1].shape(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTuple {
    members: Vec<GridArray>,
    /// Common broadcast shape, fixed at construction.
    shape: Vec<usize>,
}

impl ArrayTuple {
    /// Create a collection from arbitrary members, validating broadcast
    /// compatibility.
    ///
    /// Fails with [`GridError::RankMismatch`] if ranks differ, or
    /// [`GridError::ShapeConflict`] if two members disagree on a
    /// non-singleton dimension. All-or-nothing: no partial collection is
    /// ever observable.
    pub fn new(members: Vec<GridArray>) -> Result<Self, GridError> {
        let mut shape: Vec<usize> = Vec::new();
        for (i, member) in members.iter().enumerate() {
            let member_shape = member.shape();
            if i == 0 {
                shape = vec![1; member_shape.len()];
            }
            if member_shape.len() != shape.len() {
                return Err(GridError::RankMismatch {
                    member: i,
                    got: member_shape.len(),
                    expected: shape.len(),
                });
            }
            for (dim, (&len, slot)) in member_shape.iter().zip(shape.iter_mut()).enumerate() {
                if len == *slot || len == 1 {
                    continue;
                }
                if *slot == 1 {
                    *slot = len;
                    continue;
                }
                return Err(GridError::ShapeConflict {
                    member: i,
                    dim,
                    len,
                    expected: *slot,
                });
            }
        }
        Ok(Self { members, shape })
    }

    /// The sparse outer-product grid of K 1-D sequences.
    ///
    /// Member `i` is sparse along dimension `i` (matrix-style `ij` ordering:
    /// the first sequence varies along the first output dimension). Memory
    /// cost is `O(Σ lengths)`, not `O(Π lengths)`. Distinct sparse axes are
    /// always mutually compatible, so this cannot fail.
    pub fn outer(seqs: Vec<Array1<f64>>) -> Self {
        let rank = seqs.len();
        let shape = seqs.iter().map(Array1::len).collect();
        let members = seqs
            .into_iter()
            .enumerate()
            .map(|(axis, values)| GridArray::sparse(values, axis, rank))
            .collect();
        Self { members, shape }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&GridArray> {
        self.members.get(index)
    }

    /// Iterate over members in axis order.
    pub fn iter(&self) -> slice::Iter<'_, GridArray> {
        self.members.iter()
    }

    /// The common dense shape all members broadcast to.
    ///
    /// Empty for the empty collection (rank 0).
    pub fn broadcast_shape(&self) -> &[usize] {
        &self.shape
    }

    /// Materialize every member at the common dense shape.
    ///
    /// Identical logical values, dense memory layout. Idempotent: already
    /// dense members are copied unchanged.
    pub fn broadcast(&self) -> ArrayTuple {
        let members = self
            .members
            .iter()
            .map(|m| {
                let dense = m
                    .to_dense(&self.shape)
                    .expect("members validated broadcast-compatible at construction");
                GridArray::Dense(dense)
            })
            .collect();
        ArrayTuple {
            members,
            shape: self.shape.clone(),
        }
    }

    /// Apply `f` element-wise to every member, returning a new collection.
    ///
    /// This is the per-member forwarding operation; it never mutates and
    /// preserves each member's representation tag.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> ArrayTuple {
        ArrayTuple {
            members: self.members.iter().map(|m| m.map(&f)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Reduce jointly over the broadcast ensemble of all members.
    ///
    /// Every member is first broadcast (as a view, no copy) to the common
    /// dense shape, then the fold runs over all elements of all members as
    /// one combined operation. This is deliberately *not* a per-member
    /// reduction: replicated sparse values count once per dense position.
    ///
    /// [`Reduction::Any`]/[`Reduction::All`] treat nonzero as true and
    /// return 1.0/0.0. The empty collection yields the fold identity
    /// (`Sum` 0, `Prod` 1, `Min` +inf, `Max` -inf, `Any` 0, `All` 1).
    ///
    /// # Example
    ///
    /// ```
    /// use ndarray::array;
    /// use ndhist_axes::{ArrayTuple, Reduction};
    ///
    /// let grid = ArrayTuple::outer(vec![array![1.0, 2.0], array![10.0]]);
    /// // Dense ensemble is [[1], [2]] and [[10], [10]].
    /// assert_eq!(grid.reduce(Reduction::Sum), 23.0);
    /// assert_eq!(grid.reduce(Reduction::Max), 10.0);
    /// ```
    pub fn reduce(&self, op: Reduction) -> f64 {
        let mut acc = match op {
            Reduction::Sum => 0.0,
            Reduction::Prod => 1.0,
            Reduction::Min => f64::INFINITY,
            Reduction::Max => f64::NEG_INFINITY,
            Reduction::Any => 0.0,
            Reduction::All => 1.0,
        };
        for member in &self.members {
            let view = member.view();
            let broadcast = view
                .broadcast(IxDyn(&self.shape))
                .expect("members validated broadcast-compatible at construction");
            for &x in broadcast.iter() {
                acc = match op {
                    Reduction::Sum => acc + x,
                    Reduction::Prod => acc * x,
                    Reduction::Min => acc.min(x),
                    Reduction::Max => acc.max(x),
                    Reduction::Any => {
                        if x != 0.0 {
                            1.0
                        } else {
                            acc
                        }
                    }
                    Reduction::All => {
                        if x == 0.0 {
                            0.0
                        } else {
                            acc
                        }
                    }
                };
            }
        }
        acc
    }

    /// Ensemble sum. See [`reduce`](ArrayTuple::reduce).
    pub fn sum(&self) -> f64 {
        self.reduce(Reduction::Sum)
    }

    /// Ensemble product. See [`reduce`](ArrayTuple::reduce).
    pub fn prod(&self) -> f64 {
        self.reduce(Reduction::Prod)
    }

    /// Ensemble minimum. See [`reduce`](ArrayTuple::reduce).
    pub fn min(&self) -> f64 {
        self.reduce(Reduction::Min)
    }

    /// Ensemble maximum. See [`reduce`](ArrayTuple::reduce).
    pub fn max(&self) -> f64 {
        self.reduce(Reduction::Max)
    }

    /// True if any element of the broadcast ensemble is nonzero.
    pub fn any(&self) -> bool {
        self.reduce(Reduction::Any) != 0.0
    }

    /// True if every element of the broadcast ensemble is nonzero.
    pub fn all(&self) -> bool {
        self.reduce(Reduction::All) != 0.0
    }
}

impl Index<usize> for ArrayTuple {
    type Output = GridArray;

    fn index(&self, index: usize) -> &Self::Output {
        &self.members[index]
    }
}

impl<'a> IntoIterator for &'a ArrayTuple {
    type Item = &'a GridArray;
    type IntoIter = slice::Iter<'a, GridArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
