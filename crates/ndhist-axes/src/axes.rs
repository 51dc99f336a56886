//! The validated, ordered container of histogram axes.
//!
//! [`AxesTuple`] is the read/compute layer a histogram owns, one entry per
//! dimension. It validates membership at construction, exposes vectorized
//! per-axis scalars ([`size`], [`extent`]), derives sparse N-dimensional
//! grids ([`centers`], [`edges`], [`widths`]), answers one-point-per-call
//! lookups ([`value`], [`bin`], [`index`]), and forwards generic metadata
//! reads and writes to its members.
//!
//! It performs no binning or filling itself and owns no bin-count storage.
//!
//! [`size`]: AxesTuple::size
//! [`extent`]: AxesTuple::extent
//! [`centers`]: AxesTuple::centers
//! [`edges`]: AxesTuple::edges
//! [`widths`]: AxesTuple::widths
//! [`value`]: AxesTuple::value
//! [`bin`]: AxesTuple::bin
//! [`index`]: AxesTuple::index

use std::ops::{Index, Range};

use crate::axis::{validate_axis, Axis, AxisBin, MetaValue};
use crate::grid::ArrayTuple;

/// Errors raised by axes-container construction, lookups, and forwarding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AxesError {
    /// An element supplied at construction violates the [`Axis`] contract.
    #[error("invalid axis at position {index}: {reason}")]
    InvalidAxis { index: usize, reason: String },

    /// A per-axis operation received the wrong number of arguments.
    #[error("expected {expected} arguments (one per axis), got {got}")]
    Arity { expected: usize, got: usize },

    /// A forwarded member access named a member the axis does not have.
    #[error("axis has no member named {name:?}")]
    Attribute { name: String },
}

/// An ordered, fixed-length collection of axis descriptors.
///
/// The sequence itself is immutable: no insert, remove, or reorder after
/// construction. Individual axes remain mutable through the positional
/// member-forwarding path ([`set_member`](AxesTuple::set_member)), which
/// writes through to the axes, never to the container.
///
/// Grid properties allocate fresh arrays per call and share no state
/// between calls.
///
/// # Example
///
/// ```
/// use ndhist_axes::{Axis, AxesTuple};
/// use ndhist_axes::testing::UniformAxis;
///
/// let axes: Vec<Box<dyn Axis>> = vec![
///     Box::new(UniformAxis::new(3, 0.0, 3.0)),
///     Box::new(UniformAxis::new(2, 0.0, 1.0)),
/// ];
/// let axes = AxesTuple::new(axes)?;
///
/// assert_eq!(axes.size(), vec![3, 2]);
/// assert_eq!(axes.centers()[0].shape(), vec![3, 1]);
/// # Ok::<(), ndhist_axes::AxesError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AxesTuple {
    axes: Vec<Box<dyn Axis>>,
}

impl AxesTuple {
    /// Create a container, validating every element against the [`Axis`]
    /// contract.
    ///
    /// All-or-nothing: the first violation aborts construction with
    /// [`AxesError::InvalidAxis`] naming the offending position. The empty
    /// sequence is valid and describes a zero-dimensional histogram.
    pub fn new(axes: Vec<Box<dyn Axis>>) -> Result<Self, AxesError> {
        for (index, axis) in axes.iter().enumerate() {
            validate_axis(axis.as_ref())
                .map_err(|reason| AxesError::InvalidAxis { index, reason })?;
        }
        Ok(Self { axes })
    }

    /// Number of axes (histogram dimensions).
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Returns true for the zero-dimensional container.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Axis at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&dyn Axis> {
        self.axes.get(index).map(|a| a.as_ref())
    }

    /// Iterate over the axes in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Axis> {
        self.axes.iter().map(|a| a.as_ref())
    }

    /// A new container holding clones of the axes in `range`.
    ///
    /// Out-of-range bounds are clamped to the container length, matching
    /// sequence-slicing conventions. Members were validated at construction,
    /// so the sub-container needs no re-validation.
    pub fn slice(&self, range: Range<usize>) -> AxesTuple {
        let start = range.start.min(self.axes.len());
        let end = range.end.min(self.axes.len()).max(start);
        AxesTuple {
            axes: self.axes[start..end].to_vec(),
        }
    }

    // =========================================================================
    // Vectorized per-axis scalars
    // =========================================================================

    /// Each axis's bin count, in order.
    pub fn size(&self) -> Vec<usize> {
        self.axes.iter().map(|a| a.size()).collect()
    }

    /// Each axis's bin count including flow bins, in order.
    pub fn extent(&self) -> Vec<usize> {
        self.axes.iter().map(|a| a.extent()).collect()
    }

    // =========================================================================
    // Grid properties
    // =========================================================================

    /// Bin centers as a sparse outer-product grid, one member per axis.
    ///
    /// Member `i` has rank K with the axis's center count on dimension `i`
    /// and 1 elsewhere. Call [`ArrayTuple::broadcast`] to densify.
    pub fn centers(&self) -> ArrayTuple {
        ArrayTuple::outer(self.axes.iter().map(|a| a.centers()).collect())
    }

    /// Bin edges as a sparse outer-product grid, one member per axis.
    ///
    /// Edge sequences have length `size + 1`, so the grid's dense shape is
    /// one larger than the center grid's along every dimension.
    pub fn edges(&self) -> ArrayTuple {
        ArrayTuple::outer(self.axes.iter().map(|a| a.edges()).collect())
    }

    /// Bin widths as a sparse outer-product grid, one member per axis.
    pub fn widths(&self) -> ArrayTuple {
        ArrayTuple::outer(self.axes.iter().map(|a| a.widths()).collect())
    }

    // =========================================================================
    // Per-axis lookups (one argument per axis, one point per call)
    // =========================================================================

    /// Coordinate of each axis at the corresponding (fractional) bin index.
    ///
    /// Requires exactly one index per axis, otherwise [`AxesError::Arity`].
    /// Element `i` of the result is `axes[i].value(indexes[i])`.
    pub fn value(&self, indexes: &[f64]) -> Result<Vec<f64>, AxesError> {
        self.check_arity(indexes.len())?;
        Ok(self
            .axes
            .iter()
            .zip(indexes)
            .map(|(axis, &index)| axis.value(index))
            .collect())
    }

    /// The bin of each axis at the corresponding bin index.
    ///
    /// Requires exactly one index per axis, otherwise [`AxesError::Arity`].
    pub fn bin(&self, indexes: &[i64]) -> Result<Vec<AxisBin>, AxesError> {
        self.check_arity(indexes.len())?;
        Ok(self
            .axes
            .iter()
            .zip(indexes)
            .map(|(axis, &index)| axis.bin(index))
            .collect())
    }

    /// The bin index of each axis containing the corresponding coordinate.
    ///
    /// Requires exactly one coordinate per axis, otherwise
    /// [`AxesError::Arity`].
    pub fn index(&self, values: &[f64]) -> Result<Vec<i64>, AxesError> {
        self.check_arity(values.len())?;
        Ok(self
            .axes
            .iter()
            .zip(values)
            .map(|(axis, &value)| axis.index(value))
            .collect())
    }

    // =========================================================================
    // Generic member forwarding
    // =========================================================================

    /// Read a named member from every axis, aggregated in order.
    ///
    /// An axis lacking the member fails with [`AxesError::Attribute`],
    /// surfaced unchanged.
    pub fn get_member(&self, name: &str) -> Result<Vec<MetaValue>, AxesError> {
        self.axes.iter().map(|axis| axis.get_member(name)).collect()
    }

    /// Write a named member to every axis, distributing `values`
    /// positionally.
    ///
    /// Requires exactly one value per axis, otherwise [`AxesError::Arity`].
    /// Not transactional: if axis `i` rejects the write, axes `0..i` have
    /// already been written.
    pub fn set_member(&mut self, name: &str, values: Vec<MetaValue>) -> Result<(), AxesError> {
        self.check_arity(values.len())?;
        for (axis, value) in self.axes.iter_mut().zip(values) {
            axis.set_member(name, value)?;
        }
        Ok(())
    }

    /// Each axis's label, in order. Sugar over `get_member("label")`.
    pub fn labels(&self) -> Result<Vec<String>, AxesError> {
        Ok(self
            .get_member("label")?
            .into_iter()
            .map(|v| v.to_string())
            .collect())
    }

    fn check_arity(&self, got: usize) -> Result<(), AxesError> {
        if got != self.axes.len() {
            return Err(AxesError::Arity {
                expected: self.axes.len(),
                got,
            });
        }
        Ok(())
    }
}

impl Index<usize> for AxesTuple {
    type Output = dyn Axis;

    /// Single indexing returns the bare axis descriptor.
    fn index(&self, index: usize) -> &Self::Output {
        self.axes[index].as_ref()
    }
}
