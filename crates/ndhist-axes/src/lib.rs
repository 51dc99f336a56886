//! ndhist-axes: axes container and broadcastable grid arrays for
//! N-dimensional histograms.
//!
//! A histogram owns one [`AxesTuple`], an ordered, validated collection of
//! per-dimension axis descriptors. The container derives N-dimensional grids
//! of bin centers, edges, and widths as an [`ArrayTuple`]: one array per
//! axis, kept *sparse* (singleton on every foreign dimension) so K axes cost
//! `O(Σ sizes)` memory instead of `O(Π sizes)`. Densification is explicit
//! via [`ArrayTuple::broadcast`].
//!
//! This crate is a read/compute view: it performs no binning or filling,
//! owns no bin-count storage, and consumes axes only through the [`Axis`]
//! trait.
//!
//! # Key Types
//!
//! - [`AxesTuple`] - validated ordered axis container with per-axis lookups
//!   and member forwarding
//! - [`ArrayTuple`] / [`GridArray`] - broadcast-compatible grid arrays with
//!   element-wise [`map`](ArrayTuple::map) and ensemble
//!   [`reduce`](ArrayTuple::reduce)
//! - [`Axis`] - the capability set one dimension must provide
//!
//! # Example
//!
//! ```
//! use ndhist_axes::{AxesTuple, Axis};
//! use ndhist_axes::testing::UniformAxis;
//!
//! let axes: Vec<Box<dyn Axis>> = vec![
//!     Box::new(UniformAxis::new(3, 0.0, 3.0).with_flow(false, true)),
//!     Box::new(UniformAxis::new(2, 0.0, 1.0).with_flow(false, true)),
//! ];
//! let axes = AxesTuple::new(axes)?;
//!
//! assert_eq!(axes.size(), vec![3, 2]);
//! assert_eq!(axes.extent(), vec![4, 3]);
//!
//! // Sparse center grid: shapes (3, 1) and (1, 2).
//! let centers = axes.centers();
//! assert_eq!(centers[0].shape(), vec![3, 1]);
//! assert_eq!(centers[1].shape(), vec![1, 2]);
//!
//! // Explicit densification to the common (3, 2) shape.
//! let dense = centers.broadcast();
//! assert_eq!(dense[0].shape(), vec![3, 2]);
//!
//! // One coordinate per axis, one point per call.
//! assert_eq!(axes.value(&[1.0, 0.0])?, vec![1.0, 0.0]);
//! # Ok::<(), ndhist_axes::AxesError>(())
//! ```

// Re-export approx for users who want to compare grid values in their tests.
pub use approx;

pub mod axes;
pub mod axis;
pub mod grid;
pub mod testing;

pub use axes::{AxesError, AxesTuple};
pub use axis::{validate_axis, Axis, AxisBin, MetaValue};
pub use grid::{ArrayTuple, GridArray, GridError, Reduction};
