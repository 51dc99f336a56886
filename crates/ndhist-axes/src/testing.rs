//! Concrete [`Axis`] implementations for tests and demos.
//!
//! The crate proper only consumes axes through the [`Axis`] trait; these
//! types exist so the test-suite and doctests have real binning schemes to
//! work with. They mirror the usual trio of histogram axes: uniform
//! (regular) binning, explicit variable edges, and string categories.

use ndarray::Array1;

use crate::axes::AxesError;
use crate::axis::{Axis, AxisBin, MetaValue};

// =============================================================================
// UniformAxis
// =============================================================================

/// Uniform binning over `[lower, upper)` with optional flow bins.
#[derive(Debug, Clone)]
pub struct UniformAxis {
    n_bins: usize,
    lower: f64,
    upper: f64,
    underflow: bool,
    overflow: bool,
    label: String,
}

impl UniformAxis {
    /// `n_bins` equal-width bins over `[lower, upper)`, with both flow bins.
    pub fn new(n_bins: usize, lower: f64, upper: f64) -> Self {
        debug_assert!(n_bins > 0, "a uniform axis needs at least one bin");
        debug_assert!(lower < upper, "lower must be below upper");
        Self {
            n_bins,
            lower,
            upper,
            underflow: true,
            overflow: true,
            label: String::new(),
        }
    }

    /// Select which flow bins the axis carries.
    pub fn with_flow(mut self, underflow: bool, overflow: bool) -> Self {
        self.underflow = underflow;
        self.overflow = overflow;
        self
    }

    /// Set the axis label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.n_bins as f64
    }
}

impl Axis for UniformAxis {
    fn size(&self) -> usize {
        self.n_bins
    }

    fn extent(&self) -> usize {
        self.n_bins + usize::from(self.underflow) + usize::from(self.overflow)
    }

    fn centers(&self) -> Array1<f64> {
        let w = self.bin_width();
        Array1::from_shape_fn(self.n_bins, |i| self.lower + (i as f64 + 0.5) * w)
    }

    fn edges(&self) -> Array1<f64> {
        Array1::linspace(self.lower, self.upper, self.n_bins + 1)
    }

    fn widths(&self) -> Array1<f64> {
        Array1::from_elem(self.n_bins, self.bin_width())
    }

    fn value(&self, index: f64) -> f64 {
        self.lower + index * self.bin_width()
    }

    fn bin(&self, index: i64) -> AxisBin {
        if index < 0 {
            return AxisBin::Interval {
                lower: f64::NEG_INFINITY,
                upper: self.lower,
            };
        }
        if index as usize >= self.n_bins {
            return AxisBin::Interval {
                lower: self.upper,
                upper: f64::INFINITY,
            };
        }
        AxisBin::Interval {
            lower: self.value(index as f64),
            upper: self.value(index as f64 + 1.0),
        }
    }

    fn index(&self, value: f64) -> i64 {
        if value < self.lower {
            return -1;
        }
        if value >= self.upper {
            return self.n_bins as i64;
        }
        // Clamp to guard against float round-off at the upper edge.
        (((value - self.lower) / self.bin_width()).floor() as i64).min(self.n_bins as i64 - 1)
    }

    fn get_member(&self, name: &str) -> Result<MetaValue, AxesError> {
        match name {
            "label" => Ok(MetaValue::Str(self.label.clone())),
            _ => Err(AxesError::Attribute { name: name.into() }),
        }
    }

    fn set_member(&mut self, name: &str, value: MetaValue) -> Result<(), AxesError> {
        match name {
            "label" => {
                self.label = value.to_string();
                Ok(())
            }
            _ => Err(AxesError::Attribute { name: name.into() }),
        }
    }

    fn clone_axis(&self) -> Box<dyn Axis> {
        Box::new(self.clone())
    }
}

// =============================================================================
// VariableAxis
// =============================================================================

/// Binning with an explicit, strictly increasing edge list.
#[derive(Debug, Clone)]
pub struct VariableAxis {
    edges: Vec<f64>,
    label: String,
}

impl VariableAxis {
    /// Bins delimited by `edges`; `edges.len() - 1` bins.
    ///
    /// Edges are taken as given; an out-of-order list is rejected later by
    /// container validation.
    pub fn new(edges: Vec<f64>) -> Self {
        debug_assert!(edges.len() >= 2, "a variable axis needs at least one bin");
        Self {
            edges,
            label: String::new(),
        }
    }

    /// Set the axis label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Axis for VariableAxis {
    fn size(&self) -> usize {
        self.edges.len() - 1
    }

    fn extent(&self) -> usize {
        self.size() + 2
    }

    fn centers(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.size(), |i| 0.5 * (self.edges[i] + self.edges[i + 1]))
    }

    fn edges(&self) -> Array1<f64> {
        Array1::from_vec(self.edges.clone())
    }

    fn widths(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.size(), |i| self.edges[i + 1] - self.edges[i])
    }

    fn value(&self, index: f64) -> f64 {
        // Interpolate within the bin; clamp fractional indexes to the axis.
        let clamped = index.clamp(0.0, self.size() as f64);
        let whole = (clamped.floor() as usize).min(self.size() - 1);
        let frac = clamped - whole as f64;
        self.edges[whole] + frac * (self.edges[whole + 1] - self.edges[whole])
    }

    fn bin(&self, index: i64) -> AxisBin {
        if index < 0 {
            return AxisBin::Interval {
                lower: f64::NEG_INFINITY,
                upper: self.edges[0],
            };
        }
        let i = index as usize;
        if i >= self.size() {
            return AxisBin::Interval {
                lower: self.edges[self.size()],
                upper: f64::INFINITY,
            };
        }
        AxisBin::Interval {
            lower: self.edges[i],
            upper: self.edges[i + 1],
        }
    }

    fn index(&self, value: f64) -> i64 {
        if value < self.edges[0] {
            return -1;
        }
        if value >= self.edges[self.size()] {
            return self.size() as i64;
        }
        self.edges.partition_point(|e| *e <= value) as i64 - 1
    }

    fn get_member(&self, name: &str) -> Result<MetaValue, AxesError> {
        match name {
            "label" => Ok(MetaValue::Str(self.label.clone())),
            _ => Err(AxesError::Attribute { name: name.into() }),
        }
    }

    fn set_member(&mut self, name: &str, value: MetaValue) -> Result<(), AxesError> {
        match name {
            "label" => {
                self.label = value.to_string();
                Ok(())
            }
            _ => Err(AxesError::Attribute { name: name.into() }),
        }
    }

    fn clone_axis(&self) -> Box<dyn Axis> {
        Box::new(self.clone())
    }
}

// =============================================================================
// CategoryAxis
// =============================================================================

/// String categories mapped to ordinal bins `0, 1, ...`, with an overflow
/// bin for unmatched values.
#[derive(Debug, Clone)]
pub struct CategoryAxis {
    categories: Vec<String>,
    label: String,
}

impl CategoryAxis {
    /// One bin per category, in order.
    pub fn new(categories: Vec<String>) -> Self {
        debug_assert!(!categories.is_empty(), "a category axis needs categories");
        Self {
            categories,
            label: String::new(),
        }
    }

    /// Set the axis label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Ordinal of a category name, or `size` (the overflow bin) if absent.
    pub fn ordinal(&self, category: &str) -> i64 {
        self.categories
            .iter()
            .position(|c| c == category)
            .map_or(self.categories.len() as i64, |i| i as i64)
    }
}

impl Axis for CategoryAxis {
    fn size(&self) -> usize {
        self.categories.len()
    }

    fn extent(&self) -> usize {
        self.size() + 1
    }

    fn centers(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.size(), |i| i as f64 + 0.5)
    }

    fn edges(&self) -> Array1<f64> {
        Array1::linspace(0.0, self.size() as f64, self.size() + 1)
    }

    fn widths(&self) -> Array1<f64> {
        Array1::ones(self.size())
    }

    fn value(&self, index: f64) -> f64 {
        // Coordinates of a category axis are the ordinals themselves.
        index
    }

    fn bin(&self, index: i64) -> AxisBin {
        let i = index.clamp(0, self.size() as i64 - 1) as usize;
        AxisBin::Category(self.categories[i].clone())
    }

    fn index(&self, value: f64) -> i64 {
        if value < 0.0 || value >= self.size() as f64 {
            return self.size() as i64;
        }
        value as i64
    }

    fn get_member(&self, name: &str) -> Result<MetaValue, AxesError> {
        match name {
            "label" => Ok(MetaValue::Str(self.label.clone())),
            _ => Err(AxesError::Attribute { name: name.into() }),
        }
    }

    fn set_member(&mut self, name: &str, value: MetaValue) -> Result<(), AxesError> {
        match name {
            "label" => {
                self.label = value.to_string();
                Ok(())
            }
            _ => Err(AxesError::Attribute { name: name.into() }),
        }
    }

    fn clone_axis(&self) -> Box<dyn Axis> {
        Box::new(self.clone())
    }
}
