//! The per-dimension axis interface consumed by [`AxesTuple`].
//!
//! An axis describes the binning scheme of one histogram dimension: how many
//! bins it has, where their edges lie, and how coordinates map to bin indexes.
//! This crate does not construct axes itself; it consumes them through the
//! [`Axis`] trait and leaves binning semantics to the implementor.
//!
//! Concrete implementations for tests and demos live in [`crate::testing`].
//!
//! [`AxesTuple`]: crate::axes::AxesTuple

use std::fmt;

use ndarray::Array1;

use crate::axes::AxesError;

/// The result of looking up a single bin on an axis.
///
/// Continuous axes yield half-open intervals; category axes yield the
/// category payload itself.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisBin {
    /// A continuous bin covering `[lower, upper)`. Flow bins use an
    /// infinite endpoint.
    Interval { lower: f64, upper: f64 },
    /// A discrete category bin.
    Category(String),
}

/// A dynamically typed axis member value.
///
/// Used only by the generic member-forwarding path ([`Axis::get_member`] /
/// [`Axis::set_member`]), which gives uniform vectorized access to axis
/// metadata the container does not know about in advance (e.g. a label).
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Str(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl MetaValue {
    /// String payload, if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Str(s) => f.write_str(s),
            MetaValue::Float(x) => write!(f, "{x}"),
            MetaValue::Int(i) => write!(f, "{i}"),
            MetaValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Str(s.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Str(s)
    }
}

impl From<f64> for MetaValue {
    fn from(x: f64) -> Self {
        MetaValue::Float(x)
    }
}

impl From<i64> for MetaValue {
    fn from(i: i64) -> Self {
        MetaValue::Int(i)
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Bool(b)
    }
}

/// One histogram dimension's binning scheme.
///
/// The container treats implementors as opaque: it only relies on the
/// capability set below. Flow (under/overflow) bins are counted by
/// [`extent`](Axis::extent) but excluded from the 1-D sequences.
///
/// # Contract
///
/// - `centers().len() == size()` and `widths().len() == size()`
/// - `edges().len() == size() + 1`, strictly increasing
/// - `extent() >= size()`
///
/// [`AxesTuple::new`](crate::axes::AxesTuple::new) checks this contract at
/// construction and rejects any implementor that violates it.
pub trait Axis: fmt::Debug {
    /// Number of regular bins, excluding flow bins.
    fn size(&self) -> usize;

    /// Number of bins including under/overflow.
    fn extent(&self) -> usize;

    /// Bin center coordinates, length [`size`](Axis::size).
    fn centers(&self) -> Array1<f64>;

    /// Bin edge coordinates, length `size + 1`.
    fn edges(&self) -> Array1<f64>;

    /// Bin widths, length [`size`](Axis::size).
    fn widths(&self) -> Array1<f64>;

    /// Coordinate at a (possibly fractional) bin index.
    fn value(&self, index: f64) -> f64;

    /// The bin at an index. Negative indexes address the underflow bin,
    /// indexes at or past `size` the overflow bin, on axes that have them.
    fn bin(&self, index: i64) -> AxisBin;

    /// Bin index containing a coordinate. Returns `-1` for underflow and
    /// `size` for overflow.
    fn index(&self, value: f64) -> i64;

    /// Read a named metadata member.
    ///
    /// Implementors must support at least `"label"`. Unknown names fail with
    /// [`AxesError::Attribute`], which the container surfaces unchanged.
    fn get_member(&self, name: &str) -> Result<MetaValue, AxesError>;

    /// Write a named metadata member.
    fn set_member(&mut self, name: &str, value: MetaValue) -> Result<(), AxesError>;

    /// Object-safe clone, used when slicing an axes container.
    fn clone_axis(&self) -> Box<dyn Axis>;
}

impl Clone for Box<dyn Axis> {
    fn clone(&self) -> Self {
        self.clone_axis()
    }
}

/// Check an axis against the [`Axis`] contract.
///
/// Returns a human-readable reason on violation. The trait bound already
/// guarantees the capability set is *present*; this checks that the sequences
/// the axis reports are mutually consistent.
pub fn validate_axis(axis: &dyn Axis) -> Result<(), String> {
    let size = axis.size();

    let centers = axis.centers();
    if centers.len() != size {
        return Err(format!(
            "centers has length {}, expected size {size}",
            centers.len()
        ));
    }

    let edges = axis.edges();
    if edges.len() != size + 1 {
        return Err(format!(
            "edges has length {}, expected size + 1 = {}",
            edges.len(),
            size + 1
        ));
    }

    let widths = axis.widths();
    if widths.len() != size {
        return Err(format!(
            "widths has length {}, expected size {size}",
            widths.len()
        ));
    }

    if axis.extent() < size {
        return Err(format!(
            "extent {} is smaller than size {size}",
            axis.extent()
        ));
    }

    for (lo, hi) in edges.iter().zip(edges.iter().skip(1)) {
        if !(lo < hi) {
            return Err(format!("edges must be strictly increasing, got {lo} >= {hi}"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::UniformAxis;

    #[test]
    fn meta_value_conversions() {
        assert_eq!(MetaValue::from("pt"), MetaValue::Str("pt".to_owned()));
        assert_eq!(MetaValue::from(2.5), MetaValue::Float(2.5));
        assert_eq!(MetaValue::from(3i64), MetaValue::Int(3));
        assert_eq!(MetaValue::from(true), MetaValue::Bool(true));
        assert_eq!(MetaValue::from("pt").as_str(), Some("pt"));
        assert_eq!(MetaValue::from(2.5).as_str(), None);
    }

    #[test]
    fn meta_value_display() {
        assert_eq!(MetaValue::from("eta").to_string(), "eta");
        assert_eq!(MetaValue::from(7i64).to_string(), "7");
        assert_eq!(MetaValue::from(false).to_string(), "false");
    }

    #[test]
    fn valid_axis_passes() {
        let axis = UniformAxis::new(4, 0.0, 2.0);
        assert!(validate_axis(&axis).is_ok());
    }

    #[test]
    fn inconsistent_axis_is_rejected() {
        // An axis whose centers disagree with its size.
        #[derive(Debug, Clone)]
        struct Broken;

        impl Axis for Broken {
            fn size(&self) -> usize {
                3
            }
            fn extent(&self) -> usize {
                3
            }
            fn centers(&self) -> Array1<f64> {
                Array1::zeros(2)
            }
            fn edges(&self) -> Array1<f64> {
                Array1::linspace(0.0, 3.0, 4)
            }
            fn widths(&self) -> Array1<f64> {
                Array1::ones(3)
            }
            fn value(&self, index: f64) -> f64 {
                index
            }
            fn bin(&self, index: i64) -> AxisBin {
                AxisBin::Interval {
                    lower: index as f64,
                    upper: index as f64 + 1.0,
                }
            }
            fn index(&self, value: f64) -> i64 {
                value as i64
            }
            fn get_member(&self, name: &str) -> Result<MetaValue, AxesError> {
                Err(AxesError::Attribute { name: name.into() })
            }
            fn set_member(&mut self, name: &str, _value: MetaValue) -> Result<(), AxesError> {
                Err(AxesError::Attribute { name: name.into() })
            }
            fn clone_axis(&self) -> Box<dyn Axis> {
                Box::new(self.clone())
            }
        }

        let reason = validate_axis(&Broken).unwrap_err();
        assert!(reason.contains("centers"), "unexpected reason: {reason}");
    }
}
