//! Multi-dimensional cubic Hermite splines.
//!
//! A spline maps one axis to either constant leaf values or, recursively, to
//! nested splines over the remaining axes, so an N-dimensional function is a
//! tree of 1D interpolations. Each control point carries a value and a slope:
//! a zero slope gives a local plateau, a steep slope gives a cliff.
//!
//! Sampling never extrapolates. Outside the control range the boundary point's
//! value is returned (recursing through nested splines as usual).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SplineError {
    #[error("control point location {0} is already present")]
    DuplicateLocation(f32),
    #[error("control point location {0} is not finite")]
    NonFiniteLocation(f32),
    #[error("spline has no control points")]
    Empty,
    #[error("spline needs {needed} nested coordinates but {provided} are available")]
    ArityMismatch { needed: usize, provided: usize },
}

/// Value held by a control point: a constant leaf or a nested spline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplineValue {
    Constant(f32),
    Nested(MultiDimensionalSpline),
}

impl SplineValue {
    /// Evaluate the value, consuming one nested coordinate per level.
    ///
    /// A missing trailing coordinate samples the nested spline at `0.0`.
    pub fn sample(&self, nested: &[f32]) -> f32 {
        match self {
            Self::Constant(value) => *value,
            Self::Nested(spline) => match nested.split_first() {
                Some((head, rest)) => spline.sample(*head, rest),
                None => spline.sample(0.0, &[]),
            },
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    fn depth(&self) -> usize {
        match self {
            Self::Constant(_) => 0,
            Self::Nested(spline) => spline.depth(),
        }
    }

    fn extend_range(&self, range: &mut Option<(f32, f32)>) {
        match self {
            Self::Constant(value) => {
                *range = Some(match *range {
                    Some((lo, hi)) => (lo.min(*value), hi.max(*value)),
                    None => (*value, *value),
                });
            }
            Self::Nested(spline) => {
                for point in &spline.points {
                    point.value.extend_range(range);
                }
            }
        }
    }
}

/// A control point on one spline axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplinePoint {
    pub location: f32,
    pub value: SplineValue,
    /// Slope at this point; `None` until set explicitly or filled in by
    /// [`MultiDimensionalSpline::fill_missing_derivatives`]. Sampled as `0.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivative: Option<f32>,
}

impl SplinePoint {
    pub fn constant(location: f32, value: f32, derivative: f32) -> Self {
        Self {
            location,
            value: SplineValue::Constant(value),
            derivative: Some(derivative),
        }
    }

    pub fn nested(location: f32, spline: MultiDimensionalSpline, derivative: f32) -> Self {
        Self {
            location,
            value: SplineValue::Nested(spline),
            derivative: Some(derivative),
        }
    }

    /// A leaf point whose slope is left for the derivative pass
    pub fn constant_auto(location: f32, value: f32) -> Self {
        Self {
            location,
            value: SplineValue::Constant(value),
            derivative: None,
        }
    }

    pub fn derivative(&self) -> f32 {
        self.derivative.unwrap_or(0.0)
    }
}

/// Ordered set of control points, sorted ascending by location.
///
/// Locations are unique; this is what keeps the segment width of every
/// bracketing pair strictly positive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SplinePoint>", into = "Vec<SplinePoint>")]
pub struct MultiDimensionalSpline {
    points: Vec<SplinePoint>,
}

impl MultiDimensionalSpline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a control point, keeping the points sorted.
    ///
    /// # Panics
    /// If the location is not finite or already present. Duplicate locations are
    /// a construction bug and are rejected here rather than during sampling.
    pub fn add_point(&mut self, point: SplinePoint) -> &mut Self {
        if let Err(err) = self.try_add_point(point) {
            panic!("invalid spline control point: {}", err);
        }
        self
    }

    /// Checked insertion for points coming from configuration.
    pub fn try_add_point(&mut self, point: SplinePoint) -> Result<&mut Self, SplineError> {
        if !point.location.is_finite() {
            return Err(SplineError::NonFiniteLocation(point.location));
        }
        let index = self.points.partition_point(|p| p.location < point.location);
        if self
            .points
            .get(index)
            .is_some_and(|p| p.location == point.location)
        {
            return Err(SplineError::DuplicateLocation(point.location));
        }
        self.points.insert(index, point);
        Ok(self)
    }

    pub fn with_constant(mut self, location: f32, value: f32, derivative: f32) -> Self {
        self.add_point(SplinePoint::constant(location, value, derivative));
        self
    }

    pub fn with_nested(mut self, location: f32, spline: MultiDimensionalSpline, derivative: f32) -> Self {
        self.add_point(SplinePoint::nested(location, spline, derivative));
        self
    }

    pub fn points(&self) -> &[SplinePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of axes this spline consumes (1 for a flat spline).
    pub fn depth(&self) -> usize {
        1 + self.points.iter().map(|p| p.value.depth()).max().unwrap_or(0)
    }

    /// Check that `provided` nested coordinates cover every nesting level.
    pub fn validate_arity(&self, provided: usize) -> Result<(), SplineError> {
        let needed = self.depth() - 1;
        if provided < needed {
            return Err(SplineError::ArityMismatch { needed, provided });
        }
        Ok(())
    }

    /// Smallest and largest leaf value reachable through the tree.
    ///
    /// Hermite segments with non-zero slopes can overshoot their endpoints
    /// slightly, so this is the range of control values, not a hard bound.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut range = None;
        for point in &self.points {
            point.value.extend_range(&mut range);
        }
        range
    }

    /// Evaluate the spline at `primary`, passing `nested` down one level per
    /// nested spline. An empty spline yields `0.0`.
    pub fn sample(&self, primary: f32, nested: &[f32]) -> f32 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if primary.is_nan() || primary <= first.location {
            return first.value.sample(nested);
        }
        if primary >= last.location {
            return last.value.sample(nested);
        }

        // First point strictly above primary; bounds above guarantee 1..len
        let upper = self.points.partition_point(|p| p.location <= primary);
        let p1 = &self.points[upper - 1];
        let p2 = &self.points[upper];

        let width = p2.location - p1.location;
        let t = (primary - p1.location) / width;
        let v1 = p1.value.sample(nested);
        let v2 = p2.value.sample(nested);

        hermite(t, v1, v2, p1.derivative() * width, p2.derivative() * width)
    }

    /// Assign finite-difference slopes to leaf points without an explicit one.
    ///
    /// Forward difference at the first point, backward at the last, central in
    /// between. Nested neighbours contribute their value at the origin of the
    /// remaining axes. Branch points keep whatever slope they have, and nested
    /// splines are filled recursively.
    pub fn fill_missing_derivatives(&mut self) {
        let count = self.points.len();
        let representative: Vec<f32> = self.points.iter().map(|p| p.value.sample(&[])).collect();

        for i in 0..count {
            if let SplineValue::Nested(spline) = &mut self.points[i].value {
                spline.fill_missing_derivatives();
                continue;
            }
            if self.points[i].derivative.is_some() {
                continue;
            }

            let slope = if count < 2 {
                0.0
            } else {
                let (lo, hi) = if i == 0 {
                    (0, 1)
                } else if i == count - 1 {
                    (count - 2, count - 1)
                } else {
                    (i - 1, i + 1)
                };
                (representative[hi] - representative[lo])
                    / (self.points[hi].location - self.points[lo].location)
            };
            self.points[i].derivative = Some(slope);
        }
    }

    /// True when every point is a constant leaf.
    pub fn is_flat(&self) -> bool {
        self.points.iter().all(|p| p.value.is_leaf())
    }
}

impl TryFrom<Vec<SplinePoint>> for MultiDimensionalSpline {
    type Error = SplineError;

    fn try_from(points: Vec<SplinePoint>) -> Result<Self, Self::Error> {
        let mut spline = Self::new();
        for point in points {
            spline.try_add_point(point)?;
        }
        Ok(spline)
    }
}

impl From<MultiDimensionalSpline> for Vec<SplinePoint> {
    fn from(spline: MultiDimensionalSpline) -> Self {
        spline.points
    }
}

/// Cubic Hermite blend on `t ∈ [0, 1]`; slopes are already scaled by the
/// segment width.
fn hermite(t: f32, v1: f32, v2: f32, m1: f32, m2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * v1 + h10 * m1 + h01 * v2 + h11 * m2
}
