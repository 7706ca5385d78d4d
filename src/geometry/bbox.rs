// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in the XY plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl BoundingBox {
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self { min, max }
    }

    /// Box that any point expands, with inverted infinite corners
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// All-zero box, used for inputs without points
    pub fn zero() -> Self {
        Self::new(Point2::origin(), Point2::origin())
    }

    /// Bounds of a set of points, or the all-zero box when there are none
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut bbox = Self::empty();
        let mut any = false;
        for (x, y) in points {
            bbox.expand_to_include(&Point2::new(x, y));
            any = true;
        }
        if any {
            bbox
        } else {
            Self::zero()
        }
    }

    pub fn expand_to_include(&mut self, point: &Point2<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn size(&self) -> Vector2<f64> {
        Vector2::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }

    /// Width times height
    pub fn area(&self) -> f64 {
        let size = self.size();
        size.x * size.y
    }

    /// `[min_x, min_y, max_x, max_y]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }

    /// Whether `point` lies inside or on the boundary
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Check if two bounding boxes are approximately equal within tolerance
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        (self.min.x - other.min.x).abs() < tolerance
            && (self.min.y - other.min.y).abs() < tolerance
            && (self.max.x - other.max.x).abs() < tolerance
            && (self.max.y - other.max.y).abs() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let mut bbox = BoundingBox::empty();
        bbox.expand_to_include(&Point2::new(1.0, 2.0));
        bbox.expand_to_include(&Point2::new(-1.0, -2.0));

        assert_eq!(bbox.min, Point2::new(-1.0, -2.0));
        assert_eq!(bbox.max, Point2::new(1.0, 2.0));
        assert_eq!(bbox.center(), Point2::new(0.0, 0.0));
        assert_eq!(bbox.area(), 8.0);
    }

    #[test]
    fn test_no_points_gives_zero_box() {
        let bbox = BoundingBox::from_points(std::iter::empty());
        assert_eq!(bbox.to_array(), [0.0; 4]);
        assert_eq!(bbox.area(), 0.0);
    }

    #[test]
    fn test_contains_boundary() {
        let bbox = BoundingBox::from_points([(0.0, 0.0), (2.0, 1.0)]);
        assert!(bbox.contains(&Point2::new(2.0, 0.5)));
        assert!(!bbox.contains(&Point2::new(2.1, 0.5)));
    }
}
