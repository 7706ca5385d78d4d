// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::Point2;

/// Twice the signed area of `abc`; positive when counterclockwise
pub fn orient_2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Unsigned triangle area
pub fn triangle_area_2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    orient_2d(a, b, c).abs() / 2.0
}

/// Corner angles at `a`, `b` and `c`, in degrees
pub fn triangle_angles_deg(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> [f64; 3] {
    [corner_angle(a, b, c), corner_angle(b, c, a), corner_angle(c, a, b)]
}

fn corner_angle(apex: &Point2<f64>, p: &Point2<f64>, q: &Point2<f64>) -> f64 {
    let u = p - apex;
    let v = q - apex;
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return 0.0;
    }
    rad_to_deg(clamp(u.dot(&v) / denom, -1.0, 1.0).acos())
}

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Clamp a value between min and max
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Convert radians to degrees
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0001, 0.001));
        assert!(!approx_eq(1.0, 1.1, 0.001));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_orientation_sign() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert!(orient_2d(&a, &b, &c) > 0.0);
        assert!(orient_2d(&a, &c, &b) < 0.0);
        assert_eq!(triangle_area_2d(&a, &c, &b), 0.5);
    }

    #[test]
    fn test_right_isoceles_angles() {
        let angles = triangle_angles_deg(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
        );
        assert!(approx_eq(angles[0], 90.0, 1e-9));
        assert!(approx_eq(angles[1], 45.0, 1e-9));
        assert!(approx_eq(angles[2], 45.0, 1e-9));
    }
}
