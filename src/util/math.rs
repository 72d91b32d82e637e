//! Angle helpers used by the rasterizer and the angle grid.

/// Reduces an angle in degrees to the range [0, 360).
pub(crate) fn wrap_deg_positive(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Computes sine and cosine for an angle in degrees.
///
/// Multiples of 90 degrees return exact values so that quarter turns map
/// integer coordinates onto integer coordinates.
pub(crate) fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    let wrapped = wrap_deg_positive(angle_deg);
    if wrapped == 0.0 {
        return (0.0, 1.0);
    }
    if wrapped == 90.0 {
        return (1.0, 0.0);
    }
    if wrapped == 180.0 {
        return (0.0, -1.0);
    }
    if wrapped == 270.0 {
        return (-1.0, 0.0);
    }
    wrapped.to_radians().sin_cos()
}

#[cfg(test)]
mod tests {
    use super::{sin_cos_deg, wrap_deg_positive};

    #[test]
    fn wrap_deg_positive_maps_to_expected_range() {
        assert_eq!(wrap_deg_positive(360.0), 0.0);
        assert_eq!(wrap_deg_positive(720.0), 0.0);
        assert!((wrap_deg_positive(-10.0) - 350.0).abs() < 1e-12);
        assert!((wrap_deg_positive(370.0) - 10.0).abs() < 1e-12);
        assert!(wrap_deg_positive(-1e-20) < 360.0);
    }

    #[test]
    fn sin_cos_deg_is_exact_on_quadrants() {
        assert_eq!(sin_cos_deg(0.0), (0.0, 1.0));
        assert_eq!(sin_cos_deg(360.0), (0.0, 1.0));
        assert_eq!(sin_cos_deg(90.0), (1.0, 0.0));
        assert_eq!(sin_cos_deg(-90.0), (-1.0, 0.0));
        assert_eq!(sin_cos_deg(540.0), (0.0, -1.0));
    }

    #[test]
    fn sin_cos_deg_matches_std_elsewhere() {
        let (sin, cos) = sin_cos_deg(30.0);
        assert!((sin - 0.5).abs() < 1e-12);
        assert!((cos - 3f64.sqrt() / 2.0).abs() < 1e-12);
    }
}
