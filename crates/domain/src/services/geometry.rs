//! Geometry kernel: great-circle distance and containment tests.
//!
//! All functions are pure and operate on degrees-based WGS84 coordinates.

use crate::models::coordinates::GeoCoordinates;

/// Earth mean radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle (Haversine) distance between two points, in meters.
///
/// Symmetric, and exactly zero for identical points.
pub fn distance(a: &GeoCoordinates, b: &GeoCoordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// True iff `point` lies within `radius_meters` of `center`, boundary
/// inclusive.
pub fn contains_circle(center: &GeoCoordinates, point: &GeoCoordinates, radius_meters: f64) -> bool {
    distance(center, point) <= radius_meters
}

/// Even-odd ray-casting containment test.
///
/// Returns false for degenerate polygons with fewer than 3 vertices. A point
/// lying exactly on an edge is classified by the classic algorithm's
/// incidental behavior; no additional boundary semantics are defined.
pub fn contains_polygon(vertices: &[GeoCoordinates], point: &GeoCoordinates) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = &vertices[i];
        let vj = &vertices[j];

        let crosses = (vi.latitude > point.latitude) != (vj.latitude > point.latitude);
        if crosses {
            let intersect_lon = (vj.longitude - vi.longitude) * (point.latitude - vi.latitude)
                / (vj.latitude - vi.latitude)
                + vi.longitude;
            if point.longitude < intersect_lon {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoCoordinates {
        GeoCoordinates::new(lat, lon)
    }

    #[test]
    fn test_distance_zero_for_identical_points() {
        let p = point(48.8566, 2.3522);
        assert_eq!(distance(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = point(40.7128, -74.0060);
        let b = point(51.5074, -0.1278);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn test_distance_known_value() {
        // One degree of latitude at the equator is roughly 111.2 km.
        let a = point(0.0, 0.0);
        let b = point(1.0, 0.0);
        let d = distance(&a, &b);
        assert!((d - 111_195.0).abs() < 100.0, "got {}", d);
    }

    #[test]
    fn test_distance_small_offset() {
        // 0.005 degrees of latitude is about 555 m.
        let a = point(0.0, 0.0);
        let b = point(0.005, 0.0);
        let d = distance(&a, &b);
        assert!((d - 556.0).abs() < 5.0, "got {}", d);
    }

    #[test]
    fn test_contains_circle_center_for_any_radius() {
        let c = point(10.0, 20.0);
        assert!(contains_circle(&c, &c, 0.0));
        assert!(contains_circle(&c, &c, 1.0));
        assert!(contains_circle(&c, &c, 1_000_000.0));
    }

    #[test]
    fn test_contains_circle_inside_and_outside() {
        let center = point(0.0, 0.0);
        let near = point(0.005, 0.0); // ~555 m
        let far = point(0.02, 0.0); // ~2220 m

        assert!(contains_circle(&center, &near, 1000.0));
        assert!(!contains_circle(&center, &far, 1000.0));
    }

    #[test]
    fn test_contains_circle_boundary_inclusive() {
        let center = point(0.0, 0.0);
        let p = point(0.005, 0.0);
        let exact = distance(&center, &p);
        assert!(contains_circle(&center, &p, exact));
    }

    #[test]
    fn test_contains_polygon_convex_square() {
        let square = vec![
            point(0.0, 0.0),
            point(0.0, 10.0),
            point(10.0, 10.0),
            point(10.0, 0.0),
        ];
        assert!(contains_polygon(&square, &point(5.0, 5.0)));
        assert!(!contains_polygon(&square, &point(15.0, 5.0)));
        assert!(!contains_polygon(&square, &point(-1.0, -1.0)));
    }

    #[test]
    fn test_contains_polygon_concave() {
        // L-shaped polygon; the notch at the upper right is outside.
        let shape = vec![
            point(0.0, 0.0),
            point(0.0, 10.0),
            point(5.0, 10.0),
            point(5.0, 5.0),
            point(10.0, 5.0),
            point(10.0, 0.0),
        ];
        assert!(contains_polygon(&shape, &point(2.0, 2.0)));
        assert!(contains_polygon(&shape, &point(7.0, 2.0)));
        assert!(!contains_polygon(&shape, &point(7.0, 7.0)));
    }

    #[test]
    fn test_contains_polygon_too_few_vertices() {
        let p = point(0.0, 0.0);
        assert!(!contains_polygon(&[], &p));
        assert!(!contains_polygon(&[point(1.0, 1.0)], &p));
        assert!(!contains_polygon(&[point(1.0, 1.0), point(2.0, 2.0)], &p));
    }

    #[test]
    fn test_contains_polygon_triangle() {
        let triangle = vec![point(0.0, 0.0), point(4.0, 0.0), point(0.0, 4.0)];
        assert!(contains_polygon(&triangle, &point(1.0, 1.0)));
        assert!(!contains_polygon(&triangle, &point(3.0, 3.0)));
    }
}
