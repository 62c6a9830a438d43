#![allow(clippy::float_cmp)]

use super::*;

const TOLERANCE: f64 = 1e-6;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}

// =============================================================
// Degenerate inputs
// =============================================================

#[test]
fn empty_input_yields_nothing() {
    let mut path = sample_path(&[]);
    assert_eq!(path.sample_count(), 0);
    assert!(path.next().is_none());
}

#[test]
fn single_point_yields_itself() {
    let samples: Vec<Point> = sample_path(&[pt(4.0, 9.0)]).collect();
    assert_eq!(samples, vec![pt(4.0, 9.0)]);
}

#[test]
fn two_points_yield_straight_two_point_path() {
    let samples: Vec<Point> = sample_path(&[pt(0.0, 0.0), pt(10.0, 0.0)]).collect();
    assert_eq!(samples, vec![pt(0.0, 0.0), pt(10.0, 0.0)]);
}

// =============================================================
// Sample counts
// =============================================================

#[test]
fn sample_count_is_fifty_per_segment() {
    let three = [pt(0.0, 0.0), pt(5.0, 5.0), pt(10.0, 0.0)];
    assert_eq!(sample_path(&three).sample_count(), 100);

    let five = [
        pt(0.0, 0.0),
        pt(5.0, 5.0),
        pt(10.0, 0.0),
        pt(15.0, -5.0),
        pt(20.0, 0.0),
    ];
    assert_eq!(sample_path(&five).sample_count(), 200);
}

#[test]
fn iterator_yields_exactly_sample_count_points() {
    let ctrl = [pt(0.0, 0.0), pt(3.0, 8.0), pt(9.0, 2.0), pt(12.0, 7.0)];
    let path = sample_path(&ctrl);
    let expected = path.sample_count();
    assert_eq!(path.count(), expected);
}

#[test]
fn size_hint_is_exact() {
    let ctrl = [pt(0.0, 0.0), pt(3.0, 8.0), pt(9.0, 2.0)];
    let mut path = sample_path(&ctrl);
    assert_eq!(path.size_hint(), (100, Some(100)));
    path.next();
    assert_eq!(path.size_hint(), (99, Some(99)));
    assert_eq!(path.len(), 99);
}

// =============================================================
// Endpoint interpolation
// =============================================================

#[test]
fn endpoints_interpolated_three_points() {
    let ctrl = [pt(0.0, 0.0), pt(5.0, 10.0), pt(10.0, 0.0)];
    let samples: Vec<Point> = sample_path(&ctrl).collect();
    assert!(approx_eq(samples[0], ctrl[0]));
    assert!(approx_eq(*samples.last().unwrap(), ctrl[2]));
}

#[test]
fn endpoints_interpolated_four_points() {
    let ctrl = [pt(-3.0, 2.0), pt(1.0, 9.0), pt(6.0, -4.0), pt(11.0, 5.0)];
    let samples: Vec<Point> = sample_path(&ctrl).collect();
    assert!(approx_eq(samples[0], ctrl[0]));
    assert!(approx_eq(*samples.last().unwrap(), ctrl[3]));
}

#[test]
fn endpoints_interpolated_seven_points() {
    let ctrl = [
        pt(0.0, 0.0),
        pt(2.0, 6.0),
        pt(4.0, -1.0),
        pt(7.0, 3.0),
        pt(9.0, 9.0),
        pt(12.0, 4.0),
        pt(15.0, -2.0),
    ];
    let samples: Vec<Point> = sample_path(&ctrl).collect();
    assert!(approx_eq(samples[0], ctrl[0]));
    assert!(approx_eq(*samples.last().unwrap(), ctrl[6]));
}

// =============================================================
// Curve shape
// =============================================================

#[test]
fn colinear_control_points_stay_on_the_line() {
    // Basis functions sum to 1 inside the domain, so a convex combination
    // of points on y = 0 stays on y = 0.
    let ctrl = [pt(0.0, 0.0), pt(5.0, 0.0), pt(10.0, 0.0), pt(15.0, 0.0)];
    for sample in sample_path(&ctrl) {
        assert!(sample.y.abs() < TOLERANCE);
        assert!(sample.x >= -TOLERANCE && sample.x <= 15.0 + TOLERANCE);
    }
}

#[test]
fn samples_stay_inside_control_hull_bounds() {
    let ctrl = [pt(0.0, 0.0), pt(4.0, 8.0), pt(8.0, 8.0), pt(12.0, 0.0)];
    for sample in sample_path(&ctrl) {
        assert!(sample.x >= -TOLERANCE && sample.x <= 12.0 + TOLERANCE);
        assert!(sample.y >= -TOLERANCE && sample.y <= 8.0 + TOLERANCE);
    }
}

#[test]
fn symmetric_control_points_give_symmetric_midpoint() {
    let ctrl = [pt(0.0, 0.0), pt(5.0, 10.0), pt(10.0, 0.0)];
    let samples: Vec<Point> = sample_path(&ctrl).collect();
    // An odd sampling grid has no exact middle sample; check near-middle.
    let mid = samples[samples.len() / 2];
    assert!((mid.x - 5.0).abs() < 0.2);
    assert!(mid.y > 0.0);
}

#[test]
fn curve_does_not_interpolate_interior_points_in_general() {
    let ctrl = [
        pt(0.0, 0.0),
        pt(5.0, 10.0),
        pt(10.0, -10.0),
        pt(15.0, 10.0),
        pt(20.0, 0.0),
    ];
    let hits_interior = sample_path(&ctrl).any(|s| approx_eq(s, ctrl[2]));
    assert!(!hits_interior);
}

// =============================================================
// Restartability
// =============================================================

#[test]
fn rewind_restarts_from_the_beginning() {
    let ctrl = [pt(0.0, 0.0), pt(5.0, 5.0), pt(10.0, 0.0)];
    let mut path = sample_path(&ctrl);
    let first_run: Vec<Point> = path.by_ref().collect();
    assert!(path.next().is_none());

    path.rewind();
    let second_run: Vec<Point> = path.collect();
    assert_eq!(first_run, second_run);
}

#[test]
fn partially_consumed_path_rewinds_cleanly() {
    let ctrl = [pt(0.0, 0.0), pt(5.0, 5.0), pt(10.0, 0.0)];
    let mut path = sample_path(&ctrl);
    let first = path.next().unwrap();
    path.next();
    path.next();

    path.rewind();
    assert_eq!(path.next(), Some(first));
    assert_eq!(path.size_hint(), (99, Some(99)));
}
