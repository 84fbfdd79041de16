use crate::distance::{distance_between, distance_miles, latitude_arc_miles};
use common::{position::Position, test_helper::catalog::get_nyc};

fn get_sample_positions() -> Vec<Position> {
    vec![
        get_nyc(),
        Position::new(40.7829, -73.9654),
        Position::new(-33.8688, 151.2093),
        Position::new(51.5074, -0.1278),
        Position::new(89.9, 179.9),
        Position::new(-89.9, -179.9),
        Position::new(0.0, 0.0),
    ]
}

#[test]
fn distance_is_symmetric() {
    let positions = get_sample_positions();
    for a in &positions {
        for b in &positions {
            assert_eq!(distance_between(a, b), distance_between(b, a));
        }
    }
}

#[test]
fn distance_to_itself_is_zero() {
    for pos in get_sample_positions() {
        assert_eq!(0.0, distance_between(&pos, &pos));
    }
}

#[test]
fn distance_is_never_negative() {
    let positions = get_sample_positions();
    for a in &positions {
        for b in &positions {
            assert!(distance_between(a, b) >= 0.0);
        }
    }
}

#[test]
fn distance_nyc_to_central_park() {
    let distance = distance_miles(40.7128, -74.0060, 40.7829, -73.9654);
    assert!((distance - 5.289).abs() < 0.01, "distance was {distance}");
}

#[test]
fn distance_london_to_paris() {
    let distance = distance_miles(51.5074, -0.1278, 48.8566, 2.3522);
    assert!((distance - 213.5).abs() < 1.0, "distance was {distance}");
}

#[test]
fn latitude_arc_is_a_lower_bound() {
    let positions = get_sample_positions();
    for a in &positions {
        for b in &positions {
            assert!(latitude_arc_miles(a, b) <= distance_between(a, b) + 1e-6);
        }
    }
}
