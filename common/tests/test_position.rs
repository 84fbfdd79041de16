// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::Position;

fn get_position_as_json<'a>() -> &'a str {
    r#"
    {
        "lat": 40.7829,
        "lng": -73.9654
    }
    "#
}

fn get_position() -> Position {
    Position {
        latitude: 40.7829,
        longitude: -73.9654,
    }
}

#[test]
pub fn deserialize_position_from_json() {
    let pos = Position::from_json(get_position_as_json())
        .unwrap_or_else(|e| panic!("Failed to deserialize the raw json. Reason: {e}"));
    assert_eq!(pos, get_position());
}

#[test]
pub fn validate_coordinate_ranges() {
    assert!(get_position().is_valid());
    assert!(Position::new(90.0, -180.0).is_valid());
    assert!(!Position::new(90.5, 0.0).is_valid());
    assert!(!Position::new(0.0, 181.0).is_valid());
    assert!(!Position::new(f64::NAN, 0.0).is_valid());
}
