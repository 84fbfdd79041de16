// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{
    catalog::Catalog,
    entity::{Court, Sport, Tournament, TournamentLevel},
    place::Place,
    position::Position,
};
use chrono::NaiveDate;

pub fn get_courts_as_json<'a>() -> &'a str {
    include_str!("../../../assets/catalog/courts.json")
}

pub fn get_tournaments_as_json<'a>() -> &'a str {
    include_str!("../../../assets/catalog/tournaments.json")
}

/// Center of New York City, the default search location.
pub fn get_nyc() -> Position {
    Position {
        latitude: 40.7128,
        longitude: -74.0060,
    }
}

pub fn get_nyc_place() -> Place {
    Place::new("New York, New York, United States", get_nyc(), "New York")
}

pub fn get_court(
    id: &str,
    name: &str,
    sport: Sport,
    latitude: f64,
    longitude: f64,
) -> Court {
    Court {
        id: id.to_string(),
        name: name.to_string(),
        sport,
        location: Position {
            latitude,
            longitude,
        },
        address: String::new(),
        city: String::new(),
        state: String::new(),
        is_open: true,
        court_count: 1,
        surface: "Hard".to_string(),
        lighting: false,
    }
}

pub fn get_courts() -> Vec<Court> {
    vec![
        Court {
            id: "1".to_string(),
            name: "Central Park Tennis Courts".to_string(),
            sport: Sport::Tennis,
            location: Position {
                latitude: 40.7829,
                longitude: -73.9654,
            },
            address: "Central Park, New York, NY".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            is_open: true,
            court_count: 4,
            surface: "Hard".to_string(),
            lighting: true,
        },
        Court {
            id: "2".to_string(),
            name: "Brooklyn Bridge Park Courts".to_string(),
            sport: Sport::Both,
            location: Position {
                latitude: 40.7024,
                longitude: -73.9875,
            },
            address: "Brooklyn Bridge Park, Brooklyn, NY".to_string(),
            city: "Brooklyn".to_string(),
            state: "NY".to_string(),
            is_open: true,
            court_count: 6,
            surface: "Hard".to_string(),
            lighting: false,
        },
        Court {
            id: "3".to_string(),
            name: "Riverside Pickleball Club".to_string(),
            sport: Sport::Pickleball,
            location: Position {
                latitude: 40.7986,
                longitude: -73.9778,
            },
            address: "Riverside Park, New York, NY".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            is_open: false,
            court_count: 8,
            surface: "Hard".to_string(),
            lighting: true,
        },
        Court {
            id: "4".to_string(),
            name: "Queens Tennis Center".to_string(),
            sport: Sport::Tennis,
            location: Position {
                latitude: 40.7412,
                longitude: -73.8449,
            },
            address: "Flushing Meadows-Corona Park, Queens, NY".to_string(),
            city: "Queens".to_string(),
            state: "NY".to_string(),
            is_open: true,
            court_count: 10,
            surface: "Clay".to_string(),
            lighting: true,
        },
        Court {
            id: "5".to_string(),
            name: "Hoboken Tennis Club".to_string(),
            sport: Sport::Tennis,
            location: Position {
                latitude: 40.7434,
                longitude: -74.0324,
            },
            address: "Hoboken, NJ".to_string(),
            city: "Hoboken".to_string(),
            state: "NJ".to_string(),
            is_open: false,
            court_count: 2,
            surface: "Hard".to_string(),
            lighting: false,
        },
    ]
}

pub fn get_tournaments() -> Vec<Tournament> {
    vec![Tournament {
        id: "t1".to_string(),
        name: "NYC Summer Tennis Open".to_string(),
        sport: Sport::Tennis,
        location: Position {
            latitude: 40.7829,
            longitude: -73.9654,
        },
        address: "Central Park Tennis Center".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 7, 17).unwrap(),
        registration_deadline: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        level: TournamentLevel::All,
        price: 75.0,
        spots_available: 12,
        total_spots: 32,
    }]
}

/// The catalog shipped with the application.
pub fn get_catalog() -> Catalog {
    Catalog::new(get_courts(), get_tournaments())
}
