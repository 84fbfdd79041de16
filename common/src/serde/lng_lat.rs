// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! (De)serializes a [`Position`] as a `[longitude, latitude]` pair.

use crate::position::Position;
use serde::{self, Deserialize, Deserializer, Serializer, ser::SerializeTuple};

pub fn serialize<S>(position: &Position, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut pair = serializer.serialize_tuple(2)?;
    pair.serialize_element(&position.longitude)?;
    pair.serialize_element(&position.latitude)?;
    pair.end()
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Position, D::Error>
where
    D: Deserializer<'de>,
{
    let [longitude, latitude] = <[f64; 2]>::deserialize(deserializer)?;
    Ok(Position {
        latitude,
        longitude,
    })
}
