// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{GeolocationError, GeolocationProvider};
use async_trait::async_trait;
use common::position::Position;

/// A device that always reports the same position, or none at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantGeolocation {
    position: Option<Position>,
}

impl ConstantGeolocation {
    pub fn new(position: Option<Position>) -> Self {
        ConstantGeolocation { position }
    }
}

#[async_trait]
impl GeolocationProvider for ConstantGeolocation {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        match self.position {
            Some(position) if position.is_valid() => Ok(position),
            Some(position) => Err(GeolocationError::Invalid(position)),
            None => Err(GeolocationError::Unavailable),
        }
    }
}
