// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Custom serde representations shared by the data types.

pub mod lng_lat;
