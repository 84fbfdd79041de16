// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::{
    catalog::Catalog,
    test_helper::catalog::{
        get_catalog, get_courts, get_courts_as_json, get_tournaments, get_tournaments_as_json,
    },
};

#[test]
pub fn deserialize_catalog_assets() {
    let catalog = Catalog::from_json(get_courts_as_json(), get_tournaments_as_json())
        .unwrap_or_else(|e| panic!("Failed to deserialize the catalog. Reason: {e}"));
    assert_eq!(catalog.courts(), get_courts().as_slice());
    assert_eq!(catalog.tournaments(), get_tournaments().as_slice());
    assert_eq!(catalog, get_catalog());
}

#[test]
pub fn reject_malformed_catalog() {
    let result = Catalog::from_json(r#"[{ "id": "1" }]"#, "[]");
    assert!(result.is_err());
}
