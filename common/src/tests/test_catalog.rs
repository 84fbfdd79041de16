use crate::{
    catalog::Catalog,
    criteria::Mode,
    entity::{EntityKind, Sport},
    test_helper::catalog::{get_catalog, get_court},
};

#[test]
fn entities_follow_mode() {
    let catalog = get_catalog();

    let courts = catalog.entities(Mode::Play);
    assert_eq!(5, courts.len());
    assert!(courts.iter().all(|e| e.kind() == EntityKind::Court));

    let tournaments = catalog.entities(Mode::Tournament);
    assert_eq!(1, tournaments.len());
    assert_eq!("t1", tournaments[0].id());
}

#[test]
fn entities_keep_catalog_order() {
    let catalog = get_catalog();
    let ids: Vec<String> = catalog
        .entities(Mode::Play)
        .iter()
        .map(|e| e.id().to_string())
        .collect();
    assert_eq!(vec!["1", "2", "3", "4", "5"], ids);
}

#[test]
fn default_catalog_is_empty() {
    let catalog = Catalog::default();
    assert!(catalog.is_empty());
    assert!(catalog.entities(Mode::Play).is_empty());
    assert!(catalog.entities(Mode::Tournament).is_empty());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "duplicate court id")]
fn duplicate_court_ids_are_rejected_in_debug_builds() {
    let _ = Catalog::new(
        vec![
            get_court("1", "A", Sport::Tennis, 40.0, -74.0),
            get_court("1", "B", Sport::Tennis, 40.1, -74.1),
        ],
        vec![],
    );
}
