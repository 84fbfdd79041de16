use crate::{
    Cli, create_script, parse_position,
    scripted_user::{Script, ScriptedUser},
};
use catalog::{CatalogSource, CatalogStore};
use clap::Parser;
use common::{
    criteria::{Mode, SportFilter},
    position::Position,
};
use location::{
    LocationServices, constant_location::ConstantGeolocation, static_geocoder::StaticGeocoder,
};
use map_view::{MapView, tracing_adapter::TracingMapAdapter};
use module_core::{EventBus, Module};
use std::time::Duration;
use view_state::{ViewState, config::ViewConfig};

fn get_script() -> Script {
    Script {
        mode: Mode::Play,
        sport_filter: SportFilter::All,
        radius_miles: 6.0,
        location: Some("New York".to_string()),
        current_location: false,
        select: Some("1".to_string()),
    }
}

async fn run_all(script: Script, device: Option<Position>) -> Result<(), ()> {
    let config = ViewConfig::default();
    let eb = EventBus::default();
    let mut view_state = ViewState::new(eb.context(), config.clone());
    let mut catalog = CatalogStore::new(CatalogSource::Builtin, eb.context());
    let mut location = LocationServices::new(
        eb.context(),
        StaticGeocoder::new_york(),
        ConstantGeolocation::new(device),
    );
    let mut map_view = MapView::new(eb.context(), TracingMapAdapter::new());
    let mut user = ScriptedUser::new(eb.context(), script, config);

    let results = tokio::time::timeout(Duration::from_secs(2), async {
        tokio::join!(
            view_state.run(),
            catalog.run(),
            location.run(),
            map_view.run(),
            user.run()
        )
    })
    .await
    .expect("Modules did not stop in time");
    assert_eq!(Ok(()), results.0);
    assert_eq!(Ok(()), results.1);
    assert_eq!(Ok(()), results.2);
    assert_eq!(Ok(()), results.3);
    results.4
}

#[test]
fn parse_valid_position() {
    assert_eq!(
        Ok(Position::new(40.7128, -74.006)),
        parse_position("40.7128, -74.006")
    );
}

#[test]
fn parse_invalid_position() {
    assert!(parse_position("40.7128").is_err());
    assert!(parse_position("north,-74").is_err());
    assert!(parse_position("95.0,-74").is_err());
}

#[test]
fn cli_defaults() {
    let cli = Cli::try_parse_from(["court_finder_headless"]).unwrap();
    assert_eq!(Mode::Play, cli.mode);
    assert_eq!(SportFilter::All, cli.sport);
    let script = create_script(&cli, &ViewConfig::default()).unwrap();
    assert_eq!(10.0, script.radius_miles);
    assert_eq!(None, script.location);
}

#[test]
fn cli_rejects_radius_outside_bounds() {
    let cli = Cli::try_parse_from(["court_finder_headless", "--radius", "80"]).unwrap();
    assert!(create_script(&cli, &ViewConfig::default()).is_err());
}

#[test]
fn cli_location_conflicts_with_current_location() {
    let result = Cli::try_parse_from([
        "court_finder_headless",
        "--location",
        "Brooklyn",
        "--current-location",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_mode_and_sport() {
    let cli = Cli::try_parse_from([
        "court_finder_headless",
        "--mode",
        "Tournament",
        "--sport",
        "pickleball",
        "--device-position",
        "40.7,-74.0",
    ])
    .unwrap();
    assert_eq!(Mode::Tournament, cli.mode);
    assert_eq!(SportFilter::Pickleball, cli.sport);
    assert_eq!(Some(Position::new(40.7, -74.0)), cli.device_position);
}

#[test_log::test(tokio::test)]
async fn scripted_search_and_selection_stops_all_modules() {
    assert_eq!(Ok(()), run_all(get_script(), None).await);
}

#[test_log::test(tokio::test)]
async fn scripted_current_location() {
    let script = Script {
        location: None,
        current_location: true,
        ..get_script()
    };
    let device = Position::new(40.745, -74.03);
    assert_eq!(Ok(()), run_all(script, Some(device)).await);
}

#[test_log::test(tokio::test)]
async fn unknown_location_fails_and_stops_all_modules() {
    let script = Script {
        location: Some("Atlantis".to_string()),
        ..get_script()
    };
    assert_eq!(Err(()), run_all(script, None).await);
}

#[test_log::test(tokio::test)]
async fn unavailable_device_position_fails() {
    let script = Script {
        location: None,
        current_location: true,
        ..get_script()
    };
    assert_eq!(Err(()), run_all(script, None).await);
}
